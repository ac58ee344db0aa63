use std::rc::Rc;

use serde::{Deserialize, Serialize};
use tint_color::{ColorValue, NEUTRAL_GRAY};

use crate::callbacks::SessionCallbacks;
use crate::recent::{RecentColorStore, RecentSlot};
use crate::request::{PresentationParams, PresentationStyle};
use crate::surface::{Chrome, PresentationSurface, SwatchCell};

/// Lifecycle of a selection session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Initializing,
    Presenting,
    Confirmed,
    Dismissed,
}

impl SessionState {
    pub fn is_terminal(self) -> bool {
        matches!(self, SessionState::Confirmed | SessionState::Dismissed)
    }
}

/// User and host events a session reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    DialChanged(ColorValue),
    RecentPicked(usize),
    SwatchPicked(usize),
    Confirm,
    Cancel,
    Teardown,
}

/// Everything the host keeps to rebuild a discarded session.
///
/// Callbacks are deliberately absent; a rebuilt session recovers them from
/// the reattachment registry through its tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionArguments {
    params: PresentationParams,
    tag: Option<String>,
}

impl SessionArguments {
    pub fn new(params: PresentationParams, tag: Option<String>) -> Self {
        Self { params, tag }
    }

    pub fn params(&self) -> &PresentationParams {
        &self.params
    }

    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    pub fn into_parts(self) -> (PresentationParams, Option<String>) {
        (self.params, self.tag)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn from_json(data: &str) -> serde_json::Result<Self> {
        serde_json::from_str(data)
    }
}

/// One modal color-selection interaction.
///
/// Created by [`PickerHost`](crate::PickerHost). Only a `Presenting`
/// session accepts input; `Confirmed` and `Dismissed` are final and every
/// later event is ignored. The dismiss callback runs exactly once per
/// session, after the result callback when both run.
pub struct SelectionSession<S: PresentationSurface> {
    params: PresentationParams,
    tag: Option<String>,
    callbacks: SessionCallbacks,
    store: Rc<RecentColorStore>,
    namespace: String,
    surface: S,
    state: SessionState,
    current_color: ColorValue,
    recent: Vec<RecentSlot>,
    swatches: Vec<ColorValue>,
    selected_swatch: Option<usize>,
}

impl<S: PresentationSurface> SelectionSession<S> {
    /// Build a session in `Initializing` with inert callbacks.
    pub(crate) fn initialize(
        params: PresentationParams,
        tag: Option<String>,
        store: Rc<RecentColorStore>,
        namespace: String,
        surface: S,
    ) -> Self {
        let default_color = parse_default_color(params.default_color());
        let current_color = default_color.unwrap_or(NEUTRAL_GRAY);

        let (recent, swatches, selected_swatch) = if params.style().is_grid()
        {
            let swatches = params.swatch_set();
            let selected = default_color.and_then(|color| {
                swatches.iter().position(|swatch| *swatch == color)
            });
            (Vec::new(), swatches, selected)
        } else {
            (store.slots(&namespace), Vec::new(), None)
        };

        Self {
            params,
            tag,
            callbacks: SessionCallbacks::inert(),
            store,
            namespace,
            surface,
            state: SessionState::Initializing,
            current_color,
            recent,
            swatches,
            selected_swatch,
        }
    }

    pub(crate) fn attach_callbacks(&mut self, callbacks: SessionCallbacks) {
        debug_assert_eq!(self.state, SessionState::Initializing);
        self.callbacks = callbacks;
    }

    /// Render the initial frame and start accepting input.
    pub(crate) fn start(&mut self) {
        if self.state != SessionState::Initializing {
            return;
        }

        self.surface.show_chrome(&Chrome {
            title: self.params.title().to_string(),
            confirm_label: self.params.confirm_label().to_string(),
            cancel_label: self.params.cancel_label().to_string(),
            style: self.params.style(),
        });

        if self.params.style().is_grid() {
            self.render_swatches();
        } else {
            self.surface.set_color(self.current_color);
            self.surface.show_preview(self.current_color);
            self.surface.show_recent(
                &self.recent,
                self.params.empty_slot_color(),
                self.params.shape(),
            );
        }

        self.state = SessionState::Presenting;
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn params(&self) -> &PresentationParams {
        &self.params
    }

    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    pub fn current_color(&self) -> ColorValue {
        self.current_color
    }

    pub fn selected_swatch(&self) -> Option<usize> {
        self.selected_swatch
    }

    pub fn selected_color(&self) -> Option<ColorValue> {
        self.selected_swatch
            .and_then(|index| self.swatches.get(index).copied())
    }

    pub fn recent_slots(&self) -> &[RecentSlot] {
        &self.recent
    }

    pub fn swatches(&self) -> &[ColorValue] {
        &self.swatches
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Arguments to rebuild this session with.
    pub fn arguments(&self) -> SessionArguments {
        SessionArguments::new(self.params.clone(), self.tag.clone())
    }

    /// Apply `event` and return the resulting state.
    pub fn handle(&mut self, event: SessionEvent) -> SessionState {
        match event {
            SessionEvent::DialChanged(color) => {
                self.pick_dial(color);
            },
            SessionEvent::RecentPicked(index) => {
                self.pick_recent(index);
            },
            SessionEvent::SwatchPicked(index) => {
                self.pick_swatch(index);
            },
            SessionEvent::Confirm => {
                self.confirm();
            },
            SessionEvent::Cancel => {
                self.cancel();
            },
            SessionEvent::Teardown => {
                self.teardown();
            },
        }
        self.state
    }

    /// The user moved the dial. Returns whether the pick was applied.
    pub fn pick_dial(&mut self, color: ColorValue) -> bool {
        if !self.accepts(PresentationStyle::Dial, "dial change") {
            return false;
        }

        self.current_color = color;
        self.surface.set_color(color);
        self.surface.show_preview(color);
        true
    }

    /// The user tapped a recent-color slot; empty slots are ignored.
    pub fn pick_recent(&mut self, index: usize) -> bool {
        if !self.accepts(PresentationStyle::Dial, "recent pick") {
            return false;
        }

        let Some(color) = self.recent.get(index).and_then(|slot| slot.filled())
        else {
            log::debug!("recent slot {index} is empty");
            return false;
        };

        self.current_color = color;
        self.surface.set_color(color);
        self.surface.show_preview(color);
        true
    }

    /// The user tapped a swatch of the grid.
    pub fn pick_swatch(&mut self, index: usize) -> bool {
        if !self.accepts_grid("swatch pick") {
            return false;
        }

        let Some(color) = self.swatches.get(index).copied() else {
            log::debug!("swatch {index} out of range");
            return false;
        };

        self.selected_swatch = Some(index);
        self.current_color = color;
        self.render_swatches();
        true
    }

    /// Confirm the selection.
    ///
    /// Dial sessions commit the dial color. Grid sessions commit the
    /// selected swatch; without a selection nothing is committed, no result
    /// is reported and the session is dismissed.
    pub fn confirm(&mut self) -> bool {
        if !self.accepts_any("confirm") {
            return false;
        }

        let chosen = if self.params.style().is_grid() {
            self.selected_color()
        } else {
            let color = self.surface.color();
            self.current_color = color;
            Some(color)
        };

        match chosen {
            Some(color) => {
                self.commit(color);
                self.state = SessionState::Confirmed;
                self.callbacks.notify_result(color);
                self.finish();
            },
            None => {
                log::debug!("confirm without a selected swatch");
                self.state = SessionState::Dismissed;
                self.finish();
            },
        }
        true
    }

    /// The user backed out of the modal.
    pub fn cancel(&mut self) -> bool {
        if !self.accepts_any("cancel") {
            return false;
        }

        self.state = SessionState::Dismissed;
        self.finish();
        true
    }

    /// The host destroyed the modal for good.
    pub fn teardown(&mut self) -> bool {
        if self.state.is_terminal() {
            log::debug!("teardown ignored in {:?}", self.state);
            return false;
        }

        self.state = SessionState::Dismissed;
        self.finish();
        true
    }

    /// Discard this session so the host can rebuild it later.
    ///
    /// No callback runs; transient picks are dropped and the rebuilt
    /// session starts again from its arguments.
    pub fn suspend(self) -> SessionArguments {
        if self.state.is_terminal() {
            log::debug!("suspending a finished session ({:?})", self.state);
        }
        SessionArguments::new(self.params, self.tag)
    }

    fn accepts_any(&self, action: &str) -> bool {
        if self.state == SessionState::Presenting {
            return true;
        }
        log::debug!("{action} ignored in {:?}", self.state);
        false
    }

    fn accepts(&self, style: PresentationStyle, action: &str) -> bool {
        if !self.accepts_any(action) {
            return false;
        }
        if self.params.style() != style {
            log::debug!("{action} ignored for {:?}", self.params.style());
            return false;
        }
        true
    }

    fn accepts_grid(&self, action: &str) -> bool {
        if !self.accepts_any(action) {
            return false;
        }
        if !self.params.style().is_grid() {
            log::debug!("{action} ignored for {:?}", self.params.style());
            return false;
        }
        true
    }

    fn commit(&self, color: ColorValue) {
        if let Err(err) = self.store.add_color(&self.namespace, color) {
            log::warn!("recent color {color} not saved: {err}");
        }
    }

    fn finish(&mut self) {
        self.surface.close();
        self.callbacks.notify_dismiss();
        log::debug!(
            "session {} finished as {:?}",
            self.tag.as_deref().unwrap_or("<untagged>"),
            self.state
        );
    }

    fn render_swatches(&mut self) {
        let cells = self.swatch_cells();
        self.surface.show_swatches(&cells, self.params.shape());
    }

    fn swatch_cells(&self) -> Vec<SwatchCell> {
        self.swatches
            .iter()
            .enumerate()
            .map(|(index, color)| SwatchCell {
                color: *color,
                hex: color.to_string(),
                selected: self.selected_swatch == Some(index),
                tick: if self.params.tick_per_swatch() {
                    color.contrasting()
                } else {
                    ColorValue::WHITE
                },
            })
            .collect()
    }
}

fn parse_default_color(text: Option<&str>) -> Option<ColorValue> {
    let text = text?;
    match text.parse() {
        Ok(color) => Some(color),
        Err(err) => {
            log::warn!("default color ignored, using neutral gray: {err}");
            None
        },
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use tint_color::{ColorShape, ColorSwatch, ColorValue, NEUTRAL_GRAY};

    use super::{SessionArguments, SessionEvent, SessionState};
    use crate::error::{Result, StoreError};
    use crate::host::PickerHost;
    use crate::recent::{RecentColorStore, RecentSlot};
    use crate::reattach::ReattachmentStore;
    use crate::request::{PresentationStyle, SelectionRequest};
    use crate::storage::RecentColorBackend;
    use crate::surface::{HeadlessSurface, PresentationSurface};

    type Events = Rc<RefCell<Vec<String>>>;

    fn host() -> PickerHost {
        PickerHost::new(
            Rc::new(RecentColorStore::in_memory()),
            Rc::new(ReattachmentStore::new()),
        )
    }

    fn color(hex: &str) -> ColorValue {
        hex.parse().expect("test colors are valid")
    }

    fn request(
        style: PresentationStyle,
        events: &Events,
    ) -> crate::request::SelectionRequestBuilder {
        let on_result = Rc::clone(events);
        let on_dismiss = Rc::clone(events);
        SelectionRequest::builder()
            .style(style)
            .on_result(move |color| {
                on_result.borrow_mut().push(format!("result:{color}"));
            })
            .on_dismiss(move || {
                on_dismiss.borrow_mut().push(String::from("dismiss"));
            })
    }

    #[test]
    fn given_no_default_when_presented_then_starts_from_neutral_gray() {
        let events = Events::default();
        let host = host();

        let session = host.present(
            request(PresentationStyle::Dial, &events)
                .build()
                .expect("request should build"),
            None,
            HeadlessSurface::new(),
        );

        assert_eq!(session.state(), SessionState::Presenting);
        assert_eq!(session.current_color(), NEUTRAL_GRAY);
        assert_eq!(session.surface().color(), NEUTRAL_GRAY);
        assert_eq!(session.surface().preview(), Some(NEUTRAL_GRAY));
        assert_eq!(session.recent_slots().len(), 5);
        assert!(session.recent_slots().iter().all(|slot| slot.is_empty()));
    }

    #[test]
    fn given_malformed_default_when_presented_then_falls_back_to_gray() {
        let events = Events::default();
        let session = host().present(
            request(PresentationStyle::Dial, &events)
                .default_color("#GGHHII")
                .build()
                .expect("malformed default is not a build error"),
            None,
            HeadlessSurface::new(),
        );

        assert_eq!(session.state(), SessionState::Presenting);
        assert_eq!(session.current_color(), NEUTRAL_GRAY);
    }

    #[test]
    fn given_dial_pick_when_confirmed_then_result_precedes_dismiss() {
        let events = Events::default();
        let host = host();
        let mut session = host.present(
            request(PresentationStyle::Dial, &events)
                .default_color("#3F51B5")
                .build()
                .expect("request should build"),
            Some("accent"),
            HeadlessSurface::new(),
        );

        assert!(session.pick_dial(color("#E91E63")));
        assert!(session.confirm());

        assert_eq!(session.state(), SessionState::Confirmed);
        assert_eq!(
            *events.borrow(),
            vec![String::from("result:#E91E63"), String::from("dismiss")]
        );
        assert_eq!(
            host.store().recent(host.namespace()),
            vec![color("#E91E63")]
        );
        assert!(session.surface().is_closed());
    }

    #[test]
    fn given_confirmed_session_when_events_repeat_then_callbacks_stay_once() {
        let events = Events::default();
        let host = host();
        let mut session = host.present(
            request(PresentationStyle::Dial, &events)
                .build()
                .expect("request should build"),
            None,
            HeadlessSurface::new(),
        );

        assert_eq!(
            session.handle(SessionEvent::Confirm),
            SessionState::Confirmed
        );
        assert_eq!(
            session.handle(SessionEvent::Confirm),
            SessionState::Confirmed
        );
        assert_eq!(
            session.handle(SessionEvent::Cancel),
            SessionState::Confirmed
        );
        assert_eq!(
            session.handle(SessionEvent::Teardown),
            SessionState::Confirmed
        );
        assert!(!session.pick_dial(ColorValue::WHITE));

        assert_eq!(events.borrow().len(), 2);
        assert_eq!(host.store().recent(host.namespace()).len(), 1);
    }

    #[test]
    fn given_cancel_when_handled_then_only_dismiss_fires_and_store_untouched() {
        let events = Events::default();
        let host = host();
        let mut session = host.present(
            request(PresentationStyle::Dial, &events)
                .build()
                .expect("request should build"),
            None,
            HeadlessSurface::new(),
        );
        session.pick_dial(color("#009688"));

        assert_eq!(
            session.handle(SessionEvent::Cancel),
            SessionState::Dismissed
        );
        assert_eq!(
            session.handle(SessionEvent::Confirm),
            SessionState::Dismissed
        );

        assert_eq!(*events.borrow(), vec![String::from("dismiss")]);
        assert!(host.store().recent(host.namespace()).is_empty());
    }

    #[test]
    fn given_host_teardown_when_presenting_then_session_is_dismissed_once() {
        let events = Events::default();
        let mut session = host().present(
            request(PresentationStyle::GridDialog, &events)
                .build()
                .expect("request should build"),
            None,
            HeadlessSurface::new(),
        );

        assert!(session.teardown());
        assert!(!session.teardown());

        assert_eq!(session.state(), SessionState::Dismissed);
        assert_eq!(*events.borrow(), vec![String::from("dismiss")]);
    }

    #[test]
    fn given_grid_without_selection_when_confirmed_then_no_result() {
        let events = Events::default();
        let host = host();
        let mut session = host.present(
            request(PresentationStyle::GridSheet, &events)
                .build()
                .expect("request should build"),
            None,
            HeadlessSurface::new(),
        );
        assert_eq!(session.selected_swatch(), None);

        session.confirm();

        assert_eq!(session.state(), SessionState::Dismissed);
        assert_eq!(*events.borrow(), vec![String::from("dismiss")]);
        assert!(host.store().recent(host.namespace()).is_empty());
    }

    #[test]
    fn given_grid_selection_when_confirmed_then_swatch_color_is_committed() {
        let events = Events::default();
        let host = host();
        let mut session = host.present(
            request(PresentationStyle::GridDialog, &events)
                .swatches(["#f6e58d", "#ffbe76", "#ff7979"])
                .build()
                .expect("request should build"),
            None,
            HeadlessSurface::new(),
        );

        assert!(session.pick_swatch(1));
        assert!(!session.pick_swatch(3));
        assert_eq!(session.selected_swatch(), Some(1));
        session.confirm();

        assert_eq!(session.state(), SessionState::Confirmed);
        assert_eq!(
            *events.borrow(),
            vec![String::from("result:#FFBE76"), String::from("dismiss")]
        );
        assert_eq!(
            host.store().recent(host.namespace()),
            vec![color("#FFBE76")]
        );
    }

    #[test]
    fn given_grid_default_in_palette_when_presented_then_preselected() {
        let events = Events::default();
        let session = host().present(
            request(PresentationStyle::GridDialog, &events)
                .swatch_tier(ColorSwatch::S300)
                .default_color("#4db6ac")
                .shape(ColorShape::Square)
                .build()
                .expect("request should build"),
            None,
            HeadlessSurface::new(),
        );

        assert_eq!(session.selected_swatch(), Some(8));
        assert_eq!(session.selected_color(), Some(color("#4DB6AC")));

        let cells = session.surface().swatches();
        assert_eq!(cells.len(), ColorSwatch::S300.hex_values().len());
        assert!(cells[8].selected);
        assert_eq!(cells.iter().filter(|cell| cell.selected).count(), 1);
        assert_eq!(session.surface().shape(), ColorShape::Square);
    }

    #[test]
    fn given_tick_per_swatch_when_rendered_then_tick_contrasts_each_cell() {
        let events = Events::default();
        let session = host().present(
            request(PresentationStyle::GridSheet, &events)
                .swatches(["#FFEB3B", "#1A237E"])
                .tick_per_swatch(true)
                .build()
                .expect("request should build"),
            None,
            HeadlessSurface::new(),
        );

        let cells = session.surface().swatches();
        assert_eq!(cells[0].tick, ColorValue::BLACK);
        assert_eq!(cells[1].tick, ColorValue::WHITE);
        assert_eq!(cells[1].hex, "#1A237E");
    }

    #[test]
    fn given_recent_history_when_recent_slot_picked_then_dial_follows() {
        let events = Events::default();
        let host = host();
        host.store()
            .add_color(host.namespace(), color("#795548"))
            .expect("memory store writes");
        let mut session = host.present(
            request(PresentationStyle::Dial, &events)
                .build()
                .expect("request should build"),
            None,
            HeadlessSurface::new(),
        );
        assert_eq!(
            session.surface().recent()[0],
            RecentSlot::Filled(color("#795548"))
        );

        assert!(!session.pick_recent(3));
        assert!(session.pick_recent(0));
        assert_eq!(session.surface().color(), color("#795548"));
        assert_eq!(session.surface().preview(), Some(color("#795548")));

        session.confirm();
        assert_eq!(
            *events.borrow(),
            vec![String::from("result:#795548"), String::from("dismiss")]
        );
    }

    #[test]
    fn given_custom_empty_slot_color_when_presented_then_strip_uses_it() {
        let events = Events::default();
        let host = host();
        host.store()
            .add_color(host.namespace(), color("#795548"))
            .expect("memory store writes");
        let placeholder = color("#FAFAFA");

        let session = host.present(
            request(PresentationStyle::Dial, &events)
                .empty_slot_color(placeholder)
                .build()
                .expect("request should build"),
            None,
            HeadlessSurface::new(),
        );

        assert_eq!(
            session.surface().recent_colors(),
            vec![
                color("#795548"),
                placeholder,
                placeholder,
                placeholder,
                placeholder
            ]
        );
    }

    #[test]
    fn given_mismatched_style_when_picking_then_input_is_ignored() {
        let events = Events::default();
        let host = host();
        let mut dial = host.present(
            request(PresentationStyle::Dial, &events)
                .build()
                .expect("request should build"),
            None,
            HeadlessSurface::new(),
        );
        let mut grid = host.present(
            request(PresentationStyle::GridDialog, &events)
                .build()
                .expect("request should build"),
            None,
            HeadlessSurface::new(),
        );

        assert!(!dial.pick_swatch(0));
        assert!(!grid.pick_dial(ColorValue::BLACK));
        assert!(!grid.pick_recent(0));
        assert_eq!(dial.state(), SessionState::Presenting);
        assert_eq!(grid.state(), SessionState::Presenting);
    }

    struct ReadOnlyBackend;

    impl RecentColorBackend for ReadOnlyBackend {
        fn load(&self, _namespace: &str) -> Result<Option<Vec<String>>> {
            Ok(None)
        }

        fn save(&self, _namespace: &str, _colors: &[String]) -> Result<()> {
            Err(StoreError::Unavailable(String::from("read-only")))
        }
    }

    #[test]
    fn given_failing_store_when_confirmed_then_callbacks_still_fire() {
        let events = Events::default();
        let host = PickerHost::new(
            Rc::new(RecentColorStore::new(ReadOnlyBackend)),
            Rc::new(ReattachmentStore::new()),
        );
        let mut session = host.present(
            request(PresentationStyle::Dial, &events)
                .default_color("#FF5722")
                .build()
                .expect("request should build"),
            None,
            HeadlessSurface::new(),
        );

        session.confirm();

        assert_eq!(session.state(), SessionState::Confirmed);
        assert_eq!(
            *events.borrow(),
            vec![String::from("result:#FF5722"), String::from("dismiss")]
        );
    }

    #[test]
    fn given_suspended_session_when_suspended_then_no_callback_fires() {
        let events = Events::default();
        let session = host().present(
            request(PresentationStyle::Dial, &events)
                .title("Background")
                .build()
                .expect("request should build"),
            Some("bg"),
            HeadlessSurface::new(),
        );

        let arguments = session.suspend();

        assert!(events.borrow().is_empty());
        assert_eq!(arguments.tag(), Some("bg"));
        assert_eq!(arguments.params().title(), "Background");

        let json = arguments.to_json().expect("arguments serialize");
        assert_eq!(
            SessionArguments::from_json(&json).expect("arguments parse"),
            arguments
        );
    }
}
