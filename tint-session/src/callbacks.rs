use std::fmt;
use std::rc::Rc;

use tint_color::ColorValue;

/// Receives the confirmed color.
pub type ResultCallback = Rc<dyn Fn(ColorValue)>;

/// Runs once when a session reaches a terminal state.
pub type DismissCallback = Rc<dyn Fn()>;

/// Caller callbacks attached to a selection session.
///
/// Callbacks close over caller context and are never serialized. They reach
/// a reconstructed session only through the
/// [`ReattachmentStore`](crate::ReattachmentStore).
#[derive(Clone, Default)]
pub struct SessionCallbacks {
    on_result: Option<ResultCallback>,
    on_dismiss: Option<DismissCallback>,
}

impl fmt::Debug for SessionCallbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionCallbacks")
            .field("on_result", &self.on_result.is_some())
            .field("on_dismiss", &self.on_dismiss.is_some())
            .finish()
    }
}

impl SessionCallbacks {
    pub fn new(
        on_result: Option<ResultCallback>,
        on_dismiss: Option<DismissCallback>,
    ) -> Self {
        Self {
            on_result,
            on_dismiss,
        }
    }

    /// Callbacks that do nothing.
    pub fn inert() -> Self {
        Self::default()
    }

    pub fn on_result(&self) -> Option<&ResultCallback> {
        self.on_result.as_ref()
    }

    pub fn on_dismiss(&self) -> Option<&DismissCallback> {
        self.on_dismiss.as_ref()
    }

    pub fn is_inert(&self) -> bool {
        self.on_result.is_none() && self.on_dismiss.is_none()
    }

    pub(crate) fn set_on_result(&mut self, callback: ResultCallback) {
        self.on_result = Some(callback);
    }

    pub(crate) fn set_on_dismiss(&mut self, callback: DismissCallback) {
        self.on_dismiss = Some(callback);
    }

    pub(crate) fn notify_result(&self, color: ColorValue) {
        if let Some(callback) = &self.on_result {
            callback(color);
        }
    }

    pub(crate) fn notify_dismiss(&self) {
        if let Some(callback) = &self.on_dismiss {
            callback();
        }
    }
}
