//! Contract between a selection session and the widget that draws it.
//!
//! A session pushes state into a [`PresentationSurface`]; user input on
//! the widget flows back as calls on the session
//! ([`pick_dial`](crate::SelectionSession::pick_dial),
//! [`pick_swatch`](crate::SelectionSession::pick_swatch), ...).

use tint_color::{ColorShape, ColorValue};

use crate::recent::RecentSlot;
use crate::request::PresentationStyle;

/// Static labels around the picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chrome {
    pub title: String,
    pub confirm_label: String,
    pub cancel_label: String,
    pub style: PresentationStyle,
}

/// One rendered cell of a swatch grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwatchCell {
    pub color: ColorValue,
    pub hex: String,
    pub selected: bool,
    /// Check-mark color drawn on the cell while selected.
    pub tick: ColorValue,
}

pub trait PresentationSurface {
    /// Move the dial to `color`.
    fn set_color(&mut self, color: ColorValue);

    /// Color the dial currently points at.
    fn color(&self) -> ColorValue;

    fn show_chrome(&mut self, _chrome: &Chrome) {}

    /// Paint the preview card next to the dial.
    fn show_preview(&mut self, _color: ColorValue) {}

    /// Paint the recent-colors strip; never-filled slots use `empty`.
    fn show_recent(
        &mut self,
        _slots: &[RecentSlot],
        _empty: ColorValue,
        _shape: ColorShape,
    ) {
    }

    fn show_swatches(&mut self, _cells: &[SwatchCell], _shape: ColorShape) {}

    /// The session reached a terminal state; tear the modal down.
    fn close(&mut self) {}
}

/// In-memory surface that records whatever the session rendered.
#[derive(Debug, Clone)]
pub struct HeadlessSurface {
    color: ColorValue,
    chrome: Option<Chrome>,
    preview: Option<ColorValue>,
    recent: Vec<RecentSlot>,
    empty_slot_color: ColorValue,
    swatches: Vec<SwatchCell>,
    shape: ColorShape,
    closed: bool,
}

impl Default for HeadlessSurface {
    fn default() -> Self {
        Self {
            color: ColorValue::BLACK,
            chrome: None,
            preview: None,
            recent: Vec::new(),
            empty_slot_color: ColorValue::BLACK,
            swatches: Vec::new(),
            shape: ColorShape::default(),
            closed: false,
        }
    }
}

impl HeadlessSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn chrome(&self) -> Option<&Chrome> {
        self.chrome.as_ref()
    }

    pub fn preview(&self) -> Option<ColorValue> {
        self.preview
    }

    pub fn recent(&self) -> &[RecentSlot] {
        &self.recent
    }

    /// Colors painted in the recent strip, placeholders included.
    pub fn recent_colors(&self) -> Vec<ColorValue> {
        self.recent
            .iter()
            .map(|slot| slot.color_or(self.empty_slot_color))
            .collect()
    }

    pub fn swatches(&self) -> &[SwatchCell] {
        &self.swatches
    }

    pub fn shape(&self) -> ColorShape {
        self.shape
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

impl PresentationSurface for HeadlessSurface {
    fn set_color(&mut self, color: ColorValue) {
        self.color = color;
    }

    fn color(&self) -> ColorValue {
        self.color
    }

    fn show_chrome(&mut self, chrome: &Chrome) {
        self.chrome = Some(chrome.clone());
    }

    fn show_preview(&mut self, color: ColorValue) {
        self.preview = Some(color);
    }

    fn show_recent(
        &mut self,
        slots: &[RecentSlot],
        empty: ColorValue,
        shape: ColorShape,
    ) {
        self.recent = slots.to_vec();
        self.empty_slot_color = empty;
        self.shape = shape;
    }

    fn show_swatches(&mut self, cells: &[SwatchCell], shape: ColorShape) {
        self.swatches = cells.to_vec();
        self.shape = shape;
    }

    fn close(&mut self) {
        self.closed = true;
    }
}
