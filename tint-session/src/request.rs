use std::collections::HashMap;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use tint_color::{ColorShape, ColorSwatch, ColorValue};

use crate::callbacks::SessionCallbacks;
use crate::error::ConfigurationError;
use crate::recent::EMPTY_SLOT_COLOR;

pub const DEFAULT_TITLE: &str = "Pick Color";
pub const DEFAULT_CONFIRM_LABEL: &str = "OK";
pub const DEFAULT_CANCEL_LABEL: &str = "Cancel";

/// How the session is presented to the user.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize,
)]
pub enum PresentationStyle {
    /// Free color dial with a strip of recent colors.
    #[default]
    Dial,
    /// Swatch grid inside a dialog.
    GridDialog,
    /// Swatch grid inside a bottom sheet.
    GridSheet,
}

impl PresentationStyle {
    pub fn is_grid(self) -> bool {
        matches!(
            self,
            PresentationStyle::GridDialog | PresentationStyle::GridSheet
        )
    }
}

/// Looks up theme colors by key.
pub trait ColorResolver {
    fn resolve(&self, key: &str) -> Option<ColorValue>;
}

impl<F> ColorResolver for F
where
    F: Fn(&str) -> Option<ColorValue>,
{
    fn resolve(&self, key: &str) -> Option<ColorValue> {
        self(key)
    }
}

impl ColorResolver for HashMap<String, ColorValue> {
    fn resolve(&self, key: &str) -> Option<ColorValue> {
        self.get(key).copied()
    }
}

/// The serializable half of a selection request.
///
/// Everything here can be written out and read back when the host rebuilds
/// a session; callbacks live in [`SessionCallbacks`] instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PresentationParams {
    title: String,
    confirm_label: String,
    cancel_label: String,
    default_color: Option<String>,
    shape: ColorShape,
    style: PresentationStyle,
    swatches: Option<Vec<ColorValue>>,
    swatch_tier: ColorSwatch,
    tick_per_swatch: bool,
    #[serde(default = "default_empty_slot_color")]
    empty_slot_color: ColorValue,
}

fn default_empty_slot_color() -> ColorValue {
    EMPTY_SLOT_COLOR
}

impl Default for PresentationParams {
    fn default() -> Self {
        Self {
            title: String::from(DEFAULT_TITLE),
            confirm_label: String::from(DEFAULT_CONFIRM_LABEL),
            cancel_label: String::from(DEFAULT_CANCEL_LABEL),
            default_color: None,
            shape: ColorShape::default(),
            style: PresentationStyle::default(),
            swatches: None,
            swatch_tier: ColorSwatch::default(),
            tick_per_swatch: false,
            empty_slot_color: EMPTY_SLOT_COLOR,
        }
    }
}

impl PresentationParams {
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn confirm_label(&self) -> &str {
        &self.confirm_label
    }

    pub fn cancel_label(&self) -> &str {
        &self.cancel_label
    }

    /// Default color text as supplied; parsed when a session starts.
    pub fn default_color(&self) -> Option<&str> {
        self.default_color.as_deref()
    }

    pub fn shape(&self) -> ColorShape {
        self.shape
    }

    pub fn style(&self) -> PresentationStyle {
        self.style
    }

    /// Caller-supplied swatches, if any.
    pub fn swatches(&self) -> Option<&[ColorValue]> {
        self.swatches.as_deref()
    }

    pub fn swatch_tier(&self) -> ColorSwatch {
        self.swatch_tier
    }

    pub fn tick_per_swatch(&self) -> bool {
        self.tick_per_swatch
    }

    /// Placeholder painted in recent-color slots that were never filled.
    pub fn empty_slot_color(&self) -> ColorValue {
        self.empty_slot_color
    }

    /// Swatches a grid session shows: the caller's set or the material
    /// palette of the configured tier.
    pub fn swatch_set(&self) -> Vec<ColorValue> {
        match &self.swatches {
            Some(swatches) => swatches.clone(),
            None => self.swatch_tier.colors(),
        }
    }
}

/// Immutable description of one selection session.
#[derive(Debug, Clone)]
pub struct SelectionRequest {
    params: PresentationParams,
    callbacks: SessionCallbacks,
}

impl SelectionRequest {
    pub fn builder() -> SelectionRequestBuilder {
        SelectionRequestBuilder::new()
    }

    pub fn params(&self) -> &PresentationParams {
        &self.params
    }

    pub fn callbacks(&self) -> &SessionCallbacks {
        &self.callbacks
    }

    pub fn into_parts(self) -> (PresentationParams, SessionCallbacks) {
        (self.params, self.callbacks)
    }
}

#[derive(Debug, Clone)]
enum DefaultColor {
    Text(String),
    Resource(String),
}

/// Fluent configuration for a [`SelectionRequest`].
///
/// Setters may be called in any order; the last call for a field wins.
/// Validation happens once, in [`build`](Self::build).
pub struct SelectionRequestBuilder {
    params: PresentationParams,
    default_color: Option<DefaultColor>,
    swatches: Option<Vec<String>>,
    resolver: Option<Rc<dyn ColorResolver>>,
    callbacks: SessionCallbacks,
}

impl Default for SelectionRequestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectionRequestBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            params: PresentationParams::default(),
            default_color: None,
            swatches: None,
            resolver: None,
            callbacks: SessionCallbacks::inert(),
        }
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.params.title = title.into();
        self
    }

    #[must_use]
    pub fn confirm_label(mut self, label: impl Into<String>) -> Self {
        self.params.confirm_label = label.into();
        self
    }

    #[must_use]
    pub fn cancel_label(mut self, label: impl Into<String>) -> Self {
        self.params.cancel_label = label.into();
        self
    }

    /// Preselect a color given as text. The text is not validated here;
    /// a malformed value falls back to neutral gray when the session starts.
    #[must_use]
    pub fn default_color(mut self, color: impl Into<String>) -> Self {
        self.default_color = Some(DefaultColor::Text(color.into()));
        self
    }

    #[must_use]
    pub fn default_color_value(mut self, color: ColorValue) -> Self {
        self.default_color = Some(DefaultColor::Text(color.to_string()));
        self
    }

    /// Preselect a theme color, resolved through the configured
    /// [`ColorResolver`] when the request is built.
    #[must_use]
    pub fn default_color_resource(mut self, key: impl Into<String>) -> Self {
        self.default_color = Some(DefaultColor::Resource(key.into()));
        self
    }

    #[must_use]
    pub fn resolver(mut self, resolver: impl ColorResolver + 'static) -> Self {
        self.resolver = Some(Rc::new(resolver));
        self
    }

    #[must_use]
    pub fn shape(mut self, shape: ColorShape) -> Self {
        self.params.shape = shape;
        self
    }

    #[must_use]
    pub fn style(mut self, style: PresentationStyle) -> Self {
        self.params.style = style;
        self
    }

    /// Replace the built-in palette of grid sessions with these colors.
    #[must_use]
    pub fn swatches<I, S>(mut self, swatches: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.swatches = Some(swatches.into_iter().map(Into::into).collect());
        self
    }

    #[must_use]
    pub fn swatch_tier(mut self, tier: ColorSwatch) -> Self {
        self.params.swatch_tier = tier;
        self
    }

    /// Pick the check-mark color per swatch for contrast instead of using
    /// one color for the whole grid.
    #[must_use]
    pub fn tick_per_swatch(mut self, enabled: bool) -> Self {
        self.params.tick_per_swatch = enabled;
        self
    }

    #[must_use]
    pub fn empty_slot_color(mut self, color: ColorValue) -> Self {
        self.params.empty_slot_color = color;
        self
    }

    #[must_use]
    pub fn on_result(
        mut self,
        callback: impl Fn(ColorValue) + 'static,
    ) -> Self {
        self.callbacks.set_on_result(Rc::new(callback));
        self
    }

    #[must_use]
    pub fn on_dismiss(mut self, callback: impl Fn() + 'static) -> Self {
        self.callbacks.set_on_dismiss(Rc::new(callback));
        self
    }

    /// Validate the configuration and freeze it into a request.
    pub fn build(self) -> Result<SelectionRequest, ConfigurationError> {
        let Self {
            mut params,
            default_color,
            swatches,
            resolver,
            callbacks,
        } = self;

        params.default_color = match default_color {
            Some(DefaultColor::Text(text)) if !text.trim().is_empty() => {
                Some(text)
            },
            Some(DefaultColor::Text(_)) | None => None,
            Some(DefaultColor::Resource(key)) => {
                let resolved = resolver
                    .as_ref()
                    .and_then(|resolver| resolver.resolve(&key))
                    .ok_or(ConfigurationError::UnresolvedColor(key))?;
                Some(resolved.to_string())
            },
        };

        params.swatches = match swatches {
            Some(_) if !params.style.is_grid() => {
                log::debug!("swatch set ignored for dial presentation");
                None
            },
            Some(values) => Some(parse_swatches(values)?),
            None => None,
        };

        Ok(SelectionRequest { params, callbacks })
    }
}

fn parse_swatches(
    values: Vec<String>,
) -> Result<Vec<ColorValue>, ConfigurationError> {
    if values.is_empty() {
        return Err(ConfigurationError::EmptySwatchSet);
    }

    values
        .into_iter()
        .enumerate()
        .map(|(index, value)| {
            value.parse::<ColorValue>().map_err(|source| {
                ConfigurationError::InvalidSwatch {
                    index,
                    value,
                    source,
                }
            })
        })
        .collect()
}
