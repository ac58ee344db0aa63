use std::fmt;

use tint_color::ColorValue;

use crate::error::{Result, StoreError};
use crate::storage::{
    JsonFileBackend, MemoryBackend, RecentColorBackend, StoreOptions,
};

/// Default number of remembered colors per namespace.
pub const RECENT_COLORS_LIMIT: usize = 5;

/// Default color shown for recent-color slots that were never filled.
pub const EMPTY_SLOT_COLOR: ColorValue = ColorValue::rgb(0xE0, 0xE0, 0xE0);

/// One cell of the fixed-size recent-colors strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecentSlot {
    Filled(ColorValue),
    Empty,
}

impl RecentSlot {
    /// Color to paint for this slot with the default placeholder.
    pub fn color(self) -> ColorValue {
        self.color_or(EMPTY_SLOT_COLOR)
    }

    /// Color to paint for this slot, `empty` when it was never filled.
    pub fn color_or(self, empty: ColorValue) -> ColorValue {
        match self {
            RecentSlot::Filled(color) => color,
            RecentSlot::Empty => empty,
        }
    }

    pub fn filled(self) -> Option<ColorValue> {
        match self {
            RecentSlot::Filled(color) => Some(color),
            RecentSlot::Empty => None,
        }
    }

    pub fn is_empty(self) -> bool {
        matches!(self, RecentSlot::Empty)
    }
}

/// Bounded, deduplicated, most-recent-first history of chosen colors.
///
/// Every namespace holds an independent list. Reads never fail: missing or
/// unreadable state yields an empty history. Writes go straight to the
/// backend before [`RecentColorStore::add_color`] returns.
///
/// The store assumes a single writer per namespace. Two stores writing the
/// same namespace overwrite each other's lists; the last write wins.
pub struct RecentColorStore {
    backend: Box<dyn RecentColorBackend>,
    capacity: usize,
}

impl fmt::Debug for RecentColorStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecentColorStore")
            .field("capacity", &self.capacity)
            .finish_non_exhaustive()
    }
}

impl RecentColorStore {
    pub fn new(backend: impl RecentColorBackend + 'static) -> Self {
        Self::with_capacity(backend, RECENT_COLORS_LIMIT)
    }

    /// Create a store that keeps at most `capacity` colors (minimum one).
    pub fn with_capacity(
        backend: impl RecentColorBackend + 'static,
        capacity: usize,
    ) -> Self {
        Self {
            backend: Box::new(backend),
            capacity: capacity.max(1),
        }
    }

    /// Open a JSON-file backed store.
    pub fn open(options: StoreOptions) -> Self {
        Self::with_capacity(
            JsonFileBackend::new(options.storage_dir),
            options.capacity,
        )
    }

    pub fn in_memory() -> Self {
        Self::new(MemoryBackend::new())
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Recently chosen colors of `namespace`, most recent first.
    pub fn recent(&self, namespace: &str) -> Vec<ColorValue> {
        match self.backend.load(namespace) {
            Ok(Some(raw)) => normalize(raw, self.capacity),
            Ok(None) => Vec::new(),
            Err(err) => {
                log::warn!("recent colors read failed for {namespace}: {err}");
                Vec::new()
            },
        }
    }

    /// Exactly `capacity` slots; slots past the history are empty.
    pub fn slots(&self, namespace: &str) -> Vec<RecentSlot> {
        let mut slots: Vec<RecentSlot> = self
            .recent(namespace)
            .into_iter()
            .map(RecentSlot::Filled)
            .collect();
        slots.resize(self.capacity, RecentSlot::Empty);
        slots
    }

    /// Most recently chosen color, or `fallback` when history is empty.
    pub fn most_recent_or(
        &self,
        namespace: &str,
        fallback: ColorValue,
    ) -> ColorValue {
        self.recent(namespace).first().copied().unwrap_or(fallback)
    }

    /// Move `color` to the front of the history, evicting the oldest entry
    /// once the list exceeds the capacity.
    ///
    /// A failed read is returned as an error instead of being treated as an
    /// empty history, so a transient failure never wipes stored colors.
    /// Unparseable stored data is discarded and replaced by a fresh list.
    pub fn add_color(&self, namespace: &str, color: ColorValue) -> Result<()> {
        let raw = match self.backend.load(namespace) {
            Ok(raw) => raw.unwrap_or_default(),
            Err(StoreError::Json(err)) => {
                log::warn!("recent colors for {namespace} reset: {err}");
                Vec::new()
            },
            Err(err) => return Err(err),
        };
        let mut colors = normalize(raw, self.capacity);
        push_recent(&mut colors, color, self.capacity);

        let payload: Vec<String> =
            colors.iter().map(ToString::to_string).collect();
        self.backend.save(namespace, &payload)?;
        log::debug!("recent colors for {namespace}: {payload:?}");

        Ok(())
    }
}

/// Apply the move-to-front rule to an in-memory history.
pub(crate) fn push_recent(
    colors: &mut Vec<ColorValue>,
    color: ColorValue,
    capacity: usize,
) {
    colors.retain(|existing| *existing != color);
    colors.insert(0, color);
    colors.truncate(capacity);
}

/// Parse persisted entries, dropping malformed ones and duplicates.
fn normalize(raw: Vec<String>, capacity: usize) -> Vec<ColorValue> {
    let mut colors = Vec::with_capacity(capacity);
    for entry in raw {
        match entry.parse::<ColorValue>() {
            Ok(color) if !colors.contains(&color) => colors.push(color),
            Ok(_) => {},
            Err(err) => log::debug!("skipping stored recent color: {err}"),
        }

        if colors.len() == capacity {
            break;
        }
    }
    colors
}
