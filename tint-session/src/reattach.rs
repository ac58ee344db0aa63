use std::cell::RefCell;
use std::collections::HashMap;

use crate::callbacks::SessionCallbacks;

/// Tag-keyed registry that hands caller callbacks to reconstructed
/// sessions.
///
/// An entry is written when a session is first presented under a tag and
/// read when the host rebuilds that session. Entries are never expired
/// automatically: callers keep tags stable and unique per logical picker
/// slot, and may [`forget`](Self::forget) a tag they retire.
///
/// The registry is single-threaded; share it with `Rc`.
#[derive(Debug, Default)]
pub struct ReattachmentStore {
    entries: RefCell<HashMap<String, SessionCallbacks>>,
}

impl ReattachmentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remember `callbacks` under `tag`, replacing any earlier entry.
    pub fn register(&self, tag: &str, callbacks: SessionCallbacks) {
        let replaced = self
            .entries
            .borrow_mut()
            .insert(tag.to_string(), callbacks)
            .is_some();
        if replaced {
            log::debug!("callbacks for tag {tag} replaced");
        }
    }

    /// Callbacks registered under `tag`, if a session was ever presented
    /// with it.
    pub fn reattach(&self, tag: &str) -> Option<SessionCallbacks> {
        self.entries.borrow().get(tag).cloned()
    }

    /// Drop the entry for `tag`; returns whether one existed.
    pub fn forget(&self, tag: &str) -> bool {
        self.entries.borrow_mut().remove(tag).is_some()
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.entries.borrow().contains_key(tag)
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}
