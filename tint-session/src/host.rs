use std::rc::Rc;

use crate::callbacks::SessionCallbacks;
use crate::reattach::ReattachmentStore;
use crate::recent::RecentColorStore;
use crate::request::SelectionRequest;
use crate::session::{SelectionSession, SessionArguments};
use crate::surface::PresentationSurface;

/// Namespace of the recent-colors history unless the host picks another.
pub const DEFAULT_NAMESPACE: &str = "tint.recent_colors";

/// Owns the shared state behind every session a host presents.
///
/// The store and registry outlive individual sessions: a session that the
/// host discards and later [`reconstruct`](Self::reconstruct)s finds the
/// same history and the callbacks registered under its tag.
#[derive(Debug, Clone)]
pub struct PickerHost {
    store: Rc<RecentColorStore>,
    registry: Rc<ReattachmentStore>,
    namespace: String,
}

impl PickerHost {
    pub fn new(
        store: Rc<RecentColorStore>,
        registry: Rc<ReattachmentStore>,
    ) -> Self {
        Self::with_namespace(store, registry, DEFAULT_NAMESPACE)
    }

    pub fn with_namespace(
        store: Rc<RecentColorStore>,
        registry: Rc<ReattachmentStore>,
        namespace: impl Into<String>,
    ) -> Self {
        Self {
            store,
            registry,
            namespace: namespace.into(),
        }
    }

    pub fn store(&self) -> &Rc<RecentColorStore> {
        &self.store
    }

    pub fn registry(&self) -> &Rc<ReattachmentStore> {
        &self.registry
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Start a session for `request` on `surface`.
    ///
    /// With a `tag`, the request's callbacks are registered so a later
    /// reconstruction under the same tag reports to the same caller.
    pub fn present<S: PresentationSurface>(
        &self,
        request: SelectionRequest,
        tag: Option<&str>,
        surface: S,
    ) -> SelectionSession<S> {
        let (params, callbacks) = request.into_parts();
        if let Some(tag) = tag {
            self.registry.register(tag, callbacks.clone());
        }

        let mut session = SelectionSession::initialize(
            params,
            tag.map(str::to_string),
            Rc::clone(&self.store),
            self.namespace.clone(),
            surface,
        );
        session.attach_callbacks(callbacks);
        session.start();
        session
    }

    /// Rebuild a discarded session from its arguments.
    ///
    /// Callbacks come from the registry. A missing or unknown tag leaves the
    /// session without callbacks; it still works but reports to nobody.
    pub fn reconstruct<S: PresentationSurface>(
        &self,
        arguments: SessionArguments,
        surface: S,
    ) -> SelectionSession<S> {
        let (params, tag) = arguments.into_parts();
        let callbacks = match tag.as_deref() {
            Some(tag) => self.registry.reattach(tag).unwrap_or_else(|| {
                log::debug!("no callbacks registered for tag {tag}");
                SessionCallbacks::inert()
            }),
            None => {
                log::debug!("reconstructing an untagged session");
                SessionCallbacks::inert()
            },
        };

        let mut session = SelectionSession::initialize(
            params,
            tag,
            Rc::clone(&self.store),
            self.namespace.clone(),
            surface,
        );
        session.attach_callbacks(callbacks);
        session.start();
        session
    }
}
