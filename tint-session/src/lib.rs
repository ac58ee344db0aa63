//! Modal color-selection sessions for the `tint` picker.
//!
//! The crate owns everything between "the caller asked for a color" and
//! "the caller got one (or didn't)":
//! - [`SelectionRequest`] is built fluently and validated once, then frozen.
//! - [`SelectionSession`] is the state machine of one modal interaction. It
//!   pushes state into a [`PresentationSurface`] and takes user input as
//!   method calls or [`SessionEvent`]s.
//! - [`RecentColorStore`] keeps a short, most-recent-first history of
//!   confirmed colors per namespace, persisted through a
//!   [`RecentColorBackend`].
//! - [`ReattachmentStore`] keeps caller callbacks by tag so a session the
//!   host discarded and rebuilt still reports to the right caller.
//!
//! Front-ends usually:
//! 1. Create one [`PickerHost`] with a shared store and registry.
//! 2. Call [`PickerHost::present`] with a request, a tag and a surface.
//! 3. Forward widget input to the session until it reaches a terminal
//!    [`SessionState`].
//! 4. When the host recreates its UI, [`SelectionSession::suspend`] the
//!    session and later hand the arguments to [`PickerHost::reconstruct`].

mod callbacks;
mod error;
mod host;
mod reattach;
mod recent;
mod request;
mod session;
mod storage;
mod surface;

pub use callbacks::{DismissCallback, ResultCallback, SessionCallbacks};
pub use error::{ConfigurationError, Result, StoreError};
pub use host::{DEFAULT_NAMESPACE, PickerHost};
pub use reattach::ReattachmentStore;
pub use recent::{
    EMPTY_SLOT_COLOR, RECENT_COLORS_LIMIT, RecentColorStore, RecentSlot,
};
pub use request::{
    ColorResolver, DEFAULT_CANCEL_LABEL, DEFAULT_CONFIRM_LABEL, DEFAULT_TITLE,
    PresentationParams, PresentationStyle, SelectionRequest,
    SelectionRequestBuilder,
};
pub use session::{
    SelectionSession, SessionArguments, SessionEvent, SessionState,
};
pub use storage::{
    JsonFileBackend, MemoryBackend, RecentColorBackend, StoreOptions,
    default_storage_dir,
};
pub use surface::{Chrome, HeadlessSurface, PresentationSurface, SwatchCell};

pub use tint_color as color;
