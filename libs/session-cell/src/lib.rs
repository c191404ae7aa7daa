// =====================================================================================
// SESSION CELL - PAGE NAVIGATION STATE MACHINE
// =====================================================================================
//
// One session is one browser's root state: the page it is on (carrying that
// page's selections) and its appointment list. Intents go through a pure
// reducer; the store swaps each session's state wholesale.
//
// =====================================================================================

pub mod handlers;
pub mod models;
pub mod router;
pub mod services;

pub use models::{
    Intent, IgnoreReason, Outcome, Page, PageKind, Selections, SessionError, SessionSnapshot,
    SessionState,
};
pub use router::{session_routes, SessionAppState};
pub use services::navigation::{reduce, Env, Reduced};
pub use services::store::SessionStore;
pub use services::views::{page_view, PageView};
