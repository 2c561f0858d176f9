/// Server-side sessions
///
/// Sessions are ephemeral: an in-memory map from an opaque token (carried in
/// a cookie) to the logged-in user, cleared when the process restarts. The
/// one-shot flash message shown on the next rendered page also lives here.
///
/// # Modules
///
/// - [`store`]: the token → session map
/// - [`context`]: axum extractor resolving the request's cookie into a
///   request-scoped [`context::SessionContext`]

pub mod context;
pub mod store;

pub use context::{SessionContext, SESSION_COOKIE};
pub use store::SessionStore;
