/// Router Module Index
///
/// Organizes the application's routing into security-segregated modules so
/// access control is applied explicitly at the module level via Axum layers.
///
/// There is no separate admin router: the admin override is a branch of the
/// authorization policy on the shared endpoints, not a separate surface.

/// Routes accessible to all users (anonymous, read-only).
pub mod public;

/// Routes protected by the `AuthUser` extractor middleware.
/// Requires a validated bearer token on every request.
pub mod authenticated;
