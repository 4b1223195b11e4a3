/// Router Module Index
///
/// Organizes the application's routing logic into security-segregated modules,
/// enforcing a Defense-in-Depth strategy. Access control is applied explicitly
/// at the module level (via Axum layers), preventing accidental exposure of
/// protected endpoints.

/// Routes accessible to all visitors: the site content, the published
/// portfolio, the contact form, and the auth gateway.
pub mod public;

/// Routes for the admin panel, protected by the `AuthUser` session gate.
pub mod admin;
