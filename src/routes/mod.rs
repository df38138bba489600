//! Router Module Index
//!
//! Organizes the application's routing logic into access-segregated modules.
//! The split mirrors the capability table: read-only endpoints anyone may hit,
//! and the management endpoints only a site admin passes the gate for. The gate
//! itself runs explicitly inside every handler, so the module split is about
//! structure, not enforcement.

/// Read-only routes accessible to all visitors (anonymous included).
pub mod public;

/// Content-management routes. Every handler here re-checks the
/// (role, action, resource) gate before touching an entity.
pub mod admin;
