use crate::{AppState, handlers};
use axum::{Router, routing::get};

/// Public Router Module
///
/// Defines endpoints that are accessible to any client, anonymous or logged-in:
/// the read-only portfolio and blog views plus the identity and health probes.
/// Handlers still run the authorization gate, which allows `index`/`show` for
/// every role.
pub fn public_routes() -> Router<AppState> {
    Router::new()
        // GET /health
        // Unauthenticated liveness probe for monitoring and load balancer checks.
        .route("/health", get(|| async { "ok" }))
        // GET /me
        // Resolves the caller's identity, substituting the guest placeholder
        // when no authenticated session exists.
        .route("/me", get(handlers::get_me))
        // GET /portfolios
        // Portfolio index in manual order (position descending).
        .route("/portfolios", get(handlers::list_portfolios))
        // GET /portfolio/{id}
        // Single portfolio item with its technologies. The singular path is the
        // historical show route and is kept as the public contract.
        .route("/portfolio/{id}", get(handlers::get_portfolio))
        // GET /blogs
        // Blog index in creation order. Drafts are included; visibility
        // filtering is a rendering concern of the consuming frontend.
        .route("/blogs", get(handlers::list_blogs))
        // GET /blogs/{slug}
        // Friendly-slug lookup of a single post.
        .route("/blogs/{slug}", get(handlers::get_blog))
}
