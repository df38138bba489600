use crate::{AppState, handlers};
use axum::{
    Router,
    routing::{get, patch, post},
};

/// Admin Router Module
///
/// Defines the content-management endpoints: everything that creates, mutates,
/// reorders, or deletes a portfolio item or blog post. Each handler checks the
/// capability table for the site_admin role before performing any entity
/// operation, so a denied request produces a 403 with no side effects.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        // GET /portfolios/new
        // Blank form scaffold for the creation view (three empty technology rows).
        .route("/portfolios/new", get(handlers::new_portfolio))
        // POST /portfolios
        // Creates an item; redirects back to the list on success.
        .route("/portfolios", post(handlers::create_portfolio))
        // POST /portfolios/sort
        // Bulk position update from the drag-and-drop ordering UI.
        .route("/portfolios/sort", post(handlers::reorder_portfolios))
        // GET /portfolios/{id}/edit
        // Item retrieval for the edit form.
        .route("/portfolios/{id}/edit", get(handlers::edit_portfolio))
        // PATCH/PUT/DELETE /portfolios/{id}
        // Update (both verbs accepted) and immediate delete.
        .route(
            "/portfolios/{id}",
            patch(handlers::update_portfolio)
                .put(handlers::update_portfolio)
                .delete(handlers::delete_portfolio),
        )
        // POST /blogs
        // Creates a draft post; the redirect targets the derived slug.
        .route("/blogs", post(handlers::create_blog))
        // PATCH/PUT/DELETE /blogs/{slug}
        // Update (slug regenerates when the title changes) and immediate delete.
        .route(
            "/blogs/{slug}",
            patch(handlers::update_blog)
                .put(handlers::update_blog)
                .delete(handlers::delete_blog),
        )
        // GET /blogs/{slug}/toggle_status
        // Flips draft <-> published; kept as a GET to preserve the historical
        // admin-link contract.
        .route("/blogs/{slug}/toggle_status", get(handlers::toggle_blog_status))
}
