use crate::{
    AppState,
    auth::Identity,
    authz::{self, Action, Resource},
    error::ApiError,
    models::{
        Blog, BlogChanges, BlogPayload, IdentityResponse, NewBlog, NewPortfolio, Portfolio,
        PortfolioChanges, PortfolioPayload, ReorderRequest, TechnologyInput, placeholder,
    },
    slug, validate,
};
use axum::{
    Json,
    extract::{Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};

/// Builds the 302 Found redirect that every successful mutation answers with,
/// matching the redirect-to-list/show contract of the admin flow.
fn redirect_found(location: &str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location.to_string())]).into_response()
}

// --- Identity ---

/// get_me
///
/// [Public Route] Returns the caller's resolved identity: the authenticated
/// profile when a valid session exists, otherwise the per-request guest
/// placeholder. Never persists anything.
#[utoipa::path(
    get,
    path = "/me",
    responses((status = 200, description = "Current identity", body = IdentityResponse))
)]
pub async fn get_me(identity: Identity) -> Json<IdentityResponse> {
    Json(match identity {
        Identity::User(user) => IdentityResponse::User {
            id: user.id,
            role: user.role,
        },
        Identity::Guest(guest) => IdentityResponse::Guest(guest),
    })
}

// --- Portfolio Handlers ---

/// list_portfolios
///
/// [Public Route] Lists all portfolio items in manual order: position
/// descending, ties in insertion order.
#[utoipa::path(
    get,
    path = "/portfolios",
    responses((status = 200, description = "Portfolio items", body = [Portfolio]))
)]
pub async fn list_portfolios(
    identity: Identity,
    State(state): State<AppState>,
) -> Result<Json<Vec<Portfolio>>, ApiError> {
    authz::require(&identity, Action::Index, Resource::Portfolio)?;
    Ok(Json(state.repo.list_portfolios().await?))
}

/// get_portfolio
///
/// [Public Route] Retrieves a single portfolio item with its technologies.
#[utoipa::path(
    get,
    path = "/portfolio/{id}",
    params(("id" = i64, Path, description = "Portfolio ID")),
    responses(
        (status = 200, description = "Found", body = Portfolio),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get_portfolio(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Portfolio>, ApiError> {
    authz::require(&identity, Action::Show, Resource::Portfolio)?;
    state
        .repo
        .get_portfolio(id)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound)
}

/// new_portfolio
///
/// [Admin Route] Scaffolds the blank creation form: an empty payload with three
/// empty technology rows ready to fill in, mirroring the admin "new" view.
#[utoipa::path(
    get,
    path = "/portfolios/new",
    responses(
        (status = 200, description = "Blank form scaffold", body = PortfolioPayload),
        (status = 403, description = "Forbidden")
    )
)]
pub async fn new_portfolio(identity: Identity) -> Result<Json<PortfolioPayload>, ApiError> {
    authz::require(&identity, Action::New, Resource::Portfolio)?;
    Ok(Json(PortfolioPayload {
        technologies: vec![TechnologyInput::default(); 3],
        ..PortfolioPayload::default()
    }))
}

/// edit_portfolio
///
/// [Admin Route] Retrieves an item for the edit form. Same shape as the show
/// view but gated on the edit action.
#[utoipa::path(
    get,
    path = "/portfolios/{id}/edit",
    params(("id" = i64, Path, description = "Portfolio ID")),
    responses(
        (status = 200, description = "Found", body = Portfolio),
        (status = 404, description = "Not Found")
    )
)]
pub async fn edit_portfolio(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Portfolio>, ApiError> {
    authz::require(&identity, Action::Edit, Resource::Portfolio)?;
    state
        .repo
        .get_portfolio(id)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound)
}

/// create_portfolio
///
/// [Admin Route] Creates a portfolio item. Validation runs after the gate check
/// and before any write; omitted images are filled from the placeholder
/// generator, and blank nested technology rows are silently dropped. The item
/// and its technologies persist in a single transaction, so a failure leaves
/// nothing behind.
#[utoipa::path(
    post,
    path = "/portfolios",
    request_body = PortfolioPayload,
    responses(
        (status = 302, description = "Created, redirect to the list"),
        (status = 422, description = "Validation failed", body = crate::error::ValidationError),
        (status = 403, description = "Forbidden")
    )
)]
pub async fn create_portfolio(
    identity: Identity,
    State(state): State<AppState>,
    Json(payload): Json<PortfolioPayload>,
) -> Result<Response, ApiError> {
    authz::require(&identity, Action::Create, Resource::Portfolio)?;
    validate::validate_portfolio(&payload)?;

    let technologies = validate::prune_technologies(payload.technologies)
        .into_iter()
        .filter(|row| !row.delete)
        .map(|row| row.name.trim().to_string())
        .collect();

    let item = NewPortfolio {
        title: payload.title,
        subtitle: payload.subtitle,
        body: payload.body,
        main_image: payload
            .main_image
            .unwrap_or_else(|| placeholder::image_url(600, 400)),
        thumb_image: payload
            .thumb_image
            .unwrap_or_else(|| placeholder::image_url(350, 250)),
        technologies,
    };

    let created = state.repo.create_portfolio(item).await?;
    tracing::info!(id = created.id, "portfolio item created");
    Ok(redirect_found("/portfolios"))
}

/// update_portfolio
///
/// [Admin Route] Updates an item and applies its nested technology operations.
/// Omitted images keep their stored values.
#[utoipa::path(
    patch,
    path = "/portfolios/{id}",
    params(("id" = i64, Path, description = "Portfolio ID")),
    request_body = PortfolioPayload,
    responses(
        (status = 302, description = "Updated, redirect to the item"),
        (status = 422, description = "Validation failed", body = crate::error::ValidationError),
        (status = 404, description = "Not Found")
    )
)]
pub async fn update_portfolio(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<PortfolioPayload>,
) -> Result<Response, ApiError> {
    authz::require(&identity, Action::Update, Resource::Portfolio)?;
    validate::validate_portfolio(&payload)?;

    let changes = PortfolioChanges {
        title: payload.title,
        subtitle: payload.subtitle,
        body: payload.body,
        main_image: payload.main_image,
        thumb_image: payload.thumb_image,
        technologies: validate::prune_technologies(payload.technologies),
    };

    match state.repo.update_portfolio(id, changes).await? {
        Some(updated) => Ok(redirect_found(&format!("/portfolio/{}", updated.id))),
        None => Err(ApiError::NotFound),
    }
}

/// delete_portfolio
///
/// [Admin Route] Immediate, irreversible delete of an item and its technologies.
#[utoipa::path(
    delete,
    path = "/portfolios/{id}",
    params(("id" = i64, Path, description = "Portfolio ID")),
    responses(
        (status = 302, description = "Deleted, redirect to the list"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn delete_portfolio(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Response, ApiError> {
    authz::require(&identity, Action::Destroy, Resource::Portfolio)?;
    if state.repo.delete_portfolio(id).await? {
        tracing::info!(id, "portfolio item deleted");
        Ok(redirect_found("/portfolios"))
    } else {
        Err(ApiError::NotFound)
    }
}

/// reorder_portfolios
///
/// [Admin Route] Bulk position update from the drag-and-drop sort. The batch is
/// one transaction; entries naming a since-deleted item are skipped rather than
/// aborting the rest.
#[utoipa::path(
    post,
    path = "/portfolios/sort",
    request_body = ReorderRequest,
    responses(
        (status = 204, description = "Reordered"),
        (status = 403, description = "Forbidden")
    )
)]
pub async fn reorder_portfolios(
    identity: Identity,
    State(state): State<AppState>,
    Json(request): Json<ReorderRequest>,
) -> Result<StatusCode, ApiError> {
    authz::require(&identity, Action::Reorder, Resource::Portfolio)?;
    let updated = state.repo.reorder_portfolios(&request.entries).await?;
    tracing::debug!(
        requested = request.entries.len(),
        updated,
        "portfolio items reordered"
    );
    Ok(StatusCode::NO_CONTENT)
}

// --- Blog Handlers ---

/// list_blogs
///
/// [Public Route] Lists all blog posts in creation order.
#[utoipa::path(
    get,
    path = "/blogs",
    responses((status = 200, description = "Blog posts", body = [Blog]))
)]
pub async fn list_blogs(
    identity: Identity,
    State(state): State<AppState>,
) -> Result<Json<Vec<Blog>>, ApiError> {
    authz::require(&identity, Action::Index, Resource::Blog)?;
    Ok(Json(state.repo.list_blogs().await?))
}

/// get_blog
///
/// [Public Route] Friendly-slug lookup of a single post. An unknown slug is a
/// 404, never an escaping error.
#[utoipa::path(
    get,
    path = "/blogs/{slug}",
    params(("slug" = String, Path, description = "Blog slug")),
    responses(
        (status = 200, description = "Found", body = Blog),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get_blog(
    identity: Identity,
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<Blog>, ApiError> {
    authz::require(&identity, Action::Show, Resource::Blog)?;
    state
        .repo
        .get_blog(&slug)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound)
}

/// create_blog
///
/// [Admin Route] Creates a post as a draft. The slug is derived from the title
/// and disambiguated with a numeric suffix on collision; the redirect targets
/// the new post's slug.
#[utoipa::path(
    post,
    path = "/blogs",
    request_body = BlogPayload,
    responses(
        (status = 302, description = "Created, redirect to the post"),
        (status = 422, description = "Validation failed", body = crate::error::ValidationError),
        (status = 403, description = "Forbidden")
    )
)]
pub async fn create_blog(
    identity: Identity,
    State(state): State<AppState>,
    Json(payload): Json<BlogPayload>,
) -> Result<Response, ApiError> {
    authz::require(&identity, Action::Create, Resource::Blog)?;
    validate::validate_blog(&payload)?;

    let resolved = slug::unique_slug(state.repo.as_ref(), &payload.title, None).await?;
    let created = state
        .repo
        .create_blog(NewBlog {
            title: payload.title,
            body: payload.body,
            slug: resolved,
        })
        .await?;
    tracing::info!(slug = %created.slug, "blog post created");
    Ok(redirect_found(&format!("/blogs/{}", created.slug)))
}

/// update_blog
///
/// [Admin Route] Updates a post addressed by its slug. A changed title
/// regenerates the slug (excluding the post itself from the collision check)
/// and the redirect follows the new slug.
#[utoipa::path(
    patch,
    path = "/blogs/{slug}",
    params(("slug" = String, Path, description = "Blog slug")),
    request_body = BlogPayload,
    responses(
        (status = 302, description = "Updated, redirect to the post"),
        (status = 422, description = "Validation failed", body = crate::error::ValidationError),
        (status = 404, description = "Not Found")
    )
)]
pub async fn update_blog(
    identity: Identity,
    State(state): State<AppState>,
    Path(current_slug): Path<String>,
    Json(payload): Json<BlogPayload>,
) -> Result<Response, ApiError> {
    authz::require(&identity, Action::Update, Resource::Blog)?;
    validate::validate_blog(&payload)?;

    let existing = state
        .repo
        .get_blog(&current_slug)
        .await?
        .ok_or(ApiError::NotFound)?;

    let new_slug = if payload.title != existing.title {
        Some(slug::unique_slug(state.repo.as_ref(), &payload.title, Some(existing.id)).await?)
    } else {
        None
    };

    let updated = state
        .repo
        .update_blog(
            existing.id,
            BlogChanges {
                title: payload.title,
                body: payload.body,
                slug: new_slug,
            },
        )
        .await?
        .ok_or(ApiError::NotFound)?;

    Ok(redirect_found(&format!("/blogs/{}", updated.slug)))
}

/// delete_blog
///
/// [Admin Route] Immediate delete by slug.
#[utoipa::path(
    delete,
    path = "/blogs/{slug}",
    params(("slug" = String, Path, description = "Blog slug")),
    responses(
        (status = 302, description = "Deleted, redirect to the list"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn delete_blog(
    identity: Identity,
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Response, ApiError> {
    authz::require(&identity, Action::Destroy, Resource::Blog)?;
    if state.repo.delete_blog(&slug).await? {
        tracing::info!(%slug, "blog post deleted");
        Ok(redirect_found("/blogs"))
    } else {
        Err(ApiError::NotFound)
    }
}

/// toggle_blog_status
///
/// [Admin Route] Flips the post between draft and published. This is a toggle,
/// not a set: calling it twice restores the original status.
#[utoipa::path(
    get,
    path = "/blogs/{slug}/toggle_status",
    params(("slug" = String, Path, description = "Blog slug")),
    responses(
        (status = 302, description = "Toggled, redirect to the list"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn toggle_blog_status(
    identity: Identity,
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Response, ApiError> {
    authz::require(&identity, Action::ToggleStatus, Resource::Blog)?;
    match state.repo.toggle_blog_status(&slug).await? {
        Some(blog) => {
            tracing::info!(slug = %blog.slug, status = %blog.status, "blog status toggled");
            Ok(redirect_found("/blogs"))
        }
        None => Err(ApiError::NotFound),
    }
}
