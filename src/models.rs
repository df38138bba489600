use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use ts_rs::TS;
use utoipa::ToSchema;
use uuid::Uuid;

// --- Core Application Schemas (Mapped to Database) ---

/// User
///
/// Represents the user's canonical identity record stored in the `public.profiles` table.
/// This structure includes the minimal required data resolved during authentication.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, FromRow, Default)]
#[ts(export)]
pub struct User {
    // Primary Key, also the Foreign Key to the external auth provider's user table.
    pub id: Uuid,
    // The user's primary identifier.
    pub email: String,
    // The RBAC field: 'user' or 'site_admin'.
    pub role: String,
}

/// Portfolio
///
/// A single portfolio item from the `public.portfolios` table. Items carry a manual
/// `position` used for drag-and-drop style ordering on the index view (highest first).
///
/// `technologies` is not a database column; it is loaded separately by the repository
/// and attached before the record is returned.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, FromRow, Default)]
#[ts(export)]
pub struct Portfolio {
    pub id: i64,
    pub title: String,
    pub subtitle: Option<String>,
    pub body: String,

    // Image URLs. Never null after creation: the create handler fills them
    // from the placeholder generator when the submission omits them.
    pub main_image: String,
    pub thumb_image: String,

    // Manual ordering field. Defaults to insertion order (max + 1) at insert time.
    pub position: i32,

    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
    #[ts(type = "string")]
    pub updated_at: DateTime<Utc>,

    // Owned technology records, maintained as a unit with the parent item.
    #[sqlx(skip)]
    #[serde(default)]
    pub technologies: Vec<Technology>,
}

/// Technology
///
/// A named technology attached to a portfolio item (`public.technologies`).
/// Rows only exist through their parent: they are created, renamed, and removed
/// via the nested `technologies` list on the portfolio payloads.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, FromRow, Default)]
#[ts(export)]
pub struct Technology {
    pub id: i64,
    pub portfolio_id: i64,
    pub name: String,
}

/// Blog
///
/// A blog post from the `public.blogs` table, addressed externally by its unique
/// `slug` rather than its numeric id. `status` holds the textual form of
/// [`BlogStatus`], the same way `User` keeps its role as a string.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, FromRow, Default)]
#[ts(export)]
pub struct Blog {
    pub id: i64,
    pub title: String,
    pub body: String,

    // URL-safe unique identifier derived from the title at creation time.
    // Stable unless the title changes on update.
    pub slug: String,

    // 'draft' | 'published'. New posts always start as drafts.
    pub status: String,

    // Opaque foreign key to an optional topic. Not settable through the API.
    pub topic_id: Option<i64>,

    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
    #[ts(type = "string")]
    pub updated_at: DateTime<Utc>,
}

/// BlogStatus
///
/// The two-valued publication state of a blog post. `toggled` flips the value each
/// call; it is a toggle, not a set-to-value operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema, Default)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum BlogStatus {
    #[default]
    Draft,
    Published,
}

impl BlogStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            BlogStatus::Draft => "draft",
            BlogStatus::Published => "published",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "draft" => Some(BlogStatus::Draft),
            "published" => Some(BlogStatus::Published),
            _ => None,
        }
    }

    pub const fn toggled(self) -> Self {
        match self {
            BlogStatus::Draft => BlogStatus::Published,
            BlogStatus::Published => BlogStatus::Draft,
        }
    }
}

/// GuestIdentity
///
/// The non-persisted placeholder identity substituted when no authenticated session
/// exists. Constructed fresh per request and never written to the database.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct GuestIdentity {
    pub name: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl GuestIdentity {
    pub fn new() -> Self {
        Self {
            name: "GuestUser".to_string(),
            first_name: "Guest".to_string(),
            last_name: "User".to_string(),
            email: "guest@example.com".to_string(),
        }
    }
}

impl Default for GuestIdentity {
    fn default() -> Self {
        Self::new()
    }
}

// --- Placeholder Image Generation ---

/// placeholder
///
/// Generates the default image URLs used when a portfolio submission omits
/// `main_image` or `thumb_image`.
pub mod placeholder {
    pub fn image_url(width: u32, height: u32) -> String {
        format!("http://placehold.it/{}x{}", width, height)
    }
}

// --- Request Payloads (Input Schemas) ---

/// TechnologyInput
///
/// One row of the nested technologies submission. A row without an `id` creates a
/// new technology; a row with an `id` renames the existing one, or removes it when
/// the `delete` flag is set. Rows with a blank name (and no delete flag) are
/// silently dropped before persistence.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct TechnologyInput {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub delete: bool,
}

/// PortfolioPayload
///
/// Input payload for creating (POST /portfolios) and updating (PATCH /portfolios/{id})
/// a portfolio item. Only the whitelisted fields below are accepted; anything else in
/// the submitted JSON is ignored.
///
/// Omitted images are default-filled on create and left untouched on update.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct PortfolioPayload {
    pub title: String,
    #[serde(default)]
    pub subtitle: Option<String>,
    pub body: String,
    #[serde(default)]
    pub main_image: Option<String>,
    #[serde(default)]
    pub thumb_image: Option<String>,
    #[serde(default)]
    pub technologies: Vec<TechnologyInput>,
}

/// BlogPayload
///
/// Input payload for creating (POST /blogs) and updating (PATCH /blogs/{slug}) a blog
/// post. The slug is derived server-side and the topic reference is not settable, so
/// the whitelist is just the title and body.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct BlogPayload {
    pub title: String,
    pub body: String,
}

/// ReorderEntry
///
/// A single (id, position) pair from the bulk reorder submission.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct ReorderEntry {
    pub id: i64,
    pub position: i32,
}

/// ReorderRequest
///
/// Input payload for POST /portfolios/sort. Entries are applied inside a single
/// transaction; an entry whose id no longer exists is skipped rather than aborting
/// the batch.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct ReorderRequest {
    pub entries: Vec<ReorderEntry>,
}

// --- Repository Write Models ---

/// NewPortfolio
///
/// Fully-resolved portfolio insert: validation has passed and image defaults have
/// already been applied, so every field here is final.
#[derive(Debug, Clone, Default)]
pub struct NewPortfolio {
    pub title: String,
    pub subtitle: Option<String>,
    pub body: String,
    pub main_image: String,
    pub thumb_image: String,
    // Names of the technologies to create alongside the item (already pruned).
    pub technologies: Vec<String>,
}

/// PortfolioChanges
///
/// Update set for an existing portfolio. `None` images keep the stored value
/// (COALESCE semantics at the SQL layer). Technology rows are applied as described
/// on [`TechnologyInput`], in the same transaction as the parent row.
#[derive(Debug, Clone, Default)]
pub struct PortfolioChanges {
    pub title: String,
    pub subtitle: Option<String>,
    pub body: String,
    pub main_image: Option<String>,
    pub thumb_image: Option<String>,
    pub technologies: Vec<TechnologyInput>,
}

/// NewBlog
///
/// Blog insert with the slug already resolved to a unique value. Status always
/// starts as draft.
#[derive(Debug, Clone, Default)]
pub struct NewBlog {
    pub title: String,
    pub body: String,
    pub slug: String,
}

/// BlogChanges
///
/// Update set for an existing blog. `slug` is `Some` only when a title change
/// triggered regeneration; `None` keeps the stored slug.
#[derive(Debug, Clone, Default)]
pub struct BlogChanges {
    pub title: String,
    pub body: String,
    pub slug: Option<String>,
}

// --- Identity Schemas (Output) ---

/// IdentityResponse
///
/// Output schema for GET /me. Either the authenticated profile data or the
/// per-request guest placeholder, discriminated by `kind` so templates can render
/// uniformly.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[ts(export)]
pub enum IdentityResponse {
    User { id: Uuid, role: String },
    Guest(GuestIdentity),
}
