use crate::models::{
    Blog, BlogChanges, BlogStatus, NewBlog, NewPortfolio, Portfolio, PortfolioChanges,
    ReorderEntry, Technology, User,
};
use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

/// Repository Trait
///
/// Defines the abstract contract for all persistence operations. This is the core
/// of the Repository Abstraction pattern, allowing the handlers to interact with
/// the data layer without knowing the specific implementation (Postgres, in-memory
/// mock, etc.).
///
/// Every method returns `Result`: a store failure propagates to the handler and
/// surfaces as a 500, it is never swallowed into an empty value.
///
/// **Send + Sync + async_trait** are required to make the trait object
/// (`Arc<dyn Repository>`) safely shareable across Axum's asynchronous task boundaries.
#[async_trait]
pub trait Repository: Send + Sync {
    // --- Portfolios ---
    /// Index listing: position descending, ties broken by insertion order.
    async fn list_portfolios(&self) -> Result<Vec<Portfolio>, sqlx::Error>;
    /// Single item with its technologies attached.
    async fn get_portfolio(&self, id: i64) -> Result<Option<Portfolio>, sqlx::Error>;
    /// Inserts the item and its technologies in one transaction.
    async fn create_portfolio(&self, item: NewPortfolio) -> Result<Portfolio, sqlx::Error>;
    /// Applies field changes and technology adds/renames/removals in one transaction.
    async fn update_portfolio(
        &self,
        id: i64,
        changes: PortfolioChanges,
    ) -> Result<Option<Portfolio>, sqlx::Error>;
    /// Immediate delete; owned technologies go with the parent (FK cascade).
    async fn delete_portfolio(&self, id: i64) -> Result<bool, sqlx::Error>;
    /// Bulk position update inside a single transaction. Entries whose id no
    /// longer exists are skipped; returns the number of rows actually updated.
    async fn reorder_portfolios(&self, entries: &[ReorderEntry]) -> Result<u64, sqlx::Error>;

    // --- Blogs ---
    /// Listing in creation order.
    async fn list_blogs(&self) -> Result<Vec<Blog>, sqlx::Error>;
    /// Friendly-slug lookup: exactly one record or None.
    async fn get_blog(&self, slug: &str) -> Result<Option<Blog>, sqlx::Error>;
    /// Collision probe for the slug resolver. `ignore_id` excludes the record
    /// being updated from the check.
    async fn slug_taken(&self, slug: &str, ignore_id: Option<i64>) -> Result<bool, sqlx::Error>;
    async fn create_blog(&self, blog: NewBlog) -> Result<Blog, sqlx::Error>;
    async fn update_blog(
        &self,
        id: i64,
        changes: BlogChanges,
    ) -> Result<Option<Blog>, sqlx::Error>;
    async fn delete_blog(&self, slug: &str) -> Result<bool, sqlx::Error>;
    /// Flips draft <-> published in a single statement and returns the new row.
    async fn toggle_blog_status(&self, slug: &str) -> Result<Option<Blog>, sqlx::Error>;

    // --- Users/Auth ---
    /// Profile lookup (id, email, role) used by the authentication extractor.
    async fn get_user(&self, id: Uuid) -> Result<Option<User>, sqlx::Error>;
}

/// RepositoryState
///
/// The concrete type used to share the persistence layer access across the application state.
pub type RepositoryState = Arc<dyn Repository>;

const PORTFOLIO_COLUMNS: &str =
    "id, title, subtitle, body, main_image, thumb_image, position, created_at, updated_at";

const BLOG_COLUMNS: &str = "id, title, body, slug, status, topic_id, created_at, updated_at";

/// PostgresRepository
///
/// The concrete implementation of the `Repository` trait, backed by the PostgreSQL database.
pub struct PostgresRepository {
    pool: PgPool,
}

impl PostgresRepository {
    /// Creates a new repository instance using the initialized connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Loads the owned technology rows for one portfolio, oldest first.
    async fn load_technologies(&self, portfolio_id: i64) -> Result<Vec<Technology>, sqlx::Error> {
        sqlx::query_as::<_, Technology>(
            "SELECT id, portfolio_id, name FROM technologies WHERE portfolio_id = $1 ORDER BY id ASC",
        )
        .bind(portfolio_id)
        .fetch_all(&self.pool)
        .await
    }
}

#[async_trait]
impl Repository for PostgresRepository {
    /// list_portfolios
    ///
    /// Index query for the public listing. `position DESC` implements the manual
    /// ordering; the `id ASC` tiebreak keeps equal positions in insertion order.
    /// Technologies are not attached at the index level.
    async fn list_portfolios(&self) -> Result<Vec<Portfolio>, sqlx::Error> {
        sqlx::query_as::<_, Portfolio>(&format!(
            "SELECT {PORTFOLIO_COLUMNS} FROM portfolios ORDER BY position DESC, id ASC"
        ))
        .fetch_all(&self.pool)
        .await
    }

    /// get_portfolio
    ///
    /// Detail retrieval, with the owned technologies attached for the show/edit views.
    async fn get_portfolio(&self, id: i64) -> Result<Option<Portfolio>, sqlx::Error> {
        let row = sqlx::query_as::<_, Portfolio>(&format!(
            "SELECT {PORTFOLIO_COLUMNS} FROM portfolios WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(mut item) => {
                item.technologies = self.load_technologies(item.id).await?;
                Ok(Some(item))
            }
            None => Ok(None),
        }
    }

    /// create_portfolio
    ///
    /// Inserts the item and its technology rows in one transaction, so a failed
    /// technology insert never leaves a half-created item behind. The position
    /// defaults to the current maximum plus one (insertion order).
    async fn create_portfolio(&self, item: NewPortfolio) -> Result<Portfolio, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        let mut created = sqlx::query_as::<_, Portfolio>(&format!(
            r#"
            INSERT INTO portfolios (title, subtitle, body, main_image, thumb_image, position, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, (SELECT COALESCE(MAX(position), 0) + 1 FROM portfolios), NOW(), NOW())
            RETURNING {PORTFOLIO_COLUMNS}
            "#
        ))
        .bind(&item.title)
        .bind(&item.subtitle)
        .bind(&item.body)
        .bind(&item.main_image)
        .bind(&item.thumb_image)
        .fetch_one(&mut *tx)
        .await?;

        for name in &item.technologies {
            sqlx::query("INSERT INTO technologies (portfolio_id, name) VALUES ($1, $2)")
                .bind(created.id)
                .bind(name)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        created.technologies = self.load_technologies(created.id).await?;
        Ok(created)
    }

    /// update_portfolio
    ///
    /// Updates the parent row and applies the nested technology operations in the
    /// same transaction. Images use COALESCE so an omitted value keeps the stored
    /// one. Technology ops are keyed on the row id: delete wins over rename, and
    /// id-less rows insert.
    async fn update_portfolio(
        &self,
        id: i64,
        changes: PortfolioChanges,
    ) -> Result<Option<Portfolio>, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, Portfolio>(&format!(
            r#"
            UPDATE portfolios
            SET title = $2,
                subtitle = $3,
                body = $4,
                main_image = COALESCE($5, main_image),
                thumb_image = COALESCE($6, thumb_image),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {PORTFOLIO_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&changes.title)
        .bind(&changes.subtitle)
        .bind(&changes.body)
        .bind(&changes.main_image)
        .bind(&changes.thumb_image)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(mut updated) = row else {
            // Dropping the transaction rolls it back; nothing was written.
            return Ok(None);
        };

        for tech in &changes.technologies {
            match (tech.id, tech.delete) {
                (Some(tech_id), true) => {
                    sqlx::query("DELETE FROM technologies WHERE id = $1 AND portfolio_id = $2")
                        .bind(tech_id)
                        .bind(updated.id)
                        .execute(&mut *tx)
                        .await?;
                }
                (Some(tech_id), false) => {
                    sqlx::query(
                        "UPDATE technologies SET name = $3 WHERE id = $1 AND portfolio_id = $2",
                    )
                    .bind(tech_id)
                    .bind(updated.id)
                    .bind(&tech.name)
                    .execute(&mut *tx)
                    .await?;
                }
                (None, false) => {
                    sqlx::query("INSERT INTO technologies (portfolio_id, name) VALUES ($1, $2)")
                        .bind(updated.id)
                        .bind(&tech.name)
                        .execute(&mut *tx)
                        .await?;
                }
                // Delete-flagged row without an id: nothing to remove.
                (None, true) => {}
            }
        }

        tx.commit().await?;

        updated.technologies = self.load_technologies(updated.id).await?;
        Ok(Some(updated))
    }

    /// delete_portfolio
    ///
    /// Immediate, irreversible delete. The technologies FK cascades.
    async fn delete_portfolio(&self, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM portfolios WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// reorder_portfolios
    ///
    /// Applies the whole batch inside one transaction so a concurrent reorder or
    /// delete never observes a half-applied ordering. An entry whose id no longer
    /// exists updates zero rows and the batch continues.
    async fn reorder_portfolios(&self, entries: &[ReorderEntry]) -> Result<u64, sqlx::Error> {
        let mut tx = self.pool.begin().await?;
        let mut updated: u64 = 0;
        for entry in entries {
            let result = sqlx::query("UPDATE portfolios SET position = $2 WHERE id = $1")
                .bind(entry.id)
                .bind(entry.position)
                .execute(&mut *tx)
                .await?;
            updated += result.rows_affected();
        }
        tx.commit().await?;
        Ok(updated)
    }

    /// list_blogs
    ///
    /// Blog listing in creation order (no explicit product ordering exists).
    async fn list_blogs(&self) -> Result<Vec<Blog>, sqlx::Error> {
        sqlx::query_as::<_, Blog>(&format!("SELECT {BLOG_COLUMNS} FROM blogs ORDER BY id ASC"))
            .fetch_all(&self.pool)
            .await
    }

    /// get_blog
    ///
    /// Friendly-slug lookup. The unique index on `slug` guarantees at most one row.
    async fn get_blog(&self, slug: &str) -> Result<Option<Blog>, sqlx::Error> {
        sqlx::query_as::<_, Blog>(&format!("SELECT {BLOG_COLUMNS} FROM blogs WHERE slug = $1"))
            .bind(slug)
            .fetch_optional(&self.pool)
            .await
    }

    /// slug_taken
    ///
    /// Collision probe for the slug resolver.
    async fn slug_taken(&self, slug: &str, ignore_id: Option<i64>) -> Result<bool, sqlx::Error> {
        let existing: Option<i64> = sqlx::query_scalar(
            "SELECT id FROM blogs WHERE slug = $1 AND ($2::bigint IS NULL OR id <> $2)",
        )
        .bind(slug)
        .bind(ignore_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(existing.is_some())
    }

    /// create_blog
    ///
    /// Inserts a new post. Every post starts life as a draft.
    async fn create_blog(&self, blog: NewBlog) -> Result<Blog, sqlx::Error> {
        sqlx::query_as::<_, Blog>(&format!(
            r#"
            INSERT INTO blogs (title, body, slug, status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, NOW(), NOW())
            RETURNING {BLOG_COLUMNS}
            "#
        ))
        .bind(&blog.title)
        .bind(&blog.body)
        .bind(&blog.slug)
        .bind(BlogStatus::Draft.as_str())
        .fetch_one(&self.pool)
        .await
    }

    /// update_blog
    ///
    /// Updates title/body; the slug only moves when the resolver regenerated it
    /// (COALESCE keeps the stored slug otherwise).
    async fn update_blog(
        &self,
        id: i64,
        changes: BlogChanges,
    ) -> Result<Option<Blog>, sqlx::Error> {
        sqlx::query_as::<_, Blog>(&format!(
            r#"
            UPDATE blogs
            SET title = $2,
                body = $3,
                slug = COALESCE($4, slug),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {BLOG_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&changes.title)
        .bind(&changes.body)
        .bind(&changes.slug)
        .fetch_optional(&self.pool)
        .await
    }

    /// delete_blog
    ///
    /// Immediate delete by slug.
    async fn delete_blog(&self, slug: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM blogs WHERE slug = $1")
            .bind(slug)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// toggle_blog_status
    ///
    /// Single-statement flip so two concurrent toggles serialize on the row and
    /// each one inverts whatever state it finds.
    async fn toggle_blog_status(&self, slug: &str) -> Result<Option<Blog>, sqlx::Error> {
        sqlx::query_as::<_, Blog>(&format!(
            r#"
            UPDATE blogs
            SET status = CASE WHEN status = 'draft' THEN 'published' ELSE 'draft' END,
                updated_at = NOW()
            WHERE slug = $1
            RETURNING {BLOG_COLUMNS}
            "#
        ))
        .bind(slug)
        .fetch_optional(&self.pool)
        .await
    }

    /// get_user
    ///
    /// Retrieves user profile data (ID, email, role) needed for authentication and authorization.
    async fn get_user(&self, id: Uuid) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>("SELECT id, email, role FROM profiles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }
}
