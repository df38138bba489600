use crate::repository::Repository;

/// Base used when a title contains no ASCII alphanumerics at all
/// (e.g. a title made entirely of symbols or emoji).
const FALLBACK_BASE: &str = "blog";

/// slugify
///
/// Derives the URL-safe base slug from a title: ASCII alphanumerics are kept
/// and lowercased, every other run of characters collapses into a single `-`,
/// with no leading or trailing separator.
pub fn slugify(title: &str) -> String {
    let mut out = String::with_capacity(title.len());
    let mut pending_separator = false;
    for c in title.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_separator && !out.is_empty() {
                out.push('-');
            }
            pending_separator = false;
            out.push(c.to_ascii_lowercase());
        } else {
            pending_separator = true;
        }
    }
    if out.is_empty() {
        FALLBACK_BASE.to_string()
    } else {
        out
    }
}

/// unique_slug
///
/// Resolves the title to a slug that is unique among blogs. On collision the
/// base gets a numeric suffix (`hello-world`, `hello-world-2`, `hello-world-3`,
/// ...) until a free one is found. `ignore_id` excludes the blog being updated
/// from the collision check, so regenerating a slug from an unchanged-enough
/// title can land back on the record's own slug.
pub async fn unique_slug(
    repo: &dyn Repository,
    title: &str,
    ignore_id: Option<i64>,
) -> Result<String, sqlx::Error> {
    let base = slugify(title);
    let mut candidate = base.clone();
    let mut counter: u32 = 2;
    while repo.slug_taken(&candidate, ignore_id).await? {
        candidate = format!("{}-{}", base, counter);
        counter += 1;
    }
    Ok(candidate)
}
