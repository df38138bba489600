use crate::{
    error::ValidationError,
    models::{BlogPayload, PortfolioPayload, TechnologyInput},
};

/// Presence check shared by all validators: whitespace-only counts as blank.
fn blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// validate_portfolio
///
/// Explicit validator for the portfolio create/update payload. Title and body
/// must be non-blank. Images are only checked when the caller explicitly
/// submitted a value: an omitted image is default-filled before persistence and
/// therefore always passes, but submitting an empty string is an error.
pub fn validate_portfolio(payload: &PortfolioPayload) -> Result<(), ValidationError> {
    let mut errors = ValidationError::default();
    if blank(&payload.title) {
        errors.add("title", "can't be blank");
    }
    if blank(&payload.body) {
        errors.add("body", "can't be blank");
    }
    if let Some(image) = &payload.main_image {
        if blank(image) {
            errors.add("main_image", "can't be blank");
        }
    }
    if let Some(image) = &payload.thumb_image {
        if blank(image) {
            errors.add("thumb_image", "can't be blank");
        }
    }
    errors.into_result()
}

/// validate_blog
///
/// Explicit validator for the blog create/update payload: title and body must
/// be non-blank.
pub fn validate_blog(payload: &BlogPayload) -> Result<(), ValidationError> {
    let mut errors = ValidationError::default();
    if blank(&payload.title) {
        errors.add("title", "can't be blank");
    }
    if blank(&payload.body) {
        errors.add("body", "can't be blank");
    }
    errors.into_result()
}

/// prune_technologies
///
/// Drops nested technology rows whose name is blank. This is a silent
/// normalization, not a validation error: the parent submission still succeeds
/// with the remaining rows. Delete-flagged rows are kept regardless of name,
/// since removal only needs the id.
pub fn prune_technologies(rows: Vec<TechnologyInput>) -> Vec<TechnologyInput> {
    rows.into_iter()
        .filter(|row| row.delete || !blank(&row.name))
        .collect()
}
