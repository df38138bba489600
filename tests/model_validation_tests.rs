use folio_cms::{
    error::ValidationError,
    models::{BlogPayload, BlogStatus, GuestIdentity, PortfolioPayload, TechnologyInput},
    slug, validate,
};

// --- SLUG DERIVATION ---

#[test]
fn test_slugify_basic_title() {
    assert_eq!(slug::slugify("Hello World"), "hello-world");
}

#[test]
fn test_slugify_collapses_punctuation_runs() {
    assert_eq!(slug::slugify("C++, SQL & Rust!"), "c-sql-rust");
    assert_eq!(slug::slugify("Rails -> Rust: a migration"), "rails-rust-a-migration");
}

#[test]
fn test_slugify_strips_edges_and_lowercases() {
    assert_eq!(slug::slugify("  --Hi There--  "), "hi-there");
    assert_eq!(slug::slugify("Version 2.0"), "version-2-0");
}

#[test]
fn test_slugify_symbol_only_title_uses_fallback() {
    assert_eq!(slug::slugify("!!! ???"), "blog");
    assert_eq!(slug::slugify(""), "blog");
}

// --- VALIDATION ---

#[test]
fn test_validate_portfolio_accepts_minimal_payload() {
    let payload = PortfolioPayload {
        title: "My App".to_string(),
        body: "A thing I built.".to_string(),
        ..PortfolioPayload::default()
    };
    assert!(validate::validate_portfolio(&payload).is_ok());
}

#[test]
fn test_validate_portfolio_collects_all_blank_fields() {
    let payload = PortfolioPayload {
        title: "   ".to_string(),
        body: String::new(),
        ..PortfolioPayload::default()
    };
    let err = validate::validate_portfolio(&payload).unwrap_err();
    let fields: Vec<&str> = err.errors.iter().map(|e| e.field.as_str()).collect();
    assert_eq!(fields, vec!["title", "body"]);
}

#[test]
fn test_validate_portfolio_rejects_explicit_blank_image() {
    // Omitted image: fine, the default fills it. Submitted-but-empty: error.
    let payload = PortfolioPayload {
        title: "My App".to_string(),
        body: "A thing I built.".to_string(),
        main_image: Some("  ".to_string()),
        ..PortfolioPayload::default()
    };
    let err = validate::validate_portfolio(&payload).unwrap_err();
    assert_eq!(err.errors.len(), 1);
    assert_eq!(err.errors[0].field, "main_image");
}

#[test]
fn test_validate_blog_requires_title_and_body() {
    let payload = BlogPayload {
        title: "Post".to_string(),
        body: String::new(),
    };
    let err = validate::validate_blog(&payload).unwrap_err();
    assert_eq!(err.errors[0].field, "body");
    assert_eq!(err.errors[0].message, "can't be blank");
}

#[test]
fn test_prune_technologies_drops_blank_rows_keeps_deletions() {
    let rows = vec![
        TechnologyInput {
            name: "Rust".to_string(),
            ..TechnologyInput::default()
        },
        TechnologyInput::default(),
        TechnologyInput {
            name: "   ".to_string(),
            ..TechnologyInput::default()
        },
        // Delete ops only need the id, a blank name must not discard them.
        TechnologyInput {
            id: Some(7),
            name: String::new(),
            delete: true,
        },
    ];

    let kept = validate::prune_technologies(rows);
    assert_eq!(kept.len(), 2);
    assert_eq!(kept[0].name, "Rust");
    assert_eq!(kept[1].id, Some(7));
    assert!(kept[1].delete);
}

#[test]
fn test_validation_error_json_shape() {
    let mut err = ValidationError::default();
    err.add("title", "can't be blank");

    let json = serde_json::to_value(&err).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "errors": [{ "field": "title", "message": "can't be blank" }]
        })
    );
}

// --- STATUS & IDENTITY MODELS ---

#[test]
fn test_blog_status_toggle_round_trips() {
    assert_eq!(BlogStatus::Draft.toggled(), BlogStatus::Published);
    assert_eq!(BlogStatus::Draft.toggled().toggled(), BlogStatus::Draft);
}

#[test]
fn test_blog_status_textual_form() {
    assert_eq!(BlogStatus::Draft.as_str(), "draft");
    assert_eq!(BlogStatus::parse("published"), Some(BlogStatus::Published));
    assert_eq!(BlogStatus::parse("retired"), None);
    assert_eq!(BlogStatus::default(), BlogStatus::Draft);
    assert_eq!(serde_json::to_value(BlogStatus::Draft).unwrap(), "draft");
}

#[test]
fn test_guest_identity_placeholder_values() {
    let guest = GuestIdentity::new();
    assert_eq!(guest.name, "GuestUser");
    assert_eq!(guest.first_name, "Guest");
    assert_eq!(guest.last_name, "User");
    assert_eq!(guest.email, "guest@example.com");
}

// --- PAYLOAD DESERIALIZATION (WHITELIST) ---

#[test]
fn test_portfolio_payload_defaults_and_ignores_unknown_fields() {
    // Only whitelisted fields land; position, id, and anything else submitted
    // alongside them is silently ignored.
    let payload: PortfolioPayload = serde_json::from_value(serde_json::json!({
        "title": "My App",
        "body": "Body.",
        "id": 42,
        "position": 99
    }))
    .unwrap();

    assert_eq!(payload.title, "My App");
    assert!(payload.subtitle.is_none());
    assert!(payload.main_image.is_none());
    assert!(payload.technologies.is_empty());
}

#[test]
fn test_technology_input_row_defaults() {
    let row: TechnologyInput = serde_json::from_value(serde_json::json!({
        "name": "Rust"
    }))
    .unwrap();
    assert_eq!(row.id, None);
    assert!(!row.delete);
}
