use folio_cms::{
    auth::{AuthUser, Identity, Role},
    authz::{self, Action, Resource},
    error::ApiError,
    models::GuestIdentity,
};
use uuid::Uuid;

const ALL_ACTIONS: [Action; 9] = [
    Action::Index,
    Action::Show,
    Action::New,
    Action::Create,
    Action::Edit,
    Action::Update,
    Action::Destroy,
    Action::Reorder,
    Action::ToggleStatus,
];

#[test]
fn test_site_admin_may_do_everything() {
    for action in ALL_ACTIONS {
        for resource in [Resource::Portfolio, Resource::Blog] {
            assert!(
                authz::check(Role::SiteAdmin, action, resource),
                "site_admin denied {:?} on {:?}",
                action,
                resource
            );
        }
    }
}

#[test]
fn test_non_admin_roles_are_read_only() {
    for role in [Role::Anonymous, Role::User] {
        for action in ALL_ACTIONS {
            for resource in [Resource::Portfolio, Resource::Blog] {
                let expected = matches!(action, Action::Index | Action::Show);
                assert_eq!(
                    authz::check(role, action, resource),
                    expected,
                    "{:?} / {:?} on {:?}",
                    role,
                    action,
                    resource
                );
            }
        }
    }
}

#[test]
fn test_role_resolution_from_profile_string() {
    assert_eq!(Role::from_profile("site_admin"), Role::SiteAdmin);
    assert_eq!(Role::from_profile("user"), Role::User);
    // Unknown role strings degrade to the ordinary user level.
    assert_eq!(Role::from_profile("superuser"), Role::User);
}

#[test]
fn test_identity_role_mapping() {
    let admin = Identity::User(AuthUser {
        id: Uuid::from_u128(1),
        role: "site_admin".to_string(),
    });
    assert_eq!(admin.role(), Role::SiteAdmin);

    let guest = Identity::Guest(GuestIdentity::new());
    assert_eq!(guest.role(), Role::Anonymous);
}

#[test]
fn test_require_denies_guest_mutation() {
    let guest = Identity::Guest(GuestIdentity::new());
    let err = authz::require(&guest, Action::Create, Resource::Blog).unwrap_err();
    assert!(matches!(err, ApiError::Forbidden));

    // Reads pass the same gate.
    assert!(authz::require(&guest, Action::Show, Resource::Blog).is_ok());
}
