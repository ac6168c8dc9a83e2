// Credential resolution against the SQLite identity store

mod common;

use common::{PASSWORD, create_employee, create_manager, create_org, setup};
use shared::ErrorCode;
use shift_server::{PrincipalKind, RequiredRole};

#[tokio::test]
async fn test_api_key_resolves_to_organization() {
    let state = setup().await;
    let org = create_org(&state, "cafe").await;

    let principal = state.gate.resolve_principal(&org.api_key).await.unwrap();
    assert_eq!(principal.organization_id, org.id);
    assert_eq!(principal.kind, PrincipalKind::Organization);
}

#[tokio::test]
async fn test_unknown_credential_is_unauthorized() {
    let state = setup().await;
    create_org(&state, "cafe").await;

    let err = state.gate.resolve_principal("nope").await.unwrap_err();
    assert_eq!(err.code, ErrorCode::NotAuthenticated);
}

#[tokio::test]
async fn test_manager_login_issues_token() {
    let state = setup().await;
    let org = create_org(&state, "cafe").await;
    let manager_id = create_manager(&state, org.id, "boss").await;

    let login = state.identity.login_manager("boss", PASSWORD).await.unwrap();
    assert_eq!(login.organization_id, org.id);

    let principal = state
        .gate
        .authorize(&login.token, RequiredRole::Manager)
        .await
        .unwrap();
    assert_eq!(principal.manager_id(), Some(manager_id));

    let err = state
        .identity
        .login_manager("boss", "wrong")
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidCredentials);
}

#[tokio::test]
async fn test_employee_login_and_role_mismatch() {
    let state = setup().await;
    let org = create_org(&state, "cafe").await;
    let employee_id = create_employee(&state, org.id, "ada@example.com").await;

    let login = state
        .identity
        .login_employee("cafe", "ada@example.com", PASSWORD)
        .await
        .unwrap();

    let principal = state
        .gate
        .authorize(&login.token, RequiredRole::Employee)
        .await
        .unwrap();
    assert_eq!(principal.employee_id(), Some(employee_id));

    // Resolved, but wrong kind
    let err = state
        .gate
        .authorize(&login.token, RequiredRole::Manager)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::RoleRequired);
}

#[tokio::test]
async fn test_employee_login_is_scoped_by_short_key() {
    let state = setup().await;
    let org = create_org(&state, "cafe").await;
    create_org(&state, "bar").await;
    create_employee(&state, org.id, "ada@example.com").await;

    let err = state
        .identity
        .login_employee("bar", "ada@example.com", PASSWORD)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidCredentials);
}

#[tokio::test]
async fn test_inactive_employee_cannot_log_in() {
    let state = setup().await;
    let org = create_org(&state, "cafe").await;
    let employee_id = create_employee(&state, org.id, "ada@example.com").await;

    let employee = state
        .identity
        .set_employee_active(employee_id, org.id, false)
        .await
        .unwrap();
    assert!(!employee.active);

    let err = state
        .identity
        .login_employee("cafe", "ada@example.com", PASSWORD)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::AccountDisabled);
}

#[tokio::test]
async fn test_deactivated_employee_token_stops_resolving() {
    let state = setup().await;
    let org = create_org(&state, "cafe").await;
    let employee_id = create_employee(&state, org.id, "ada@example.com").await;
    let login = state
        .identity
        .login_employee("cafe", "ada@example.com", PASSWORD)
        .await
        .unwrap();

    state
        .identity
        .set_employee_active(employee_id, org.id, false)
        .await
        .unwrap();
    let err = state
        .gate
        .authorize(&login.token, RequiredRole::Employee)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::NotAuthenticated);

    // Reactivation restores the existing session
    state
        .identity
        .set_employee_active(employee_id, org.id, true)
        .await
        .unwrap();
    let principal = state.gate.resolve_principal(&login.token).await.unwrap();
    assert_eq!(principal.employee_id(), Some(employee_id));
}

#[tokio::test]
async fn test_logout_revokes_token() {
    let state = setup().await;
    let org = create_org(&state, "cafe").await;
    create_manager(&state, org.id, "boss").await;
    let login = state.identity.login_manager("boss", PASSWORD).await.unwrap();

    state.identity.logout(&login.token).await.unwrap();

    let err = state
        .gate
        .resolve_principal(&login.token)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::NotAuthenticated);

    // Second logout: token is gone
    let err = state.identity.logout(&login.token).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::TokenInvalid);
}

#[tokio::test]
async fn test_rotated_api_key_replaces_old_one() {
    let state = setup().await;
    let org = create_org(&state, "cafe").await;

    let rotated = state.identity.rotate_api_key(org.id).await.unwrap();
    assert_ne!(rotated.api_key, org.api_key);

    assert!(state.gate.resolve_principal(&org.api_key).await.is_err());
    let principal = state
        .gate
        .authorize(&rotated.api_key, RequiredRole::ApiKey)
        .await
        .unwrap();
    assert_eq!(principal.organization_id, org.id);
}

#[tokio::test]
async fn test_duplicate_identities_are_conflicts() {
    let state = setup().await;
    let org = create_org(&state, "cafe").await;
    create_manager(&state, org.id, "boss").await;
    create_employee(&state, org.id, "ada@example.com").await;

    let err = state
        .identity
        .create_organization(shared::models::OrganizationCreate {
            name: "Other".into(),
            short_key: "cafe".into(),
            default_photo: None,
        })
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ShortKeyExists);

    let err = state
        .identity
        .create_manager(
            org.id,
            shared::models::ManagerCreate {
                username: "boss".into(),
                password: PASSWORD.into(),
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ManagerUsernameExists);

    let err = state
        .identity
        .create_employee(
            org.id,
            shared::models::EmployeeCreate {
                first_name: "Ada".into(),
                last_name: "Byron".into(),
                email: "ada@example.com".into(),
                password: PASSWORD.into(),
                title: None,
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::EmployeeEmailExists);
}
