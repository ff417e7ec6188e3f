mod common;

use assert_matches::assert_matches;

use retail_pos_api::entities::user::UserRole;
use retail_pos_api::errors::ServiceError;
use retail_pos_api::services::users::{LoginRequest, NewUser, UpdateUser};

use common::spawn_app;

fn admin_account() -> NewUser {
    NewUser {
        name: "Owner".to_string(),
        username: "owner".to_string(),
        email: "owner@example.com".to_string(),
        password: "s3cret-pass".to_string(),
        role: "SuperAdmin".to_string(),
        assigned_showroom: None,
    }
}

fn officer_account() -> NewUser {
    NewUser {
        name: "Officer".to_string(),
        username: "officer".to_string(),
        email: "officer@example.com".to_string(),
        password: "s3cret-pass".to_string(),
        role: "SalesOfficer".to_string(),
        assigned_showroom: Some("HO".to_string()),
    }
}

#[tokio::test]
async fn first_account_bootstraps_without_credentials() {
    let app = spawn_app().await;

    let created = app
        .state
        .services
        .users
        .create_user(None, admin_account())
        .await
        .expect("bootstrap account");
    assert_eq!(created.role, UserRole::SuperAdmin);

    // Once any account exists, anonymous registration is closed.
    let result = app
        .state
        .services
        .users
        .create_user(None, officer_account())
        .await;
    assert_matches!(result, Err(ServiceError::Forbidden(_)));
}

#[tokio::test]
async fn super_admin_creates_further_accounts() {
    let app = spawn_app().await;
    app.state
        .services
        .users
        .create_user(None, admin_account())
        .await
        .expect("bootstrap account");

    let (_, token) = app
        .state
        .services
        .users
        .login(LoginRequest {
            username: "owner".to_string(),
            password: "s3cret-pass".to_string(),
        })
        .await
        .expect("login");
    let context = app
        .state
        .services
        .auth
        .verify_token(&token)
        .expect("verify token");

    let created = app
        .state
        .services
        .users
        .create_user(Some(&context), officer_account())
        .await
        .expect("create officer");
    assert_eq!(created.role, UserRole::SalesOfficer);
    assert_eq!(created.assigned_showroom.as_deref(), Some("HO"));
}

#[tokio::test]
async fn login_failures_are_indistinguishable() {
    let app = spawn_app().await;
    app.state
        .services
        .users
        .create_user(None, admin_account())
        .await
        .expect("bootstrap account");

    let wrong_password = app
        .state
        .services
        .users
        .login(LoginRequest {
            username: "owner".to_string(),
            password: "wrong".to_string(),
        })
        .await;
    let unknown_user = app
        .state
        .services
        .users
        .login(LoginRequest {
            username: "nobody".to_string(),
            password: "wrong".to_string(),
        })
        .await;

    let messages: Vec<String> = [wrong_password, unknown_user]
        .into_iter()
        .map(|result| match result {
            Err(ServiceError::AuthError(message)) => message,
            other => panic!("expected auth error, got {:?}", other.map(|_| ())),
        })
        .collect();
    assert_eq!(messages[0], "Invalid User or Password");
    assert_eq!(messages[0], messages[1]);
}

#[tokio::test]
async fn login_token_carries_role_and_showroom_scope() {
    let app = spawn_app().await;
    app.state
        .services
        .users
        .create_user(None, admin_account())
        .await
        .expect("bootstrap account");
    app.state
        .services
        .users
        .create_user(
            Some(
                &app.state
                    .services
                    .auth
                    .verify_token(
                        &app.state
                            .services
                            .users
                            .login(LoginRequest {
                                username: "owner".to_string(),
                                password: "s3cret-pass".to_string(),
                            })
                            .await
                            .expect("login owner")
                            .1,
                    )
                    .expect("verify"),
            ),
            officer_account(),
        )
        .await
        .expect("create officer");

    let (_, token) = app
        .state
        .services
        .users
        .login(LoginRequest {
            username: "officer".to_string(),
            password: "s3cret-pass".to_string(),
        })
        .await
        .expect("login officer");
    let context = app
        .state
        .services
        .auth
        .verify_token(&token)
        .expect("verify token");
    assert_eq!(context.role, UserRole::SalesOfficer);
    assert_eq!(context.showroom_code.as_deref(), Some("HO"));
    assert!(!context.is_super_admin());
}

#[tokio::test]
async fn super_admin_cannot_be_deleted() {
    let app = spawn_app().await;
    let admin = app
        .state
        .services
        .users
        .create_user(None, admin_account())
        .await
        .expect("bootstrap account");

    let result = app.state.services.users.delete_user(admin.id).await;
    assert_matches!(result, Err(ServiceError::Forbidden(_)));

    let users = app
        .state
        .services
        .users
        .list_users()
        .await
        .expect("list users");
    assert_eq!(users.len(), 1);
}

#[tokio::test]
async fn password_is_rehashed_only_when_changed() {
    let app = spawn_app().await;
    let admin = app
        .state
        .services
        .users
        .create_user(None, admin_account())
        .await
        .expect("bootstrap account");
    let original_hash = admin.password_hash.clone();

    // Sending the stored hash back unchanged must not rehash it.
    let unchanged = app
        .state
        .services
        .users
        .update_user(
            admin.id,
            UpdateUser {
                name: Some("Owner Renamed".to_string()),
                email: None,
                password: Some(original_hash.clone()),
                role: None,
                assigned_showroom: None,
            },
        )
        .await
        .expect("update without password change");
    assert_eq!(unchanged.password_hash, original_hash);
    assert_eq!(unchanged.name, "Owner Renamed");

    let changed = app
        .state
        .services
        .users
        .update_user(
            admin.id,
            UpdateUser {
                name: None,
                email: None,
                password: Some("brand-new-pass".to_string()),
                role: None,
                assigned_showroom: None,
            },
        )
        .await
        .expect("update with new password");
    assert_ne!(changed.password_hash, original_hash);

    app.state
        .services
        .users
        .login(LoginRequest {
            username: "owner".to_string(),
            password: "brand-new-pass".to_string(),
        })
        .await
        .expect("login with new password");
}

#[tokio::test]
async fn unknown_role_is_rejected() {
    let app = spawn_app().await;
    let mut input = admin_account();
    input.role = "Intern".to_string();

    let result = app.state.services.users.create_user(None, input).await;
    assert_matches!(result, Err(ServiceError::ValidationError(_)));
}

#[tokio::test]
async fn duplicate_username_is_rejected() {
    let app = spawn_app().await;
    let admin = app
        .state
        .services
        .users
        .create_user(None, admin_account())
        .await
        .expect("bootstrap account");
    let (_, token) = app
        .state
        .services
        .users
        .login(LoginRequest {
            username: "owner".to_string(),
            password: "s3cret-pass".to_string(),
        })
        .await
        .expect("login");
    let context = app
        .state
        .services
        .auth
        .verify_token(&token)
        .expect("verify token");
    assert_eq!(context.user_id, admin.id);

    let mut duplicate = officer_account();
    duplicate.username = "owner".to_string();
    let result = app
        .state
        .services
        .users
        .create_user(Some(&context), duplicate)
        .await;
    assert_matches!(result, Err(ServiceError::Conflict(_)));
}
