use std::sync::Arc;

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};
use uuid::Uuid;
use validator::Validate;

use crate::auth::{AuthContext, AuthService};
use crate::entities::user::{self, UserRole};
use crate::errors::ServiceError;
use crate::events::{Event, EventSender};

/// Login failures never say whether the username or the password was wrong.
const LOGIN_FAILED: &str = "Invalid User or Password";

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewUser {
    #[validate(length(min = 1, message = "Name cannot be empty"))]
    pub name: String,
    #[validate(length(min = 3, message = "Username must be at least 3 characters"))]
    pub username: String,
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
    pub role: String,
    /// Showroom code; omitted means unrestricted.
    pub assigned_showroom: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateUser {
    pub name: Option<String>,
    #[validate(email(message = "Invalid email address"))]
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<String>,
    pub assigned_showroom: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Username cannot be empty"))]
    pub username: String,
    #[validate(length(min = 1, message = "Password cannot be empty"))]
    pub password: String,
}

#[derive(Clone)]
pub struct UserService {
    db: Arc<DatabaseConnection>,
    auth: AuthService,
    event_sender: EventSender,
}

impl UserService {
    pub fn new(db: Arc<DatabaseConnection>, auth: AuthService, event_sender: EventSender) -> Self {
        Self {
            db,
            auth,
            event_sender,
        }
    }

    /// Creates an account. Only a super admin may do this, except when the
    /// users table is empty, which bootstraps the first account.
    #[instrument(skip(self, input), fields(username = %input.username))]
    pub async fn create_user(
        &self,
        actor: Option<&AuthContext>,
        input: NewUser,
    ) -> Result<user::Model, ServiceError> {
        input.validate()?;

        let is_super_admin = actor.map(|a| a.is_super_admin()).unwrap_or(false);
        if !is_super_admin {
            let existing_users = user::Entity::find().count(self.db.as_ref()).await?;
            if existing_users > 0 {
                return Err(ServiceError::Forbidden(
                    "Only a super admin can create accounts".to_string(),
                ));
            }
        }

        let role = UserRole::parse(&input.role)
            .ok_or_else(|| ServiceError::ValidationError(format!("Unknown role {}", input.role)))?;

        let duplicate = user::Entity::find()
            .filter(
                sea_orm::Condition::any()
                    .add(user::Column::Username.eq(input.username.as_str()))
                    .add(user::Column::Email.eq(input.email.as_str())),
            )
            .one(self.db.as_ref())
            .await?;
        if duplicate.is_some() {
            return Err(ServiceError::Conflict(
                "Username or email already taken".to_string(),
            ));
        }

        let password_hash = self.auth.hash_password(&input.password)?;
        let created = user::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(input.name),
            username: Set(input.username),
            email: Set(input.email),
            password_hash: Set(password_hash),
            role: Set(role),
            assigned_showroom: Set(normalize_showroom(input.assigned_showroom)),
            ..Default::default()
        }
        .insert(self.db.as_ref())
        .await?;

        info!(user_id = %created.id, role = role.as_str(), "created user");
        self.event_sender
            .send_best_effort(Event::UserCreated(created.id))
            .await;
        Ok(created)
    }

    /// Verifies credentials and issues a token.
    #[instrument(skip(self, request), fields(username = %request.username))]
    pub async fn login(
        &self,
        request: LoginRequest,
    ) -> Result<(user::Model, String), ServiceError> {
        request.validate()?;

        let found = user::Entity::find()
            .filter(
                sea_orm::Condition::any()
                    .add(user::Column::Username.eq(request.username.as_str()))
                    .add(user::Column::Email.eq(request.username.as_str())),
            )
            .one(self.db.as_ref())
            .await?;
        let Some(found) = found else {
            warn!("login attempt for unknown user");
            return Err(ServiceError::AuthError(LOGIN_FAILED.to_string()));
        };

        if !self
            .auth
            .verify_password(&request.password, &found.password_hash)?
        {
            warn!(user_id = %found.id, "login attempt with wrong password");
            return Err(ServiceError::AuthError(LOGIN_FAILED.to_string()));
        }

        let token = self.auth.issue_token(
            found.id,
            &found.name,
            found.role,
            found.assigned_showroom.as_deref(),
        )?;
        self.event_sender
            .send_best_effort(Event::UserLoggedIn(found.id))
            .await;
        Ok((found, token))
    }

    /// Updates an account. The password is rehashed only when a new value is
    /// supplied that differs from the stored hash.
    #[instrument(skip(self, input))]
    pub async fn update_user(
        &self,
        id: Uuid,
        input: UpdateUser,
    ) -> Result<user::Model, ServiceError> {
        input.validate()?;

        let existing = user::Entity::find_by_id(id)
            .one(self.db.as_ref())
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("User {} not found", id)))?;

        let rehashed = match &input.password {
            Some(password) if !password.is_empty() && password != &existing.password_hash => {
                Some(self.auth.hash_password(password)?)
            }
            _ => None,
        };

        let mut active: user::ActiveModel = existing.into();
        if let Some(name) = input.name {
            active.name = Set(name);
        }
        if let Some(email) = input.email {
            active.email = Set(email);
        }
        if let Some(role) = input.role {
            let role = UserRole::parse(&role)
                .ok_or_else(|| ServiceError::ValidationError(format!("Unknown role {}", role)))?;
            active.role = Set(role);
        }
        if input.assigned_showroom.is_some() {
            active.assigned_showroom = Set(normalize_showroom(input.assigned_showroom));
        }
        if let Some(hash) = rehashed {
            active.password_hash = Set(hash);
        }
        Ok(active.update(self.db.as_ref()).await?)
    }

    /// Deletes an account. Super admins cannot be deleted.
    #[instrument(skip(self))]
    pub async fn delete_user(&self, id: Uuid) -> Result<(), ServiceError> {
        let existing = user::Entity::find_by_id(id)
            .one(self.db.as_ref())
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("User {} not found", id)))?;
        if existing.role == UserRole::SuperAdmin {
            return Err(ServiceError::Forbidden(
                "Admin cannot be deleted".to_string(),
            ));
        }

        existing.delete(self.db.as_ref()).await?;
        self.event_sender
            .send_best_effort(Event::UserDeleted(id))
            .await;
        Ok(())
    }

    pub async fn list_users(&self) -> Result<Vec<user::Model>, ServiceError> {
        Ok(user::Entity::find()
            .order_by_asc(user::Column::Username)
            .all(self.db.as_ref())
            .await?)
    }
}

/// "All" at registration means unrestricted.
fn normalize_showroom(assigned: Option<String>) -> Option<String> {
    assigned.filter(|code| code != "All" && !code.is_empty())
}
