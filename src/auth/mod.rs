//! Authentication and authorization.
//!
//! JWT bearer tokens with cookie fallback. Tokens carry the user's role and
//! optional showroom scope so handlers can authorize without a user lookup.

use argon2::password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, SaltString};
use argon2::{Argon2, PasswordVerifier};
use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::user::UserRole;
use crate::errors::ServiceError;
use crate::AppState;

pub const AUTH_COOKIE_NAME: &str = "pos_token";

/// JWT claim set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id.
    pub sub: String,
    pub name: String,
    pub role: String,
    /// Showroom code the account is restricted to, if any.
    pub showroom: Option<String>,
    pub jti: String,
    pub iat: i64,
    pub exp: i64,
}

/// The authenticated caller, attached as a request extension by
/// [`auth_middleware`].
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub user_id: Uuid,
    pub name: String,
    pub role: UserRole,
    pub showroom_code: Option<String>,
}

impl AuthContext {
    pub fn is_super_admin(&self) -> bool {
        self.role == UserRole::SuperAdmin
    }
}

/// Issues and verifies tokens and hashes passwords.
#[derive(Clone)]
pub struct AuthService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    expiration_secs: u64,
}

impl AuthService {
    pub fn new(jwt_secret: &str, expiration_secs: u64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(jwt_secret.as_bytes()),
            expiration_secs,
        }
    }

    pub fn issue_token(
        &self,
        user_id: Uuid,
        name: &str,
        role: UserRole,
        showroom_code: Option<&str>,
    ) -> Result<String, ServiceError> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: user_id.to_string(),
            name: name.to_string(),
            role: role.as_str().to_string(),
            showroom: showroom_code.map(|s| s.to_string()),
            jti: Uuid::new_v4().to_string(),
            iat: now,
            exp: now + self.expiration_secs as i64,
        };
        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| ServiceError::InternalError(format!("Failed to sign token: {}", e)))
    }

    pub fn verify_token(&self, token: &str) -> Result<AuthContext, ServiceError> {
        let data = decode::<Claims>(token, &self.decoding_key, &Validation::default())
            .map_err(|_| ServiceError::AuthError("Invalid or expired token".to_string()))?;
        let claims = data.claims;

        let user_id = Uuid::parse_str(&claims.sub)
            .map_err(|_| ServiceError::AuthError("Invalid token subject".to_string()))?;
        let role = UserRole::parse(&claims.role)
            .ok_or_else(|| ServiceError::AuthError("Unknown role in token".to_string()))?;

        Ok(AuthContext {
            user_id,
            name: claims.name,
            role,
            showroom_code: claims.showroom,
        })
    }

    pub fn hash_password(&self, password: &str) -> Result<String, ServiceError> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| ServiceError::InternalError(format!("Failed to hash password: {}", e)))
    }

    pub fn verify_password(&self, password: &str, hash: &str) -> Result<bool, ServiceError> {
        let parsed = PasswordHash::new(hash)
            .map_err(|e| ServiceError::InternalError(format!("Stored hash is invalid: {}", e)))?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    }

    /// `Set-Cookie` value delivering the token alongside the JSON body.
    pub fn session_cookie(&self, token: &str) -> String {
        format!(
            "{}={}; HttpOnly; Path=/; Max-Age={}; SameSite=Lax",
            AUTH_COOKIE_NAME, token, self.expiration_secs
        )
    }

    pub fn clear_session_cookie(&self) -> String {
        format!("{}=; HttpOnly; Path=/; Max-Age=0; SameSite=Lax", AUTH_COOKIE_NAME)
    }
}

/// Pulls a token from the `Authorization` header or the session cookie.
pub fn token_from_headers(headers: &axum::http::HeaderMap) -> Option<String> {
    if let Some(value) = headers.get(header::AUTHORIZATION) {
        if let Ok(value) = value.to_str() {
            if let Some(token) = value.strip_prefix("Bearer ") {
                return Some(token.trim().to_string());
            }
        }
    }
    let cookies = headers.get(header::COOKIE)?.to_str().ok()?;
    cookies.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        (name == AUTH_COOKIE_NAME).then(|| value.to_string())
    })
}

/// Requires a valid token and attaches [`AuthContext`] to the request.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ServiceError> {
    let token = token_from_headers(request.headers())
        .ok_or_else(|| ServiceError::AuthError("Missing authentication token".to_string()))?;
    let context = state.services.auth.verify_token(&token)?;
    request.extensions_mut().insert(context);
    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> AuthService {
        AuthService::new("test-secret", 3600)
    }

    #[test]
    fn issued_token_round_trips() {
        let auth = service();
        let id = Uuid::new_v4();
        let token = auth
            .issue_token(id, "Test Admin", UserRole::SuperAdmin, Some("HO"))
            .unwrap();
        let context = auth.verify_token(&token).unwrap();
        assert_eq!(context.user_id, id);
        assert_eq!(context.role, UserRole::SuperAdmin);
        assert_eq!(context.showroom_code.as_deref(), Some("HO"));
        assert!(context.is_super_admin());
    }

    #[test]
    fn tampered_token_is_rejected() {
        let auth = service();
        let token = auth
            .issue_token(Uuid::new_v4(), "x", UserRole::SalesOfficer, None)
            .unwrap();
        let other = AuthService::new("different-secret", 3600);
        assert!(other.verify_token(&token).is_err());
    }

    #[test]
    fn password_hash_verifies_and_rejects() {
        let auth = service();
        let hash = auth.hash_password("hunter2").unwrap();
        assert!(auth.verify_password("hunter2", &hash).unwrap());
        assert!(!auth.verify_password("hunter3", &hash).unwrap());
    }
}
