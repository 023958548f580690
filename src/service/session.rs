//! Caller identity forwarded by the auth layer in front of this service.

use std::collections::HashMap;

use super::ServiceError;
use crate::model::UserId;

pub const USER_ID_KEY: &str = "x-user-id";
pub const ROLE_KEY: &str = "x-user-role";
pub const ADMIN_ROLE: &str = "admin";

/// Session variables of the incoming request.
///
/// The gateway authenticates the caller and forwards the result as headers:
///
/// ```json
/// {
///   "x-user-id": "user-42",
///   "x-user-role": "admin"
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct Session {
    variables: HashMap<String, String>,
}

impl Session {
    /// Create an anonymous session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session from a map of variables.
    pub fn from_map(variables: HashMap<String, String>) -> Self {
        Self { variables }
    }

    /// Session for an authenticated user.
    pub fn user(user_id: impl Into<String>) -> Self {
        let mut session = Self::new();
        session.set(USER_ID_KEY, user_id);
        session
    }

    /// Session for an authenticated admin.
    pub fn admin(user_id: impl Into<String>) -> Self {
        let mut session = Self::user(user_id);
        session.set(ROLE_KEY, ADMIN_ROLE);
        session
    }

    pub fn user_id(&self) -> Option<UserId> {
        self.get(USER_ID_KEY)
            .filter(|id| !id.trim().is_empty())
            .map(UserId::from)
    }

    pub fn role(&self) -> Option<&str> {
        self.get(ROLE_KEY)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.variables.get(key).map(|v| v.as_str())
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.variables.insert(key.into(), value.into());
    }

    /// The user id, or `Unauthorized` for private routes.
    pub fn require_user(&self) -> Result<UserId, ServiceError> {
        self.user_id()
            .ok_or_else(|| ServiceError::Unauthorized("authentication required".into()))
    }

    /// Succeeds only for an authenticated admin.
    pub fn require_admin(&self) -> Result<UserId, ServiceError> {
        let user = self.require_user()?;
        if self.role() != Some(ADMIN_ROLE) {
            return Err(ServiceError::Forbidden("admin access required".into()));
        }
        Ok(user)
    }
}
