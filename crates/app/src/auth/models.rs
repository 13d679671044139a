//! Auth data models.

use crate::domain::users::models::{Role, User, UserUuid};

/// The authenticated caller, decoded from a session token.
///
/// Passed explicitly into every service call that needs to know who is
/// asking; services never consult ambient request state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub user: UserUuid,
    pub role: Role,
}

impl Actor {
    #[must_use]
    pub const fn new(user: UserUuid, role: Role) -> Self {
        Self { user, role }
    }

    #[must_use]
    pub const fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

/// Registration payload.
#[derive(Debug, Clone, PartialEq)]
pub struct NewRegistration {
    pub username: String,
    pub email: String,
    pub password: String,
    pub name: String,
}

/// Login payload. `login` matches against username or email.
#[derive(Debug, Clone, PartialEq)]
pub struct Credentials {
    pub login: String,
    pub password: String,
}

/// A user together with a freshly issued session token.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user: User,
    pub token: String,
}
