//! Auth service.

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use crate::{
    auth::{
        errors::AuthServiceError,
        models::{Actor, AuthenticatedUser, Credentials, NewRegistration},
        password,
        token::TokenSigner,
    },
    database::Db,
    domain::users::{
        models::{NewUser, Role, UserUuid},
        repository::PgUsersRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgAuthService {
    db: Db,
    users: PgUsersRepository,
    signer: TokenSigner,
}

impl PgAuthService {
    #[must_use]
    pub fn new(db: Db, signer: TokenSigner) -> Self {
        Self {
            db,
            users: PgUsersRepository::new(),
            signer,
        }
    }
}

fn required<'a>(
    value: &'a str,
    field: &'static str,
) -> Result<&'a str, AuthServiceError> {
    let value = value.trim();

    if value.is_empty() {
        return Err(AuthServiceError::MissingField(field));
    }

    Ok(value)
}

#[async_trait]
impl AuthService for PgAuthService {
    #[tracing::instrument(name = "auth.service.register", skip(self, registration), err)]
    async fn register(
        &self,
        registration: NewRegistration,
    ) -> Result<AuthenticatedUser, AuthServiceError> {
        let username = required(&registration.username, "username")?.to_string();
        let email = required(&registration.email, "email")?.to_lowercase();
        let name = required(&registration.name, "name")?.to_string();

        required(&registration.password, "password")?;

        let password_hash = password::hash(&registration.password)?;

        let mut tx = self.db.begin().await?;

        // Best-effort pre-check; the unique indexes stay authoritative and
        // surface concurrent duplicates as IdentityTaken via the error map.
        if self.users.identity_taken(&mut tx, &username, &email).await? {
            return Err(AuthServiceError::IdentityTaken);
        }

        let user = self
            .users
            .create_user(
                &mut tx,
                &NewUser {
                    uuid: UserUuid::new(),
                    username,
                    email,
                    name,
                    password_hash,
                    role: Role::User,
                },
            )
            .await?;

        tx.commit().await?;

        info!(user = %user.uuid, "registered new account");

        let token = self.signer.issue(user.uuid, user.role)?;

        Ok(AuthenticatedUser { user, token })
    }

    #[tracing::instrument(name = "auth.service.login", skip_all, err)]
    async fn login(&self, credentials: Credentials) -> Result<AuthenticatedUser, AuthServiceError> {
        let mut tx = self.db.begin().await?;

        let user = self
            .users
            .find_by_login(&mut tx, credentials.login.trim())
            .await?
            .ok_or(AuthServiceError::InvalidCredentials)?;

        tx.commit().await?;

        if !user.is_active {
            return Err(AuthServiceError::InvalidCredentials);
        }

        if !password::verify(&user.password_hash, &credentials.password)? {
            return Err(AuthServiceError::InvalidCredentials);
        }

        let token = self.signer.issue(user.uuid, user.role)?;

        Ok(AuthenticatedUser { user, token })
    }

    fn verify_token(&self, token: &str) -> Result<Actor, AuthServiceError> {
        Ok(self.signer.verify(token)?)
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Create an account and issue its first session token.
    async fn register(
        &self,
        registration: NewRegistration,
    ) -> Result<AuthenticatedUser, AuthServiceError>;

    /// Exchange credentials for a session token.
    async fn login(&self, credentials: Credentials)
    -> Result<AuthenticatedUser, AuthServiceError>;

    /// Decode and verify a bearer token into the calling actor.
    fn verify_token(&self, token: &str) -> Result<Actor, AuthServiceError>;
}
