//! Users service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::{
        paging::{Page, PageRequest},
        users::{
            errors::UsersServiceError,
            models::{AccountUpdate, NewUser, ProfileUpdate, User, UserUuid},
            repository::PgUsersRepository,
        },
    },
};

#[derive(Debug, Clone)]
pub struct PgUsersService {
    db: Db,
    repository: PgUsersRepository,
}

impl PgUsersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgUsersRepository::new(),
        }
    }
}

#[async_trait]
impl UsersService for PgUsersService {
    async fn find_by_login(&self, login: &str) -> Result<Option<User>, UsersServiceError> {
        let mut tx = self.db.begin().await?;

        let user = self.repository.find_by_login(&mut tx, login).await?;

        tx.commit().await?;

        Ok(user)
    }

    async fn create_user(&self, user: NewUser) -> Result<User, UsersServiceError> {
        let mut tx = self.db.begin().await?;

        let created = self.repository.create_user(&mut tx, &user).await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn get_user(&self, user: UserUuid) -> Result<User, UsersServiceError> {
        let mut tx = self.db.begin().await?;

        let user = self.repository.get_user(&mut tx, user).await?;

        tx.commit().await?;

        Ok(user)
    }

    async fn list_users(&self, page: PageRequest) -> Result<Page<User>, UsersServiceError> {
        let mut tx = self.db.begin().await?;

        let users = self.repository.list_users(&mut tx, page).await?;
        let total = self.repository.count_users(&mut tx).await?;

        tx.commit().await?;

        Ok(Page::new(users, total, page))
    }

    async fn update_profile(
        &self,
        user: UserUuid,
        update: ProfileUpdate,
    ) -> Result<User, UsersServiceError> {
        let email = update.email.map(|email| email.to_lowercase());

        let mut tx = self.db.begin().await?;

        let updated = self
            .repository
            .update_profile(&mut tx, user, update.name.as_deref(), email.as_deref())
            .await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn update_account(
        &self,
        user: UserUuid,
        update: AccountUpdate,
    ) -> Result<User, UsersServiceError> {
        let mut tx = self.db.begin().await?;

        let updated = self.repository.update_account(&mut tx, user, update).await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn delete_user(&self, user: UserUuid) -> Result<(), UsersServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self.repository.delete_user(&mut tx, user).await?;

        if rows_affected == 0 {
            return Err(UsersServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait UsersService: Send + Sync {
    /// Look an account up by username or email.
    async fn find_by_login(&self, login: &str) -> Result<Option<User>, UsersServiceError>;

    /// Insert an account with a pre-hashed password. Registration flows
    /// live in the auth service; this is for administrative tooling.
    async fn create_user(&self, user: NewUser) -> Result<User, UsersServiceError>;

    /// Retrieve a single user.
    async fn get_user(&self, user: UserUuid) -> Result<User, UsersServiceError>;

    /// Page through all users, newest first.
    async fn list_users(&self, page: PageRequest) -> Result<Page<User>, UsersServiceError>;

    /// Update the caller's own profile fields.
    async fn update_profile(
        &self,
        user: UserUuid,
        update: ProfileUpdate,
    ) -> Result<User, UsersServiceError>;

    /// Admin-side role/activation update.
    async fn update_account(
        &self,
        user: UserUuid,
        update: AccountUpdate,
    ) -> Result<User, UsersServiceError>;

    /// Remove an account entirely.
    async fn delete_user(&self, user: UserUuid) -> Result<(), UsersServiceError>;
}
