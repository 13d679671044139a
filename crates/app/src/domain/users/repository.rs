//! Users Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};

use crate::domain::{
    paging::PageRequest,
    users::models::{AccountUpdate, NewUser, Role, User, UserUuid},
};

const GET_USER_SQL: &str = include_str!("sql/get_user.sql");
const FIND_BY_LOGIN_SQL: &str = include_str!("sql/find_by_login.sql");
const IDENTITY_TAKEN_SQL: &str = include_str!("sql/identity_taken.sql");
const CREATE_USER_SQL: &str = include_str!("sql/create_user.sql");
const LIST_USERS_SQL: &str = include_str!("sql/list_users.sql");
const COUNT_USERS_SQL: &str = include_str!("sql/count_users.sql");
const UPDATE_PROFILE_SQL: &str = include_str!("sql/update_profile.sql");
const UPDATE_ACCOUNT_SQL: &str = include_str!("sql/update_account.sql");
const DELETE_USER_SQL: &str = include_str!("sql/delete_user.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgUsersRepository;

impl PgUsersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn get_user(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<User, sqlx::Error> {
        query_as::<Postgres, User>(GET_USER_SQL)
            .bind(user.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    /// Look an account up by username or email, whichever matches.
    pub(crate) async fn find_by_login(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        login: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        query_as::<Postgres, User>(FIND_BY_LOGIN_SQL)
            .bind(login)
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn identity_taken(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        username: &str,
        email: &str,
    ) -> Result<bool, sqlx::Error> {
        query_scalar::<Postgres, bool>(IDENTITY_TAKEN_SQL)
            .bind(username)
            .bind(email)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_user(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: &NewUser,
    ) -> Result<User, sqlx::Error> {
        query_as::<Postgres, User>(CREATE_USER_SQL)
            .bind(user.uuid.into_uuid())
            .bind(&user.username)
            .bind(&user.email)
            .bind(&user.name)
            .bind(&user.password_hash)
            .bind(user.role.as_str())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_users(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        page: PageRequest,
    ) -> Result<Vec<User>, sqlx::Error> {
        query_as::<Postgres, User>(LIST_USERS_SQL)
            .bind(i64::from(page.limit()))
            .bind(page.offset())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn count_users(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<u64, sqlx::Error> {
        let count: i64 = query_scalar(COUNT_USERS_SQL).fetch_one(&mut **tx).await?;

        Ok(count.unsigned_abs())
    }

    pub(crate) async fn update_profile(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        name: Option<&str>,
        email: Option<&str>,
    ) -> Result<User, sqlx::Error> {
        query_as::<Postgres, User>(UPDATE_PROFILE_SQL)
            .bind(user.into_uuid())
            .bind(name)
            .bind(email)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_account(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        update: AccountUpdate,
    ) -> Result<User, sqlx::Error> {
        query_as::<Postgres, User>(UPDATE_ACCOUNT_SQL)
            .bind(user.into_uuid())
            .bind(update.role.map(Role::as_str))
            .bind(update.is_active)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_user(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_USER_SQL)
            .bind(user.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for User {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let role: String = row.try_get("role")?;

        let role = role
            .parse::<Role>()
            .map_err(|e| sqlx::Error::ColumnDecode {
                index: "role".to_string(),
                source: Box::new(e),
            })?;

        Ok(Self {
            uuid: UserUuid::from_uuid(row.try_get("uuid")?),
            username: row.try_get("username")?,
            email: row.try_get("email")?,
            name: row.try_get("name")?,
            password_hash: row.try_get("password_hash")?,
            role,
            is_active: row.try_get("is_active")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
