//! Current Profile Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::users::{UsersServiceError, models::User};

use crate::{extensions::*, state::State};

/// Public view of an account. The password hash never appears here.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UserResponse {
    pub uuid: Uuid,
    pub username: String,
    pub email: String,
    pub name: String,
    pub role: String,
    pub is_active: bool,
    pub created_at: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            uuid: user.uuid.into_uuid(),
            username: user.username,
            email: user.email,
            name: user.name,
            role: user.role.as_str().to_string(),
            is_active: user.is_active,
            created_at: user.created_at.to_string(),
        }
    }
}

/// Current Profile Handler
///
/// Returns the authenticated user's profile.
#[endpoint(tags("auth"), summary = "Current user", security(("bearer_auth" = [])))]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<UserResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;

    let user = state
        .app
        .users
        .get_user(actor.user)
        .await
        .map_err(|error| match error {
            UsersServiceError::NotFound => {
                StatusError::unauthorized().brief("Account no longer exists")
            }
            other => {
                tracing::error!("failed to load profile: {other}");

                StatusError::internal_server_error()
            }
        })?;

    Ok(Json(user.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use storefront_app::domain::users::{MockUsersService, models::Role};

    use crate::test_helpers::{TEST_USER_UUID, make_user, users_service};

    use super::*;

    fn make_service(users: MockUsersService) -> Service {
        users_service(users, Router::with_path("auth/me").get(handler))
    }

    #[tokio::test]
    async fn test_me_returns_profile_without_password() -> TestResult {
        let mut users = MockUsersService::new();

        users
            .expect_get_user()
            .once()
            .withf(|user| *user == TEST_USER_UUID)
            .return_once(|_| Ok(make_user(TEST_USER_UUID, Role::User)));

        let mut res = TestClient::get("http://example.com/auth/me")
            .send(&make_service(users))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body = res.take_string().await?;

        assert!(!body.contains("password"), "no password field in response");

        Ok(())
    }

    #[tokio::test]
    async fn test_me_unknown_account_returns_401() -> TestResult {
        let mut users = MockUsersService::new();

        users
            .expect_get_user()
            .once()
            .return_once(|_| Err(UsersServiceError::NotFound));

        let res = TestClient::get("http://example.com/auth/me")
            .send(&make_service(users))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }
}
