//! Profile Update Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use storefront_app::domain::users::{UsersServiceError, models::ProfileUpdate};

use crate::{auth::handlers::me::UserResponse, extensions::*, state::State};

/// Profile Update Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateProfileRequest {
    pub name: Option<String>,
    pub email: Option<String>,
}

impl From<UpdateProfileRequest> for ProfileUpdate {
    fn from(request: UpdateProfileRequest) -> Self {
        ProfileUpdate {
            name: request.name,
            email: request.email,
        }
    }
}

/// Profile Update Handler
#[endpoint(tags("auth"), summary = "Update profile", security(("bearer_auth" = [])))]
pub(crate) async fn handler(
    json: JsonBody<UpdateProfileRequest>,
    depot: &mut Depot,
) -> Result<Json<UserResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;

    let user = state
        .app
        .users
        .update_profile(actor.user, json.into_inner().into())
        .await
        .map_err(|error| match error {
            UsersServiceError::NotFound => StatusError::not_found(),
            UsersServiceError::AlreadyExists => {
                StatusError::bad_request().brief("Email already in use")
            }
            other => {
                tracing::error!("failed to update profile: {other}");

                StatusError::internal_server_error()
            }
        })?;

    Ok(Json(user.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::TestClient;
    use serde_json::json;
    use testresult::TestResult;

    use storefront_app::domain::users::{MockUsersService, models::Role};

    use crate::test_helpers::{TEST_USER_UUID, make_user, users_service};

    use super::*;

    fn make_service(users: MockUsersService) -> Service {
        users_service(users, Router::with_path("auth/me").put(handler))
    }

    #[tokio::test]
    async fn test_update_profile_targets_the_actor() -> TestResult {
        let mut users = MockUsersService::new();

        users
            .expect_update_profile()
            .once()
            .withf(|user, update| {
                *user == TEST_USER_UUID && update.name.as_deref() == Some("New Name")
            })
            .return_once(|user, _| Ok(make_user(user, Role::User)));

        let res = TestClient::put("http://example.com/auth/me")
            .json(&json!({ "name": "New Name" }))
            .send(&make_service(users))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_update_profile_duplicate_email_returns_400() -> TestResult {
        let mut users = MockUsersService::new();

        users
            .expect_update_profile()
            .once()
            .return_once(|_, _| Err(UsersServiceError::AlreadyExists));

        let res = TestClient::put("http://example.com/auth/me")
            .json(&json!({ "email": "taken@example.com" }))
            .send(&make_service(users))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
