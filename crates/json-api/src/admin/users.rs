//! Admin User Management Handlers

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::{JsonBody, PathParam, QueryParam}},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::users::{
    UsersServiceError,
    models::{AccountUpdate, Role},
};

use crate::{auth::handlers::me::UserResponse, extensions::*, state::State};

/// User listing with its pagination block.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UsersResponse {
    pub users: Vec<UserResponse>,
    pub pagination: PaginationMeta,
}

/// Admin account update request.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UpdateAccountRequest {
    pub role: Option<String>,
    pub is_active: Option<bool>,
}

fn map_error(error: UsersServiceError) -> StatusError {
    match error {
        UsersServiceError::NotFound => StatusError::not_found().brief("User not found"),
        UsersServiceError::AlreadyExists => {
            StatusError::conflict().brief("Username or email already in use")
        }
        other => {
            tracing::error!("users storage error: {other}");

            StatusError::internal_server_error()
        }
    }
}

/// List Users Handler
#[endpoint(tags("admin"), summary = "List Users", security(("bearer_auth" = [])))]
pub(crate) async fn index(
    page: QueryParam<u32, false>,
    limit: QueryParam<u32, false>,
    depot: &mut Depot,
) -> Result<Json<UsersResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let page = (page, limit).into_page_request();

    let users = state
        .app
        .users
        .list_users(page)
        .await
        .map_err(map_error)?;

    Ok(Json(UsersResponse {
        pagination: PaginationMeta::from(&users),
        users: users.items.into_iter().map(Into::into).collect(),
    }))
}

/// Update Account Handler
///
/// Role changes and activation toggles.
#[endpoint(tags("admin"), summary = "Update Account", security(("bearer_auth" = [])))]
pub(crate) async fn update(
    user: PathParam<Uuid>,
    json: JsonBody<UpdateAccountRequest>,
    depot: &mut Depot,
) -> Result<Json<UserResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let request = json.into_inner();

    let role = request
        .role
        .map(|value| value.parse::<Role>())
        .transpose()
        .or_400("role must be user or admin")?;

    let user = state
        .app
        .users
        .update_account(
            user.into_inner().into(),
            AccountUpdate {
                role,
                is_active: request.is_active,
            },
        )
        .await
        .map_err(map_error)?;

    Ok(Json(user.into()))
}

/// Delete User Handler
#[endpoint(tags("admin"), summary = "Delete User", security(("bearer_auth" = [])))]
pub(crate) async fn delete(
    user: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<serde_json::Value>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    state
        .app
        .users
        .delete_user(user.into_inner().into())
        .await
        .map_err(map_error)?;

    Ok(Json(serde_json::json!({ "message": "User deleted" })))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use storefront_app::domain::{
        paging::Page,
        users::{MockUsersService, models::UserUuid},
    };

    use crate::test_helpers::{TEST_USER_UUID, admin_users_service, make_user};

    use super::*;

    #[tokio::test]
    async fn test_index_pages_users() -> TestResult {
        let mut users = MockUsersService::new();

        users
            .expect_list_users()
            .once()
            .withf(|page| page.page() == 1)
            .return_once(|page| {
                Ok(Page::new(
                    vec![make_user(TEST_USER_UUID, Role::User)],
                    1,
                    page,
                ))
            });

        let service = admin_users_service(users, Router::with_path("admin/users").get(index));

        let response: UsersResponse = TestClient::get("http://example.com/admin/users")
            .send(&service)
            .await
            .take_json()
            .await?;

        assert_eq!(response.users.len(), 1);
        assert_eq!(response.pagination.total, 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_deactivate_account() -> TestResult {
        let target = UserUuid::new();

        let mut users = MockUsersService::new();

        users
            .expect_update_account()
            .once()
            .withf(move |user, account_update| {
                *user == target
                    && account_update.is_active == Some(false)
                    && account_update.role.is_none()
            })
            .return_once(|user, _| {
                let mut updated = make_user(user, Role::User);
                updated.is_active = false;

                Ok(updated)
            });

        let service =
            admin_users_service(users, Router::with_path("admin/users/{user}").put(update));

        let mut res = TestClient::put(format!("http://example.com/admin/users/{target}"))
            .json(&json!({ "isActive": false }))
            .send(&service)
            .await;

        let body: UserResponse = res.take_json().await?;

        assert!(!body.is_active);

        Ok(())
    }

    #[tokio::test]
    async fn test_bad_role_returns_400() -> TestResult {
        let users = MockUsersService::new();

        let service =
            admin_users_service(users, Router::with_path("admin/users/{user}").put(update));

        let res = TestClient::put(format!("http://example.com/admin/users/{}", UserUuid::new()))
            .json(&json!({ "role": "superuser" }))
            .send(&service)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_unknown_user_returns_404() -> TestResult {
        let mut users = MockUsersService::new();

        users
            .expect_delete_user()
            .once()
            .return_once(|_| Err(UsersServiceError::NotFound));

        let service =
            admin_users_service(users, Router::with_path("admin/users/{user}").delete(delete));

        let res = TestClient::delete(format!(
            "http://example.com/admin/users/{}",
            UserUuid::new()
        ))
        .send(&service)
        .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
