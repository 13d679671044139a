//! Login Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use storefront_app::auth::models::Credentials;

use crate::{
    auth::{errors::into_status_error, handlers::register::SessionResponse},
    extensions::*,
    state::State,
};

/// Login Request. The identity field matches either username or email.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct LoginRequest {
    #[serde(alias = "email", alias = "username")]
    pub login: String,
    pub password: String,
}

impl From<LoginRequest> for Credentials {
    fn from(request: LoginRequest) -> Self {
        Credentials {
            login: request.login,
            password: request.password,
        }
    }
}

/// Login Handler
#[endpoint(
    tags("auth"),
    summary = "Login",
    responses(
        (status_code = StatusCode::OK, description = "Session issued"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid credentials"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<LoginRequest>,
    depot: &mut Depot,
) -> Result<Json<SessionResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let authenticated = state
        .app
        .auth
        .login(json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(SessionResponse {
        token: authenticated.token,
        user: authenticated.user.into(),
    }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use storefront_app::{
        auth::{AuthServiceError, MockAuthService, models::AuthenticatedUser},
        domain::users::models::Role,
    };

    use crate::test_helpers::{TEST_USER_UUID, make_user, public_auth_service};

    use super::*;

    fn make_service(auth: MockAuthService) -> Service {
        public_auth_service(auth, Router::with_path("auth/login").post(handler))
    }

    #[tokio::test]
    async fn test_login_returns_token() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_login()
            .once()
            .withf(|credentials| credentials.login == "minh@example.com")
            .return_once(|_| {
                Ok(AuthenticatedUser {
                    user: make_user(TEST_USER_UUID, Role::User),
                    token: "signed-token".to_string(),
                })
            });

        let mut res = TestClient::post("http://example.com/auth/login")
            .json(&json!({ "email": "minh@example.com", "password": "hunter2hunter2" }))
            .send(&make_service(auth))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: SessionResponse = res.take_json().await?;

        assert_eq!(body.token, "signed-token");

        Ok(())
    }

    #[tokio::test]
    async fn test_login_wrong_password_returns_400() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_login()
            .once()
            .return_once(|_| Err(AuthServiceError::InvalidCredentials));

        let res = TestClient::post("http://example.com/auth/login")
            .json(&json!({ "login": "minh", "password": "wrong" }))
            .send(&make_service(auth))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_login_unknown_user_indistinguishable_from_wrong_password() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_login()
            .once()
            .return_once(|_| Err(AuthServiceError::InvalidCredentials));

        let res = TestClient::post("http://example.com/auth/login")
            .json(&json!({ "login": "ghost", "password": "whatever" }))
            .send(&make_service(auth))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
