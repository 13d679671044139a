//! Validate Promotion Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{extensions::*, promotions::errors::into_status_error, state::State};

/// Validate Promotion Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ValidatePromotionRequest {
    pub code: String,
    pub order_total: u64,
}

/// Discount Quote Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DiscountQuoteResponse {
    pub code: String,
    pub discount_amount: u64,
    pub discounted_total: u64,
}

/// Validate Promotion Handler
///
/// Quotes the discount a code would apply to a total. Read-only; nothing
/// is consumed.
#[endpoint(
    tags("promotions"),
    summary = "Validate Promotion",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Discount quote"),
        (status_code = StatusCode::BAD_REQUEST, description = "Inactive, expired or exhausted"),
        (status_code = StatusCode::NOT_FOUND, description = "Unknown code"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<ValidatePromotionRequest>,
    depot: &mut Depot,
) -> Result<Json<DiscountQuoteResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let request = json.into_inner();

    let quote = state
        .app
        .promotions
        .validate_code(&request.code, request.order_total)
        .await
        .map_err(into_status_error)?;

    Ok(Json(DiscountQuoteResponse {
        code: quote.code,
        discount_amount: quote.discount_amount,
        discounted_total: quote.discounted_total,
    }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use storefront_app::domain::promotions::{
        MockPromotionsService, PromotionsServiceError, models::DiscountQuote,
    };

    use crate::test_helpers::{TEST_USER, TestContextBuilder};

    use super::*;

    fn make_service(promotions: MockPromotionsService) -> Service {
        let mut builder = TestContextBuilder::new();
        builder.promotions = promotions;

        crate::test_helpers::service_with_actor(
            builder,
            Router::with_path("promotions/validate").post(handler),
            TEST_USER,
        )
    }

    #[tokio::test]
    async fn test_validate_quotes_the_discount() -> TestResult {
        let mut promotions = MockPromotionsService::new();

        promotions
            .expect_validate_code()
            .once()
            .withf(|code, total| code == "WELCOME" && *total == 200_000)
            .return_once(|_, _| {
                Ok(DiscountQuote {
                    code: "WELCOME".to_string(),
                    discount_amount: 20_000,
                    discounted_total: 180_000,
                })
            });

        let mut res = TestClient::post("http://example.com/promotions/validate")
            .json(&json!({ "code": "WELCOME", "orderTotal": 200_000 }))
            .send(&make_service(promotions))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: DiscountQuoteResponse = res.take_json().await?;

        assert_eq!(body.discount_amount, 20_000);
        assert_eq!(body.discounted_total, 180_000);

        Ok(())
    }

    #[tokio::test]
    async fn test_validate_expired_code_returns_400() -> TestResult {
        let mut promotions = MockPromotionsService::new();

        promotions
            .expect_validate_code()
            .once()
            .return_once(|_, _| Err(PromotionsServiceError::Expired));

        let res = TestClient::post("http://example.com/promotions/validate")
            .json(&json!({ "code": "OLD", "orderTotal": 100 }))
            .send(&make_service(promotions))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_validate_unknown_code_returns_404() -> TestResult {
        let mut promotions = MockPromotionsService::new();

        promotions
            .expect_validate_code()
            .once()
            .return_once(|_, _| Err(PromotionsServiceError::NotFound));

        let res = TestClient::post("http://example.com/promotions/validate")
            .json(&json!({ "code": "GHOST", "orderTotal": 100 }))
            .send(&make_service(promotions))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
