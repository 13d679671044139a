//! Create Promotion Handler

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use storefront_app::domain::promotions::models::{DiscountType, NewPromotion};

use crate::{
    extensions::*, promotions::errors::into_status_error, promotions::get::PromotionResponse,
    state::State,
};

/// Create Promotion Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreatePromotionRequest {
    pub code: String,
    pub discount: u64,
    pub discount_type: String,
    pub max_uses: Option<u32>,
    #[serde(default = "default_active")]
    pub active: bool,
    pub starts_at: Option<String>,
    pub ends_at: Option<String>,
}

fn default_active() -> bool {
    true
}

pub(crate) fn parse_timestamp(value: Option<String>) -> Result<Option<Timestamp>, StatusError> {
    value
        .map(|raw| raw.parse::<Timestamp>())
        .transpose()
        .or_400("timestamps must be RFC 3339")
}

/// Create Promotion Handler
#[endpoint(
    tags("promotions"),
    summary = "Create Promotion",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Promotion created"),
        (status_code = StatusCode::CONFLICT, description = "Code already exists"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreatePromotionRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<PromotionResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let request = json.into_inner();

    let discount_type = request
        .discount_type
        .parse::<DiscountType>()
        .or_400("discount type must be percentage or fixed")?;

    let promotion = state
        .app
        .promotions
        .create_promotion(NewPromotion {
            code: request.code,
            discount: request.discount,
            discount_type,
            max_uses: request.max_uses,
            active: request.active,
            starts_at: parse_timestamp(request.starts_at)?,
            ends_at: parse_timestamp(request.ends_at)?,
        })
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(promotion.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::TestClient;
    use serde_json::json;
    use testresult::TestResult;

    use storefront_app::domain::promotions::{
        MockPromotionsService, PromotionsServiceError, models::PromotionUuid,
    };

    use crate::{promotions::test_support::make_promotion, test_helpers::promotions_service};

    use super::*;

    fn make_service(promotions: MockPromotionsService) -> Service {
        promotions_service(promotions, Router::with_path("promotions").post(handler))
    }

    #[tokio::test]
    async fn test_create_promotion() -> TestResult {
        let uuid = PromotionUuid::new();

        let mut promotions = MockPromotionsService::new();

        promotions
            .expect_create_promotion()
            .once()
            .withf(|new| {
                new.code == "tet2026"
                    && new.discount == 15
                    && new.discount_type == DiscountType::Percentage
            })
            .return_once(move |_| Ok(make_promotion(uuid, "TET2026")));

        let res = TestClient::post("http://example.com/promotions")
            .json(&json!({
                "code": "tet2026",
                "discount": 15,
                "discountType": "percentage",
            }))
            .send(&make_service(promotions))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_promotion_over_100_percent_returns_400() -> TestResult {
        let mut promotions = MockPromotionsService::new();

        promotions
            .expect_create_promotion()
            .once()
            .return_once(|_| Err(PromotionsServiceError::InvalidDiscount));

        let res = TestClient::post("http://example.com/promotions")
            .json(&json!({
                "code": "TOOBIG",
                "discount": 150,
                "discountType": "percentage",
            }))
            .send(&make_service(promotions))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_promotion_unknown_discount_type_returns_400() -> TestResult {
        let promotions = MockPromotionsService::new();

        let res = TestClient::post("http://example.com/promotions")
            .json(&json!({
                "code": "ODD",
                "discount": 10,
                "discountType": "bogo",
            }))
            .send(&make_service(promotions))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
