//! Update Promotion Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::{JsonBody, PathParam}},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::promotions::models::{DiscountType, PromotionUpdate};

use crate::{
    extensions::*,
    promotions::create::parse_timestamp,
    promotions::errors::into_status_error,
    promotions::get::PromotionResponse,
    state::State,
};

/// Update Promotion Request; absent fields stay untouched. The code itself
/// is immutable.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UpdatePromotionRequest {
    pub discount: Option<u64>,
    pub discount_type: Option<String>,
    pub max_uses: Option<u32>,
    pub current_uses: Option<u32>,
    pub active: Option<bool>,
    pub starts_at: Option<String>,
    pub ends_at: Option<String>,
}

/// Update Promotion Handler
#[endpoint(tags("promotions"), summary = "Update Promotion", security(("bearer_auth" = [])))]
pub(crate) async fn handler(
    promotion: PathParam<Uuid>,
    json: JsonBody<UpdatePromotionRequest>,
    depot: &mut Depot,
) -> Result<Json<PromotionResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let request = json.into_inner();

    let discount_type = request
        .discount_type
        .map(|value| value.parse::<DiscountType>())
        .transpose()
        .or_400("discount type must be percentage or fixed")?;

    let promotion = state
        .app
        .promotions
        .update_promotion(
            promotion.into_inner().into(),
            PromotionUpdate {
                discount: request.discount,
                discount_type,
                max_uses: request.max_uses,
                current_uses: request.current_uses,
                active: request.active,
                starts_at: parse_timestamp(request.starts_at)?,
                ends_at: parse_timestamp(request.ends_at)?,
            },
        )
        .await
        .map_err(into_status_error)?;

    Ok(Json(promotion.into()))
}
