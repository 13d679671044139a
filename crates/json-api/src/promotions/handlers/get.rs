//! Get Promotion Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::promotions::models::Promotion;

use crate::{extensions::*, promotions::errors::into_status_error, state::State};

/// Promotion Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PromotionResponse {
    pub uuid: Uuid,
    pub code: String,
    pub discount: u64,
    pub discount_type: String,
    pub max_uses: Option<u32>,
    pub current_uses: u32,
    pub active: bool,
    pub starts_at: Option<String>,
    pub ends_at: Option<String>,
}

impl From<Promotion> for PromotionResponse {
    fn from(promotion: Promotion) -> Self {
        Self {
            uuid: promotion.uuid.into_uuid(),
            code: promotion.code,
            discount: promotion.discount,
            discount_type: promotion.discount_type.as_str().to_string(),
            max_uses: promotion.max_uses,
            current_uses: promotion.current_uses,
            active: promotion.active,
            starts_at: promotion.starts_at.map(|t| t.to_string()),
            ends_at: promotion.ends_at.map(|t| t.to_string()),
        }
    }
}

/// Get Promotion Handler
#[endpoint(tags("promotions"), summary = "Get Promotion", security(("bearer_auth" = [])))]
pub(crate) async fn handler(
    promotion: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<PromotionResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let promotion = state
        .app
        .promotions
        .get_promotion(promotion.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(promotion.into()))
}
