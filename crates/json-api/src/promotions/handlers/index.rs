//! Promotion Index Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    extensions::*, promotions::errors::into_status_error, promotions::get::PromotionResponse,
    state::State,
};

/// Promotion Index Handler
#[endpoint(tags("promotions"), summary = "List Promotions", security(("bearer_auth" = [])))]
pub(crate) async fn handler(
    depot: &mut Depot,
) -> Result<Json<Vec<PromotionResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let promotions = state
        .app
        .promotions
        .list_promotions()
        .await
        .map_err(into_status_error)?;

    Ok(Json(promotions.into_iter().map(Into::into).collect()))
}
