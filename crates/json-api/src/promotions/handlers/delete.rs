//! Delete Promotion Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{extensions::*, promotions::errors::into_status_error, state::State};

/// Delete Promotion Handler
#[endpoint(tags("promotions"), summary = "Delete Promotion", security(("bearer_auth" = [])))]
pub(crate) async fn handler(
    promotion: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<serde_json::Value>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    state
        .app
        .promotions
        .delete_promotion(promotion.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(serde_json::json!({ "message": "Promotion deleted" })))
}
