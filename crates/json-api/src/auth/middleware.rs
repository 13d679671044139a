//! Auth middleware.

use std::sync::Arc;

use salvo::{http::header::AUTHORIZATION, prelude::*};
use tracing::error;

use storefront_app::auth::{AuthServiceError, TokenError};

use crate::{extensions::*, state::State};

/// Verify the bearer token and stash the decoded actor in the depot.
#[salvo::handler]
pub(crate) async fn authenticate(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let Some(token) = extract_bearer_token(req) else {
        res.render(StatusError::unauthorized().brief("Missing or invalid Authorization header"));

        return;
    };

    let state = match depot.obtain::<Arc<State>>() {
        Ok(state) => state,
        Err(_error) => {
            res.render(StatusError::internal_server_error());

            return;
        }
    };

    let actor = match state.app.auth.verify_token(token) {
        Ok(actor) => actor,
        Err(AuthServiceError::Token(TokenError::Expired)) => {
            res.render(StatusError::unauthorized().brief("Session token has expired"));

            return;
        }
        Err(AuthServiceError::Token(_)) => {
            res.render(StatusError::unauthorized().brief("Invalid session token"));

            return;
        }
        Err(other) => {
            error!("failed to verify session token: {other}");

            res.render(StatusError::internal_server_error());

            return;
        }
    };

    depot.insert_actor(actor);

    ctrl.call_next(req, depot, res).await;
}

/// Role gate: reject non-admin actors with 403.
#[salvo::handler]
pub(crate) async fn require_admin(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    match depot.actor_or_401() {
        Ok(actor) if actor.is_admin() => {
            ctrl.call_next(req, depot, res).await;
        }
        Ok(_actor) => {
            res.render(StatusError::forbidden().brief("Admin access required"));
        }
        Err(status) => {
            res.render(status);
        }
    }
}

fn extract_bearer_token(req: &Request) -> Option<&str> {
    let value = req.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let mut parts = value.splitn(2, ' ');

    let scheme = parts.next()?;
    let token = parts.next()?.trim();

    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return None;
    }

    Some(token)
}
