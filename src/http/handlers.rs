//! Demo route handlers over the in-memory user store.
//!
//! Handlers return data; status-only replies rely on the reply layer to fill
//! in the error body.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;

use crate::reply::{Payload, Records, Reply, ReplyContext};
use crate::store::{User, UserStore};

/// `GET /users/{id}`: the user with their friends attached.
pub async fn find_user(
    State(store): State<Arc<UserStore>>,
    Path(raw_id): Path<String>,
    mut ctx: ReplyContext,
) -> Reply {
    let Ok(id) = raw_id.parse::<u32>() else {
        ctx.write_header(StatusCode::BAD_REQUEST);
        return ctx.finish();
    };

    let Some(mut user) = store.user(id) else {
        tracing::debug!(id, "User not found");
        ctx.write_header(StatusCode::NOT_FOUND);
        return ctx.finish();
    };

    match find_friends(State(store), Path(raw_id)).await {
        Ok(Records(friends)) => user.friends = friends,
        Err(_) => return Reply::from_status(StatusCode::INTERNAL_SERVER_ERROR),
    }

    match Payload::record(&user) {
        Ok(body) => ctx.respond_with(StatusCode::OK, body),
        Err(err) => {
            tracing::error!(id, error = %err, "Failed to capture user record");
            ctx.write_header(StatusCode::INTERNAL_SERVER_ERROR);
            ctx.finish()
        }
    }
}

/// `GET /users/{id}/friends`: the user's friend list, possibly empty.
pub async fn find_friends(
    State(store): State<Arc<UserStore>>,
    Path(raw_id): Path<String>,
) -> Result<Records<User>, Reply> {
    let id = raw_id
        .parse::<u32>()
        .map_err(|_| Reply::from_status(StatusCode::BAD_REQUEST))?;
    Ok(Records(store.friends(id)))
}

/// `GET /health`
pub async fn health() -> Payload {
    Payload::scalar("ok")
}
