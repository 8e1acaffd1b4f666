//! Handlers for the `/api/client` routes.
//!
//! Each handler extracts its input and hands it unchanged to the
//! [`ClientService`](crate::client::ClientService).

use axum::{
    extract::{Query, State},
    http::{header::AUTHORIZATION, HeaderMap},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;

use crate::client::{ClientError, Item};
use crate::http::response::missing_header;
use crate::http::server::AppState;

/// Optional `query` string parameter.
#[derive(Debug, Default, Deserialize)]
pub struct CallQuery {
    pub query: Option<String>,
}

pub async fn get_call_object(
    State(state): State<AppState>,
    Query(params): Query<CallQuery>,
) -> Result<Json<Option<Item>>, ClientError> {
    let item = state.service.get_call_object(params.query.as_deref()).await?;
    Ok(Json(item))
}

pub async fn get_call_list(State(state): State<AppState>) -> Json<Option<Vec<Item>>> {
    Json(state.service.get_call_list())
}

pub async fn post_call(
    State(state): State<AppState>,
    Query(params): Query<CallQuery>,
) -> Json<Option<Item>> {
    Json(state.service.post_call(params.query.as_deref()))
}

/// `Authorization` is required; a value that is not valid text is passed on
/// lossily rather than rejected.
pub async fn exchange_call(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let Some(value) = headers.get(AUTHORIZATION) else {
        return missing_header("Authorization");
    };
    let token = String::from_utf8_lossy(value.as_bytes());

    Json(state.service.exchange_call(&token)).into_response()
}
