use axum::{
    Router,
    body::Bytes,
    extract::{Json, State},
    http::StatusCode,
    routing::post,
};
use serde_json::Value;
use tracing::{error, warn};

use crate::AppState;
use crate::types::{ChatReq, ChatResp, ErrResp};
use crate::upstream::{Completion, UpstreamError};

pub fn router() -> Router<AppState> {
    // The method fallback catches every non-POST verb on the path.
    Router::new().route("/chat/", post(chat_handler).fallback(invalid_request))
}

async fn invalid_request() -> (StatusCode, Json<ErrResp>) {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrResp::new("Invalid request")),
    )
}

pub async fn chat_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<ChatResp>, (StatusCode, Json<ErrResp>)> {
    let req: ChatReq = serde_json::from_slice(&body)
        .map_err(|e| (StatusCode::BAD_REQUEST, Json(ErrResp::new(e.to_string()))))?;

    let message = match req.message.as_deref() {
        Some(m) if !m.is_empty() => m,
        _ => {
            return Err((
                StatusCode::BAD_REQUEST,
                Json(ErrResp::new("Message is required")),
            ));
        }
    };

    match state.upstream.complete(message).await {
        Ok(Completion::Content(content)) => Ok(Json(ChatResp { response: content })),
        Ok(Completion::MissingChoices(raw)) => {
            warn!("upstream response has no choices");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrResp::with_details("Invalid API response", raw)),
            ))
        }
        Err(UpstreamError::Decode { body, .. }) => {
            warn!("upstream returned a non-JSON body");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrResp::with_details(
                    "Invalid API response",
                    Value::String(body),
                )),
            ))
        }
        Err(err @ UpstreamError::Transport(_)) => {
            error!("upstream request failed: {}", err);
            Err((
                StatusCode::BAD_GATEWAY,
                Json(ErrResp::with_details(
                    "Upstream request failed",
                    Value::String(err.to_string()),
                )),
            ))
        }
    }
}
