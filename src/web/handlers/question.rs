//! Question answering handlers for Web API.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;

use super::{handler_failure, AppState, ASK_QUESTION_ROUTE};
use crate::timing::timed;
use crate::web::dto::{AppJson, QaRequest};

/// POST {api}/ask-question/ - Forward a question to the language model.
pub async fn ask_question(
    State(state): State<Arc<AppState>>,
    AppJson(req): AppJson<QaRequest>,
) -> Response {
    match timed(|| state.questions.answer_question(&req.question, &req.params)).await {
        Ok(result) => {
            tracing::debug!(
                route = %state.route_path(ASK_QUESTION_ROUTE),
                ok = result.inner().is_ok(),
                exec_time = result.exec_time(),
                "{}",
                result.inner().message()
            );
            (StatusCode::OK, Json(result)).into_response()
        }
        Err(e) => handler_failure(&state.route_path(ASK_QUESTION_ROUTE), &e),
    }
}
