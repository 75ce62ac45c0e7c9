//! 消息通知接口

use axum::{Json, Router, extract::State, routing::get};
use shared::Envelope;
use shared::models::Notice;

use crate::api::ok;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/list", get(list))
}

async fn list(State(state): State<AppState>) -> Json<Envelope<Vec<Notice>>> {
    let data = state.data.read().await;
    ok(data.notices.clone())
}
