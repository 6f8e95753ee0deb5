//! Game-related HTTP routes.

use actix_web::{web, HttpResponse};

use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::state::app_state::AppState;

/// GET /api/games/{game_id}/snapshot
///
/// Spectator view of a running game: both grids, the draft and the scores,
/// with no per-seat eligibility.
async fn get_snapshot(
    path: web::Path<String>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let raw = path.into_inner();
    let game_id = raw
        .parse::<i64>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| {
            AppError::bad_request(ErrorCode::InvalidGameId, format!("Invalid game id: {raw}"))
        })?;

    let snapshot = app_state.hub().snapshot(game_id)?;
    Ok(HttpResponse::Ok().json(snapshot))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/{game_id}/snapshot").route(web::get().to(get_snapshot)));
}
