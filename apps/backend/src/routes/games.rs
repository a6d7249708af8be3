//! HTTP handlers for the games surface.
//!
//! Handlers translate between the wire DTOs and the coordinator; every
//! domain failure surfaces as a problem+json body via `AppError`.

use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::snapshot::PlayerView;
use crate::domain::{Cell, GameStatus};
use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CreatedResponse {
    game_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct JoinRequest {
    pub name: String,
}

#[derive(Debug, Serialize)]
struct JoinedResponse {
    player: PlayerView,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveRequest {
    pub player_id: Uuid,
    pub row: u8,
    pub col: u8,
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub status: Option<GameStatus>,
}

async fn create_game(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let game_id = state.service().create().await?;
    Ok(HttpResponse::Created().json(CreatedResponse { game_id }))
}

async fn join_game(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<JoinRequest>,
) -> Result<HttpResponse, AppError> {
    let game_id = path.into_inner();
    let body = body.into_inner();
    let player = state.service().join(game_id, &body.name).await?;
    Ok(HttpResponse::Created().json(JoinedResponse {
        player: PlayerView::from(&player),
    }))
}

async fn make_move(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<MoveRequest>,
) -> Result<HttpResponse, AppError> {
    let game_id = path.into_inner();
    let body = body.into_inner();
    let cell = Cell::new(body.row, body.col)?;
    let snapshot = state.service().make_move(game_id, body.player_id, cell).await?;
    Ok(HttpResponse::Ok().json(snapshot))
}

async fn get_game(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let snapshot = state.service().get(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(snapshot))
}

async fn list_games(
    state: web::Data<AppState>,
    query: web::Query<ListQuery>,
) -> Result<HttpResponse, AppError> {
    let games = state.service().list(query.status).await?;
    Ok(HttpResponse::Ok().json(games))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("", web::post().to(create_game))
        .route("", web::get().to(list_games))
        .route("/{game_id}", web::get().to(get_game))
        .route("/{game_id}/join", web::post().to(join_game))
        .route("/{game_id}/moves", web::post().to(make_move));
}
