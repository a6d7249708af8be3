mod common;

use actix_web::{test, web, App};
use backend::config::AppConfig;
use backend::routes;
use backend::state::AppState;
use backend::RequestTrace;
use serde_json::{json, Value};
use uuid::Uuid;

macro_rules! app {
    () => {{
        let state = AppState::in_memory(&AppConfig::default());
        test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .configure(routes::configure),
        )
        .await
    }};
}

trait TestApp:
    actix_web::dev::Service<
    actix_http::Request,
    Response = actix_web::dev::ServiceResponse,
    Error = actix_web::Error,
>
{
}

impl<S> TestApp for S where
    S: actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
    >
{
}

async fn create_game(app: &impl TestApp) -> Uuid {
    let resp = test::call_service(app, test::TestRequest::post().uri("/api/games").to_request())
        .await;
    assert_eq!(resp.status().as_u16(), 201);
    let body: Value = test::read_body_json(resp).await;
    body["gameId"]
        .as_str()
        .and_then(|s| Uuid::parse_str(s).ok())
        .expect("gameId should be a uuid")
}

async fn join(app: &impl TestApp, game_id: Uuid, name: &str) -> Value {
    let resp = test::call_service(
        app,
        test::TestRequest::post()
            .uri(&format!("/api/games/{game_id}/join"))
            .set_json(json!({ "name": name }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status().as_u16(), 201);
    let body: Value = test::read_body_json(resp).await;
    body["player"].clone()
}

fn move_request(game_id: Uuid, player: &Value, row: u8, col: u8) -> actix_http::Request {
    test::TestRequest::post()
        .uri(&format!("/api/games/{game_id}/moves"))
        .set_json(json!({
            "playerId": player["playerId"],
            "row": row,
            "col": col,
        }))
        .to_request()
}

#[actix_web::test]
async fn health_returns_ok() {
    let app = app!();
    let resp = test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
    assert_eq!(resp.status().as_u16(), 200);
    let body = test::read_body(resp).await;
    assert_eq!(body, "ok");
}

#[actix_web::test]
async fn full_flow_over_http() {
    let app = app!();
    let game_id = create_game(&app).await;

    let x = join(&app, game_id, "alice").await;
    assert_eq!(x["symbol"], "X");
    let o = join(&app, game_id, "bob").await;
    assert_eq!(o["symbol"], "O");

    // X wins down the left column.
    for (player, row, col) in [(&x, 0, 0), (&o, 0, 1), (&x, 1, 0), (&o, 1, 1)] {
        let resp = test::call_service(&app, move_request(game_id, player, row, col)).await;
        assert_eq!(resp.status().as_u16(), 200);
    }
    let resp = test::call_service(&app, move_request(game_id, &x, 2, 0)).await;
    assert_eq!(resp.status().as_u16(), 200);
    let snapshot: Value = test::read_body_json(resp).await;
    assert_eq!(snapshot["status"], "FINISHED");
    assert_eq!(snapshot["winner"], "X");
    assert_eq!(snapshot["result"], "X");
    assert_eq!(snapshot["moves"].as_array().map(Vec::len), Some(5));

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/api/games/{game_id}"))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status().as_u16(), 200);
    let fetched: Value = test::read_body_json(resp).await;
    assert_eq!(fetched["gameId"], game_id.to_string());
    assert_eq!(fetched["status"], "FINISHED");

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/games?status=FINISHED")
            .to_request(),
    )
    .await;
    assert_eq!(resp.status().as_u16(), 200);
    let listed: Value = test::read_body_json(resp).await;
    assert_eq!(listed.as_array().map(Vec::len), Some(1));

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/games?status=WAITING")
            .to_request(),
    )
    .await;
    let listed: Value = test::read_body_json(resp).await;
    assert_eq!(listed.as_array().map(Vec::len), Some(0));
}

#[actix_web::test]
async fn joining_a_full_game_is_a_conflict() {
    let app = app!();
    let game_id = create_game(&app).await;
    join(&app, game_id, "alice").await;
    join(&app, game_id, "bob").await;

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri(&format!("/api/games/{game_id}/join"))
            .set_json(json!({ "name": "carol" }))
            .to_request(),
    )
    .await;
    common::assert_problem(resp, 409, "GAME_FULL").await;
}

#[actix_web::test]
async fn moving_out_of_turn_is_a_conflict() {
    let app = app!();
    let game_id = create_game(&app).await;
    join(&app, game_id, "alice").await;
    let o = join(&app, game_id, "bob").await;

    // O may not open the game.
    let resp = test::call_service(&app, move_request(game_id, &o, 0, 0)).await;
    common::assert_problem(resp, 409, "NOT_YOUR_TURN").await;
}

#[actix_web::test]
async fn out_of_range_coordinates_are_rejected() {
    let app = app!();
    let game_id = create_game(&app).await;
    let x = join(&app, game_id, "alice").await;
    join(&app, game_id, "bob").await;

    let resp = test::call_service(&app, move_request(game_id, &x, 3, 0)).await;
    common::assert_problem(resp, 400, "INVALID_CELL").await;
}

#[actix_web::test]
async fn unknown_game_is_not_found() {
    let app = app!();
    let missing = Uuid::new_v4();

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/api/games/{missing}"))
            .to_request(),
    )
    .await;
    common::assert_problem(resp, 404, "GAME_NOT_FOUND").await;

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri(&format!("/api/games/{missing}/join"))
            .set_json(json!({ "name": "alice" }))
            .to_request(),
    )
    .await;
    common::assert_problem(resp, 404, "GAME_NOT_FOUND").await;
}

#[actix_web::test]
async fn moving_with_an_unknown_player_is_not_found() {
    let app = app!();
    let game_id = create_game(&app).await;
    join(&app, game_id, "alice").await;
    join(&app, game_id, "bob").await;

    let stranger = json!({ "playerId": Uuid::new_v4() });
    let resp = test::call_service(&app, move_request(game_id, &stranger, 0, 0)).await;
    common::assert_problem(resp, 404, "PLAYER_NOT_FOUND").await;
}

#[actix_web::test]
async fn moving_before_the_game_starts_is_a_conflict() {
    let app = app!();
    let game_id = create_game(&app).await;
    let x = join(&app, game_id, "alice").await;

    let resp = test::call_service(&app, move_request(game_id, &x, 0, 0)).await;
    common::assert_problem(resp, 409, "GAME_NOT_IN_PROGRESS").await;
}

#[actix_web::test]
async fn trace_middleware_tags_every_response() {
    let state = AppState::in_memory(&AppConfig::default());
    let app = test::init_service(
        App::new()
            .wrap(RequestTrace)
            .app_data(web::Data::new(state))
            .configure(routes::configure),
    )
    .await;

    let resp = test::call_service(&app, test::TestRequest::post().uri("/api/games").to_request())
        .await;
    assert_eq!(resp.status().as_u16(), 201);
    let request_id = resp
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .expect("x-request-id header should be set");
    assert!(Uuid::parse_str(request_id).is_ok());

    // Problem responses inside the traced scope carry a real trace id.
    let missing = Uuid::new_v4();
    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/api/games/{missing}"))
            .to_request(),
    )
    .await;
    let json = common::assert_problem(resp, 404, "GAME_NOT_FOUND").await;
    assert_ne!(json["trace_id"], "unknown");
}
