//! WebSocket session actor.
//!
//! Each connection is one actor. Text frames are parsed as `ClientMsg`,
//! dispatched to the coordinator, and answered with one `ServerMsg`
//! envelope. The protocol has no correlation ids, so replies must arrive
//! in request order: the actor suspends its mailbox until the current
//! frame's reply is written. A malformed or unknown frame gets an error
//! envelope; the connection stays open. Idle connections are reaped by
//! the heartbeat.

use std::sync::Arc;
use std::time::{Duration, Instant};

use actix::prelude::*;
use actix_web::{web, Error, HttpRequest, HttpResponse};
use actix_web_actors::ws;
use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::snapshot::PlayerView;
use crate::domain::Cell;
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::services::GameService;
use crate::state::AppState;
use crate::ws::protocol::{ClientMsg, ServerMsg};

const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(20);
const CLIENT_TIMEOUT: Duration = Duration::from_secs(40);

pub async fn upgrade(
    req: HttpRequest,
    stream: web::Payload,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, Error> {
    let session = WsSession::new(app_state.service().clone());
    ws::start(session, &req, stream)
}

pub struct WsSession {
    conn_id: Uuid,
    service: Arc<GameService>,
    last_heartbeat: Instant,
}

impl WsSession {
    fn new(service: Arc<GameService>) -> Self {
        Self {
            conn_id: Uuid::new_v4(),
            service,
            last_heartbeat: Instant::now(),
        }
    }

    fn send_json(ctx: &mut ws::WebsocketContext<Self>, msg: &ServerMsg) {
        match serde_json::to_string(msg) {
            Ok(payload) => ctx.text(payload),
            Err(err) => warn!(error = %err, "[WS SESSION] failed to serialize outbound message"),
        }
    }

    fn start_heartbeat(&mut self, ctx: &mut ws::WebsocketContext<Self>) {
        ctx.run_interval(HEARTBEAT_INTERVAL, |actor, ctx| {
            if Instant::now().duration_since(actor.last_heartbeat) > CLIENT_TIMEOUT {
                warn!(conn_id = %actor.conn_id, "[WS SESSION] heartbeat timed out");
                ctx.close(Some(ws::CloseReason::from(ws::CloseCode::Normal)));
                ctx.stop();
                return;
            }
            ctx.ping(b"keepalive");
        });
    }

    fn dispatch(&mut self, cmd: ClientMsg, ctx: &mut ws::WebsocketContext<Self>) {
        let service = self.service.clone();
        // wait, not spawn: later frames stay queued until this reply is out.
        ctx.wait(
            async move { handle_frame(&service, cmd).await }
                .into_actor(self)
                .map(|msg, _actor, ctx| Self::send_json(ctx, &msg)),
        );
    }
}

/// Run one client frame against the coordinator, folding failures into an
/// error envelope.
async fn handle_frame(service: &GameService, cmd: ClientMsg) -> ServerMsg {
    let result = match cmd {
        ClientMsg::Create => service
            .create()
            .await
            .map(|game_id| ServerMsg::Created { game_id }),

        ClientMsg::Join { game_id, name } => {
            service.join(game_id, &name).await.map(|player| ServerMsg::Joined {
                player: PlayerView::from(&player),
            })
        }

        ClientMsg::Move { game_id, mv } => {
            let outcome = match Cell::new(mv.row, mv.col) {
                Ok(cell) => service.make_move(game_id, mv.player_id, cell).await,
                Err(err) => Err(err),
            };
            outcome.map(|game| ServerMsg::Update { game })
        }

        ClientMsg::Get { game_id } => {
            service.get(game_id).await.map(|game| ServerMsg::State { game })
        }
    };

    result.unwrap_or_else(|err| error_frame(AppError::from(err)))
}

fn error_frame(err: AppError) -> ServerMsg {
    ServerMsg::Error {
        code: err.code().as_str().to_string(),
        message: err.public_detail(),
    }
}

impl Actor for WsSession {
    type Context = ws::WebsocketContext<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        info!(conn_id = %self.conn_id, "[WS SESSION] started");
        self.start_heartbeat(ctx);
    }

    fn stopped(&mut self, _ctx: &mut Self::Context) {
        info!(conn_id = %self.conn_id, "[WS SESSION] stopped");
    }
}

impl StreamHandler<Result<ws::Message, ws::ProtocolError>> for WsSession {
    fn handle(&mut self, msg: Result<ws::Message, ws::ProtocolError>, ctx: &mut Self::Context) {
        match msg {
            Ok(ws::Message::Ping(payload)) => {
                self.last_heartbeat = Instant::now();
                ctx.pong(&payload);
            }
            Ok(ws::Message::Pong(_)) => {
                self.last_heartbeat = Instant::now();
            }
            Ok(ws::Message::Text(text)) => {
                self.last_heartbeat = Instant::now();

                match serde_json::from_str::<ClientMsg>(&text) {
                    Ok(cmd) => self.dispatch(cmd, ctx),
                    Err(_) => {
                        // Distinguish an unknown action from malformed JSON so
                        // clients get the same codes as the HTTP surface.
                        let (code, message) =
                            match serde_json::from_str::<serde_json::Value>(&text) {
                                Ok(_) => (ErrorCode::UnknownAction, "Unknown action"),
                                Err(_) => (ErrorCode::BadRequest, "Invalid JSON"),
                            };
                        Self::send_json(
                            ctx,
                            &ServerMsg::Error {
                                code: code.as_str().to_string(),
                                message: message.to_string(),
                            },
                        );
                    }
                }
            }
            Ok(ws::Message::Close(reason)) => {
                ctx.close(reason);
                ctx.stop();
            }
            Ok(_) => {}
            Err(err) => {
                warn!(conn_id = %self.conn_id, error = %err, "[WS SESSION] protocol error");
                ctx.stop();
            }
        }
    }
}
