use std::sync::Arc;
use std::time::{Duration, Instant};

use actix::prelude::*;
use actix_web::{web, Error, HttpRequest, HttpResponse};
use actix_web_actors::ws;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::state::app_state::AppState;
use crate::ws::hub::{Deliver, RoomHub};
use crate::ws::protocol::{ClientMsg, ServerMsg, PROTOCOL_VERSION};

/// GET /api/ws/games/{game_id}
pub async fn upgrade(
    req: HttpRequest,
    stream: web::Payload,
    path: web::Path<i64>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, Error> {
    let game_id = path.into_inner();
    if game_id <= 0 {
        return Err(AppError::bad_request(
            ErrorCode::InvalidGameId,
            format!("Game id must be positive, got: {game_id}"),
        )
        .into());
    }

    let session = WsSession::new(
        game_id,
        app_state.hub(),
        app_state.config.heartbeat_interval,
        app_state.config.client_timeout,
    );
    ws::start(session, &req, stream)
}

pub struct WsSession {
    conn_id: Uuid,
    game_id: i64,
    hub: Arc<RoomHub>,

    heartbeat_interval: Duration,
    client_timeout: Duration,
    last_heartbeat: Instant,

    hello_done: bool,
    joined: bool,
}

impl WsSession {
    pub fn new(
        game_id: i64,
        hub: Arc<RoomHub>,
        heartbeat_interval: Duration,
        client_timeout: Duration,
    ) -> Self {
        Self {
            conn_id: Uuid::new_v4(),
            game_id,
            hub,
            heartbeat_interval,
            client_timeout,
            last_heartbeat: Instant::now(),
            hello_done: false,
            joined: false,
        }
    }

    fn send_json(ctx: &mut ws::WebsocketContext<Self>, msg: &ServerMsg) {
        match serde_json::to_string(msg) {
            Ok(payload) => ctx.text(payload),
            Err(err) => warn!(error = %err, "[WS SESSION] failed to serialize outbound message"),
        }
    }

    fn send_error(ctx: &mut ws::WebsocketContext<Self>, err: &AppError) {
        Self::send_json(ctx, &ServerMsg::error(err.code(), err.detail()));
    }

    fn send_error_and_close(
        &self,
        ctx: &mut ws::WebsocketContext<Self>,
        code: ErrorCode,
        message: impl Into<String>,
    ) {
        Self::send_json(ctx, &ServerMsg::error(code, message));
        ctx.close(Some(ws::CloseReason::from(ws::CloseCode::Policy)));
        ctx.stop();
    }

    fn start_heartbeat(&self, ctx: &mut ws::WebsocketContext<Self>) {
        ctx.run_interval(self.heartbeat_interval, |actor, ctx| {
            if Instant::now().duration_since(actor.last_heartbeat) > actor.client_timeout {
                warn!(
                    conn_id = %actor.conn_id,
                    game_id = actor.game_id,
                    "[WS SESSION] heartbeat timed out"
                );
                ctx.close(Some(ws::CloseReason::from(ws::CloseCode::Normal)));
                ctx.stop();
                return;
            }
            ctx.ping(b"keepalive");
        });
    }

    fn handle_client_msg(&mut self, cmd: ClientMsg, ctx: &mut ws::WebsocketContext<Self>) {
        if let ClientMsg::Hello { protocol } = cmd {
            if protocol != PROTOCOL_VERSION {
                self.send_error_and_close(
                    ctx,
                    ErrorCode::BadProtocol,
                    "Unsupported protocol version",
                );
                return;
            }
            self.hello_done = true;
            Self::send_json(
                ctx,
                &ServerMsg::HelloAck {
                    protocol: PROTOCOL_VERSION,
                    conn_id: self.conn_id.to_string(),
                },
            );
            return;
        }

        if !self.hello_done {
            self.send_error_and_close(ctx, ErrorCode::HelloRequired, "Must send hello first");
            return;
        }

        if cmd == ClientMsg::Join {
            let recipient = ctx.address().recipient::<Deliver>();
            match self.hub.join(self.game_id, self.conn_id, recipient) {
                Ok((seat, kind)) => {
                    self.joined = true;
                    Self::send_json(
                        ctx,
                        &ServerMsg::Joined {
                            game_id: self.game_id,
                            kind,
                            seat,
                        },
                    );
                }
                Err(err) => Self::send_error(ctx, &err),
            }
            return;
        }

        let result = match cmd.action() {
            Ok(Some(action)) => self.hub.act(self.game_id, self.conn_id, action),
            Ok(None) => Ok(()),
            Err(err) => Err(AppError::from(err)),
        };
        if let Err(err) = result {
            info!(
                conn_id = %self.conn_id,
                game_id = self.game_id,
                code = err.code().as_str(),
                "[WS SESSION] action rejected"
            );
            Self::send_error(ctx, &err);
        }
    }
}

impl Actor for WsSession {
    type Context = ws::WebsocketContext<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        info!(
            conn_id = %self.conn_id,
            game_id = self.game_id,
            "[WS SESSION] started"
        );
        self.start_heartbeat(ctx);
    }

    fn stopped(&mut self, _ctx: &mut Self::Context) {
        if self.joined {
            self.hub.leave(self.game_id, self.conn_id);
        }
        info!(
            conn_id = %self.conn_id,
            game_id = self.game_id,
            "[WS SESSION] stopped"
        );
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
                    Ok(cmd) => self.handle_client_msg(cmd, ctx),
                    Err(_) => {
                        self.send_error_and_close(ctx, ErrorCode::BadRequest, "Malformed JSON")
                    }
                }
            }
            Ok(ws::Message::Binary(_)) => {
                self.last_heartbeat = Instant::now();
                self.send_error_and_close(ctx, ErrorCode::BadRequest, "Binary not supported");
            }
            Ok(ws::Message::Close(reason)) => {
                ctx.close(reason);
                ctx.stop();
            }
            Ok(ws::Message::Continuation(_)) | Ok(ws::Message::Nop) => {
                self.last_heartbeat = Instant::now();
            }
            Err(err) => {
                warn!(
                    conn_id = %self.conn_id,
                    game_id = self.game_id,
                    error = %err,
                    "[WS SESSION] protocol error"
                );
                ctx.close(Some(ws::CloseReason::from(ws::CloseCode::Error)));
                ctx.stop();
            }
        }
    }
}

impl Handler<Deliver> for WsSession {
    type Result = ();

    fn handle(&mut self, msg: Deliver, ctx: &mut Self::Context) -> Self::Result {
        Self::send_json(ctx, &msg.0);
    }
}
