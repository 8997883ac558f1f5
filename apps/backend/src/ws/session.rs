//! Per-player WebSocket session actor.
//!
//! The session bridges one player's socket to their room kernel: inbound
//! text frames are parsed and handed to `RoomKernel::handle_message`;
//! outbound frames arrive on an unbounded channel registered with the
//! kernel and are forwarded to the socket via `ctx.add_stream`.

use std::sync::Arc;
use std::time::{Duration, Instant};

use actix::prelude::{Actor, ActorContext, AsyncContext, StreamHandler};
use actix_web::{web, Error, HttpRequest, HttpResponse};
use actix_web_actors::ws;
use serde::Deserialize;
use tokio::sync::mpsc;
use tokio_stream::wrappers::UnboundedReceiverStream;
use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::Seat;
use crate::error::AppError;
use crate::room::RoomKernel;
use crate::state::app_state::AppState;
use crate::ws::protocol::{ClientMsg, ServerMsg};

const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(20);
// Read deadline; reset on any inbound frame or pong.
const CLIENT_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Deserialize)]
pub struct WsQuery {
    pub seat: usize,
    pub name: Option<String>,
}

/// GET /api/room/{room_id}/ws?seat=0..3
pub async fn upgrade(
    req: HttpRequest,
    stream: web::Payload,
    room_id: web::Path<String>,
    query: web::Query<WsQuery>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, Error> {
    let kernel = app_state
        .rooms
        .get(&room_id)
        .ok_or_else(|| AppError::not_found("ROOM_NOT_FOUND", format!("Room {room_id} not found")))?;
    let seat = Seat::from_index(query.seat).map_err(AppError::from)?;

    let player_id = Uuid::new_v4();
    let name = query
        .name
        .clone()
        .unwrap_or_else(|| format!("Player {}", query.seat));

    let (tx, rx) = mpsc::unbounded_channel();
    kernel
        .add_player(player_id, name, seat, tx)
        .map_err(AppError::from)?;

    let session = RoomWsSession::new(kernel, seat, player_id, rx);
    ws::start(session, &req, stream)
}

pub struct RoomWsSession {
    conn_id: Uuid,
    seat: Seat,
    kernel: Arc<RoomKernel>,
    outbound: Option<mpsc::UnboundedReceiver<ServerMsg>>,
    last_heartbeat: Instant,
}

impl RoomWsSession {
    fn new(
        kernel: Arc<RoomKernel>,
        seat: Seat,
        conn_id: Uuid,
        outbound: mpsc::UnboundedReceiver<ServerMsg>,
    ) -> Self {
        Self {
            conn_id,
            seat,
            kernel,
            outbound: Some(outbound),
            last_heartbeat: Instant::now(),
        }
    }

    fn start_heartbeat(&self, ctx: &mut ws::WebsocketContext<Self>) {
        ctx.run_interval(HEARTBEAT_INTERVAL, |actor, ctx| {
            if Instant::now().duration_since(actor.last_heartbeat) > CLIENT_TIMEOUT {
                warn!(
                    conn_id = %actor.conn_id,
                    seat = ?actor.seat,
                    "websocket client heartbeat timed out"
                );
                ctx.close(Some(ws::CloseReason::from(ws::CloseCode::Normal)));
                ctx.stop();
                return;
            }
            ctx.ping(b"keepalive");
        });
    }

    fn send_error(ctx: &mut ws::WebsocketContext<Self>, error: impl Into<String>) {
        let msg = ServerMsg::Error {
            error: error.into(),
        };
        match serde_json::to_string(&msg) {
            Ok(payload) => ctx.text(payload),
            Err(err) => warn!(error = %err, "failed to serialize error frame"),
        }
    }
}

impl Actor for RoomWsSession {
    type Context = ws::WebsocketContext<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        info!(
            conn_id = %self.conn_id,
            room_id = %self.kernel.room_id,
            seat = ?self.seat,
            "websocket session started"
        );
        if let Some(rx) = self.outbound.take() {
            ctx.add_stream(UnboundedReceiverStream::new(rx));
        }
        self.start_heartbeat(ctx);
    }

    fn stopped(&mut self, _ctx: &mut Self::Context) {
        info!(
            conn_id = %self.conn_id,
            room_id = %self.kernel.room_id,
            seat = ?self.seat,
            "websocket session stopped"
        );
        self.kernel.remove_player(self.seat);
    }
}

/// Outbound frames from the room kernel.
impl StreamHandler<ServerMsg> for RoomWsSession {
    fn handle(&mut self, msg: ServerMsg, ctx: &mut Self::Context) {
        match serde_json::to_string(&msg) {
            Ok(payload) => ctx.text(payload),
            Err(err) => warn!(
                conn_id = %self.conn_id,
                error = %err,
                "failed to serialize outbound frame"
            ),
        }
    }

    fn finished(&mut self, ctx: &mut Self::Context) {
        // The kernel dropped our channel (room stopped); close the socket.
        ctx.close(Some(ws::CloseReason::from(ws::CloseCode::Away)));
        ctx.stop();
    }
}

/// Inbound socket frames.
impl StreamHandler<Result<ws::Message, ws::ProtocolError>> for RoomWsSession {
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
                    Ok(client_msg) => self.kernel.handle_message(self.seat, client_msg),
                    Err(err) => Self::send_error(ctx, format!("invalid frame: {err}")),
                }
            }
            Ok(ws::Message::Binary(_)) => {
                self.last_heartbeat = Instant::now();
                Self::send_error(ctx, "binary frames are not supported");
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
                    seat = ?self.seat,
                    error = %err,
                    "websocket protocol error"
                );
                ctx.close(Some(ws::CloseReason::from(ws::CloseCode::Error)));
                ctx.stop();
            }
        }
    }
}
