//! Room HTTP routes.

use actix_web::{web, HttpRequest, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::domain::Seat;
use crate::error::AppError;
use crate::state::app_state::AppState;
use crate::ws::session;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateRoomRequest {
    room_name: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateRoomResponse {
    room_id: String,
}

/// POST /api/room
async fn create_room(
    body: web::Json<CreateRoomRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let kernel = app_state.rooms.create_room(body.into_inner().room_name);
    Ok(HttpResponse::Ok().json(CreateRoomResponse {
        room_id: kernel.room_id.clone(),
    }))
}

#[derive(Debug, Deserialize)]
struct JoinRoomRequest {
    seat: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct JoinRoomResponse {
    ws_url: String,
}

/// POST /api/room/{id}/join
///
/// Validates the seat and returns the WebSocket URL to connect with. The
/// seat is actually claimed at WebSocket connect time.
async fn join_room(
    req: HttpRequest,
    room_id: web::Path<String>,
    body: web::Json<JoinRoomRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let seat_index = body.seat;
    let seat = Seat::from_index(seat_index).map_err(AppError::from)?;

    let kernel = app_state.rooms.get(&room_id).ok_or_else(|| {
        AppError::not_found("ROOM_NOT_FOUND", format!("Room {room_id} not found"))
    })?;
    if !kernel.seat_available(seat) {
        return Err(AppError::bad_request(
            "ROOM_FULL",
            format!("Seat {seat_index} is not available"),
        ));
    }

    let conn = req.connection_info();
    let scheme = if conn.scheme() == "https" { "wss" } else { "ws" };
    let ws_url = format!(
        "{scheme}://{}/api/room/{}/ws?seat={seat_index}",
        conn.host(),
        kernel.room_id
    );
    Ok(HttpResponse::Ok().json(JoinRoomResponse { ws_url }))
}

/// GET /api/room/{id}
async fn get_room(
    room_id: web::Path<String>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let kernel = app_state.rooms.get(&room_id).ok_or_else(|| {
        AppError::not_found("ROOM_NOT_FOUND", format!("Room {room_id} not found"))
    })?;
    Ok(HttpResponse::Ok().json(kernel.snapshot()))
}

/// GET /api/rooms
async fn list_rooms(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(app_state.rooms.list()))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/room", web::post().to(create_room));
    cfg.route("/rooms", web::get().to(list_rooms));
    cfg.route("/room/{room_id}", web::get().to(get_room));
    cfg.route("/room/{room_id}/join", web::post().to(join_room));
    cfg.route("/room/{room_id}/ws", web::get().to(session::upgrade));
}
