//! Event catalog routes
//!
//! Reads are public; creating events or ticket types requires a session.

use crate::auth::CurrentUser;
use crate::error::ApiResult;
use crate::services::EventService;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use ticketly_shared::models::{Event, TicketType};
use ticketly_shared::types::{CreateEventRequest, CreateTicketTypeRequest};
use uuid::Uuid;

/// Create event routes
pub fn event_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_event).get(list_events))
        .route("/:id", get(get_event))
        .route(
            "/:id/ticket-types",
            post(create_ticket_type).get(list_ticket_types),
        )
}

/// Create an event
///
/// POST /api/v1/events
async fn create_event(
    State(state): State<AppState>,
    _current: CurrentUser,
    Json(req): Json<CreateEventRequest>,
) -> ApiResult<(StatusCode, Json<Event>)> {
    let event = EventService::create_event(&state.db, req).await?;
    Ok((StatusCode::CREATED, Json(event)))
}

/// List events
///
/// GET /api/v1/events
async fn list_events(State(state): State<AppState>) -> ApiResult<Json<Vec<Event>>> {
    let events = EventService::list_events(&state.db).await?;
    Ok(Json(events))
}

/// Fetch a single event
///
/// GET /api/v1/events/:id
async fn get_event(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Event>> {
    let event = EventService::get_event(&state.db, id).await?;
    Ok(Json(event))
}

/// Add a ticket type to an event
///
/// POST /api/v1/events/:id/ticket-types
async fn create_ticket_type(
    State(state): State<AppState>,
    _current: CurrentUser,
    Path(id): Path<Uuid>,
    Json(req): Json<CreateTicketTypeRequest>,
) -> ApiResult<(StatusCode, Json<TicketType>)> {
    let ticket_type = EventService::create_ticket_type(&state.db, id, req).await?;
    Ok((StatusCode::CREATED, Json(ticket_type)))
}

/// List ticket types for an event
///
/// GET /api/v1/events/:id/ticket-types
async fn list_ticket_types(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Vec<TicketType>>> {
    let ticket_types = EventService::list_ticket_types(&state.db, id).await?;
    Ok(Json(ticket_types))
}
