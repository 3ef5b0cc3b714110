//! Order and ticket routes
//!
//! All order operations act on behalf of the authenticated user.

use crate::auth::CurrentUser;
use crate::error::ApiResult;
use crate::services::OrderService;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use ticketly_shared::models::Ticket;
use ticketly_shared::types::{OrderResponse, PlaceOrderRequest};
use uuid::Uuid;

/// Create order routes
pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(place_order).get(list_orders))
        .route("/:id", get(get_order))
}

/// Create ticket routes
pub fn ticket_routes() -> Router<AppState> {
    Router::new().route("/:code/check-in", post(check_in))
}

/// Place an order
///
/// POST /api/v1/orders
async fn place_order(
    State(state): State<AppState>,
    current: CurrentUser,
    Json(req): Json<PlaceOrderRequest>,
) -> ApiResult<(StatusCode, Json<OrderResponse>)> {
    let order = OrderService::place_order(&state.db, current.user().id, req).await?;
    Ok((StatusCode::CREATED, Json(order)))
}

/// List the current user's orders
///
/// GET /api/v1/orders
async fn list_orders(
    State(state): State<AppState>,
    current: CurrentUser,
) -> ApiResult<Json<Vec<OrderResponse>>> {
    let orders = OrderService::list_orders(&state.db, current.user().id).await?;
    Ok(Json(orders))
}

/// Fetch one of the current user's orders
///
/// GET /api/v1/orders/:id
async fn get_order(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<OrderResponse>> {
    let order = OrderService::get_order(&state.db, current.user().id, id).await?;
    Ok(Json(order))
}

/// Check a ticket in by its code
///
/// POST /api/v1/tickets/:code/check-in
async fn check_in(
    State(state): State<AppState>,
    _current: CurrentUser,
    Path(code): Path<String>,
) -> ApiResult<Json<Ticket>> {
    let ticket = OrderService::check_in(&state.db, &code).await?;
    Ok(Json(ticket))
}
