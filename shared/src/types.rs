//! API request and response types

use crate::models::{Order, OrderStatus, Ticket, User};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Registration request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
}

/// Login request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// User as returned by the API (never includes the password hash)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            is_active: user.is_active,
            created_at: user.created_at,
        }
    }
}

/// Successful login response: the token is returned in the body as well
/// as in the `access_token` cookie so non-browser clients can use it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user: UserResponse,
}

/// Logout acknowledgement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogoutResponse {
    pub message: String,
}

/// Event creation request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateEventRequest {
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub starts_at: DateTime<Utc>,
    pub ends_at: Option<DateTime<Utc>>,
    pub max_tickets: Option<i32>,
}

/// Ticket type creation request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTicketTypeRequest {
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub quantity_available: i32,
}

/// Order placement request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaceOrderRequest {
    pub event_id: Uuid,
    pub ticket_type_id: Uuid,
    pub quantity: i32,
}

/// Order with the tickets it issued
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderResponse {
    pub id: Uuid,
    pub event_id: Uuid,
    pub total_amount: Decimal,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub tickets: Vec<TicketResponse>,
}

/// Ticket as returned by the API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TicketResponse {
    pub id: Uuid,
    pub ticket_type_id: Uuid,
    pub ticket_code: String,
    pub is_checked_in: bool,
    pub checked_in_at: Option<DateTime<Utc>>,
}

impl From<Ticket> for TicketResponse {
    fn from(ticket: Ticket) -> Self {
        Self {
            id: ticket.id,
            ticket_type_id: ticket.ticket_type_id,
            ticket_code: ticket.ticket_code,
            is_checked_in: ticket.is_checked_in,
            checked_in_at: ticket.checked_in_at,
        }
    }
}

impl OrderResponse {
    pub fn from_parts(order: Order, tickets: Vec<Ticket>) -> Self {
        Self {
            id: order.id,
            event_id: order.event_id,
            total_amount: order.total_amount,
            status: order.status,
            created_at: order.created_at,
            tickets: tickets.into_iter().map(TicketResponse::from).collect(),
        }
    }
}
