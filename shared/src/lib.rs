//! Ticketly Shared Library
//!
//! This crate contains the wire types, domain models, and validation
//! helpers shared between the backend and its API clients.

pub mod models;
pub mod types;
pub mod validation;

// Re-export commonly used items
pub use models::{Event, Order, OrderStatus, Ticket, TicketType, User};
pub use types::*;
