//! Data access layer
//!
//! One repository per table, all plain sqlx over the shared pool.

mod event;
mod order;
mod ticket;
mod ticket_type;
mod user;

pub use event::{EventRecord, EventRepository, NewEvent};
pub use order::{NewOrder, OrderRecord, OrderRepository};
pub use ticket::{TicketRecord, TicketRepository};
pub use ticket_type::{NewTicketType, TicketTypeRecord, TicketTypeRepository};
pub use user::{UserRecord, UserRepository};
