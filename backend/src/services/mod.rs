//! Business logic layer

mod event;
mod order;
mod user;

pub use event::EventService;
pub use order::OrderService;
pub use user::UserService;
