//! Foundation value objects shared by every domain module.

mod auth;
mod errors;
mod ids;
mod state_machine;
mod timestamp;

pub use auth::{AuthError, AuthenticatedUser};
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{
    BookingId, CanteenId, ConnectionId, ExpenseId, MenuItemId, NotificationId, OrderId, UserId,
};
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
