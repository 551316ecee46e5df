//! Web layer for the transit gateway.
//!
//! One route per endpoint schema. Handlers validate against the schema,
//! make one provider call, and return the decoded records as JSON.

mod bus;
mod dto;
mod error;
mod routes;
mod state;
mod train;

pub use dto::ErrorResponse;
pub use error::AppError;
pub use routes::create_router;
pub use state::AppState;
