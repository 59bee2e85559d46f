pub mod client;
pub mod executor;
pub mod model;

pub use client::{ApiClient, ApiError};
pub use executor::{ApiCommand, ApiEvent, ApiExecutor};
pub use model::{Node, TreeRoot};
