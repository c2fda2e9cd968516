pub mod config;
pub mod error;
pub mod router;

pub use config::RoutingConfig;
pub use error::{Result, RouterError};
pub use router::{Router, RoutingDecision};
