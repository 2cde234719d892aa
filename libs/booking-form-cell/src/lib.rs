pub mod models;
pub mod router;
pub mod services;

pub use models::*;
pub use router::dispatch_change;
pub use services::*;
