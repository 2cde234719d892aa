pub mod document;
pub mod memory;
pub mod models;
pub mod services;

pub use document::*;
pub use memory::MemoryDocument;
pub use models::*;
pub use services::*;
