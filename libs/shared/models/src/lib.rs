pub mod booking;
pub mod error;
pub mod reschedule;

pub use booking::*;
pub use error::*;
pub use reschedule::*;
