pub mod controller;
pub mod date_window;
pub mod generation;

pub use controller::BookingFormController;
pub use date_window::DateWindow;
pub use generation::{Field, RequestGenerations, Ticket};
