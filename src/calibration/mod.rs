//! Calibration workflow: field state, text replies and the session controller.

pub mod controller;
pub mod field;
pub mod reply;

pub use controller::{Action, CalibrationController, FollowUp, Mode, Notice};
pub use field::{FieldKey, FieldState};
