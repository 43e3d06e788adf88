pub mod calibration;
pub mod dashboard;
pub mod objects;
