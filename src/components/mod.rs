pub mod calibration_field;
pub mod calibration_list;
pub mod history_panel;
pub mod menu;
pub mod message_dialog;
pub mod viewer;
