pub mod hooks;
pub mod layout;
pub mod menu;
pub mod ui;
