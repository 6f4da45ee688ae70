pub mod alert;
pub mod button;
pub mod input;
pub mod label;
pub mod panel;
pub mod spinner;

// Re-export component symbols so callers can `use crate::components::ui::Button` etc.
pub use alert::*;
pub use button::*;
pub use input::*;
pub use label::*;
pub use panel::*;
pub use spinner::*;
