pub mod diagram_panel;
pub mod login;
pub mod requirement_panel;
pub mod studio;
pub mod style;
