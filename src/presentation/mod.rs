// Presentation layer - Board controller shell
pub mod app_state;
pub mod handlers;
