// Application layer - Use cases and collaborator contracts
pub mod dispatcher;
pub mod metric_source;
pub mod render_backend;
