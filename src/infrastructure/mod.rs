// Infrastructure layer - External dependencies and adapters
pub mod config;
pub mod figure_backend;
pub mod sim_source;
