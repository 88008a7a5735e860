// Domain layer - Core types and invariants
pub mod panel;
pub mod registry;
pub mod snapshot;
