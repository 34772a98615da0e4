//! Service layer: orchestration over the pure domain types.

pub mod orchestrator;
