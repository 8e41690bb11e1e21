pub mod errors;
pub mod fsm_machine;
#[cfg(test)]
mod fsm_tests;
pub mod fsm_types;

pub use errors::*;
pub use fsm_machine::*;
pub use fsm_types::*;

// Single import path for everything the orchestrator exposes.
pub mod fsm {
    pub use super::errors::*;
    pub use super::fsm_machine::*;
    pub use super::fsm_types::*;
}
