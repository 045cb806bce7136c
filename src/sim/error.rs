//! Simulation errors
//!
//! These mark broken invariants (programming errors), not user mistakes.

use thiserror::Error;

use super::state::EntityId;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SimError {
    #[error("no active bird while the level is running")]
    NoActiveBird,
    #[error("entity {0} is not alive")]
    UnknownEntity(EntityId),
}
