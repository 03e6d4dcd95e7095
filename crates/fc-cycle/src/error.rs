//! Error types for cycle solving.

use fc_core::CoreError;
use thiserror::Error;

/// Errors that can abort a cycle solve.
///
/// Deliberately narrow: only configuration problems are hard errors.
/// Numerical degeneracies inside components are clamped, and root-find
/// non-convergence degrades to an estimate marked on the result.
#[derive(Error, Debug)]
pub enum CycleError {
    #[error("Unknown cycle architecture: {name}")]
    UnknownArchitecture { name: String },

    #[error("Invalid cycle definition: {what}")]
    InvalidDefinition { what: &'static str },

    #[error(transparent)]
    Core(#[from] CoreError),
}

pub type CycleResult<T> = Result<T, CycleError>;
