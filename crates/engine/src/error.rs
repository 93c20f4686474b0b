//! The module contains the errors the engine can raise.
//!
//! Authorization failures ([`Unauthenticated`], [`Forbidden`]) are always
//! raised before any store access. [`Database`] wraps store failures
//! verbatim; they are never retried here.
//!
//!  [`Unauthenticated`]: EngineError::Unauthenticated
//!  [`Forbidden`]: EngineError::Forbidden
//!  [`Database`]: EngineError::Database
use sea_orm::DbErr;
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Not authenticated: {0}")]
    Unauthenticated(String),
    #[error("Not authorized: {0}")]
    Forbidden(String),
    #[error("Unknown field: {0}")]
    UnknownField(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Invalid allocation: {0}")]
    InvalidAllocation(String),
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Unauthenticated(a), Self::Unauthenticated(b)) => a == b,
            (Self::Forbidden(a), Self::Forbidden(b)) => a == b,
            (Self::UnknownField(a), Self::UnknownField(b)) => a == b,
            (Self::InvalidInput(a), Self::InvalidInput(b)) => a == b,
            (Self::InvalidAllocation(a), Self::InvalidAllocation(b)) => a == b,
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
