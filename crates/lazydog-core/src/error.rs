//! Error taxonomy shared by every catalog operation.

use std::fmt;

use thiserror::Error;

use crate::authz::EntityKind;

#[derive(Debug, Error)]
pub enum Error {
  /// Malformed or missing input.
  #[error("invalid: {0}")]
  Invalid(String),

  /// The operation would violate a uniqueness invariant.
  #[error("conflict: {0}")]
  Conflict(String),

  /// The actor is not permitted to perform the operation.
  #[error("forbidden: {0}")]
  Forbidden(String),

  /// `key` is the id, or the slug for slug lookups.
  #[error("{kind} not found: {key}")]
  NotFound { kind: EntityKind, key: String },

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  pub fn invalid(message: impl Into<String>) -> Self {
    Self::Invalid(message.into())
  }

  pub fn conflict(message: impl Into<String>) -> Self {
    Self::Conflict(message.into())
  }

  pub fn forbidden(message: impl Into<String>) -> Self {
    Self::Forbidden(message.into())
  }

  pub fn not_found(kind: EntityKind, key: impl fmt::Display) -> Self {
    Self::NotFound { kind, key: key.to_string() }
  }

  /// The human-readable part of the error, without the kind prefix.
  pub fn message(&self) -> String {
    match self {
      Self::Invalid(m) | Self::Conflict(m) | Self::Forbidden(m) => m.clone(),
      Self::NotFound { kind, key } => format!("{kind} {key} not found"),
      Self::Store(e) => e.to_string(),
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
