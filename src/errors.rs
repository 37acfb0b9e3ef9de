// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Error types for vest data and the valuation model.

use thiserror::Error;

/// Input that violates an invariant of the vest model.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A field holds a value outside its allowed domain.
    #[error("Invalid {field}: {message}")]
    Invalid { field: String, message: String },

    /// A derived quantity would divide by zero.
    #[error("Cannot compute {quantity}: division by zero")]
    DivisionByZero { quantity: String },
}

impl ValidationError {
    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Invalid {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn division_by_zero(quantity: impl Into<String>) -> Self {
        Self::DivisionByZero {
            quantity: quantity.into(),
        }
    }

    pub fn is_division_by_zero(&self) -> bool {
        matches!(self, Self::DivisionByZero { .. })
    }

    /// Qualifies the offending field with its parent path, e.g. `vestHistory[2].shares`.
    pub fn within(self, parent: &str) -> Self {
        match self {
            Self::Invalid { field, message } => Self::Invalid {
                field: format!("{}.{}", parent, field),
                message,
            },
            other => other,
        }
    }
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed vest data: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

pub type Result<T> = std::result::Result<T, Error>;
