//! Error types for sqlweave

use crate::dialect::{Feature, Vendor};
use thiserror::Error;

/// Result type alias for sqlweave operations
pub type SqlResult<T> = Result<T, SqlError>;

/// Errors raised while compiling or executing a statement.
///
/// The first five variants are compile-time errors: they are raised before any
/// SQL text is returned, and compilation never yields partial output.
#[derive(Debug, Error)]
pub enum SqlError {
    /// A field's table is not reachable from FROM/JOIN/CTE scope.
    #[error("Unbound identifier: table '{table}' (referenced by column '{column}') is not in scope")]
    UnboundIdentifier { table: String, column: String },

    /// A construct needs a feature the active dialect lacks.
    #[error("{feature} is not supported by the {vendor} dialect")]
    UnsupportedDialectFeature { feature: Feature, vendor: Vendor },

    /// A polymorphic function argument needs an explicit cast.
    #[error("Indeterminate type for argument {position} of {function}(): add an explicit cast")]
    IndeterminateType { function: String, position: usize },

    /// Mutually exclusive or nonsensical clause combination
    #[error("Invalid clause combination: {0}")]
    InvalidClauseCombination(String),

    /// Statement is missing a mandatory FROM/target/body
    #[error("Empty statement: {0}")]
    EmptyStatement(String),

    /// Engine name that does not map to a known vendor
    #[error("Unknown database vendor: {0}")]
    UnknownVendor(String),

    /// Identifier failed validation
    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(String),

    /// Error reported by a driver adapter
    #[error("Driver error: {0}")]
    Driver(String),

    /// Row decode/mapping error
    #[error("Decode error on column '{column}': {message}")]
    Decode { column: String, message: String },

    /// Query execution error
    #[cfg(feature = "postgres")]
    #[error("Query error: {0}")]
    Query(#[from] tokio_postgres::Error),
}

impl SqlError {
    /// Create an invalid clause combination error
    pub fn invalid_clause(message: impl Into<String>) -> Self {
        Self::InvalidClauseCombination(message.into())
    }

    /// Create an empty statement error
    pub fn empty(message: impl Into<String>) -> Self {
        Self::EmptyStatement(message.into())
    }

    /// Create an unsupported feature error
    pub fn unsupported(feature: Feature, vendor: Vendor) -> Self {
        Self::UnsupportedDialectFeature { feature, vendor }
    }

    /// Create an invalid identifier error
    pub fn invalid_identifier(message: impl Into<String>) -> Self {
        Self::InvalidIdentifier(message.into())
    }

    /// Create a decode error for a specific column
    pub fn decode(column: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Decode {
            column: column.into(),
            message: message.into(),
        }
    }

    /// Check if this error was raised by the compiler (as opposed to a driver).
    pub fn is_compile_error(&self) -> bool {
        matches!(
            self,
            Self::UnboundIdentifier { .. }
                | Self::UnsupportedDialectFeature { .. }
                | Self::IndeterminateType { .. }
                | Self::InvalidClauseCombination(_)
                | Self::EmptyStatement(_)
                | Self::InvalidIdentifier(_)
        )
    }

    /// Check if this is an unbound identifier error
    pub fn is_unbound_identifier(&self) -> bool {
        matches!(self, Self::UnboundIdentifier { .. })
    }

    /// Check if this is an unsupported dialect feature error
    pub fn is_unsupported_feature(&self) -> bool {
        matches!(self, Self::UnsupportedDialectFeature { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compile_errors_are_classified() {
        assert!(SqlError::empty("no FROM").is_compile_error());
        assert!(SqlError::unsupported(Feature::ILike, Vendor::MySql).is_compile_error());
        assert!(!SqlError::Driver("connection reset".into()).is_compile_error());
    }

    #[test]
    fn unsupported_feature_message_names_vendor() {
        let err = SqlError::unsupported(Feature::ILike, Vendor::Sqlite);
        assert_eq!(err.to_string(), "ILIKE is not supported by the sqlite dialect");
    }
}
