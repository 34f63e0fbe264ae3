//! Error types for the page toolkit.
//!
//! This module defines all error types that can occur while parsing a
//! documentation page and deriving its navigation and packet table.

/// Result type alias for page toolkit operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during page processing.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Malformed markup at a specific byte offset
    #[error("Markup error at byte {offset}: {reason}")]
    Markup {
        /// Byte offset where the error occurred
        offset: usize,
        /// Reason for the parse failure
        reason: String,
    },

    /// A required output container is missing from the page
    #[error("Required container not found: {0}")]
    MissingContainer(String),

    /// A section with an id has no h2 or h3 heading
    #[error("Section '{0}' has no h2 or h3 heading")]
    MissingHeading(String),

    /// A packet section has no props block
    #[error("Packet section '{0}' has no props block")]
    MissingProps(String),

    /// A props block contains no type code
    #[error("Packet section '{0}' has no type code")]
    MissingTypeCode(String),

    /// Two sections carry the same id
    #[error("Duplicate section id: {0}")]
    DuplicateId(String),

    /// A subsection appears before any top-level section
    #[error("Subsection '{0}' has no preceding top-level section to nest under")]
    OrphanSubsection(String),

    /// Model serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
