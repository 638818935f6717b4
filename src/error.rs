//! Error types for sqetrace
//!
//! Provides a unified error type for all operations, plus the parser's own
//! result error.

use thiserror::Error;

use crate::table::CommandClass;

/// Result type alias using SqeError
pub type Result<T> = std::result::Result<T, SqeError>;

/// Unified error type for sqetrace operations
#[derive(Debug, Error)]
pub enum SqeError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Field Table Errors
    // -------------------------------------------------------------------------
    #[error("Invalid field table: {0}")]
    InvalidTable(String),

    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("Unknown field '{field}' for command {command}")]
    UnknownField { command: String, field: String },

    // -------------------------------------------------------------------------
    // Trace Errors
    // -------------------------------------------------------------------------
    #[error(transparent)]
    Parse(#[from] ParseError),

    // -------------------------------------------------------------------------
    // Serialization Errors
    // -------------------------------------------------------------------------
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Why a trace line could not be turned into a command
///
/// These are recoverable: the caller gets them back as a value and decides
/// how to present them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("no opcode token found")]
    NoOpcode,

    #[error("{}", unknown_opcode_message(*.opcode, *.class))]
    UnknownOpcode {
        opcode: u8,
        /// Class implied by the queue id, if the line carried one
        class: Option<CommandClass>,
    },
}

fn unknown_opcode_message(opcode: u8, class: Option<CommandClass>) -> String {
    match class {
        Some(class) => format!("unknown opcode 0x{:02x} (queue class {})", opcode, class),
        None => format!("unknown opcode 0x{:02x}", opcode),
    }
}
