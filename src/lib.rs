//! # sqetrace
//!
//! A table-driven codec for NVMe submission queue entries:
//! - Encode named field values into the 64-byte entry
//! - Render hex dumps and ftrace-style `nvme_setup_cmd` lines
//! - Decode captured trace lines back into named fields
//! - Verify that every command survives the text round trip
//!
//! ## Architecture Overview
//!
//! ```text
//!   field values ──► ┌─────────────┐ ──► 64-byte entry ──► ┌───────────┐
//!                    │    Codec    │                       │  Hexdump  │
//!                    └──────┬──────┘                       └───────────┘
//!                           │ entry
//!                           ▼
//!                    ┌─────────────┐      trace line       ┌───────────┐
//!                    │ Synthesizer │ ────────────────────► │  Parser   │ ──► decoded fields
//!                    └─────────────┘                       └─────┬─────┘
//!                                                                │
//!          ┌─────────────────────────────────────────────────────┘
//!          ▼
//!   ┌─────────────┐        ┌──────────────────────────┐
//!   │ Field Table │ ◄───── │ Catalog / JSON table file │
//!   │ (swappable) │        └──────────────────────────┘
//!   └─────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod table;
pub mod catalog;
pub mod codec;
pub mod hexdump;
pub mod trace;
pub mod verify;
pub mod engine;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{ParseError, Result, SqeError};
pub use config::Config;
pub use engine::{BuiltCommand, Engine};
pub use table::{CommandClass, CommandDescriptor, FieldDescriptor, FieldTable, SharedTable};
pub use codec::{Codec, CommandBuffer, FieldValues};
pub use hexdump::HexFormatter;
pub use trace::{DecodedCommand, TraceParser, TraceSynthesizer};
pub use verify::{RoundTripReport, RoundTripVerifier};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of sqetrace
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
