//! Field Table Module
//!
//! Declarative description of every command the codec understands.
//!
//! ## Responsibilities
//! - Describe commands as plain data: identity plus an ordered field list
//! - Validate a table once, at load (bit ranges, word indices, overlaps,
//!   opcode uniqueness per class)
//! - Resolve commands by id or by `(opcode, class)`
//! - Hand out immutable snapshots that can be swapped wholesale
//!
//! ## Field Addressing
//! ```text
//!   word_index (10..=15)      bit_end          bit_start
//!        │                       │                 │
//!        ▼                       ▼                 ▼
//!   ┌─────────┐   31 ┌────────┬─────────────────┬────────┐ 0
//!   │ CDW<n>  │ ───▶ │  ....  │   field bits    │  ....  │
//!   └─────────┘      └────────┴─────────────────┴────────┘
//! ```

mod descriptor;
mod field_table;
mod shared;

pub use descriptor::{CommandClass, CommandDescriptor, FieldDescriptor};
pub use field_table::FieldTable;
pub use shared::SharedTable;
