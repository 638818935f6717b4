//! Built-in Command Catalog
//!
//! Field layouts for the NVMe Admin and NVM I/O command sets. The catalog
//! is ordinary table data: everything here could equally be loaded from a
//! JSON table file (see `sqetrace export-table`).
//!
//! Ids are `admin-<name>` and `io-<name>`.

mod admin;
mod io;
pub mod meanings;

use crate::error::Result;
use crate::table::{CommandDescriptor, FieldDescriptor, FieldTable};

/// Raw catalog entries, Admin first, each class in opcode order
pub fn commands() -> Vec<CommandDescriptor> {
    let mut commands = admin::commands();
    commands.extend(io::commands());
    commands
}

/// The catalog as a validated table
pub fn builtin() -> Result<FieldTable> {
    FieldTable::new(commands())
}

fn field(name: &str, word_index: u8, bit_start: u8, bit_end: u8, description: &str) -> FieldDescriptor {
    FieldDescriptor::new(name, word_index, bit_start, bit_end, description)
}
