//! Codec Module
//!
//! Packs named field values into a 64-byte submission queue entry and
//! unpacks them again.
//!
//! ## Entry Layout
//! ```text
//! ┌────────┬───────┬─────────┬──────────┬────────────────────┬──────────────────┐
//! │ Op (1) │ Fl(1) │ CID (2) │ NSID (4) │ CDW2..CDW9 (32)    │ CDW10..CDW15 (24)│
//! └────────┴───────┴─────────┴──────────┴────────────────────┴──────────────────┘
//!   0        1       2         4          8                    40
//! ```
//!
//! ## Packing Rule
//! For every field: `word = (word & !mask) | ((value << bit_start) & mask)`
//! where `mask = (2^width - 1) << bit_start`. Oversized values are truncated,
//! never rejected.

mod buffer;
mod pack;

use std::sync::Arc;

pub use buffer::{CommandBuffer, COMMAND_WORD_COUNT, FIRST_COMMAND_WORD, LAST_COMMAND_WORD, SQE_SIZE};
pub use pack::{
    decode, decode_words, encode, encode_tagged, encode_words, extract, mask_value, mask_values, max_value,
    unpack_words, FieldValues,
};

use crate::config::Config;
use crate::error::{Result, SqeError};
use crate::table::{CommandDescriptor, FieldTable};

/// Table-bound encoder/decoder
///
/// Holds the field table it was built with and the configured command
/// identifier. Stateless between calls.
#[derive(Debug, Clone)]
pub struct Codec {
    table: Arc<FieldTable>,
    command_tag: u16,
    default_scope: u32,
}

impl Codec {
    /// Create a codec over `table` with default configuration
    pub fn new(table: Arc<FieldTable>) -> Self {
        Self::with_config(table, &Config::default())
    }

    pub fn with_config(table: Arc<FieldTable>, config: &Config) -> Self {
        Self {
            table,
            command_tag: config.command_tag,
            default_scope: config.default_scope,
        }
    }

    pub fn table(&self) -> &FieldTable {
        &self.table
    }

    /// Resolve a command id against the table
    pub fn command(&self, id: &str) -> Result<&CommandDescriptor> {
        self.table.require(id)
    }

    /// Encode with an explicit namespace id
    pub fn encode(&self, command: &CommandDescriptor, values: &FieldValues, scope: u32) -> CommandBuffer {
        encode_tagged(command, values, scope, self.command_tag)
    }

    /// Encode with the configured default namespace id
    pub fn encode_default(&self, command: &CommandDescriptor, values: &FieldValues) -> CommandBuffer {
        self.encode(command, values, self.default_scope)
    }

    /// Encode a command looked up by id
    pub fn encode_by_id(&self, id: &str, values: &FieldValues, scope: u32) -> Result<CommandBuffer> {
        let command = self.command(id)?;
        Ok(self.encode(command, values, scope))
    }

    pub fn decode(&self, command: &CommandDescriptor, buffer: &CommandBuffer) -> FieldValues {
        decode(command, buffer)
    }

    /// CDW10..CDW15 only, without building a full entry
    pub fn encode_words(
        &self,
        command: &CommandDescriptor,
        values: &FieldValues,
    ) -> [u32; COMMAND_WORD_COUNT] {
        encode_words(command, values)
    }

    /// Reject value names the command does not declare
    ///
    /// The encoder itself ignores unknown names; front ends call this first
    /// to catch typos.
    pub fn check_names(&self, command: &CommandDescriptor, values: &FieldValues) -> Result<()> {
        match values.keys().find(|name| command.field(name).is_none()) {
            Some(name) => Err(SqeError::UnknownField {
                command: command.id.clone(),
                field: name.clone(),
            }),
            None => Ok(()),
        }
    }
}
