//! Validated field table
//!
//! Built once from a list of descriptors, then only read.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{CommandClass, CommandDescriptor, FieldDescriptor};
use crate::codec::{FIRST_COMMAND_WORD, LAST_COMMAND_WORD};
use crate::error::{Result, SqeError};

/// On-disk JSON layout: `{ "commands": [ ... ] }`
#[derive(Serialize, Deserialize)]
struct TableDocument {
    commands: Vec<CommandDescriptor>,
}

/// Immutable command table with id and opcode indexes
///
/// ## Load-time checks
/// - Command ids are unique and non-empty
/// - `(class, opcode)` pairs are unique
/// - Field names are unique within a command
/// - Every field sits in words 10..=15 with `bit_start <= bit_end <= 31`
/// - No two fields of a command share a bit
#[derive(Debug, Clone, Default)]
pub struct FieldTable {
    /// Commands in table order
    commands: Vec<CommandDescriptor>,

    /// id -> position in `commands`
    by_id: HashMap<String, usize>,

    /// (class, opcode) -> position in `commands`
    by_opcode: HashMap<(CommandClass, u8), usize>,
}

impl FieldTable {
    /// Build and validate a table
    pub fn new(commands: Vec<CommandDescriptor>) -> Result<Self> {
        let mut by_id = HashMap::with_capacity(commands.len());
        let mut by_opcode = HashMap::with_capacity(commands.len());

        for (index, command) in commands.iter().enumerate() {
            validate_command(command)?;

            if by_id.insert(command.id.clone(), index).is_some() {
                return Err(SqeError::InvalidTable(format!(
                    "duplicate command id '{}'",
                    command.id
                )));
            }

            if let Some(previous) = by_opcode.insert((command.class, command.opcode), index) {
                return Err(SqeError::InvalidTable(format!(
                    "{} opcode 0x{:02x} is used by both '{}' and '{}'",
                    command.class, command.opcode, commands[previous].id, command.id
                )));
            }
        }

        tracing::debug!(commands = commands.len(), "field table loaded");

        Ok(Self {
            commands,
            by_id,
            by_opcode,
        })
    }

    /// Parse a JSON table document
    pub fn from_json(text: &str) -> Result<Self> {
        let document: TableDocument = serde_json::from_str(text)?;
        Self::new(document.commands)
    }

    /// Load a JSON table document from disk
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        tracing::debug!(path = %path.display(), "reading field table");
        Self::from_json(&text)
    }

    /// Render the table as a pretty-printed JSON document
    pub fn to_json_pretty(&self) -> Result<String> {
        let document = TableDocument {
            commands: self.commands.clone(),
        };
        Ok(serde_json::to_string_pretty(&document)?)
    }

    /// Look up a command by id
    pub fn get(&self, id: &str) -> Option<&CommandDescriptor> {
        self.by_id.get(id).map(|&index| &self.commands[index])
    }

    /// Look up a command by id, failing with `UnknownCommand`
    pub fn require(&self, id: &str) -> Result<&CommandDescriptor> {
        self.get(id)
            .ok_or_else(|| SqeError::UnknownCommand(id.to_string()))
    }

    /// Look up a command by opcode within one class
    pub fn lookup(&self, opcode: u8, class: CommandClass) -> Option<&CommandDescriptor> {
        self.by_opcode
            .get(&(class, opcode))
            .map(|&index| &self.commands[index])
    }

    /// All commands, in table order
    pub fn commands(&self) -> &[CommandDescriptor] {
        &self.commands
    }

    /// Commands of one class, in table order
    pub fn by_class(&self, class: CommandClass) -> impl Iterator<Item = &CommandDescriptor> {
        self.commands.iter().filter(move |c| c.class == class)
    }

    /// Admin commands, in table order
    pub fn admin_commands(&self) -> impl Iterator<Item = &CommandDescriptor> {
        self.by_class(CommandClass::Admin)
    }

    /// I/O commands, in table order
    pub fn io_commands(&self) -> impl Iterator<Item = &CommandDescriptor> {
        self.by_class(CommandClass::Io)
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

/// Check one command's descriptors
fn validate_command(command: &CommandDescriptor) -> Result<()> {
    if command.id.trim().is_empty() {
        return Err(SqeError::InvalidTable(format!(
            "command '{}' (opcode 0x{:02x}) has an empty id",
            command.name, command.opcode
        )));
    }

    for (index, field) in command.fields.iter().enumerate() {
        validate_field(command, field)?;

        for earlier in &command.fields[..index] {
            if earlier.name == field.name {
                return Err(SqeError::InvalidTable(format!(
                    "{}: field '{}' is declared twice",
                    command.id, field.name
                )));
            }
            if earlier.overlaps(field) {
                return Err(SqeError::InvalidTable(format!(
                    "{}: field '{}' CDW{}{} overlaps '{}' CDW{}{}",
                    command.id,
                    field.name,
                    field.word_index,
                    field.bit_range(),
                    earlier.name,
                    earlier.word_index,
                    earlier.bit_range()
                )));
            }
        }
    }

    Ok(())
}

fn validate_field(command: &CommandDescriptor, field: &FieldDescriptor) -> Result<()> {
    if field.name.trim().is_empty() {
        return Err(SqeError::InvalidTable(format!(
            "{}: field with an empty name",
            command.id
        )));
    }

    if !(FIRST_COMMAND_WORD..=LAST_COMMAND_WORD).contains(&field.word_index) {
        return Err(SqeError::InvalidTable(format!(
            "{}: field '{}' uses word {} (expected {}..={})",
            command.id, field.name, field.word_index, FIRST_COMMAND_WORD, LAST_COMMAND_WORD
        )));
    }

    if field.bit_start > field.bit_end || field.bit_end > 31 {
        return Err(SqeError::InvalidTable(format!(
            "{}: field '{}' has invalid bit range {}..{}",
            command.id, field.name, field.bit_start, field.bit_end
        )));
    }

    Ok(())
}
