//! Command and field descriptors
//!
//! Plain data records. Every command is handled by the same generic packing
//! routine, so there is no per-command behavior here.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The two disjoint command families
///
/// Opcodes are only unique within a class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommandClass {
    Admin,
    Io,
}

impl CommandClass {
    /// Class implied by a queue id: 0 is the admin queue
    pub fn from_queue_id(qid: u16) -> Self {
        if qid == 0 {
            CommandClass::Admin
        } else {
            CommandClass::Io
        }
    }

    /// The opposite class
    pub fn other(self) -> Self {
        match self {
            CommandClass::Admin => CommandClass::Io,
            CommandClass::Io => CommandClass::Admin,
        }
    }

    /// Display label
    pub fn label(self) -> &'static str {
        match self {
            CommandClass::Admin => "Admin",
            CommandClass::Io => "I/O",
        }
    }
}

impl fmt::Display for CommandClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandClass::Admin => f.write_str("admin"),
            CommandClass::Io => f.write_str("io"),
        }
    }
}

impl FromStr for CommandClass {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(CommandClass::Admin),
            "io" | "i/o" | "nvm" => Ok(CommandClass::Io),
            other => Err(format!("unknown command class '{}' (expected admin or io)", other)),
        }
    }
}

/// A named bit range inside one command-specific word
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDescriptor {
    /// Unique within the owning command
    pub name: String,

    /// Command dword holding the field (10..=15)
    pub word_index: u8,

    /// Lowest bit, inclusive
    pub bit_start: u8,

    /// Highest bit, inclusive
    pub bit_end: u8,

    #[serde(default)]
    pub description: String,

    /// Labels for well-known raw values; annotation only
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub value_meanings: BTreeMap<u32, String>,
}

impl FieldDescriptor {
    pub fn new(
        name: impl Into<String>,
        word_index: u8,
        bit_start: u8,
        bit_end: u8,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            word_index,
            bit_start,
            bit_end,
            description: description.into(),
            value_meanings: BTreeMap::new(),
        }
    }

    /// Attach value labels
    pub fn with_meanings<I, S>(mut self, meanings: I) -> Self
    where
        I: IntoIterator<Item = (u32, S)>,
        S: Into<String>,
    {
        self.value_meanings
            .extend(meanings.into_iter().map(|(value, label)| (value, label.into())));
        self
    }

    /// Number of bits covered
    ///
    /// Only meaningful for descriptors that passed table validation.
    pub fn width(&self) -> u32 {
        u32::from(self.bit_end.saturating_sub(self.bit_start)) + 1
    }

    /// Largest value the field can hold: `2^width - 1`
    pub fn max_value(&self) -> u32 {
        match self.width() {
            w if w >= 32 => u32::MAX,
            w => (1u32 << w) - 1,
        }
    }

    /// The field's bits in position within its word
    pub fn mask(&self) -> u32 {
        self.max_value()
            .checked_shl(u32::from(self.bit_start))
            .unwrap_or(0)
    }

    /// Label for a raw value, if the table has one
    pub fn meaning(&self, value: u32) -> Option<&str> {
        self.value_meanings.get(&value).map(String::as_str)
    }

    /// `[31:16]` style bit range
    pub fn bit_range(&self) -> String {
        if self.bit_start == self.bit_end {
            format!("[{}]", self.bit_start)
        } else {
            format!("[{}:{}]", self.bit_end, self.bit_start)
        }
    }

    /// True if both fields claim at least one common bit of the same word
    pub fn overlaps(&self, other: &FieldDescriptor) -> bool {
        self.word_index == other.word_index && self.mask() & other.mask() != 0
    }
}

/// One command: identity plus its ordered field list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandDescriptor {
    /// Unique identifier (e.g. `io-read`)
    pub id: String,

    /// Display name
    pub name: String,

    pub opcode: u8,

    pub class: CommandClass,

    #[serde(default)]
    pub description: String,

    /// Display order is table order
    #[serde(default)]
    pub fields: Vec<FieldDescriptor>,
}

impl CommandDescriptor {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        opcode: u8,
        class: CommandClass,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            opcode,
            class,
            description: description.into(),
            fields: Vec::new(),
        }
    }

    /// Append a field
    pub fn with_field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    /// Append several fields
    pub fn with_fields(mut self, fields: impl IntoIterator<Item = FieldDescriptor>) -> Self {
        self.fields.extend(fields);
        self
    }

    /// Look up a field by name
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Fields that live in the given command word, in table order
    pub fn fields_in_word(&self, word_index: u8) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields.iter().filter(move |f| f.word_index == word_index)
    }
}
