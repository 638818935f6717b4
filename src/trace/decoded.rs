//! Decoded trace line structures

use std::fmt;

use serde::Serialize;

use crate::codec::{FieldValues, COMMAND_WORD_COUNT, FIRST_COMMAND_WORD};
use crate::table::{CommandClass, FieldDescriptor};

/// Which NVMe trace event a line came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    /// `nvme_setup_cmd`
    Setup,
    /// `nvme_complete_cmd`
    Complete,
}

/// The standard ftrace prefix, when the line carried one
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TraceEvent {
    pub process: String,
    pub pid: u32,
    pub cpu: u32,
    pub flags: String,
    pub timestamp: String,
    pub event: EventKind,
    pub device: String,
}

/// Something odd about a line that did not stop it from decoding
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DecodeWarning {
    /// No queue id and the opcode exists in both classes; Admin was chosen
    AmbiguousOpcode {
        opcode: u8,
        chosen: String,
        alternative: String,
    },

    /// The queue's class has no such opcode, the other class does
    ClassMismatch {
        opcode: u8,
        queue_class: CommandClass,
        resolved: String,
    },

    /// A token was present but its value did not parse; treated as absent
    MalformedToken { key: String, text: String },
}

impl fmt::Display for DecodeWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeWarning::AmbiguousOpcode {
                opcode,
                chosen,
                alternative,
            } => write!(
                f,
                "ambiguous opcode 0x{:02x} without qid: chose {} over {}",
                opcode, chosen, alternative
            ),
            DecodeWarning::ClassMismatch {
                opcode,
                queue_class,
                resolved,
            } => write!(
                f,
                "opcode 0x{:02x} is not a {} command; resolved to {}",
                opcode, queue_class, resolved
            ),
            DecodeWarning::MalformedToken { key, text } => {
                write!(f, "malformed {}={} ignored", key, text)
            }
        }
    }
}

/// One field value recovered from the command words
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecodedField {
    pub name: String,
    pub value: u32,
    /// `0x`-prefixed lowercase hex, no padding
    pub hex: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meaning: Option<String>,
}

impl DecodedField {
    pub fn new(field: &FieldDescriptor, value: u32) -> Self {
        Self {
            name: field.name.clone(),
            value,
            hex: format!("0x{:x}", value),
            description: field.description.clone(),
            meaning: field.meaning(value).map(str::to_string),
        }
    }
}

/// A trace line resolved against the field table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecodedCommand {
    /// The input line, trimmed
    pub raw: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub event: Option<TraceEvent>,

    pub command_id: String,
    pub command_name: String,
    pub opcode: u8,
    pub class: CommandClass,

    /// `qid=` if present
    pub queue_id: Option<u16>,

    /// `cmdid=` if present
    pub tag: Option<u16>,

    /// `nsid=`, 0 if absent
    pub scope: u32,

    /// CDW10..CDW15, missing words are 0
    pub words: [u32; COMMAND_WORD_COUNT],

    /// One entry per table field, in table order
    pub fields: Vec<DecodedField>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<DecodeWarning>,
}

impl DecodedCommand {
    /// Resolved by the Admin-first tie-break
    pub fn is_ambiguous(&self) -> bool {
        self.warnings
            .iter()
            .any(|w| matches!(w, DecodeWarning::AmbiguousOpcode { .. }))
    }

    pub fn field(&self, name: &str) -> Option<&DecodedField> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Field values keyed by name, comparable with `mask_values`
    pub fn values(&self) -> FieldValues {
        self.fields
            .iter()
            .map(|f| (f.name.clone(), u64::from(f.value)))
            .collect()
    }

    /// Command dword by absolute index (10..=15)
    pub fn word(&self, index: u8) -> Option<u32> {
        index
            .checked_sub(FIRST_COMMAND_WORD)
            .and_then(|slot| self.words.get(usize::from(slot)))
            .copied()
    }
}

impl fmt::Display for DecodedCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "0x{:02x} {:<5} {} ({})",
            self.opcode,
            self.class.label(),
            self.command_name,
            self.command_id
        )?;
        if let Some(qid) = self.queue_id {
            write!(f, " qid={}", qid)?;
        }
        write!(f, " nsid={}", self.scope)?;
        if let Some(tag) = self.tag {
            write!(f, " cmdid={}", tag)?;
        }
        writeln!(f)?;

        let name_width = self.fields.iter().map(|d| d.name.len()).max().unwrap_or(0);
        for field in &self.fields {
            write!(
                f,
                "  {:<width$}  {:<12} ({})",
                field.name,
                field.hex,
                field.value,
                width = name_width
            )?;
            if let Some(meaning) = &field.meaning {
                write!(f, "  {}", meaning)?;
            }
            writeln!(f)?;
        }

        let words: Vec<String> = self
            .words
            .iter()
            .zip(FIRST_COMMAND_WORD..)
            .map(|(word, index)| format!("cdw{}=0x{:08x}", index, word))
            .collect();
        write!(f, "  {}", words.join(" "))?;

        for warning in &self.warnings {
            write!(f, "\n  warning: {}", warning)?;
        }

        Ok(())
    }
}
