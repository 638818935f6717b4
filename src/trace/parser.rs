//! Trace line parser
//!
//! Turns one line of trace text into a [`DecodedCommand`], resolving the
//! opcode against the field table and unpacking the command words with the
//! same descriptors the encoder uses.

use std::sync::Arc;

use super::decoded::{DecodeWarning, DecodedCommand, DecodedField};
use super::scanner::{parse_hex, parse_number, scan, ScannedLine};
use crate::codec::{unpack_words, COMMAND_WORD_COUNT, FIRST_COMMAND_WORD};
use crate::error::ParseError;
use crate::table::{CommandClass, CommandDescriptor, FieldTable};

/// Outcome for one line of a multi-line capture
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceLineResult {
    /// 1-based line number in the input text
    pub line_number: usize,
    pub outcome: Result<DecodedCommand, ParseError>,
}

/// Blank lines and `#` comments are not trace lines
pub(crate) fn is_trace_candidate(line: &str) -> bool {
    let trimmed = line.trim();
    !trimmed.is_empty() && !trimmed.starts_with('#')
}

/// Table-bound trace decoder
#[derive(Debug, Clone)]
pub struct TraceParser {
    table: Arc<FieldTable>,
}

impl TraceParser {
    pub fn new(table: Arc<FieldTable>) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &FieldTable {
        &self.table
    }

    /// Decode a single line
    ///
    /// Fails only when there is no usable opcode token or the opcode is not
    /// in the table for either class. Everything else degrades: missing
    /// words are 0, malformed tokens are ignored and reported as warnings.
    pub fn parse(&self, line: &str) -> Result<DecodedCommand, ParseError> {
        let scanned = scan(line);
        let mut warnings = Vec::new();

        let queue_id = number_token::<u16>(&scanned, "qid", &mut warnings);
        let tag = number_token::<u16>(&scanned, "cmdid", &mut warnings);

        let opcode = scanned
            .find("opcode")
            .and_then(parse_hex)
            .and_then(|value| u8::try_from(value).ok())
            .ok_or(ParseError::NoOpcode)?;

        let command = self.resolve(opcode, queue_id, &mut warnings)?;

        let scope = number_token::<u32>(&scanned, "nsid", &mut warnings).unwrap_or(0);
        let words = command_words(&scanned, &mut warnings);

        let fields = unpack_words(command, &words)
            .into_iter()
            .map(|(field, value)| DecodedField::new(field, value))
            .collect();

        tracing::debug!(
            command = %command.id,
            opcode,
            queue_id = ?queue_id,
            warnings = warnings.len(),
            "decoded trace line"
        );

        Ok(DecodedCommand {
            raw: line.trim().to_string(),
            event: scanned.event,
            command_id: command.id.clone(),
            command_name: command.name.clone(),
            opcode,
            class: command.class,
            queue_id,
            tag,
            scope,
            words,
            fields,
            warnings,
        })
    }

    /// Decode every trace line of a capture
    ///
    /// Blank lines and `#` comments are skipped; every other line yields one
    /// result, in input order.
    pub fn parse_text(&self, text: &str) -> Vec<TraceLineResult> {
        text.lines()
            .enumerate()
            .filter(|(_, line)| is_trace_candidate(line))
            .map(|(index, line)| self.parse_numbered(index + 1, line))
            .collect()
    }

    pub(crate) fn parse_numbered(&self, line_number: usize, line: &str) -> TraceLineResult {
        TraceLineResult {
            line_number,
            outcome: self.parse(line),
        }
    }

    /// Pick the command for an opcode
    ///
    /// - qid present: that class; fall back to the other class with a warning
    /// - qid absent: the only match, or Admin when both classes match
    fn resolve(
        &self,
        opcode: u8,
        queue_id: Option<u16>,
        warnings: &mut Vec<DecodeWarning>,
    ) -> Result<&CommandDescriptor, ParseError> {
        match queue_id.map(CommandClass::from_queue_id) {
            Some(class) => {
                if let Some(command) = self.table.lookup(opcode, class) {
                    return Ok(command);
                }

                let command = self.table.lookup(opcode, class.other()).ok_or(
                    ParseError::UnknownOpcode {
                        opcode,
                        class: Some(class),
                    },
                )?;

                tracing::warn!(
                    opcode,
                    queue_class = %class,
                    resolved = %command.id,
                    "opcode not found in queue class, using other class"
                );
                warnings.push(DecodeWarning::ClassMismatch {
                    opcode,
                    queue_class: class,
                    resolved: command.id.clone(),
                });
                Ok(command)
            }
            None => {
                let admin = self.table.lookup(opcode, CommandClass::Admin);
                let io = self.table.lookup(opcode, CommandClass::Io);

                match (admin, io) {
                    (Some(admin), Some(io)) => {
                        tracing::warn!(
                            opcode,
                            chosen = %admin.id,
                            alternative = %io.id,
                            "ambiguous opcode without qid"
                        );
                        warnings.push(DecodeWarning::AmbiguousOpcode {
                            opcode,
                            chosen: admin.id.clone(),
                            alternative: io.id.clone(),
                        });
                        Ok(admin)
                    }
                    (Some(command), None) | (None, Some(command)) => Ok(command),
                    (None, None) => Err(ParseError::UnknownOpcode {
                        opcode,
                        class: None,
                    }),
                }
            }
        }
    }
}

/// Optional numeric token (decimal or `0x` hex)
fn number_token<T: TryFrom<u64>>(
    scanned: &ScannedLine<'_>,
    key: &str,
    warnings: &mut Vec<DecodeWarning>,
) -> Option<T> {
    let text = scanned.find(key)?;
    let value = parse_number(text).and_then(|v| T::try_from(v).ok());
    if value.is_none() {
        malformed(warnings, key, text);
    }
    value
}

/// CDW10..CDW15; absent or malformed words are 0
fn command_words(scanned: &ScannedLine<'_>, warnings: &mut Vec<DecodeWarning>) -> [u32; COMMAND_WORD_COUNT] {
    let mut words = [0u32; COMMAND_WORD_COUNT];

    for (slot, index) in words.iter_mut().zip(FIRST_COMMAND_WORD..) {
        let key = format!("cdw{}", index);
        let Some(text) = scanned.find(&key) else {
            continue;
        };

        match parse_hex(text).and_then(|v| u32::try_from(v).ok()) {
            Some(value) => *slot = value,
            None => malformed(warnings, &key, text),
        }
    }

    words
}

fn malformed(warnings: &mut Vec<DecodeWarning>, key: &str, text: &str) {
    tracing::warn!(key, text, "malformed token ignored");
    warnings.push(DecodeWarning::MalformedToken {
        key: key.to_string(),
        text: text.to_string(),
    });
}
