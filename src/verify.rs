//! Round-trip verification
//!
//! `encode -> synthesize -> parse`, then compare the decoded fields with the
//! masked input. No logic of its own beyond the comparison.

use std::sync::Arc;

use serde::Serialize;

use crate::codec::{mask_values, Codec, FieldValues};
use crate::config::Config;
use crate::error::ParseError;
use crate::table::{CommandDescriptor, FieldTable};
use crate::trace::{DecodedCommand, TraceParser, TraceSynthesizer};

/// A field whose decoded value differs from the masked input
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldMismatch {
    pub field: String,
    pub expected: u64,
    pub decoded: Option<u64>,
}

/// Result of one round trip
#[derive(Debug, Clone, Serialize)]
pub struct RoundTripReport {
    pub command_id: String,
    /// The synthesized line that was parsed back
    pub trace_line: String,
    /// Input after masking every field to its width
    pub expected: FieldValues,
    pub decoded: DecodedCommand,
    pub mismatches: Vec<FieldMismatch>,
}

impl RoundTripReport {
    /// Decoded fields equal the masked input and the same command came back
    pub fn is_faithful(&self) -> bool {
        self.mismatches.is_empty() && self.decoded.command_id == self.command_id
    }
}

/// Drives the text pipeline end to end
#[derive(Debug, Clone)]
pub struct RoundTripVerifier {
    codec: Codec,
    synthesizer: TraceSynthesizer,
    parser: TraceParser,
    default_scope: u32,
}

impl RoundTripVerifier {
    pub fn new(table: Arc<FieldTable>) -> Self {
        Self::with_config(table, &Config::default())
    }

    pub fn with_config(table: Arc<FieldTable>, config: &Config) -> Self {
        Self {
            codec: Codec::with_config(Arc::clone(&table), config),
            synthesizer: TraceSynthesizer::from_config(config),
            parser: TraceParser::new(table),
            default_scope: config.default_scope,
        }
    }

    /// Encode, synthesize and parse back
    ///
    /// `command` must be in the verifier's table, otherwise the parse step
    /// cannot resolve it (or resolves a different command with the same
    /// opcode).
    pub fn verify(
        &self,
        command: &CommandDescriptor,
        values: &FieldValues,
    ) -> Result<DecodedCommand, ParseError> {
        self.run(command, values).map(|(_, decoded)| decoded)
    }

    /// Round trip plus field-by-field comparison against `mask(values)`
    pub fn check(
        &self,
        command: &CommandDescriptor,
        values: &FieldValues,
    ) -> Result<RoundTripReport, ParseError> {
        let (trace_line, decoded) = self.run(command, values)?;
        let expected = mask_values(command, values);
        let actual = decoded.values();

        let mismatches: Vec<FieldMismatch> = expected
            .iter()
            .filter(|(name, value)| actual.get(*name) != Some(*value))
            .map(|(name, &value)| FieldMismatch {
                field: name.clone(),
                expected: value,
                decoded: actual.get(name).copied(),
            })
            .collect();

        if !mismatches.is_empty() {
            tracing::warn!(
                command = %command.id,
                mismatches = mismatches.len(),
                "round trip lost field values"
            );
        }

        Ok(RoundTripReport {
            command_id: command.id.clone(),
            trace_line,
            expected,
            decoded,
            mismatches,
        })
    }

    fn run(
        &self,
        command: &CommandDescriptor,
        values: &FieldValues,
    ) -> Result<(String, DecodedCommand), ParseError> {
        let buffer = self.codec.encode(command, values, self.default_scope);
        let line = self.synthesizer.synthesize(command, &buffer, None);
        let decoded = self.parser.parse(&line)?;
        Ok((line, decoded))
    }
}
