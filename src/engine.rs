//! Engine Module
//!
//! The front door that coordinates all components.
//!
//! ## Responsibilities
//! - Own the field table (swappable as a whole) and the configuration
//! - Build commands: encode, hex dump, synthetic trace line
//! - Decode single lines and whole captures
//! - Run round-trip checks

use std::path::Path;
use std::sync::Arc;

use crate::catalog;
use crate::codec::{Codec, CommandBuffer, FieldValues, COMMAND_WORD_COUNT};
use crate::config::Config;
use crate::error::{ParseError, Result};
use crate::hexdump::HexFormatter;
use crate::table::{CommandDescriptor, FieldTable, SharedTable};
use crate::trace::{decode_parallel, DecodedCommand, TraceLineResult, TraceParser, TraceSynthesizer};
use crate::verify::{RoundTripReport, RoundTripVerifier};

/// Everything produced for one built command
#[derive(Debug, Clone)]
pub struct BuiltCommand {
    pub command: CommandDescriptor,
    pub buffer: CommandBuffer,
    /// CDW10..CDW15 as encoded
    pub words: [u32; COMMAND_WORD_COUNT],
    pub hex_dump: String,
    pub trace_line: String,
}

/// The main codec engine
///
/// ## Concurrency Model
/// - Every operation takes a table snapshot (`Arc`) first and uses only
///   that snapshot, so calls are independent and may run on any thread
/// - `reload` swaps the whole table; calls already running keep the old one
pub struct Engine {
    /// Engine configuration
    config: Config,

    /// Current field table
    table: SharedTable,

    hex: HexFormatter,

    synthesizer: TraceSynthesizer,
}

impl Engine {
    /// Create an engine over `table`
    pub fn new(table: FieldTable, config: Config) -> Self {
        Self {
            hex: HexFormatter::from_config(&config),
            synthesizer: TraceSynthesizer::from_config(&config),
            table: SharedTable::new(table),
            config,
        }
    }

    /// Engine over the built-in NVMe catalog
    pub fn with_builtin(config: Config) -> Result<Self> {
        Ok(Self::new(catalog::builtin()?, config))
    }

    /// Engine over a JSON table file
    pub fn open_path(path: impl AsRef<Path>, config: Config) -> Result<Self> {
        Ok(Self::new(FieldTable::from_path(path)?, config))
    }

    /// Current table snapshot
    pub fn table(&self) -> Arc<FieldTable> {
        self.table.snapshot()
    }

    /// Replace the table atomically
    pub fn reload(&self, table: FieldTable) {
        self.table.replace(table);
    }

    /// Replace the table from a JSON file; the old table stays on error
    pub fn reload_from_path(&self, path: impl AsRef<Path>) -> Result<()> {
        let table = FieldTable::from_path(path)?;
        self.reload(table);
        Ok(())
    }

    /// Encode a command and render its hex dump and trace line
    ///
    /// Unlike the raw codec, rejects field names the command does not have.
    pub fn build(
        &self,
        id: &str,
        values: &FieldValues,
        scope: Option<u32>,
        queue_id: Option<u16>,
    ) -> Result<BuiltCommand> {
        let table = self.table();
        let codec = Codec::with_config(Arc::clone(&table), &self.config);
        let command = codec.command(id)?;
        codec.check_names(command, values)?;

        let buffer = codec.encode(command, values, scope.unwrap_or(self.config.default_scope));
        let trace_line = self.synthesizer.synthesize(command, &buffer, queue_id);

        tracing::debug!(command = %command.id, scope = buffer.scope(), "built command");

        Ok(BuiltCommand {
            command: command.clone(),
            words: buffer.command_words(),
            hex_dump: self.hex.format(buffer.as_bytes()),
            trace_line,
            buffer,
        })
    }

    /// Decode one trace line
    pub fn decode(&self, line: &str) -> std::result::Result<DecodedCommand, ParseError> {
        TraceParser::new(self.table()).parse(line)
    }

    /// Decode a capture, skipping blank and comment lines
    ///
    /// `workers > 1` decodes large captures in parallel.
    pub fn decode_text(&self, text: &str, workers: usize) -> Vec<TraceLineResult> {
        let parser = TraceParser::new(self.table());
        decode_parallel(&parser, text, workers)
    }

    /// Round trip one command
    pub fn verify(&self, id: &str, values: &FieldValues) -> Result<RoundTripReport> {
        let table = self.table();
        let command = table.require(id)?;
        let verifier = RoundTripVerifier::with_config(Arc::clone(&table), &self.config);
        Ok(verifier.check(command, values)?)
    }

    /// Round trip every command with no values and with every field at its
    /// maximum
    pub fn verify_all(&self) -> Result<Vec<RoundTripReport>> {
        let table = self.table();
        let verifier = RoundTripVerifier::with_config(Arc::clone(&table), &self.config);

        let mut reports = Vec::with_capacity(table.len() * 2);
        for command in table.commands() {
            let saturated: FieldValues = command
                .fields
                .iter()
                .map(|f| (f.name.clone(), u64::from(f.max_value())))
                .collect();

            reports.push(verifier.check(command, &FieldValues::new())?);
            reports.push(verifier.check(command, &saturated)?);
        }

        Ok(reports)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get the hex formatter
    pub fn hex_formatter(&self) -> &HexFormatter {
        &self.hex
    }

    /// Get the trace synthesizer
    pub fn synthesizer(&self) -> &TraceSynthesizer {
        &self.synthesizer
    }
}
