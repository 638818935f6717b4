//! sqetrace Binary
//!
//! Build, dump and decode NVMe submission queue entries from the command
//! line. Command output goes to stdout, logs to stderr.

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use sqetrace::trace::TraceLineResult;
use sqetrace::{CommandClass, CommandDescriptor, Config, Engine, FieldValues, Result};
use tracing_subscriber::{fmt, EnvFilter};

/// sqetrace
#[derive(Parser, Debug)]
#[command(name = "sqetrace")]
#[command(about = "Table-driven NVMe submission queue entry codec and trace decoder")]
#[command(version)]
struct Args {
    /// JSON field table to use instead of the built-in catalog
    #[arg(short, long, global = true)]
    table: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List known commands
    List {
        /// Only commands of this class (admin or io)
        #[arg(short, long)]
        class: Option<CommandClass>,
    },

    /// Show the field layout of a command
    Show {
        /// Command id, e.g. io-read
        id: String,
    },

    /// Encode a command and print its words, hex dump and trace line
    Encode {
        /// Command id, e.g. io-read
        id: String,

        /// Field value as NAME=VALUE (decimal or 0x hex); repeatable
        #[arg(short = 'f', long = "field", value_parser = parse_assignment)]
        fields: Vec<(String, u64)>,

        /// Namespace id
        #[arg(long, value_parser = parse_int::<u32>)]
        nsid: Option<u32>,

        /// Command identifier
        #[arg(long, value_parser = parse_int::<u16>)]
        cid: Option<u16>,

        /// Queue id for the trace line (defaults by class)
        #[arg(long, value_parser = parse_int::<u16>)]
        qid: Option<u16>,

        /// Print only the 64 bytes as one hex string
        #[arg(long)]
        raw: bool,
    },

    /// Decode trace lines from a file or stdin
    Decode {
        /// Capture file; stdin when absent or "-"
        file: Option<PathBuf>,

        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,

        /// Worker threads for large captures
        #[arg(short, long, default_value = "1")]
        jobs: usize,
    },

    /// Check that commands survive encode -> trace line -> decode
    Verify {
        /// Command id; every command when absent
        id: Option<String>,

        /// Field value as NAME=VALUE; only with an id
        #[arg(short = 'f', long = "field", value_parser = parse_assignment, requires = "id")]
        fields: Vec<(String, u64)>,

        /// Every command, with no values and with every field saturated
        #[arg(long, conflicts_with = "id")]
        all: bool,

        /// Emit JSON reports
        #[arg(long)]
        json: bool,
    },

    /// Print the active field table as JSON
    ExportTable,
}

fn main() {
    // Logs go to stderr so stdout stays parseable
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,sqetrace=info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    match run(args) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            tracing::error!("{}", e);
            std::process::exit(1);
        }
    }
}

/// Returns `Ok(false)` when the command ran but found problems
fn run(args: Args) -> Result<bool> {
    let config = match &args.command {
        Commands::Encode { cid: Some(cid), .. } => Config::builder().command_tag(*cid).build(),
        _ => Config::default(),
    };

    let engine = match &args.table {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading field table");
            Engine::open_path(path, config)?
        }
        None => Engine::with_builtin(config)?,
    };

    match args.command {
        Commands::List { class } => {
            list(&engine, class);
            Ok(true)
        }
        Commands::Show { id } => {
            let table = engine.table();
            show(table.require(&id)?);
            Ok(true)
        }
        Commands::Encode {
            id,
            fields,
            nsid,
            qid,
            raw,
            ..
        } => {
            let values: FieldValues = fields.into_iter().collect();
            let built = engine.build(&id, &values, nsid, qid)?;

            if raw {
                let hex: String = built.buffer.as_bytes().iter().map(|b| format!("{:02x}", b)).collect();
                println!("{}", hex);
                return Ok(true);
            }

            println!(
                "{} ({})  opcode 0x{:02x}  {}",
                built.command.name,
                built.command.id,
                built.command.opcode,
                built.command.class.label()
            );
            for (index, word) in (10..).zip(built.words.iter()) {
                println!("  cdw{} = 0x{:08x}", index, word);
            }
            println!();
            println!("{}", built.hex_dump);
            println!();
            println!("{}", built.trace_line);
            Ok(true)
        }
        Commands::Decode { file, json, jobs } => {
            let text = read_input(file)?;
            let results = engine.decode_text(&text, jobs);
            print_decoded(&results, json)?;

            let failed = results.iter().filter(|r| r.outcome.is_err()).count();
            if failed > 0 {
                tracing::info!(lines = results.len(), failed, "decode finished with errors");
            }
            Ok(true)
        }
        Commands::Verify {
            id,
            fields,
            all,
            json,
        } => {
            let reports = match id {
                Some(id) if !all => {
                    let values: FieldValues = fields.into_iter().collect();
                    vec![engine.verify(&id, &values)?]
                }
                _ => engine.verify_all()?,
            };

            if json {
                println!("{}", serde_json::to_string_pretty(&reports)?);
            } else {
                for report in &reports {
                    let status = if report.is_faithful() { "ok  " } else { "FAIL" };
                    println!("{} {}", status, report.command_id);
                    for mismatch in &report.mismatches {
                        println!(
                            "       {}: expected 0x{:x}, decoded {:?}",
                            mismatch.field, mismatch.expected, mismatch.decoded
                        );
                    }
                }
            }

            let failed = reports.iter().filter(|r| !r.is_faithful()).count();
            tracing::info!(checked = reports.len(), failed, "verification finished");
            Ok(failed == 0)
        }
        Commands::ExportTable => {
            println!("{}", engine.table().to_json_pretty()?);
            Ok(true)
        }
    }
}

// =============================================================================
// Output
// =============================================================================

fn list(engine: &Engine, class: Option<CommandClass>) {
    let table = engine.table();
    for command in table.commands() {
        if class.is_some_and(|c| c != command.class) {
            continue;
        }
        println!(
            "0x{:02x}  {:<5}  {:<26} {}",
            command.opcode,
            command.class.label(),
            command.id,
            command.name
        );
    }
}

fn show(command: &CommandDescriptor) {
    println!("{} ({})", command.name, command.id);
    println!("  opcode 0x{:02x}, {} command", command.opcode, command.class.label());
    if !command.description.is_empty() {
        println!("  {}", command.description);
    }

    for field in &command.fields {
        println!(
            "  {:<10} cdw{}{:<8} {}",
            field.name,
            field.word_index,
            field.bit_range(),
            field.description
        );
        for (value, meaning) in &field.value_meanings {
            println!("  {:<10} {:>12}  {}", "", format!("0x{:x}", value), meaning);
        }
    }
}

fn print_decoded(results: &[TraceLineResult], json: bool) -> Result<()> {
    if json {
        let documents: Vec<serde_json::Value> = results
            .iter()
            .map(|result| match &result.outcome {
                Ok(decoded) => serde_json::json!({ "line": result.line_number, "decoded": decoded }),
                Err(e) => serde_json::json!({ "line": result.line_number, "error": e.to_string() }),
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&documents)?);
        return Ok(());
    }

    for result in results {
        match &result.outcome {
            Ok(decoded) => println!("line {}: {}\n", result.line_number, decoded),
            Err(e) => println!("line {}: error: {}\n", result.line_number, e),
        }
    }
    Ok(())
}

// =============================================================================
// Input
// =============================================================================

fn read_input(file: Option<PathBuf>) -> Result<String> {
    match file {
        Some(path) if path.as_os_str() != "-" => Ok(fs::read_to_string(path)?),
        _ => {
            let mut text = String::new();
            io::stdin().read_to_string(&mut text)?;
            Ok(text)
        }
    }
}

/// Decimal or `0x` hex
fn parse_u64(text: &str) -> std::result::Result<u64, String> {
    let text = text.trim();
    let (digits, radix) = match text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        Some(hex) => (hex, 16),
        None => (text, 10),
    };
    if digits.starts_with(['+', '-']) {
        return Err(format!("invalid number '{}': sign not allowed", text));
    }
    u64::from_str_radix(digits, radix).map_err(|e| format!("invalid number '{}': {}", text, e))
}

fn parse_int<T: TryFrom<u64>>(text: &str) -> std::result::Result<T, String> {
    let value = parse_u64(text)?;
    T::try_from(value).map_err(|_| format!("{} is out of range", value))
}

/// `NAME=VALUE`
fn parse_assignment(text: &str) -> std::result::Result<(String, u64), String> {
    let (name, value) = text
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got '{}'", text))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing field name in '{}'", text));
    }
    Ok((name.to_string(), parse_u64(value)?))
}
