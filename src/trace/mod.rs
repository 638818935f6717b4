//! Trace Module
//!
//! Text side of the codec: synthesizes ftrace-style lines from encoded
//! commands and decodes captured or synthetic lines back into fields.
//!
//! ## Line Format
//! ```text
//! <process>-<pid> [<cpu>] <flags> <ts>: nvme_setup_cmd: <dev>: qid=1, cmdid=0, nsid=1,
//!     cdw10=0x..., cdw11=0x..., ..., cdw15=0x..., opcode=0x02
//! ```
//!
//! ## Tokens Read
//! - `qid`    queue id; 0 selects Admin, anything else I/O (optional)
//! - `opcode` hex, `0x` optional (required)
//! - `cmdid`  command identifier (optional)
//! - `nsid`   namespace id (optional, default 0)
//! - `cdw10`..`cdw15` hex words (optional, default 0)
//!
//! Anything else on the line is ignored.

mod batch;
mod decoded;
mod parser;
mod scanner;
mod synth;

pub use batch::{decode_parallel, MIN_PARALLEL_LINES};
pub use decoded::{DecodeWarning, DecodedCommand, DecodedField, EventKind, TraceEvent};
pub use parser::{TraceLineResult, TraceParser};
pub use synth::TraceSynthesizer;
