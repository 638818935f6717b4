//! Synthetic trace lines
//!
//! Renders an encoded command as an `nvme_setup_cmd` ftrace event so that
//! built commands and captured traces go through the same parser.

use crate::codec::{CommandBuffer, FIRST_COMMAND_WORD};
use crate::config::Config;
use crate::table::{CommandClass, CommandDescriptor};

/// Renders `nvme_setup_cmd` lines
///
/// ```text
///        nvme-test-0       [000] ....     0.000000: nvme_setup_cmd: nvme0n1: qid=1, cmdid=0,
///        nsid=0x00000001, cdw10=0x00001000, ..., cdw15=0x00000000, opcode=0x02 (Read)
/// ```
/// (one line; wrapped here for width)
#[derive(Debug, Clone)]
pub struct TraceSynthesizer {
    process: String,
    pid: u32,
    cpu: u32,
    timestamp_us: u64,
    device: String,
    io_queue_id: u16,
}

impl TraceSynthesizer {
    pub fn from_config(config: &Config) -> Self {
        Self {
            process: config.process.clone(),
            pid: config.pid,
            cpu: config.cpu,
            timestamp_us: config.timestamp_us,
            device: config.device.clone(),
            io_queue_id: config.io_queue_id.max(1),
        }
    }

    /// Queue a command of `class` is issued on by default
    pub fn queue_for(&self, class: CommandClass) -> u16 {
        match class {
            CommandClass::Admin => 0,
            CommandClass::Io => self.io_queue_id,
        }
    }

    /// Render one trace line for `buffer`
    ///
    /// `queue_id` overrides the class default. Passing a queue id of the
    /// wrong class makes the line decode as the other class's command when
    /// that opcode exists there.
    pub fn synthesize(
        &self,
        command: &CommandDescriptor,
        buffer: &CommandBuffer,
        queue_id: Option<u16>,
    ) -> String {
        let qid = queue_id.unwrap_or_else(|| self.queue_for(command.class));

        let words: Vec<String> = buffer
            .command_words()
            .iter()
            .zip(FIRST_COMMAND_WORD..)
            .map(|(word, index)| format!("cdw{}=0x{:08x}", index, word))
            .collect();

        format!(
            "{:>16}-{:<7} [{:03}] .... {:>5}.{:06}: nvme_setup_cmd: {}: qid={}, cmdid={}, nsid=0x{:08x}, {}, opcode=0x{:02x} ({})",
            self.process,
            self.pid,
            self.cpu,
            self.timestamp_us / 1_000_000,
            self.timestamp_us % 1_000_000,
            self.device,
            qid,
            buffer.tag(),
            buffer.scope(),
            words.join(", "),
            command.opcode,
            command.name
        )
    }
}

impl Default for TraceSynthesizer {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}
