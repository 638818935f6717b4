//! Configuration for sqetrace
//!
//! Centralized configuration with sensible defaults.

/// Main configuration for the codec, hex dump and trace synthesis
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Submission Entry Configuration
    // -------------------------------------------------------------------------
    /// Namespace id written to bytes 4-7 when the caller gives none
    pub default_scope: u32,

    /// Command identifier written to bytes 2-3
    pub command_tag: u16,

    // -------------------------------------------------------------------------
    // Queue Configuration
    // -------------------------------------------------------------------------
    /// Queue id emitted for I/O commands (non-zero; 0 is the admin queue)
    pub io_queue_id: u16,

    // -------------------------------------------------------------------------
    // Synthetic ftrace Header
    // -------------------------------------------------------------------------
    /// Block device name after the event name
    pub device: String,

    /// Task name at the start of the line
    pub process: String,

    /// Task pid
    pub pid: u32,

    /// CPU shown in brackets
    pub cpu: u32,

    /// Event timestamp (microseconds)
    pub timestamp_us: u64,

    // -------------------------------------------------------------------------
    // Hex Dump Configuration
    // -------------------------------------------------------------------------
    /// Bytes per hex dump row
    pub hex_row_width: usize,

    /// Append the `|ascii|` gutter to each row
    pub hex_ascii: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_scope: 0,
            command_tag: 0,
            io_queue_id: 1,
            device: "nvme0n1".to_string(),
            process: "nvme-test".to_string(),
            pid: 0,
            cpu: 0,
            timestamp_us: 0,
            hex_row_width: 16,
            hex_ascii: true,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the namespace id used when none is supplied
    pub fn default_scope(mut self, scope: u32) -> Self {
        self.config.default_scope = scope;
        self
    }

    /// Set the command identifier (CID)
    pub fn command_tag(mut self, tag: u16) -> Self {
        self.config.command_tag = tag;
        self
    }

    /// Set the queue id used for I/O commands (minimum 1)
    pub fn io_queue_id(mut self, qid: u16) -> Self {
        self.config.io_queue_id = qid.max(1);
        self
    }

    /// Set the device name shown in synthetic trace lines
    pub fn device(mut self, device: impl Into<String>) -> Self {
        self.config.device = device.into();
        self
    }

    /// Set the task name shown in synthetic trace lines
    pub fn process(mut self, process: impl Into<String>) -> Self {
        self.config.process = process.into();
        self
    }

    /// Set the task pid
    pub fn pid(mut self, pid: u32) -> Self {
        self.config.pid = pid;
        self
    }

    /// Set the CPU number
    pub fn cpu(mut self, cpu: u32) -> Self {
        self.config.cpu = cpu;
        self
    }

    /// Set the event timestamp (in microseconds)
    pub fn timestamp_us(mut self, us: u64) -> Self {
        self.config.timestamp_us = us;
        self
    }

    /// Set the number of bytes per hex dump row (minimum 1)
    pub fn hex_row_width(mut self, width: usize) -> Self {
        self.config.hex_row_width = width.max(1);
        self
    }

    /// Enable or disable the ASCII gutter
    pub fn hex_ascii(mut self, enabled: bool) -> Self {
        self.config.hex_ascii = enabled;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
