//! Submission queue entry buffer
//!
//! A fixed 64-byte command image with little-endian dwords.

use std::fmt;

use bytes::{Buf, BufMut, Bytes};

/// Size of one submission queue entry
pub const SQE_SIZE: usize = 64;

/// First command-specific dword (CDW10)
pub const FIRST_COMMAND_WORD: u8 = 10;

/// Last command-specific dword (CDW15)
pub const LAST_COMMAND_WORD: u8 = 15;

/// Number of command-specific dwords
pub const COMMAND_WORD_COUNT: usize = (LAST_COMMAND_WORD - FIRST_COMMAND_WORD + 1) as usize;

const OPCODE_OFFSET: usize = 0;
const TAG_OFFSET: usize = 2;
const SCOPE_OFFSET: usize = 4;

/// One encoded command
///
/// ```text
/// byte  0      opcode
/// byte  1      flags (always 0 here)
/// bytes 2-3    command identifier (tag), LE
/// bytes 4-7    namespace id (scope), LE
/// bytes 8-39   reserved / pointers, left zero
/// bytes 40-63  CDW10..CDW15, LE
/// ```
///
/// Produced by the encoder and not modified afterwards.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct CommandBuffer {
    bytes: [u8; SQE_SIZE],
}

impl CommandBuffer {
    /// An all-zero entry
    pub fn zeroed() -> Self {
        Self {
            bytes: [0u8; SQE_SIZE],
        }
    }

    /// Wrap raw entry bytes
    pub fn from_bytes(bytes: [u8; SQE_SIZE]) -> Self {
        Self { bytes }
    }

    pub fn as_bytes(&self) -> &[u8; SQE_SIZE] {
        &self.bytes
    }

    /// Copy out as `Bytes`
    pub fn to_bytes(&self) -> Bytes {
        Bytes::copy_from_slice(&self.bytes)
    }

    pub fn opcode(&self) -> u8 {
        self.bytes[OPCODE_OFFSET]
    }

    /// Command identifier from bytes 2-3
    pub fn tag(&self) -> u16 {
        (&self.bytes[TAG_OFFSET..TAG_OFFSET + 2]).get_u16_le()
    }

    /// Namespace id from bytes 4-7
    pub fn scope(&self) -> u32 {
        (&self.bytes[SCOPE_OFFSET..SCOPE_OFFSET + 4]).get_u32_le()
    }

    /// Dword `index` (0..16)
    ///
    /// # Panics
    /// If `index` is 16 or more.
    pub fn word(&self, index: u8) -> u32 {
        let offset = usize::from(index) * 4;
        (&self.bytes[offset..offset + 4]).get_u32_le()
    }

    /// CDW10..CDW15
    pub fn command_words(&self) -> [u32; COMMAND_WORD_COUNT] {
        let mut words = [0u32; COMMAND_WORD_COUNT];
        for (slot, index) in words.iter_mut().zip(FIRST_COMMAND_WORD..=LAST_COMMAND_WORD) {
            *slot = self.word(index);
        }
        words
    }

    pub(crate) fn set_opcode(&mut self, opcode: u8) {
        self.bytes[OPCODE_OFFSET] = opcode;
    }

    pub(crate) fn set_tag(&mut self, tag: u16) {
        (&mut self.bytes[TAG_OFFSET..TAG_OFFSET + 2]).put_u16_le(tag);
    }

    pub(crate) fn set_scope(&mut self, scope: u32) {
        (&mut self.bytes[SCOPE_OFFSET..SCOPE_OFFSET + 4]).put_u32_le(scope);
    }

    pub(crate) fn set_word(&mut self, index: u8, value: u32) {
        let offset = usize::from(index) * 4;
        (&mut self.bytes[offset..offset + 4]).put_u32_le(value);
    }
}

impl Default for CommandBuffer {
    fn default() -> Self {
        Self::zeroed()
    }
}

impl From<[u8; SQE_SIZE]> for CommandBuffer {
    fn from(bytes: [u8; SQE_SIZE]) -> Self {
        Self::from_bytes(bytes)
    }
}

impl AsRef<[u8]> for CommandBuffer {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl fmt::Debug for CommandBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandBuffer")
            .field("opcode", &format_args!("0x{:02x}", self.opcode()))
            .field("tag", &self.tag())
            .field("scope", &format_args!("0x{:08x}", self.scope()))
            .field("cdw10_15", &format_args!("{:08x?}", self.command_words()))
            .finish()
    }
}
