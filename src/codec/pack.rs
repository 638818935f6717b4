//! Generic field packing
//!
//! One routine for every command, driven by the field descriptors.

use std::collections::BTreeMap;

use super::buffer::{CommandBuffer, COMMAND_WORD_COUNT, FIRST_COMMAND_WORD, SQE_SIZE};
use crate::table::{CommandDescriptor, FieldDescriptor};

/// Field name -> raw value
///
/// Inputs are `u64` so that out-of-range values (including `2^32` for a
/// 32-bit field) can be expressed and then masked.
pub type FieldValues = BTreeMap<String, u64>;

/// Largest value a field can hold: `2^width - 1`
pub fn max_value(field: &FieldDescriptor) -> u32 {
    field.max_value()
}

/// Truncate a value to the field's width, as a hardware register would
pub fn mask_value(field: &FieldDescriptor, value: u64) -> u32 {
    (value & u64::from(field.max_value())) as u32
}

/// Masked view of `values` over every field of `command`
///
/// Missing fields become 0; names the command does not have are dropped.
pub fn mask_values(command: &CommandDescriptor, values: &FieldValues) -> FieldValues {
    command
        .fields
        .iter()
        .map(|field| {
            let raw = values.get(&field.name).copied().unwrap_or(0);
            (field.name.clone(), u64::from(mask_value(field, raw)))
        })
        .collect()
}

/// Encode with command identifier 0
pub fn encode(command: &CommandDescriptor, values: &FieldValues, scope: u32) -> CommandBuffer {
    encode_tagged(command, values, scope, 0)
}

/// Encode field values into a fresh 64-byte entry
///
/// Never fails: oversized values are masked to their field width and
/// unknown names are ignored.
pub fn encode_tagged(
    command: &CommandDescriptor,
    values: &FieldValues,
    scope: u32,
    tag: u16,
) -> CommandBuffer {
    let mut buffer = CommandBuffer::zeroed();
    buffer.set_opcode(command.opcode);
    buffer.set_tag(tag);
    buffer.set_scope(scope);

    for field in &command.fields {
        let value = values.get(&field.name).copied().unwrap_or(0);
        pack_field(&mut buffer, field, value);
    }

    buffer
}

/// Read-modify-write of the field's word, so fields sharing a word accumulate
fn pack_field(buffer: &mut CommandBuffer, field: &FieldDescriptor, value: u64) {
    if !word_in_entry(field.word_index) {
        tracing::warn!(field = %field.name, word = field.word_index, "field outside the entry, skipped");
        return;
    }

    let mask = field.mask();
    let shifted = mask_value(field, value)
        .checked_shl(u32::from(field.bit_start))
        .unwrap_or(0);

    let word = buffer.word(field.word_index);
    let packed = (word & !mask) | (shifted & mask);
    buffer.set_word(field.word_index, packed);

    tracing::trace!(
        field = %field.name,
        word = field.word_index,
        value,
        packed,
        "packed field"
    );
}

/// Pull one field out of its word
pub fn extract(field: &FieldDescriptor, word: u32) -> u32 {
    word.checked_shr(u32::from(field.bit_start)).unwrap_or(0) & field.max_value()
}

/// Decode every field of `command` from an entry
///
/// Reads each field from the dword it names, so any word [`encode`] wrote
/// comes back; fields past the end of the entry decode as 0.
pub fn decode(command: &CommandDescriptor, buffer: &CommandBuffer) -> FieldValues {
    command
        .fields
        .iter()
        .map(|field| {
            let word = if word_in_entry(field.word_index) {
                buffer.word(field.word_index)
            } else {
                0
            };
            (field.name.clone(), u64::from(extract(field, word)))
        })
        .collect()
}

/// Decode every field of `command` from CDW10..CDW15 alone
pub fn decode_words(command: &CommandDescriptor, words: &[u32; COMMAND_WORD_COUNT]) -> FieldValues {
    unpack_words(command, words)
        .into_iter()
        .map(|(field, value)| (field.name.clone(), u64::from(value)))
        .collect()
}

/// Decode fields from CDW10..CDW15, in table order
pub fn unpack_words<'a>(
    command: &'a CommandDescriptor,
    words: &[u32; COMMAND_WORD_COUNT],
) -> Vec<(&'a FieldDescriptor, u32)> {
    command
        .fields
        .iter()
        .map(|field| {
            let word = word_slot(field.word_index)
                .map(|slot| words[slot])
                .unwrap_or(0);
            (field, extract(field, word))
        })
        .collect()
}

/// Only the command-specific dwords of an encoding, CDW10 first
pub fn encode_words(command: &CommandDescriptor, values: &FieldValues) -> [u32; COMMAND_WORD_COUNT] {
    encode(command, values, 0).command_words()
}

/// Whether a dword lies inside the 64-byte entry
fn word_in_entry(word_index: u8) -> bool {
    usize::from(word_index) * 4 + 4 <= SQE_SIZE
}

/// Position of a dword inside the CDW10..CDW15 array
fn word_slot(word_index: u8) -> Option<usize> {
    word_index
        .checked_sub(FIRST_COMMAND_WORD)
        .map(usize::from)
        .filter(|&slot| slot < COMMAND_WORD_COUNT)
}
