//! Hex dump rendering
//!
//! ```text
//! 0000: 02 00 00 00 01 00 00 00 00 00 00 00 00 00 00 00  |................|
//! 0010: ...
//! ```
//!
//! Output depends only on the bytes; its length depends only on how many
//! bytes there are.

use crate::config::Config;

/// Offset-annotated hex dump formatter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HexFormatter {
    /// Bytes per row (at least 1)
    row_width: usize,

    /// Append `|ascii|` gutter
    ascii: bool,
}

impl HexFormatter {
    pub fn new(row_width: usize, ascii: bool) -> Self {
        Self {
            row_width: row_width.max(1),
            ascii,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.hex_row_width, config.hex_ascii)
    }

    pub fn row_width(&self) -> usize {
        self.row_width
    }

    /// Render `bytes`, one row per line, no trailing newline
    pub fn format(&self, bytes: &[u8]) -> String {
        let mut out = String::with_capacity(self.formatted_len(bytes.len()));

        for (row, chunk) in bytes.chunks(self.row_width).enumerate() {
            if row > 0 {
                out.push('\n');
            }
            self.format_row(&mut out, row * self.row_width, chunk);
        }

        out
    }

    fn format_row(&self, out: &mut String, offset: usize, chunk: &[u8]) {
        out.push_str(&format!("{:04x}:", offset));

        for byte in chunk {
            out.push_str(&format!(" {:02x}", byte));
        }

        if self.ascii {
            // Keep the gutter aligned on a short final row
            for _ in chunk.len()..self.row_width {
                out.push_str("   ");
            }
            out.push_str("  |");
            out.extend(chunk.iter().map(|&b| printable(b)));
            out.push('|');
        }
    }

    /// Exact length of `format` output for a buffer of `len` bytes
    pub fn formatted_len(&self, len: usize) -> usize {
        let rows = len.div_ceil(self.row_width);
        let mut total = rows.saturating_sub(1); // newlines

        for row in 0..rows {
            let offset = row * self.row_width;
            let in_row = (len - offset).min(self.row_width);
            total += offset_digits(offset) + 1 + 3 * in_row;
            if self.ascii {
                total += 3 * (self.row_width - in_row) + 3 + in_row + 1;
            }
        }

        total
    }
}

impl Default for HexFormatter {
    fn default() -> Self {
        Self::new(16, true)
    }
}

/// Render with the default layout (16 bytes per row, ASCII gutter)
pub fn format(bytes: &[u8]) -> String {
    HexFormatter::default().format(bytes)
}

fn printable(byte: u8) -> char {
    if (0x20..=0x7e).contains(&byte) {
        char::from(byte)
    } else {
        '.'
    }
}

/// Width of `{:04x}` for `offset`
fn offset_digits(offset: usize) -> usize {
    let mut digits = 1;
    let mut rest = offset >> 4;
    while rest > 0 {
        digits += 1;
        rest >>= 4;
    }
    digits.max(4)
}
