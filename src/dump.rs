//! Hex/ASCII dump shown in place of the report when validation fails.

use core::fmt;

/// Bytes dumped unless [`HexDump::limit`] says otherwise.
pub const DEFAULT_DUMP_LIMIT: usize = 4000;

const BYTES_PER_LINE: usize = 16;

/// Renders `offset: XX XX ..  ascii` lines, 16 bytes each.
///
/// ```
/// let dump = bmpinfo::HexDump::new(b"BM\x00\x01");
/// assert_eq!(
///     dump.to_string(),
///     format!("00000000: 42 4D 00 01{:36}  BM..\n", ""),
/// );
/// ```
#[derive(Clone, Copy, Debug)]
pub struct HexDump<'a> {
    data: &'a [u8],
    limit: usize,
}

impl<'a> HexDump<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            limit: DEFAULT_DUMP_LIMIT,
        }
    }

    /// Dump at most `limit` bytes from the start of the buffer.
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }
}

fn printable(byte: u8) -> char {
    if (32..127).contains(&byte) {
        char::from(byte)
    } else {
        '.'
    }
}

impl fmt::Display for HexDump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let shown = &self.data[..self.data.len().min(self.limit)];
        for (line, chunk) in shown.chunks(BYTES_PER_LINE).enumerate() {
            write!(f, "{:08x}:", line * BYTES_PER_LINE)?;
            for byte in chunk {
                write!(f, " {byte:02X}")?;
            }
            let pad = (BYTES_PER_LINE - chunk.len()) * 3;
            write!(f, "{:pad$}  ", "")?;
            for &byte in chunk {
                fmt::Write::write_char(f, printable(byte))?;
            }
            f.write_str("\n")?;
        }
        Ok(())
    }
}
