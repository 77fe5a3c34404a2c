#![forbid(unsafe_code)]

//! Minimal Intel HEX encoder.
//!
//! EPROM programmers accept images as a sequence of checksummed ASCII records. This crate only
//! produces the subset needed for flat images: type `00` data records carrying up to 16 bytes each,
//! followed by the `:00000001FF` end-of-file record. Images larger than 64 KiB get type `04`
//! extended linear address records at each 64 KiB boundary so every byte stays addressable; images
//! that fit in 16 bits never see one.
//!
//! Like `tcgen-pattern`, the API is pure: [`encode`] returns the complete text and [`write_to`]
//! streams the same bytes into any [`std::io::Write`].

use std::fmt;
use std::io;

/// Maximum number of data bytes carried by one data record.
pub const DATA_BYTES_PER_RECORD: usize = 16;

/// The fixed end-of-file record (without line terminator).
pub const EOF_RECORD: &str = ":00000001FF";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordType {
    Data,
    EndOfFile,
    ExtendedLinearAddress,
}

impl RecordType {
    pub fn code(self) -> u8 {
        match self {
            RecordType::Data => 0x00,
            RecordType::EndOfFile => 0x01,
            RecordType::ExtendedLinearAddress => 0x04,
        }
    }
}

/// One Intel HEX record.
///
/// Records are built on the fly by [`Records`] and formatted immediately; the payload is stored
/// inline so a record never borrows the source buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HexRecord {
    kind: RecordType,
    address: u16,
    len: u8,
    data: [u8; DATA_BYTES_PER_RECORD],
}

impl HexRecord {
    /// Build a data record. `data` must be at most [`DATA_BYTES_PER_RECORD`] bytes; anything past
    /// that is not representable in one record and is ignored.
    pub fn data(address: u16, data: &[u8]) -> Self {
        let len = data.len().min(DATA_BYTES_PER_RECORD);
        let mut payload = [0u8; DATA_BYTES_PER_RECORD];
        payload[..len].copy_from_slice(&data[..len]);
        Self {
            kind: RecordType::Data,
            address,
            len: len as u8,
            data: payload,
        }
    }

    pub fn end_of_file() -> Self {
        Self {
            kind: RecordType::EndOfFile,
            address: 0,
            len: 0,
            data: [0u8; DATA_BYTES_PER_RECORD],
        }
    }

    /// Upper 16 bits of the linear address applied to subsequent data records.
    pub fn extended_linear_address(upper: u16) -> Self {
        let mut data = [0u8; DATA_BYTES_PER_RECORD];
        data[..2].copy_from_slice(&upper.to_be_bytes());
        Self {
            kind: RecordType::ExtendedLinearAddress,
            address: 0,
            len: 2,
            data,
        }
    }

    pub fn kind(&self) -> RecordType {
        self.kind
    }

    pub fn address(&self) -> u16 {
        self.address
    }

    pub fn payload(&self) -> &[u8] {
        &self.data[..usize::from(self.len)]
    }

    /// Two's complement of the 8-bit sum of length, address bytes, record type and payload.
    pub fn checksum(&self) -> u8 {
        let [addr_hi, addr_lo] = self.address.to_be_bytes();
        let header = self
            .len
            .wrapping_add(addr_hi)
            .wrapping_add(addr_lo)
            .wrapping_add(self.kind.code());
        self.payload()
            .iter()
            .fold(header, |acc, &b| acc.wrapping_add(b))
            .wrapping_neg()
    }
}

impl fmt::Display for HexRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            ":{:02X}{:04X}{:02X}",
            self.len,
            self.address,
            self.kind.code()
        )?;
        for b in self.payload() {
            write!(f, "{b:02X}")?;
        }
        write!(f, "{:02X}", self.checksum())
    }
}

/// Iterator over the records encoding a buffer, ending with the EOF record.
#[derive(Debug, Clone)]
pub struct Records<'a> {
    buf: &'a [u8],
    offset: usize,
    upper: u16,
    done: bool,
}

impl<'a> Records<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self {
            buf,
            offset: 0,
            upper: 0,
            done: false,
        }
    }
}

impl Iterator for Records<'_> {
    type Item = HexRecord;

    fn next(&mut self) -> Option<HexRecord> {
        if self.done {
            return None;
        }
        if self.offset >= self.buf.len() {
            self.done = true;
            return Some(HexRecord::end_of_file());
        }

        // Chunks start on 16-byte boundaries, so a chunk never straddles a 64 KiB segment.
        let upper = ((self.offset >> 16) & 0xFFFF) as u16;
        if upper != self.upper {
            self.upper = upper;
            return Some(HexRecord::extended_linear_address(upper));
        }

        let end = (self.offset + DATA_BYTES_PER_RECORD).min(self.buf.len());
        let record = HexRecord::data((self.offset & 0xFFFF) as u16, &self.buf[self.offset..end]);
        self.offset = end;
        Some(record)
    }
}

/// Iterate the records encoding `buf`, starting at address 0.
pub fn records(buf: &[u8]) -> Records<'_> {
    Records::new(buf)
}

/// Encode `buf` as Intel HEX text, one `\n`-terminated record per line.
pub fn encode(buf: &[u8]) -> String {
    // 16 data bytes become 32 hex digits plus 11 characters of framing and a newline.
    let lines = buf.len().div_ceil(DATA_BYTES_PER_RECORD) + 1;
    let mut out = String::with_capacity(lines * 44);
    for record in records(buf) {
        out.push_str(&record.to_string());
        out.push('\n');
    }
    out
}

/// Stream the Intel HEX encoding of `buf` into `w`.
pub fn write_to<W: io::Write>(buf: &[u8], mut w: W) -> io::Result<()> {
    for record in records(buf) {
        writeln!(w, "{record}")?;
    }
    w.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_buffer_is_only_eof() {
        assert_eq!(encode(&[]), ":00000001FF\n");
    }

    #[test]
    fn eof_record_matches_constant() {
        assert_eq!(HexRecord::end_of_file().to_string(), EOF_RECORD);
        assert_eq!(HexRecord::end_of_file().checksum(), 0xFF);
    }

    #[test]
    fn sixteen_ascending_bytes() {
        let data: Vec<u8> = (0u8..16).collect();
        // 0x10 + (0 + 1 + ... + 15) = 0x88; 0x100 - 0x88 = 0x78.
        assert_eq!(
            encode(&data),
            ":10000000000102030405060708090A0B0C0D0E0F78\n:00000001FF\n"
        );
    }

    #[test]
    fn trailing_partial_record() {
        let data = [0xF0u8; 18];
        let text = encode(&data);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with(":10000000F0F0"));
        // 0x02 + 0x00 + 0x10 + 0xF0 + 0xF0 = 0x1F2 -> 0xF2 -> checksum 0x0E.
        assert_eq!(lines[1], ":02001000F0F00E");
        assert_eq!(lines[2], EOF_RECORD);
    }

    #[test]
    fn address_bytes_enter_checksum() {
        let record = HexRecord::data(0x1FF0, &[0xFF]);
        // 0x01 + 0x1F + 0xF0 + 0xFF = 0x20F -> 0x0F -> checksum 0xF1.
        assert_eq!(record.checksum(), 0xF1);
        assert_eq!(record.to_string(), ":011FF000FFF1");
    }

    #[test]
    fn uses_uppercase_hex() {
        let text = encode(&[0xab, 0xcd, 0xef]);
        assert!(!text.chars().any(|c| c.is_ascii_lowercase()), "{text}");
    }

    #[test]
    fn extended_linear_address_inserted_past_64k() {
        let data = vec![0u8; 0x1_0010];
        let recs: Vec<HexRecord> = records(&data).collect();
        // 4096 data records, one ELA record, one more data record, EOF.
        assert_eq!(recs.len(), 4096 + 1 + 1 + 1);
        assert_eq!(recs[4096].kind(), RecordType::ExtendedLinearAddress);
        assert_eq!(recs[4096].to_string(), ":020000040001F9");
        assert_eq!(recs[4097].address(), 0x0000);
        assert_eq!(recs[4098].kind(), RecordType::EndOfFile);
    }

    #[test]
    fn write_to_matches_encode() {
        let data: Vec<u8> = (0..100u8).map(|b| b.wrapping_mul(37)).collect();
        let mut out = Vec::new();
        write_to(&data, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), encode(&data));
    }
}
