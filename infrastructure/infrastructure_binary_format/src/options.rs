//! Wire Options
//!
//! Byte order, text framing and character set choices for raw values.

use entities_numeric::{keys, NumericError, Result};
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

/// Lowercase and drop `-`/`_` so that `UTF-8`, `utf_8` and `Utf8` agree.
fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| *c != '-' && *c != '_')
        .collect::<String>()
        .to_ascii_lowercase()
}

/// Byte order of fixed-width numeric payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ByteOrder {
    /// Least significant byte first
    Lsb,
    /// Most significant byte first (network order)
    #[default]
    Msb,
}

impl FromStr for ByteOrder {
    type Err = NumericError;

    fn from_str(s: &str) -> Result<Self> {
        match normalize(s).as_str() {
            "lsb" => Ok(ByteOrder::Lsb),
            "msb" => Ok(ByteOrder::Msb),
            _ => Err(NumericError::invalid(keys::UNKNOWN_BYTE_ORDER, s)),
        }
    }
}

impl fmt::Display for ByteOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ByteOrder::Lsb => "LSB",
            ByteOrder::Msb => "MSB",
        })
    }
}

/// How the length of a text payload is conveyed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StringLength {
    /// Exactly `fixed_length` bytes, zero padded or truncated
    Fixed,
    /// Terminated by a single 0x00 byte
    Eos,
    /// One-byte length prefix, at most 255 bytes
    Prefix1,
    /// Two-byte length prefix in the chosen byte order, at most 65535 bytes
    Prefix2,
    /// Four-byte length prefix in the chosen byte order
    #[default]
    Prefix4,
}

impl StringLength {
    /// Largest payload the discipline can frame, if bounded by a prefix.
    pub fn max_length(self) -> Option<usize> {
        match self {
            StringLength::Prefix1 => Some(u8::MAX as usize),
            StringLength::Prefix2 => Some(u16::MAX as usize),
            StringLength::Prefix4 => Some(u32::MAX as usize),
            StringLength::Fixed | StringLength::Eos => None,
        }
    }
}

impl FromStr for StringLength {
    type Err = NumericError;

    fn from_str(s: &str) -> Result<Self> {
        match normalize(s).as_str() {
            "fixed" => Ok(StringLength::Fixed),
            "eos" => Ok(StringLength::Eos),
            "prefix1" => Ok(StringLength::Prefix1),
            "prefix2" => Ok(StringLength::Prefix2),
            "prefix4" => Ok(StringLength::Prefix4),
            _ => Err(NumericError::invalid(keys::UNKNOWN_STRING_LENGTH, s)),
        }
    }
}

impl fmt::Display for StringLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            StringLength::Fixed => "FIXED",
            StringLength::Eos => "EOS",
            StringLength::Prefix1 => "PREFIX1",
            StringLength::Prefix2 => "PREFIX2",
            StringLength::Prefix4 => "PREFIX4",
        })
    }
}

/// Character set used to turn text into bytes.
///
/// Characters the set cannot represent are written as `?`; bytes that do
/// not decode are read as U+FFFD.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Charset {
    Ascii,
    Latin1,
    #[default]
    Utf8,
    Utf16Be,
    Utf16Le,
}

impl Charset {
    /// Encode text into bytes.
    pub fn encode<'a>(&self, text: &'a str) -> Cow<'a, [u8]> {
        match self {
            Charset::Utf8 => Cow::Borrowed(text.as_bytes()),
            Charset::Ascii => Cow::Owned(
                text.chars()
                    .map(|c| if c.is_ascii() { c as u8 } else { b'?' })
                    .collect(),
            ),
            Charset::Latin1 => Cow::Owned(
                text.chars()
                    .map(|c| u8::try_from(u32::from(c)).unwrap_or(b'?'))
                    .collect(),
            ),
            Charset::Utf16Be => Cow::Owned(
                text.encode_utf16().flat_map(u16::to_be_bytes).collect(),
            ),
            Charset::Utf16Le => Cow::Owned(
                text.encode_utf16().flat_map(u16::to_le_bytes).collect(),
            ),
        }
    }

    /// Decode bytes into text, replacing anything undecodable.
    pub fn decode(&self, bytes: &[u8]) -> String {
        match self {
            Charset::Utf8 => String::from_utf8_lossy(bytes).into_owned(),
            Charset::Ascii => bytes
                .iter()
                .map(|b| if b.is_ascii() { char::from(*b) } else { char::REPLACEMENT_CHARACTER })
                .collect(),
            Charset::Latin1 => bytes.iter().map(|b| char::from(*b)).collect(),
            Charset::Utf16Be => decode_utf16(bytes, u16::from_be_bytes),
            Charset::Utf16Le => decode_utf16(bytes, u16::from_le_bytes),
        }
    }
}

/// Pairs of bytes to UTF-16 units; an odd trailing zero byte is padding.
fn decode_utf16(bytes: &[u8], unit: fn([u8; 2]) -> u16) -> String {
    let pairs = bytes.chunks_exact(2);
    let dangling = pairs.remainder().first().is_some_and(|b| *b != 0);
    let units = pairs.map(|pair| unit([pair[0], pair[1]]));
    let mut text: String = char::decode_utf16(units)
        .map(|r| r.unwrap_or(char::REPLACEMENT_CHARACTER))
        .collect();
    if dangling {
        text.push(char::REPLACEMENT_CHARACTER);
    }
    text
}

impl FromStr for Charset {
    type Err = NumericError;

    fn from_str(s: &str) -> Result<Self> {
        match normalize(s).as_str() {
            "ascii" | "usascii" => Ok(Charset::Ascii),
            "latin1" | "iso88591" => Ok(Charset::Latin1),
            "utf8" => Ok(Charset::Utf8),
            "utf16" | "utf16be" => Ok(Charset::Utf16Be),
            "utf16le" => Ok(Charset::Utf16Le),
            _ => Err(NumericError::invalid(keys::UNKNOWN_CHARSET, s)),
        }
    }
}

impl fmt::Display for Charset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Charset::Ascii => "US-ASCII",
            Charset::Latin1 => "ISO-8859-1",
            Charset::Utf8 => "UTF-8",
            Charset::Utf16Be => "UTF-16BE",
            Charset::Utf16Le => "UTF-16LE",
        })
    }
}

/// Everything a raw read or write needs besides the value itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WireOptions {
    pub charset: Charset,
    pub byte_order: ByteOrder,
    pub string_length: StringLength,
    /// Payload width for [`StringLength::Fixed`]; ignored otherwise
    pub fixed_length: usize,
}

impl WireOptions {
    /// The options tagged mode uses: MSB order, four-byte text prefixes.
    pub fn tagged(charset: Charset) -> Self {
        Self {
            charset,
            byte_order: ByteOrder::Msb,
            string_length: StringLength::Prefix4,
            fixed_length: 0,
        }
    }

    pub fn with_byte_order(mut self, byte_order: ByteOrder) -> Self {
        self.byte_order = byte_order;
        self
    }

    pub fn with_string_length(mut self, string_length: StringLength) -> Self {
        self.string_length = string_length;
        self
    }

    pub fn with_fixed_length(mut self, fixed_length: usize) -> Self {
        self.string_length = StringLength::Fixed;
        self.fixed_length = fixed_length;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_byte_order() {
        assert_eq!("lsb".parse::<ByteOrder>().unwrap(), ByteOrder::Lsb);
        assert_eq!("MSB".parse::<ByteOrder>().unwrap(), ByteOrder::Msb);
        let err = "middle".parse::<ByteOrder>().unwrap_err();
        assert_eq!(err.key(), keys::UNKNOWN_BYTE_ORDER);
    }

    #[test]
    fn test_parse_string_length() {
        assert_eq!("Prefix2".parse::<StringLength>().unwrap(), StringLength::Prefix2);
        assert_eq!("eos".parse::<StringLength>().unwrap(), StringLength::Eos);
        let err = "prefix3".parse::<StringLength>().unwrap_err();
        assert_eq!(err.key(), keys::UNKNOWN_STRING_LENGTH);
    }

    #[test]
    fn test_parse_charset() {
        assert_eq!("UTF-8".parse::<Charset>().unwrap(), Charset::Utf8);
        assert_eq!("iso-8859-1".parse::<Charset>().unwrap(), Charset::Latin1);
        assert_eq!("UTF-16LE".parse::<Charset>().unwrap(), Charset::Utf16Le);
        assert_eq!("US-ASCII".parse::<Charset>().unwrap(), Charset::Ascii);
        assert_eq!("ebcdic".parse::<Charset>().unwrap_err().key(), keys::UNKNOWN_CHARSET);
    }

    #[test]
    fn test_unmappable_characters() {
        assert_eq!(Charset::Ascii.encode("café").as_ref(), b"caf?");
        assert_eq!(Charset::Latin1.encode("café").as_ref(), &[b'c', b'a', b'f', 0xE9]);
        assert_eq!(Charset::Latin1.encode("€").as_ref(), b"?");
    }

    #[test]
    fn test_utf16() {
        assert_eq!(Charset::Utf16Be.encode("A").as_ref(), &[0x00, 0x41]);
        assert_eq!(Charset::Utf16Le.encode("A").as_ref(), &[0x41, 0x00]);
        assert_eq!(Charset::Utf16Le.decode(&[0x41, 0x00, 0x00]), "A");
        assert_eq!(Charset::Utf16Be.decode(&[0x00, 0x41, 0x42]), "A\u{FFFD}");
        let smile = "\u{1F600}";
        assert_eq!(Charset::Utf16Be.decode(&Charset::Utf16Be.encode(smile)), smile);
    }

    #[test]
    fn test_lossy_decode() {
        assert_eq!(Charset::Utf8.decode(&[0x66, 0xFF]), "f\u{FFFD}");
        assert_eq!(Charset::Ascii.decode(&[0x66, 0xE9]), "f\u{FFFD}");
        assert_eq!(Charset::Latin1.decode(&[0xE9]), "é");
    }

    #[test]
    fn test_tagged_defaults() {
        let options = WireOptions::tagged(Charset::Latin1);
        assert_eq!(options.byte_order, ByteOrder::Msb);
        assert_eq!(options.string_length, StringLength::Prefix4);
        let fixed = options.with_fixed_length(8);
        assert_eq!(fixed.string_length, StringLength::Fixed);
        assert_eq!(fixed.fixed_length, 8);
    }
}
