//! BCD Codec Module
//!
//! Provides packed decimal encoding/decoding of plain decimal text,
//! [`BigDecimal`] and [`BigInteger`] values.
//!
//! ## Examples
//!
//! ```rust
//! use infrastructure_bcd_encoding::BcdCodec;
//!
//! let bytes = BcdCodec::encode("-123.45").unwrap();
//! assert_eq!(bytes, vec![0x03, 0x12, 0x34, 0x5D]);
//! assert_eq!(BcdCodec::decode(&bytes).unwrap(), "-123.45");
//! ```

use crate::common::{has_terminator, is_digit, nibbles, SIGN_NEGATIVE, SIGN_POSITIVE};
use entities_numeric::{keys, BigDecimal, BigInteger, NumericError, Result};
use std::io::Read;

/// BCD codec
pub struct BcdCodec;

impl BcdCodec {
    /// Encode plain decimal text: `[+-]digits[.digits]`.
    ///
    /// Leading integer zeros are dropped, and zeros between the point and
    /// the first significant fractional digit are folded into a negative
    /// scale. Trailing fractional zeros are kept. Zero of either sign is
    /// just a scale byte and a positive sign nibble: `0` is `[0x00, 0xC0]`
    /// and `0.000` is `[0xFD, 0xC0]`.
    ///
    /// # Errors
    /// `InvalidArgument` for malformed text, or when the integer digit count
    /// (or the run of leading fractional zeros) does not fit the signed
    /// scale byte.
    pub fn encode(text: &str) -> Result<Vec<u8>> {
        let (negative, body) = match text.as_bytes().first() {
            Some(b'-') => (true, &text[1..]),
            Some(b'+') => (false, &text[1..]),
            _ => (false, text),
        };
        let (int_part, frac_part) = body.split_once('.').unwrap_or((body, ""));
        if int_part.is_empty() && frac_part.is_empty() {
            return Err(NumericError::invalid(
                keys::BAD_NUMBER,
                format!("{:?} has no digits", text),
            ));
        }
        if !int_part.bytes().chain(frac_part.bytes()).all(|b| b.is_ascii_digit()) {
            return Err(NumericError::invalid(
                keys::BAD_NUMBER,
                format!("{:?} is not a plain decimal number", text),
            ));
        }

        let int_digits = int_part.trim_start_matches('0');
        let (scale, frac_digits) = if int_digits.is_empty() {
            let significant = frac_part.trim_start_matches('0');
            (-((frac_part.len() - significant.len()) as i64), significant)
        } else {
            (int_digits.len() as i64, frac_part)
        };
        let zero = int_digits.is_empty() && frac_digits.is_empty();
        let scale = i8::try_from(scale).map_err(|_| {
            NumericError::invalid(
                keys::OUT_OF_RANGE,
                format!("BCD scale {} of {:?} does not fit in a signed byte", scale, text),
            )
        })?;

        if zero {
            return Ok(vec![scale as u8, SIGN_POSITIVE << 4]);
        }

        let sign = if negative { SIGN_NEGATIVE } else { SIGN_POSITIVE };
        let stream: Vec<u8> = int_digits
            .bytes()
            .chain(frac_digits.bytes())
            .map(|b| b - b'0')
            .chain(std::iter::once(sign))
            .collect();

        let mut bytes = Vec::with_capacity(1 + (stream.len() + 1) / 2);
        bytes.push(scale as u8);
        for pair in stream.chunks(2) {
            let low = pair.get(1).copied().unwrap_or(0);
            bytes.push((pair[0] << 4) | low);
        }
        Ok(bytes)
    }

    /// Decode a BCD sequence into canonical decimal text.
    ///
    /// The scan stops at the first nibble above 9; bytes after it are
    /// ignored. A scale larger than the digit count pads the integer part
    /// with zeros. `-` is only emitted for a nonzero value and `+` never is.
    ///
    /// # Errors
    /// `InvalidArgument` when `bytes` is empty or runs out before a sign
    /// nibble.
    pub fn decode(bytes: &[u8]) -> Result<String> {
        let (&scale_byte, body) = bytes
            .split_first()
            .ok_or_else(|| NumericError::invalid(keys::BAD_BCD, "empty BCD sequence"))?;
        let scale = scale_byte as i8 as i64;

        let mut digits = String::with_capacity(body.len() * 2);
        let mut negative = None;
        'scan: for &byte in body {
            for nibble in nibbles(byte) {
                if !is_digit(nibble) {
                    negative = Some(nibble == SIGN_NEGATIVE);
                    break 'scan;
                }
                digits.push(char::from(b'0' + nibble));
            }
        }
        let negative = negative.ok_or_else(|| {
            NumericError::invalid(
                keys::BAD_BCD,
                format!("no sign nibble in {} bytes", bytes.len()),
            )
        })?;
        Ok(render(&digits, scale, negative))
    }

    /// Encode a decimal through its plain text form.
    pub fn encode_decimal(value: &BigDecimal) -> Result<Vec<u8>> {
        Self::encode(&value.to_plain_string())
    }

    /// Encode an integer through its decimal text form.
    pub fn encode_integer(value: &BigInteger) -> Result<Vec<u8>> {
        Self::encode(&value.to_string())
    }

    /// Decode a BCD sequence into a decimal.
    pub fn decode_decimal(bytes: &[u8]) -> Result<BigDecimal> {
        Self::decode(bytes)?.parse()
    }

    /// Decode a BCD sequence into an integer.
    ///
    /// # Errors
    /// `InvalidArgument` when the payload has a fractional part.
    pub fn decode_integer(bytes: &[u8]) -> Result<BigInteger> {
        let text = Self::decode(bytes)?;
        if text.contains('.') {
            return Err(NumericError::invalid(
                keys::BAD_BCD,
                format!("{} is not an integer", text),
            ));
        }
        text.parse()
    }

    /// Read one self-terminating BCD sequence from `reader`: the scale byte,
    /// then bytes up to and including the one holding the sign nibble.
    ///
    /// # Errors
    /// `EndOfStream` when the reader runs dry first; `Io` for any other
    /// read failure.
    pub fn read_bcd_bytes<R: Read>(reader: &mut R) -> Result<Vec<u8>> {
        let mut byte = [0u8; 1];
        reader
            .read_exact(&mut byte)
            .map_err(|e| NumericError::from_read(e, "BCD scale"))?;
        let mut bytes = vec![byte[0]];
        loop {
            reader
                .read_exact(&mut byte)
                .map_err(|e| NumericError::from_read(e, "BCD digits"))?;
            bytes.push(byte[0]);
            if has_terminator(byte[0]) {
                return Ok(bytes);
            }
        }
    }
}

/// Place the decimal point into a digit run.
fn render(digits: &str, scale: i64, negative: bool) -> String {
    let mut text = String::with_capacity(digits.len() + 4);
    if scale < 0 {
        text.push_str("0.");
        text.push_str(&"0".repeat(scale.unsigned_abs() as usize));
        text.push_str(digits);
    } else {
        let scale = scale as usize;
        if digits.len() <= scale {
            text.push_str(digits);
            text.push_str(&"0".repeat(scale - digits.len()));
        } else if scale == 0 {
            text.push_str("0.");
            text.push_str(digits);
        } else {
            text.push_str(&digits[..scale]);
            text.push('.');
            text.push_str(&digits[scale..]);
        }
    }
    if text.is_empty() {
        text.push('0');
    }
    if negative && digits.bytes().any(|b| b != b'0') {
        text.insert(0, '-');
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_encode_layout() {
        assert_eq!(BcdCodec::encode("123.45").unwrap(), vec![0x03, 0x12, 0x34, 0x5C]);
        assert_eq!(BcdCodec::encode("-7").unwrap(), vec![0x01, 0x7D]);
        assert_eq!(BcdCodec::encode("10").unwrap(), vec![0x02, 0x10, 0xC0]);
    }

    #[test]
    fn test_encode_length() {
        // one scale byte, then the digits and the sign nibble packed in pairs
        assert_eq!(BcdCodec::encode("123").unwrap().len(), 3);
        assert_eq!(BcdCodec::encode("1234").unwrap().len(), 4);
        assert_eq!(BcdCodec::encode("12345").unwrap().len(), 4);
        assert_eq!(BcdCodec::encode("-0.000012345").unwrap().len(), 4);
    }

    #[test]
    fn test_leading_zeros() {
        assert_eq!(BcdCodec::encode("007").unwrap(), vec![0x01, 0x7C]);
        assert_eq!(BcdCodec::encode("0.00123").unwrap(), vec![0xFE, 0x12, 0x3C]);
        assert_eq!(BcdCodec::decode(&[0xFE, 0x12, 0x3C]).unwrap(), "0.00123");
    }

    #[test]
    fn test_zero() {
        for text in ["0", "-0", "+0", "000", "0."] {
            assert_eq!(BcdCodec::encode(text).unwrap(), vec![0x00, 0xC0], "{}", text);
        }
        assert_eq!(BcdCodec::decode(&[0x00, 0xC0]).unwrap(), "0");
        assert_eq!(BcdCodec::decode(&[0x00, 0xD0]).unwrap(), "0");
    }

    #[test]
    fn test_zero_keeps_fractional_digits() {
        assert_eq!(BcdCodec::encode("0.000").unwrap(), vec![0xFD, 0xC0]);
        assert_eq!(BcdCodec::encode("-0.000").unwrap(), vec![0xFD, 0xC0]);
        assert_eq!(BcdCodec::encode(".0").unwrap(), vec![0xFF, 0xC0]);
        for text in ["0.0", "0.000", "0.0000000000"] {
            let bytes = BcdCodec::encode(text).unwrap();
            assert_eq!(BcdCodec::decode(&bytes).unwrap(), text);
        }
        let too_long = format!("0.{}", "0".repeat(129));
        assert_eq!(BcdCodec::encode(&too_long).unwrap_err().key(), keys::OUT_OF_RANGE);
    }

    #[test]
    fn test_fractions() {
        assert_eq!(BcdCodec::encode("-0.5").unwrap(), vec![0x00, 0x5D]);
        assert_eq!(BcdCodec::decode(&[0x00, 0x5D]).unwrap(), "-0.5");
        assert_eq!(BcdCodec::decode(&BcdCodec::encode(".5").unwrap()).unwrap(), "0.5");
        assert_eq!(BcdCodec::decode(&BcdCodec::encode("1.0").unwrap()).unwrap(), "1.0");
        assert_eq!(BcdCodec::decode(&BcdCodec::encode("5.").unwrap()).unwrap(), "5");
        assert_eq!(BcdCodec::decode(&BcdCodec::encode("+12.50").unwrap()).unwrap(), "12.50");
    }

    #[test]
    fn test_encode_rejects_malformed() {
        for text in ["", "-", ".", "+.", "abc", "1.2.3", "1e5", " 1", "--1"] {
            let err = BcdCodec::encode(text).unwrap_err();
            assert_eq!(err.key(), keys::BAD_NUMBER, "{:?}", text);
        }
    }

    #[test]
    fn test_encode_scale_out_of_range() {
        let long = "9".repeat(128);
        assert_eq!(BcdCodec::encode(&long).unwrap_err().key(), keys::OUT_OF_RANGE);
        assert!(BcdCodec::encode(&"9".repeat(127)).is_ok());
        let tiny = format!("0.{}1", "0".repeat(129));
        assert_eq!(BcdCodec::encode(&tiny).unwrap_err().key(), keys::OUT_OF_RANGE);
    }

    #[test]
    fn test_decode_rejects_malformed() {
        assert_eq!(BcdCodec::decode(&[]).unwrap_err().key(), keys::BAD_BCD);
        assert_eq!(BcdCodec::decode(&[0x02, 0x12]).unwrap_err().key(), keys::BAD_BCD);
        assert_eq!(BcdCodec::decode(&[0x01]).unwrap_err().key(), keys::BAD_BCD);
    }

    #[test]
    fn test_decode_ignores_trailing_bytes() {
        assert_eq!(BcdCodec::decode(&[0x01, 0x4C, 0x99, 0x99]).unwrap(), "4");
    }

    #[test]
    fn test_decode_pads_short_digit_run() {
        assert_eq!(BcdCodec::decode(&[0x04, 0x12, 0xC0]).unwrap(), "1200");
    }

    #[test]
    fn test_typed_helpers() {
        let d: BigDecimal = "-3.1400".parse().unwrap();
        let bytes = BcdCodec::encode_decimal(&d).unwrap();
        assert_eq!(BcdCodec::decode_decimal(&bytes).unwrap().to_string(), "-3.1400");

        let i: BigInteger = "-98765432109876543210".parse().unwrap();
        let bytes = BcdCodec::encode_integer(&i).unwrap();
        assert_eq!(BcdCodec::decode_integer(&bytes).unwrap(), i);

        let fraction = BcdCodec::encode("1.5").unwrap();
        assert_eq!(BcdCodec::decode_integer(&fraction).unwrap_err().key(), keys::BAD_BCD);
    }

    #[test]
    fn test_read_bcd_bytes() {
        let mut stream = Cursor::new(vec![0x03, 0x12, 0x34, 0x5C, 0xAA]);
        let bytes = BcdCodec::read_bcd_bytes(&mut stream).unwrap();
        assert_eq!(bytes, vec![0x03, 0x12, 0x34, 0x5C]);
        assert_eq!(stream.position(), 4);

        let mut zero = Cursor::new(vec![0x00, 0xC0]);
        assert_eq!(BcdCodec::read_bcd_bytes(&mut zero).unwrap(), vec![0x00, 0xC0]);
    }

    #[test]
    fn test_read_bcd_bytes_end_of_stream() {
        let mut stream = Cursor::new(vec![0x03, 0x12]);
        let err = BcdCodec::read_bcd_bytes(&mut stream).unwrap_err();
        assert!(matches!(err, NumericError::EndOfStream { .. }));

        let mut empty = Cursor::new(Vec::new());
        let err = BcdCodec::read_bcd_bytes(&mut empty).unwrap_err();
        assert!(matches!(err, NumericError::EndOfStream { context: "BCD scale" }));
    }
}
