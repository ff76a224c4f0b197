//! Encoding Module
//!
//! Writes scalar values, raw or tagged. The full payload is assembled in
//! memory before anything reaches the writer, so a failing value (an
//! oversized string, a character outside the BMP) leaves the stream
//! untouched.

use crate::options::{ByteOrder, Charset, StringLength, WireOptions};
use crate::scalar::{DataType, ScalarValue};
use entities_numeric::{keys, NumericError, Result};
use infrastructure_bcd_encoding::BcdCodec;
use std::io::Write;
use tracing::trace;

/// Write a value without a type code, using `options`.
///
/// # Errors
/// - `Overflow` if text does not fit its length prefix
/// - `InvalidArgument` for a character outside the BMP, text containing
///   U+0000 under [`StringLength::Eos`], or a decimal or integer whose BCD
///   scale does not fit in a byte
/// - `Io` if the writer fails
pub fn write_raw<W: Write>(value: &ScalarValue, writer: &mut W, options: &WireOptions) -> Result<()> {
    let mut buf = Vec::new();
    encode_payload(value, options, &mut buf)?;
    trace!(data_type = %DataType::of(value), bytes = buf.len(), "writing raw value");
    writer.write_all(&buf).map_err(NumericError::Io)
}

/// Write a one-byte type code followed by the value in MSB order, with
/// text framed by a four-byte length prefix.
///
/// # Errors
/// As for [`write_raw`].
pub fn write_tagged<W: Write>(value: &ScalarValue, writer: &mut W, charset: Charset) -> Result<()> {
    let data_type = DataType::of(value);
    let mut buf = vec![data_type.code()];
    encode_payload(value, &WireOptions::tagged(charset), &mut buf)?;
    trace!(data_type = %data_type, bytes = buf.len(), "writing tagged value");
    writer.write_all(&buf).map_err(NumericError::Io)
}

/// Append the payload of `value` to `buf`.
pub(crate) fn encode_payload(value: &ScalarValue, options: &WireOptions, buf: &mut Vec<u8>) -> Result<()> {
    let order = options.byte_order;
    match value {
        ScalarValue::Absent => {}
        ScalarValue::Int8(v) => buf.push(*v as u8),
        ScalarValue::Int16(v) => put_ordered(buf, v.to_be_bytes(), order),
        ScalarValue::Int32(v) => put_ordered(buf, v.to_be_bytes(), order),
        ScalarValue::Int64(v) => put_ordered(buf, v.to_be_bytes(), order),
        ScalarValue::Float32(v) => put_ordered(buf, v.to_bits().to_be_bytes(), order),
        ScalarValue::Float64(v) => put_ordered(buf, v.to_bits().to_be_bytes(), order),
        ScalarValue::Instant(v) => put_ordered(buf, v.timestamp_millis().to_be_bytes(), order),
        ScalarValue::Char(c) => put_ordered(buf, char_unit(*c)?.to_be_bytes(), order),
        ScalarValue::Boolean(v) => buf.push(u8::from(*v)),
        ScalarValue::Decimal(v) => buf.extend(BcdCodec::encode_decimal(v)?),
        ScalarValue::Integer(v) => buf.extend(BcdCodec::encode_integer(v)?),
        ScalarValue::Text(text) => encode_text(text, options, buf)?,
    }
    Ok(())
}

/// Append big-endian `bytes`, reversed for LSB order.
fn put_ordered<const N: usize>(buf: &mut Vec<u8>, mut bytes: [u8; N], order: ByteOrder) {
    if order == ByteOrder::Lsb {
        bytes.reverse();
    }
    buf.extend_from_slice(&bytes);
}

/// The single UTF-16 code unit of a BMP character.
pub(crate) fn char_unit(c: char) -> Result<u16> {
    u16::try_from(u32::from(c)).map_err(|_| {
        NumericError::invalid(
            keys::BAD_CHAR,
            format!("U+{:04X} does not fit in one UTF-16 code unit", u32::from(c)),
        )
    })
}

/// Under [`StringLength::Eos`] a U+0000 in the text would end it early on read.
pub(crate) fn check_terminator(text: &str, options: &WireOptions) -> Result<()> {
    match text.find('\0') {
        Some(index) if options.string_length == StringLength::Eos => Err(NumericError::invalid(
            keys::BAD_CHAR,
            format!("U+0000 at byte {} of NUL-terminated text", index),
        )),
        _ => Ok(()),
    }
}

fn encode_text(text: &str, options: &WireOptions, buf: &mut Vec<u8>) -> Result<()> {
    check_terminator(text, options)?;
    let bytes = options.charset.encode(text);
    let length = bytes.len();
    if let Some(max) = options.string_length.max_length() {
        if length > max {
            return Err(NumericError::Overflow { length, max });
        }
    }
    match options.string_length {
        StringLength::Prefix1 => buf.push(length as u8),
        StringLength::Prefix2 => put_ordered(buf, (length as u16).to_be_bytes(), options.byte_order),
        StringLength::Prefix4 => put_ordered(buf, (length as u32).to_be_bytes(), options.byte_order),
        StringLength::Fixed => {
            // Longer payloads are cut at the field width.
            let width = options.fixed_length;
            let kept = length.min(width);
            buf.extend_from_slice(&bytes[..kept]);
            buf.resize(buf.len() + (width - kept), 0);
            return Ok(());
        }
        StringLength::Eos => {
            buf.extend_from_slice(&bytes);
            buf.push(0);
            return Ok(());
        }
    }
    buf.extend_from_slice(&bytes);
    Ok(())
}
