//! Decoding Module
//!
//! Reads scalar values written by [`crate::encoding`]. A stream that ends
//! in the middle of a payload is always reported as `EndOfStream`; nothing
//! is silently truncated.

use crate::options::{ByteOrder, Charset, StringLength, WireOptions};
use crate::scalar::{DataType, ScalarValue};
use chrono::{DateTime, Utc};
use entities_numeric::{keys, NumericError, Result};
use infrastructure_bcd_encoding::BcdCodec;
use std::io::Read;
use tracing::trace;

/// Read a value of a known type, using `options`.
///
/// # Errors
/// - `EndOfStream` if the reader runs out mid-payload
/// - `InvalidArgument` for malformed BCD, an out-of-range instant or a
///   surrogate character code
/// - `Io` for any other read failure
pub fn read_raw<R: Read>(reader: &mut R, data_type: DataType, options: &WireOptions) -> Result<ScalarValue> {
    let order = options.byte_order;
    let value = match data_type {
        DataType::Nul => ScalarValue::Absent,
        DataType::Byte => ScalarValue::Int8(i8::from_be_bytes(read_array(reader, "int8")?)),
        DataType::Short => ScalarValue::Int16(i16::from_be_bytes(read_ordered(reader, order, "int16")?)),
        DataType::Int => ScalarValue::Int32(i32::from_be_bytes(read_ordered(reader, order, "int32")?)),
        DataType::Long => ScalarValue::Int64(i64::from_be_bytes(read_ordered(reader, order, "int64")?)),
        DataType::Float => ScalarValue::Float32(f32::from_bits(u32::from_be_bytes(read_ordered(
            reader, order, "float32",
        )?))),
        DataType::Double => ScalarValue::Float64(f64::from_bits(u64::from_be_bytes(read_ordered(
            reader, order, "float64",
        )?))),
        DataType::Date => {
            let millis = i64::from_be_bytes(read_ordered(reader, order, "instant")?);
            let instant = DateTime::<Utc>::from_timestamp_millis(millis).ok_or_else(|| {
                NumericError::invalid(keys::OUT_OF_RANGE, format!("instant {} ms", millis))
            })?;
            ScalarValue::Instant(instant)
        }
        DataType::Char => {
            let unit = u16::from_be_bytes(read_ordered(reader, order, "char")?);
            let c = char::from_u32(u32::from(unit)).ok_or_else(|| {
                NumericError::invalid(keys::BAD_CHAR, format!("lone surrogate {:#06X}", unit))
            })?;
            ScalarValue::Char(c)
        }
        DataType::Bool => ScalarValue::Boolean(read_array::<1, _>(reader, "boolean")?[0] != 0),
        DataType::Dec => ScalarValue::Decimal(BcdCodec::decode_decimal(&BcdCodec::read_bcd_bytes(reader)?)?),
        DataType::BigInt => ScalarValue::Integer(BcdCodec::decode_integer(&BcdCodec::read_bcd_bytes(reader)?)?),
        DataType::String => ScalarValue::Text(read_text(reader, options)?),
    };
    Ok(value)
}

/// Read a one-byte type code and the value it announces, in MSB order with
/// four-byte text prefixes.
///
/// # Errors
/// `InvalidArgument` for an unknown type code, otherwise as for
/// [`read_raw`].
pub fn read_tagged<R: Read>(reader: &mut R, charset: Charset) -> Result<ScalarValue> {
    let [code] = read_array::<1, _>(reader, "type code")?;
    let data_type = DataType::from_code(code)?;
    trace!(data_type = %data_type, "reading tagged value");
    read_raw(reader, data_type, &WireOptions::tagged(charset))
}

fn read_array<const N: usize, R: Read>(reader: &mut R, context: &'static str) -> Result<[u8; N]> {
    let mut bytes = [0u8; N];
    reader
        .read_exact(&mut bytes)
        .map_err(|e| NumericError::from_read(e, context))?;
    Ok(bytes)
}

/// Read N bytes and return them in big-endian order.
fn read_ordered<const N: usize, R: Read>(
    reader: &mut R,
    order: ByteOrder,
    context: &'static str,
) -> Result<[u8; N]> {
    let mut bytes = read_array::<N, R>(reader, context)?;
    if order == ByteOrder::Lsb {
        bytes.reverse();
    }
    Ok(bytes)
}

/// Read exactly `length` bytes without trusting `length` for allocation.
fn read_exactly<R: Read>(reader: &mut R, length: usize) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    reader
        .take(length as u64)
        .read_to_end(&mut bytes)
        .map_err(|e| NumericError::from_read(e, "text"))?;
    if bytes.len() < length {
        return Err(NumericError::EndOfStream { context: "text" });
    }
    Ok(bytes)
}

fn read_text<R: Read>(reader: &mut R, options: &WireOptions) -> Result<String> {
    let order = options.byte_order;
    let charset = options.charset;
    let bytes = match options.string_length {
        StringLength::Prefix1 => {
            let [length] = read_array::<1, _>(reader, "text length")?;
            read_exactly(reader, length as usize)?
        }
        StringLength::Prefix2 => {
            let length = u16::from_be_bytes(read_ordered(reader, order, "text length")?);
            read_exactly(reader, length as usize)?
        }
        StringLength::Prefix4 => {
            let length = u32::from_be_bytes(read_ordered(reader, order, "text length")?);
            read_exactly(reader, length as usize)?
        }
        StringLength::Fixed => {
            let bytes = read_exactly(reader, options.fixed_length)?;
            // Padding decodes to trailing NULs.
            return Ok(charset.decode(&bytes).trim_end_matches('\0').to_string());
        }
        StringLength::Eos => {
            let mut bytes = Vec::new();
            loop {
                let [b] = read_array::<1, _>(reader, "text")?;
                if b == 0 {
                    break;
                }
                bytes.push(b);
            }
            bytes
        }
    };
    Ok(charset.decode(&bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn raw(bytes: &[u8], data_type: DataType, options: WireOptions) -> Result<ScalarValue> {
        read_raw(&mut Cursor::new(bytes.to_vec()), data_type, &options)
    }

    #[test]
    fn test_fixed_width_byte_orders() {
        let msb = WireOptions::default();
        let lsb = msb.with_byte_order(ByteOrder::Lsb);
        assert_eq!(raw(&[1, 2], DataType::Short, msb).unwrap(), ScalarValue::Int16(0x0102));
        assert_eq!(raw(&[1, 2], DataType::Short, lsb).unwrap(), ScalarValue::Int16(0x0201));
        assert_eq!(raw(&[0xFE, 0xFF, 0xFF, 0xFF], DataType::Int, lsb).unwrap(), ScalarValue::Int32(-2));
        assert_eq!(raw(&[0x3F, 0x80, 0, 0], DataType::Float, msb).unwrap(), ScalarValue::Float32(1.0));
        assert_eq!(raw(&[7], DataType::Bool, msb).unwrap(), ScalarValue::Boolean(true));
        assert_eq!(raw(&[], DataType::Nul, msb).unwrap(), ScalarValue::Absent);
    }

    #[test]
    fn test_short_reads_are_end_of_stream() {
        let options = WireOptions::default();
        for (bytes, data_type) in [
            (&[1u8][..], DataType::Short),
            (&[1, 2, 3][..], DataType::Int),
            (&[][..], DataType::Byte),
            (&[0, 0, 0, 0, 0, 0, 0][..], DataType::Date),
            (&[0x03, 0x12][..], DataType::Dec),
            (&[0, 0, 0, 5, b'a'][..], DataType::String),
        ] {
            let err = raw(bytes, data_type, options).unwrap_err();
            assert!(matches!(err, NumericError::EndOfStream { .. }), "{}: {:?}", data_type, err);
        }
    }

    #[test]
    fn test_eos_without_terminator() {
        let options = WireOptions::default().with_string_length(StringLength::Eos);
        let err = raw(b"abc", DataType::String, options).unwrap_err();
        assert!(matches!(err, NumericError::EndOfStream { context: "text" }));
    }

    #[test]
    fn test_fixed_strips_padding() {
        let options = WireOptions::default().with_fixed_length(5);
        assert_eq!(
            raw(b"ab\0\0\0", DataType::String, options).unwrap(),
            ScalarValue::Text("ab".into())
        );
    }

    #[test]
    fn test_surrogate_char_is_rejected() {
        let err = raw(&[0xD8, 0x00], DataType::Char, WireOptions::default()).unwrap_err();
        assert_eq!(err.key(), keys::BAD_CHAR);
    }

    #[test]
    fn test_unknown_tag() {
        let err = read_tagged(&mut Cursor::new(vec![42u8]), Charset::Utf8).unwrap_err();
        assert_eq!(err.key(), keys::BAD_DATA_TYPE_CODE);
        let err = read_tagged(&mut Cursor::new(Vec::new()), Charset::Utf8).unwrap_err();
        assert!(matches!(err, NumericError::EndOfStream { context: "type code" }));
    }

    #[test]
    fn test_prefix_lengths() {
        let options = WireOptions::default()
            .with_string_length(StringLength::Prefix2)
            .with_byte_order(ByteOrder::Lsb);
        assert_eq!(
            raw(&[2, 0, b'h', b'i'], DataType::String, options).unwrap(),
            ScalarValue::Text("hi".into())
        );
        let options = WireOptions::default().with_string_length(StringLength::Prefix1);
        assert_eq!(
            raw(&[0], DataType::String, options).unwrap(),
            ScalarValue::Text(String::new())
        );
    }
}
