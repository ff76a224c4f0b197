//! Size Calculation Module
//!
//! Predicts how many bytes a value occupies on the wire, so that callers can
//! lay out fixed-size records before writing.

use crate::encoding::{char_unit, check_terminator};
use crate::options::{StringLength, WireOptions};
use crate::scalar::{DataType, ScalarValue};
use entities_numeric::{NumericError, Result};
use infrastructure_bcd_encoding::BcdCodec;

/// Payload size of `value` under `options`, excluding any type code.
///
/// Agrees with the number of bytes [`crate::write_raw`] emits, and fails in
/// the same cases.
pub fn encoded_size(value: &ScalarValue, options: &WireOptions) -> Result<usize> {
    if let ScalarValue::Char(c) = value {
        char_unit(*c)?;
    }
    if let Some(width) = DataType::of(value).fixed_width() {
        return Ok(width);
    }
    match value {
        ScalarValue::Decimal(v) => Ok(BcdCodec::encode_decimal(v)?.len()),
        ScalarValue::Integer(v) => Ok(BcdCodec::encode_integer(v)?.len()),
        ScalarValue::Text(text) => {
            check_terminator(text, options)?;
            text_size(options.charset.encode(text).len(), options)
        }
        _ => Ok(0),
    }
}

fn text_size(length: usize, options: &WireOptions) -> Result<usize> {
    if let Some(max) = options.string_length.max_length() {
        if length > max {
            return Err(NumericError::Overflow { length, max });
        }
    }
    Ok(match options.string_length {
        StringLength::Prefix1 => 1 + length,
        StringLength::Prefix2 => 2 + length,
        StringLength::Prefix4 => 4 + length,
        StringLength::Fixed => options.fixed_length,
        StringLength::Eos => length + 1,
    })
}
