//! Infrastructure Layer: Binary Value Format
//!
//! Reads and writes a closed set of scalar values to byte streams.
//!
//! ## Overview
//!
//! Each value is either written *tagged*, preceded by a one-byte
//! [`DataType`] code so a reader can dispatch on it (and so that an absent
//! value can be represented at all), or *raw*, with the type agreed out of
//! band. Raw values honour a [`WireOptions`] bundle: byte order for
//! fixed-width numbers, the character set for text, and the framing
//! discipline for text payloads. Tagged values always use MSB order and a
//! four-byte length prefix.
//!
//! Decimals and big integers travel as packed BCD (see
//! `infrastructure_bcd_encoding`).
//!
//! ## Modules
//!
//! - **[`scalar`](scalar/index.html)**: [`ScalarValue`] and its [`DataType`] codes
//! - **[`options`](options/index.html)**: byte order, string framing and charsets
//! - **[`encoding`](encoding/index.html)**: `write_raw`, `write_tagged`
//! - **[`decoding`](decoding/index.html)**: `read_raw`, `read_tagged`
//! - **[`size_calculation`](size_calculation/index.html)**: payload sizes without writing
//!
//! ## Examples
//!
//! ```rust
//! use infrastructure_binary_format::{read_tagged, write_tagged, Charset, ScalarValue};
//! use std::io::Cursor;
//!
//! let mut out = Vec::new();
//! write_tagged(&ScalarValue::Int32(-2), &mut out, Charset::Utf8).unwrap();
//! assert_eq!(out, vec![3, 0xFF, 0xFF, 0xFF, 0xFE]);
//!
//! let value = read_tagged(&mut Cursor::new(out), Charset::Utf8).unwrap();
//! assert_eq!(value, ScalarValue::Int32(-2));
//! ```

pub mod decoding;
pub mod encoding;
pub mod options;
pub mod scalar;
pub mod size_calculation;

pub use decoding::{read_raw, read_tagged};
pub use encoding::{write_raw, write_tagged};
pub use options::{ByteOrder, Charset, StringLength, WireOptions};
pub use scalar::{DataType, ScalarValue};
pub use size_calculation::encoded_size;
