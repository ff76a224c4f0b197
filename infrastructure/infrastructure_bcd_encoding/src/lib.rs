//! Infrastructure Layer: BCD Encoding
//!
//! Converts decimal numbers to and from packed binary-coded decimal.
//!
//! ## Overview
//!
//! The `infrastructure_bcd_encoding` crate is part of the infrastructure layer.
//! It turns canonical decimal text (and the [`BigDecimal`] / [`BigInteger`]
//! values rendered from it) into a compact, self-terminating byte layout:
//!
//! ```text
//! [signed scale byte][digit nibbles, two per byte, high first][sign nibble]
//! ```
//!
//! The scale byte counts integer digits. A negative scale counts the zeros
//! between the decimal point and the first significant fractional digit.
//! The sign nibble is `0xC` for positive and `0xD` for negative values.
//!
//! ## See Also
//!
//! - [`entities_numeric`]: the decimal and integer types encoded here
//! - `infrastructure_binary_format`: writes BCD payloads for decimal and
//!   integer scalar values
//!
//! [`BigDecimal`]: entities_numeric::BigDecimal
//! [`BigInteger`]: entities_numeric::BigInteger

mod common;

pub mod bcd_codec;

pub use bcd_codec::BcdCodec;
pub use common::{SIGN_NEGATIVE, SIGN_POSITIVE};
