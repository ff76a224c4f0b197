//! Nibble layout shared by the encoder and the decoder.

/// Sign nibble marking a positive (or zero) value
pub const SIGN_POSITIVE: u8 = 0x0C;

/// Sign nibble marking a negative value
pub const SIGN_NEGATIVE: u8 = 0x0D;

/// Nibbles above 9 terminate the digit run.
pub(crate) fn is_digit(nibble: u8) -> bool {
    nibble <= 9
}

/// High and low nibble of a byte
pub(crate) fn nibbles(byte: u8) -> [u8; 2] {
    [byte >> 4, byte & 0x0F]
}

/// Whether `byte` carries a terminating nibble in either half.
pub(crate) fn has_terminator(byte: u8) -> bool {
    nibbles(byte).iter().any(|n| !is_digit(*n))
}
