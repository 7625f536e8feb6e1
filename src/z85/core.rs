//! Strict Z85 codec: the alphabet and decode table, the length law, and
//! whole-buffer `encode`/`decode` that reject misaligned or invalid input.

use thiserror::Error;

/// Z85 alphabet (ZeroMQ RFC 32). Index is the base-85 digit value.
pub const ENCODER_ALPHABET: &[u8; 85] =
    b"0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ.-:+=^!/*?&<>()[]{}@%$#";

/// First byte value covered by [`DECODER_TABLE`].
pub const DECODER_OFFSET: u8 = 0x20;

/// Inverse of [`ENCODER_ALPHABET`] for bytes 0x20..=0x7F.
///
/// Slots for bytes outside the alphabet hold 0, the same value as `'0'`.
/// Never trust an entry without checking membership first; see [`digit`].
pub const DECODER_TABLE: [u8; 96] = [
    0x00, 0x44, 0x00, 0x54, 0x53, 0x52, 0x48, 0x00, 0x4B, 0x4C, 0x46, 0x41, 0x00, 0x3F, 0x3E, 0x45,
    0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x40, 0x00, 0x49, 0x42, 0x4A, 0x47,
    0x51, 0x24, 0x25, 0x26, 0x27, 0x28, 0x29, 0x2A, 0x2B, 0x2C, 0x2D, 0x2E, 0x2F, 0x30, 0x31, 0x32,
    0x33, 0x34, 0x35, 0x36, 0x37, 0x38, 0x39, 0x3A, 0x3B, 0x3C, 0x3D, 0x4D, 0x00, 0x4E, 0x43, 0x00,
    0x00, 0x0A, 0x0B, 0x0C, 0x0D, 0x0E, 0x0F, 0x10, 0x11, 0x12, 0x13, 0x14, 0x15, 0x16, 0x17, 0x18,
    0x19, 0x1A, 0x1B, 0x1C, 0x1D, 0x1E, 0x1F, 0x20, 0x21, 0x22, 0x23, 0x4F, 0x00, 0x50, 0x00, 0x00,
];

/// Raw bytes per Z85 group.
pub const RAW_GROUP: usize = 4;

/// Encoded characters per Z85 group.
pub const TEXT_GROUP: usize = 5;

/// Place values of the five characters in a group, most significant first.
const DIVISORS: [u32; TEXT_GROUP] = [85 * 85 * 85 * 85, 85 * 85 * 85, 85 * 85, 85, 1];

/// Errors reported by the strict codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Z85Error {
    /// Input length is not a whole number of groups.
    #[error("invalid input (length {len} is not a multiple of {multiple})")]
    InvalidLength { len: usize, multiple: usize },

    /// A decode input byte is not one of the 85 alphabet characters.
    #[error("invalid input (byte 0x{byte:02x} at offset {index} is not in the Z85 alphabet)")]
    InvalidCharacter { byte: u8, index: usize },

    /// A five-character group encodes a value above `u32::MAX`.
    #[error("invalid input (group at offset {index} does not fit in 32 bits)")]
    ValueOverflow { index: usize },
}

/// Digit value of `byte`, or `None` if it is not a Z85 character.
#[inline]
pub fn digit(byte: u8) -> Option<u8> {
    let slot = byte.checked_sub(DECODER_OFFSET)? as usize;
    let value = *DECODER_TABLE.get(slot)?;
    // A sentinel slot maps to '0', so membership is confirmed by re-encoding.
    (ENCODER_ALPHABET[value as usize] == byte).then_some(value)
}

/// Whether `byte` belongs to the Z85 alphabet.
#[inline]
pub fn is_z85_char(byte: u8) -> bool {
    digit(byte).is_some()
}

/// Encoded length of `raw_len` bytes.
pub fn encoded_len(raw_len: usize) -> Result<usize, Z85Error> {
    if !raw_len.is_multiple_of(RAW_GROUP) {
        return Err(Z85Error::InvalidLength {
            len: raw_len,
            multiple: RAW_GROUP,
        });
    }
    Ok(raw_len / RAW_GROUP * TEXT_GROUP)
}

/// Decoded length of `text_len` characters.
pub fn decoded_len(text_len: usize) -> Result<usize, Z85Error> {
    if !text_len.is_multiple_of(TEXT_GROUP) {
        return Err(Z85Error::InvalidLength {
            len: text_len,
            multiple: TEXT_GROUP,
        });
    }
    Ok(text_len / TEXT_GROUP * RAW_GROUP)
}

#[inline]
fn encode_group(group: &[u8]) -> [u8; TEXT_GROUP] {
    let value = u32::from_be_bytes([group[0], group[1], group[2], group[3]]);
    let mut chars = [0u8; TEXT_GROUP];
    for (c, divisor) in chars.iter_mut().zip(DIVISORS) {
        *c = ENCODER_ALPHABET[(value / divisor % 85) as usize];
    }
    chars
}

/// Append the encoding of `data` to `out`.
///
/// Callers must have checked the length with [`encoded_len`]; a trailing
/// partial group is ignored.
pub(crate) fn encode_groups_into(data: &[u8], out: &mut Vec<u8>) {
    for group in data.chunks_exact(RAW_GROUP) {
        out.extend_from_slice(&encode_group(group));
    }
}

/// Encode `data` to Z85 as ASCII bytes.
///
/// `data.len()` must be a multiple of 4; nothing is padded.
pub fn encode_bytes(data: &[u8]) -> Result<Vec<u8>, Z85Error> {
    let mut out = Vec::with_capacity(encoded_len(data.len())?);
    encode_groups_into(data, &mut out);
    Ok(out)
}

/// Encode `data` to a Z85 string.
///
/// ```
/// let key = [0x86, 0x4F, 0xD2, 0x6F, 0xB5, 0x59, 0xF7, 0x5B];
/// assert_eq!(z85_rs::z85::encode(&key).unwrap(), "HelloWorld");
/// ```
pub fn encode(data: &[u8]) -> Result<String, Z85Error> {
    let bytes = encode_bytes(data)?;
    // SAFETY: every byte comes from ENCODER_ALPHABET, which is ASCII.
    Ok(unsafe { String::from_utf8_unchecked(bytes) })
}

/// Decode Z85 `text` back to bytes.
///
/// The length is counted in bytes and must be a multiple of 5. Every byte
/// must be an alphabet character and every group must fit in 32 bits; the
/// first violation is reported with its offset and nothing is returned.
///
/// ```
/// let raw = z85_rs::z85::decode("HelloWorld").unwrap();
/// assert_eq!(raw, [0x86, 0x4F, 0xD2, 0x6F, 0xB5, 0x59, 0xF7, 0x5B]);
/// ```
pub fn decode(text: impl AsRef<[u8]>) -> Result<Vec<u8>, Z85Error> {
    let text = text.as_ref();
    let mut out = Vec::with_capacity(decoded_len(text.len())?);

    for (n, group) in text.chunks_exact(TEXT_GROUP).enumerate() {
        let start = n * TEXT_GROUP;
        // u64 so that five digits (at most 85^5 - 1) cannot wrap.
        let mut value: u64 = 0;
        for (i, &byte) in group.iter().enumerate() {
            let d = digit(byte).ok_or(Z85Error::InvalidCharacter {
                byte,
                index: start + i,
            })?;
            value = value * 85 + u64::from(d);
        }
        let value =
            u32::try_from(value).map_err(|_| Z85Error::ValueOverflow { index: start })?;
        out.extend_from_slice(&value.to_be_bytes());
    }

    Ok(out)
}
