//! Extended (lenient) Z85 decoding.
//!
//! Push-notification payloads and similar sources hand out Z85 text that may
//! contain separators or end in a partial group. This decoder accepts such
//! input instead of rejecting it:
//!
//! - bytes outside the alphabet are skipped;
//! - each group of five accepted characters yields four bytes, with the group
//!   value truncated to its low 32 bits (`#####` decodes to `08 78 0e c4`);
//! - a trailing group of two to four characters yields three bytes, the low
//!   24 bits of its value; a single trailing character is dropped.

use super::core::{RAW_GROUP, TEXT_GROUP, digit};

/// Decode `text`, skipping anything that is not a Z85 character. Never fails.
pub fn decode_lenient(text: impl AsRef<[u8]>) -> Vec<u8> {
    let text = text.as_ref();
    let mut out = Vec::with_capacity(text.len() / TEXT_GROUP * RAW_GROUP + 3);
    let mut value: u32 = 0;
    let mut count = 0usize;

    for d in text.iter().filter_map(|&b| digit(b)) {
        value = value.wrapping_mul(85).wrapping_add(u32::from(d));
        count += 1;
        if count == TEXT_GROUP {
            out.extend_from_slice(&value.to_be_bytes());
            value = 0;
            count = 0;
        }
    }

    if count >= 2 {
        out.extend_from_slice(&value.to_be_bytes()[1..]);
    }

    out
}
