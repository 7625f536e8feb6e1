//! Z85 (ZeroMQ RFC 32) binary-to-text codec.
//!
//! Four bytes map to five characters from an 85-symbol printable alphabet,
//! most significant digit first. `core` holds the strict codec, `stream`
//! adapts it to readers and writers for the command-line tool, and `lenient`
//! decodes the tolerant "extended" variant.

pub mod core;
pub mod lenient;
pub mod stream;


pub use self::core::{
    DECODER_TABLE, ENCODER_ALPHABET, Z85Error, decode, decoded_len, encode, encode_bytes,
    encoded_len, is_z85_char,
};
pub use self::lenient::decode_lenient;
