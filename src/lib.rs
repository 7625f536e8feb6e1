//! Z85 encoding and decoding, plus the shared plumbing of the `fz85` tool.
//!
//! ```
//! use z85_rs::z85;
//!
//! let key = [0x86, 0x4F, 0xD2, 0x6F, 0xB5, 0x59, 0xF7, 0x5B];
//! let text = z85::encode(&key).unwrap();
//! assert_eq!(text, "HelloWorld");
//! assert_eq!(z85::decode(&text).unwrap(), key);
//! ```

/// Use mimalloc as the global allocator for the library and the binary.
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

pub mod common;
pub mod z85;
