//! Smaz: compression for short strings
//!
//! A fixed codebook of up to 254 common fragments is mapped onto one-byte
//! codes. Bytes that no entry covers are carried verbatim behind the escape
//! codes 254 (one byte) and 255 (a run of up to 255 bytes). There is no
//! header, so even tiny inputs usually shrink.
//!
//! ```
//! let packed = smaz_rs::compress(b"the quick brown fox");
//! assert!(packed.len() < 19);
//! assert_eq!(smaz_rs::decompress(&packed).unwrap(), b"the quick brown fox");
//! ```
#![no_std]

#[cfg(feature = "alloc")]
extern crate alloc;

mod codebook;
mod compress;
mod decompress;
mod trie;
mod util;

pub use codebook::{
    Codebook, CodebookError, MAX_ENTRIES, MAX_ENTRY_LEN, MAX_VERBATIM_RUN, SMAZ, SMAZ_CODES,
    VERBATIM_BYTE, VERBATIM_RUN,
};
#[cfg(feature = "alloc")]
pub use compress::compress;
pub use compress::{compress_to_buf, max_compressed_len, CompressError};
#[cfg(feature = "alloc")]
pub use decompress::{decompress, decompress_to_string, decompress_to_vec};
pub use decompress::{decompress_to_buf, DecompressError};
pub use trie::{Match, MatchIndex};
