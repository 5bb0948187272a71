use core::convert::Infallible;
use core::fmt;

use log::{debug, trace};

use crate::codebook::*;
use crate::util::*;

#[cfg(feature = "alloc")]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

/// Decompression errors
///
/// Offsets are the position in the compressed input of the first byte of
/// the token that could not be decoded.
#[derive(Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum DecompressError {
    /// An escape announces more bytes than the input holds
    InputTruncated { offset: usize },
    /// A code with no entry in the codebook
    InvalidCode { offset: usize, code: u8 },
    /// The output buffer was too small to hold all the output.
    ///
    /// Everything up to the end of the buffer has been written.
    OutputTooSmall,
    /// The decompressed data is not UTF-8
    InvalidUtf8 { valid_up_to: usize },
}

impl fmt::Display for DecompressError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecompressError::InputTruncated { offset } => {
                write!(f, "input was truncated in escape at offset {}", offset)
            }
            DecompressError::InvalidCode { offset, code } => {
                write!(f, "invalid code {} at offset {}", code, offset)
            }
            DecompressError::OutputTooSmall => write!(f, "output buffer was insufficient"),
            DecompressError::InvalidUtf8 { valid_up_to } => write!(
                f,
                "decompressed data is not valid UTF-8 after {} bytes",
                valid_up_to
            ),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for DecompressError {}

impl From<OutputFull> for DecompressError {
    fn from(_: OutputFull) -> Self {
        DecompressError::OutputTooSmall
    }
}

impl From<Infallible> for DecompressError {
    fn from(never: Infallible) -> Self {
        match never {}
    }
}

impl<'a> Codebook<'a> {
    fn decompress_impl<O>(&self, inp: &[u8], outp: &mut O) -> Result<(), DecompressError>
    where
        O: OutputSink,
        DecompressError: From<O::Error>,
    {
        let mut pos = 0;

        while let Some(&code) = inp.get(pos) {
            match code {
                VERBATIM_BYTE => {
                    let &lit = inp
                        .get(pos + 1)
                        .ok_or(DecompressError::InputTruncated { offset: pos })?;
                    outp.put_byte(lit)?;
                    pos += 2;
                }
                VERBATIM_RUN => {
                    let &len = inp
                        .get(pos + 1)
                        .ok_or(DecompressError::InputTruncated { offset: pos })?;
                    let end = pos + 2 + len as usize;
                    let lits = inp
                        .get(pos + 2..end)
                        .ok_or(DecompressError::InputTruncated { offset: pos })?;
                    outp.put_slice(lits)?;
                    pos = end;
                }
                _ => {
                    let entry = self
                        .entry(code)
                        .ok_or(DecompressError::InvalidCode { offset: pos, code })?;
                    outp.put_slice(entry)?;
                    pos += 1;
                }
            }
        }

        Ok(())
    }

    /// Decompress the input into a preallocated buffer
    ///
    /// Returns the decompressed size on success, or an error otherwise
    pub fn decompress_to_buf(
        &self,
        inp: &[u8],
        outp: &mut [u8],
    ) -> Result<usize, DecompressError> {
        let mut outp: BufOutput = outp.into();
        self.decompress_impl(inp, &mut outp)
            .inspect_err(|e| debug!("smaz decompression failed: {}", e))?;
        trace!("decompressed {} bytes into {}", inp.len(), outp.written());
        Ok(outp.pos)
    }

    #[cfg(feature = "alloc")]
    /// Decompress the input into a [Vec](alloc::vec::Vec)
    ///
    /// Returns the result on success, or an error otherwise
    pub fn decompress_to_vec(
        &self,
        inp: &[u8],
        capacity_hint: Option<usize>,
    ) -> Result<alloc::vec::Vec<u8>, DecompressError> {
        // text usually comes out around twice the compressed size
        let capacity = capacity_hint.unwrap_or(inp.len().saturating_mul(2));
        let mut ret: VecOutput = alloc::vec::Vec::with_capacity(capacity).into();
        self.decompress_impl(inp, &mut ret)
            .inspect_err(|e| debug!("smaz decompression failed: {}", e))?;
        trace!("decompressed {} bytes into {}", inp.len(), ret.written());
        Ok(ret.vec)
    }

    #[cfg(feature = "alloc")]
    /// Decompress the input and interpret it as UTF-8
    pub fn decompress_to_string(
        &self,
        inp: &[u8],
    ) -> Result<alloc::string::String, DecompressError> {
        let bytes = self.decompress_to_vec(inp, None)?;
        alloc::string::String::from_utf8(bytes).map_err(|e| DecompressError::InvalidUtf8 {
            valid_up_to: e.utf8_error().valid_up_to(),
        })
    }
}

/// Decompress the input into a preallocated buffer using the standard codebook
pub fn decompress_to_buf(inp: &[u8], outp: &mut [u8]) -> Result<usize, DecompressError> {
    SMAZ.decompress_to_buf(inp, outp)
}

#[cfg(feature = "alloc")]
/// Decompress the input into a [Vec](alloc::vec::Vec) using the standard codebook
pub fn decompress_to_vec(
    inp: &[u8],
    capacity_hint: Option<usize>,
) -> Result<alloc::vec::Vec<u8>, DecompressError> {
    SMAZ.decompress_to_vec(inp, capacity_hint)
}

#[cfg(feature = "alloc")]
/// Decompress the input using the standard codebook
pub fn decompress(inp: &[u8]) -> Result<alloc::vec::Vec<u8>, DecompressError> {
    SMAZ.decompress_to_vec(inp, None)
}

#[cfg(feature = "alloc")]
/// Decompress the input as UTF-8 text using the standard codebook
pub fn decompress_to_string(inp: &[u8]) -> Result<alloc::string::String, DecompressError> {
    SMAZ.decompress_to_string(inp)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty() {
        let mut out = [0u8; 0];
        assert_eq!(decompress_to_buf(&[], &mut out), Ok(0));
    }

    #[test]
    fn test_codes() {
        let mut out = [0u8; 32];
        let len = decompress_to_buf(
            &[1, 0, 254, b'q', 38, 131, 254, b'k', 94, 115, 65, 41, 220, 250],
            &mut out,
        )
        .unwrap();
        assert_eq!(out[..len], *b"the quick brown fox");
    }

    #[test]
    fn test_verbatim() {
        let mut out = [0u8; 8];
        let len = decompress_to_buf(&[254, 255], &mut out).unwrap();
        assert_eq!(out[..len], [255]);

        let len = decompress_to_buf(&[255, 3, 254, 255, 0], &mut out).unwrap();
        assert_eq!(out[..len], [254, 255, 0]);

        // a zero-length run is legal and produces nothing
        let len = decompress_to_buf(&[255, 0, 1, 255, 0], &mut out).unwrap();
        assert_eq!(out[..len], *b"the");
    }

    #[test]
    fn test_truncated() {
        let mut out = [0u8; 16];
        assert_eq!(
            decompress_to_buf(&[254], &mut out),
            Err(DecompressError::InputTruncated { offset: 0 })
        );
        assert_eq!(
            decompress_to_buf(&[255], &mut out),
            Err(DecompressError::InputTruncated { offset: 0 })
        );
        assert_eq!(
            decompress_to_buf(&[255, 5, 1, 2], &mut out),
            Err(DecompressError::InputTruncated { offset: 0 })
        );
        assert_eq!(
            decompress_to_buf(&[1, 0, 255, 2, b'Q'], &mut out),
            Err(DecompressError::InputTruncated { offset: 2 })
        );
        // failing again gives the same answer
        assert_eq!(
            decompress_to_buf(&[1, 0, 255, 2, b'Q'], &mut out),
            Err(DecompressError::InputTruncated { offset: 2 })
        );
    }

    #[test]
    fn test_invalid_code() {
        let codebook = Codebook::new(&[b"a", b"b", b"c"]);
        let mut out = [0u8; 8];
        let len = codebook.decompress_to_buf(&[2, 1, 0], &mut out).unwrap();
        assert_eq!(out[..len], *b"cba");

        assert_eq!(
            codebook.decompress_to_buf(&[0, 254, b'x', 3], &mut out),
            Err(DecompressError::InvalidCode { offset: 3, code: 3 })
        );
        assert_eq!(
            codebook.decompress_to_buf(&[253], &mut out),
            Err(DecompressError::InvalidCode {
                offset: 0,
                code: 253
            })
        );
    }

    #[test]
    fn test_every_shipped_code_is_valid() {
        let mut out = [0u8; MAX_ENTRY_LEN];
        for code in 0..MAX_ENTRIES as u8 {
            let len = decompress_to_buf(&[code], &mut out).unwrap();
            assert_eq!(out[..len], *SMAZ.entry(code).unwrap());
        }
    }

    #[test]
    fn test_output_too_small() {
        let mut out = [0u8; 4];
        assert_eq!(
            decompress_to_buf(&[1, 1], &mut out),
            Err(DecompressError::OutputTooSmall)
        );
        // still writes up to the limit
        assert_eq!(out, *b"thet");

        let mut out = [0u8; 1];
        assert_eq!(
            decompress_to_buf(&[255, 2, 7, 8], &mut out),
            Err(DecompressError::OutputTooSmall)
        );
        assert_eq!(out, [7]);
    }

    #[cfg(feature = "alloc")]
    #[test]
    fn test_error_messages() {
        use alloc::string::ToString;

        assert_eq!(
            DecompressError::InputTruncated { offset: 3 }.to_string(),
            "input was truncated in escape at offset 3"
        );
        assert_eq!(
            DecompressError::InvalidCode { offset: 0, code: 9 }.to_string(),
            "invalid code 9 at offset 0"
        );
    }

    #[cfg(feature = "alloc")]
    #[test]
    fn test_vec_and_string() {
        assert_eq!(decompress(&[]).unwrap(), b"");
        assert_eq!(
            decompress(&[16, 152, 96, 65, 42, 22, 24]).unwrap(),
            b"hello world"
        );
        assert_eq!(
            decompress_to_vec(&[254, b'H', 178, 22, 6], Some(1)).unwrap(),
            b"Hello"
        );
        assert_eq!(decompress_to_string(&[225, 244, 222]).unwrap(), "<div>");
        assert_eq!(
            decompress_to_string(&[1, 254, 0xff]),
            Err(DecompressError::InvalidUtf8 { valid_up_to: 3 })
        );
        assert_eq!(
            decompress(&[255, 5, 1, 2]),
            Err(DecompressError::InputTruncated { offset: 0 })
        );
    }
}
