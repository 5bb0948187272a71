use core::fmt;

use log::trace;

use crate::codebook::*;
use crate::util::*;

#[cfg(feature = "alloc")]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

/// Compression errors
#[derive(Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum CompressError {
    /// The output buffer was too small to hold all the output.
    ///
    /// The output that has been written *is* valid, but has been truncated.
    OutputTooSmall,
}
impl fmt::Display for CompressError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompressError::OutputTooSmall => write!(f, "output buffer was insufficient"),
        }
    }
}
#[cfg(feature = "std")]
impl std::error::Error for CompressError {}

impl From<OutputFull> for CompressError {
    fn from(_: OutputFull) -> Self {
        CompressError::OutputTooSmall
    }
}

/// Worst-case compressed size for `len` input bytes
///
/// Two unmatched bytes in a row cost four output bytes, and nothing costs
/// more per input byte than that. Returns `None` if the size overflows.
pub fn max_compressed_len(len: usize) -> Option<usize> {
    len.checked_mul(2)
}

/// Frame a run of 1 to 255 unmatched bytes
fn put_verbatim<O: OutputSink>(outp: &mut O, lits: &[u8]) -> Result<(), O::Error> {
    debug_assert!(!lits.is_empty());
    debug_assert!(lits.len() <= MAX_VERBATIM_RUN);

    if lits.len() == 1 {
        outp.put_byte(VERBATIM_BYTE)?;
    } else {
        outp.put_byte(VERBATIM_RUN)?;
        outp.put_byte(lits.len() as u8)?;
    }
    outp.put_slice(lits)
}

impl<'a> Codebook<'a> {
    fn compress_impl<O: OutputSink>(&self, inp: &[u8], outp: &mut O) -> Result<(), O::Error> {
        let mut pos = 0;
        // unmatched bytes are inp[lits_start..pos]
        let mut lits_start = 0;

        while pos < inp.len() {
            match self.longest_match(&inp[pos..]) {
                Some(m) => {
                    if lits_start < pos {
                        put_verbatim(outp, &inp[lits_start..pos])?;
                    }
                    outp.put_byte(m.code)?;
                    pos += m.len;
                    lits_start = pos;
                }
                None => {
                    pos += 1;
                    if pos - lits_start == MAX_VERBATIM_RUN {
                        put_verbatim(outp, &inp[lits_start..pos])?;
                        lits_start = pos;
                    }
                }
            }
        }

        // if there's anything leftover, output it
        if lits_start < pos {
            put_verbatim(outp, &inp[lits_start..pos])?;
        }

        trace!("compressed {} bytes into {}", inp.len(), outp.written());
        Ok(())
    }

    /// Compress the input into a preallocated buffer
    ///
    /// Returns the compressed size on success, or an error otherwise.
    /// A buffer of [max_compressed_len] bytes is always sufficient.
    pub fn compress_to_buf(&self, inp: &[u8], outp: &mut [u8]) -> Result<usize, CompressError> {
        let mut outp: BufOutput = outp.into();
        self.compress_impl(inp, &mut outp)?;
        Ok(outp.pos)
    }

    #[cfg(feature = "alloc")]
    /// Compress the input into a [Vec](alloc::vec::Vec)
    pub fn compress_to_vec(&self, inp: &[u8]) -> alloc::vec::Vec<u8> {
        let mut ret: VecOutput = alloc::vec::Vec::with_capacity(inp.len() / 2).into();
        into_ok(self.compress_impl(inp, &mut ret));
        ret.vec
    }
}

/// Compress the input into a preallocated buffer using the standard codebook
pub fn compress_to_buf(inp: &[u8], outp: &mut [u8]) -> Result<usize, CompressError> {
    SMAZ.compress_to_buf(inp, outp)
}

#[cfg(feature = "alloc")]
/// Compress the input using the standard codebook
pub fn compress(inp: &[u8]) -> alloc::vec::Vec<u8> {
    SMAZ.compress_to_vec(inp)
}
