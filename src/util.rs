#[cfg(feature = "alloc")]
use core::convert::Infallible;

#[cfg(feature = "alloc")]
extern crate alloc;

/// Marker error for a [BufOutput] that ran out of space
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct OutputFull;

/// Internal abstraction for the two different types of outputs (slice vs Vec)
///
/// Note for all functions: we guarantee writing all the way up to the limit
pub(crate) trait OutputSink {
    type Error;

    /// Append a single byte
    fn put_byte(&mut self, b: u8) -> Result<(), Self::Error>;
    /// Append a run of bytes
    ///
    /// If this would overflow the output, as much as fits is written before
    /// returning the error.
    fn put_slice(&mut self, bytes: &[u8]) -> Result<(), Self::Error>;
    /// Number of bytes written so far
    fn written(&self) -> usize;
}

pub(crate) struct BufOutput<'a> {
    pub pos: usize,
    pub buf: &'a mut [u8],
}
impl<'a> From<&'a mut [u8]> for BufOutput<'a> {
    fn from(buf: &'a mut [u8]) -> Self {
        Self { pos: 0, buf }
    }
}
impl<'a> OutputSink for BufOutput<'a> {
    type Error = OutputFull;

    fn put_byte(&mut self, b: u8) -> Result<(), OutputFull> {
        if self.pos < self.buf.len() {
            self.buf[self.pos] = b;
            self.pos += 1;
            Ok(())
        } else {
            Err(OutputFull)
        }
    }

    fn put_slice(&mut self, bytes: &[u8]) -> Result<(), OutputFull> {
        let mut len = bytes.len();
        let mut did_overflow = false;
        if self.pos + len > self.buf.len() {
            did_overflow = true;
            len = self.buf.len() - self.pos;
        }

        self.buf[self.pos..self.pos + len].copy_from_slice(&bytes[..len]);
        self.pos += len;

        if did_overflow {
            Err(OutputFull)
        } else {
            Ok(())
        }
    }

    fn written(&self) -> usize {
        self.pos
    }
}

#[cfg(feature = "alloc")]
pub(crate) struct VecOutput {
    pub vec: alloc::vec::Vec<u8>,
}
#[cfg(feature = "alloc")]
impl From<alloc::vec::Vec<u8>> for VecOutput {
    fn from(vec: alloc::vec::Vec<u8>) -> Self {
        Self { vec }
    }
}
#[cfg(feature = "alloc")]
impl OutputSink for VecOutput {
    type Error = Infallible;

    fn put_byte(&mut self, b: u8) -> Result<(), Infallible> {
        self.vec.push(b);
        Ok(())
    }

    fn put_slice(&mut self, bytes: &[u8]) -> Result<(), Infallible> {
        self.vec.extend_from_slice(bytes);
        Ok(())
    }

    fn written(&self) -> usize {
        self.vec.len()
    }
}

/// Unwrap the result of writing into a sink that cannot fail
#[cfg(feature = "alloc")]
pub(crate) fn into_ok<T>(r: Result<T, Infallible>) -> T {
    match r {
        Ok(v) => v,
        Err(never) => match never {},
    }
}
