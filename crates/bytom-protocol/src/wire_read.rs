use crate::error::CodecError;

/// Sequential reader over a borrowed byte slice.
///
/// Every read is bounds-checked against the slice, so a sub-reader built over
/// an envelope body can never consume bytes past the envelope.
pub struct Reader<'a> {
    b: &'a [u8],
    off: usize,
}

impl<'a> Reader<'a> {
    pub fn new(b: &'a [u8]) -> Self {
        Self { b, off: 0 }
    }

    pub fn offset(&self) -> usize {
        self.off
    }

    pub fn remaining(&self) -> usize {
        self.b.len() - self.off
    }

    /// The unread tail of the slice.
    pub fn rest(&self) -> &'a [u8] {
        &self.b[self.off..]
    }

    pub fn read_u8(&mut self) -> Result<u8, CodecError> {
        if self.off + 1 > self.b.len() {
            return Err(CodecError::malformed("unexpected EOF (u8)"));
        }
        let v = self.b[self.off];
        self.off += 1;
        Ok(v)
    }

    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8], CodecError> {
        if n > self.remaining() {
            return Err(CodecError::malformed("unexpected EOF (bytes)"));
        }
        let v = &self.b[self.off..self.off + n];
        self.off += n;
        Ok(v)
    }

    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N], CodecError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read_bytes(N)?);
        Ok(out)
    }
}
