use std::io::Write;

use crate::constants::{MAX_VARINT31, MAX_VARINT63, MAX_VARINT_LEN64};
use crate::error::{CodecError, ErrorCode};
use crate::wire_read::Reader;

fn read_uvarint(r: &mut Reader<'_>) -> Result<u64, CodecError> {
    let mut x: u64 = 0;
    let mut shift: u32 = 0;
    for i in 0..MAX_VARINT_LEN64 {
        let b = r.read_u8()?;
        if b < 0x80 {
            if i == MAX_VARINT_LEN64 - 1 && b > 1 {
                return Err(CodecError::malformed("varint overflows 64 bits"));
            }
            // Accepted input must re-encode to the same bytes.
            if i > 0 && b == 0 {
                return Err(CodecError::malformed("non-minimal varint"));
            }
            return Ok(x | (u64::from(b) << shift));
        }
        x |= u64::from(b & 0x7f) << shift;
        shift += 7;
    }
    Err(CodecError::malformed("varint overflows 64 bits"))
}

fn encode_uvarint(mut v: u64, buf: &mut [u8; MAX_VARINT_LEN64]) -> usize {
    let mut i = 0;
    while v >= 0x80 {
        buf[i] = (v as u8) | 0x80;
        v >>= 7;
        i += 1;
    }
    buf[i] = v as u8;
    i + 1
}

fn write_uvarint<W: Write + ?Sized>(w: &mut W, v: u64) -> Result<usize, CodecError> {
    let mut buf = [0u8; MAX_VARINT_LEN64];
    let n = encode_uvarint(v, &mut buf);
    w.write_all(&buf[..n]).map_err(|e| CodecError::sink(&e))?;
    Ok(n)
}

/// Reads a LEB128 varint whose value must fit in 63 bits.
///
/// Padded encodings such as `80 00` are rejected with `non-minimal varint`,
/// so every accepted byte string re-encodes identically. Some other decoders
/// of this format accept them.
pub fn read_varint63(r: &mut Reader<'_>) -> Result<u64, CodecError> {
    let v = read_uvarint(r)?;
    if v > MAX_VARINT63 {
        return Err(CodecError::malformed("varint63 out of range"));
    }
    Ok(v)
}

/// Reads a LEB128 varint whose value must fit in 31 bits.
pub fn read_varint31(r: &mut Reader<'_>) -> Result<u32, CodecError> {
    let v = read_uvarint(r)?;
    if v > MAX_VARINT31 {
        return Err(CodecError::malformed("varint31 out of range"));
    }
    Ok(v as u32)
}

pub fn write_varint63<W: Write + ?Sized>(w: &mut W, v: u64) -> Result<usize, CodecError> {
    if v > MAX_VARINT63 {
        return Err(CodecError::new(
            ErrorCode::ValueOutOfRange,
            "varint63 out of range",
        ));
    }
    write_uvarint(w, v)
}

pub fn write_varint31<W: Write + ?Sized>(w: &mut W, v: u64) -> Result<usize, CodecError> {
    if v > MAX_VARINT31 {
        return Err(CodecError::new(
            ErrorCode::ValueOutOfRange,
            "varint31 out of range",
        ));
    }
    write_uvarint(w, v)
}

/// Reads a varint31 length followed by that many bytes.
pub fn read_varstr31<'a>(r: &mut Reader<'a>) -> Result<&'a [u8], CodecError> {
    let len = read_varint31(r)? as usize;
    if len > r.remaining() {
        return Err(CodecError::malformed("varstr31 length exceeds input"));
    }
    r.read_bytes(len)
}

pub fn write_varstr31<W: Write + ?Sized>(w: &mut W, s: &[u8]) -> Result<usize, CodecError> {
    let n = write_varint31(w, s.len() as u64)?;
    w.write_all(s).map_err(|e| CodecError::sink(&e))?;
    Ok(n + s.len())
}

/// Convenience for callers holding a plain slice; returns the value and the
/// number of bytes it occupied.
pub fn read_varint63_bytes(b: &[u8]) -> Result<(u64, usize), CodecError> {
    let mut r = Reader::new(b);
    let v = read_varint63(&mut r)?;
    Ok((v, r.offset()))
}

pub fn encode_varint63(v: u64, out: &mut Vec<u8>) -> Result<usize, CodecError> {
    write_varint63(out, v)
}
