//! Extensible strings: a varstr31 envelope whose body starts with the fields a
//! reader understands and may end with bytes appended by a newer protocol
//! version. The tail is handed back verbatim so re-encoding reproduces the
//! envelope exactly.

use std::io::Write;

use crate::error::CodecError;
use crate::varint::{read_varstr31, write_varstr31};
use crate::wire_read::Reader;

/// Reads one envelope, lets `known_fields` consume what it understands from a
/// reader bounded by the envelope body, and returns the unconsumed tail.
pub fn read_extensible_string<F>(r: &mut Reader<'_>, known_fields: F) -> Result<Vec<u8>, CodecError>
where
    F: FnOnce(&mut Reader<'_>) -> Result<(), CodecError>,
{
    let body = read_varstr31(r)?;
    let mut sub = Reader::new(body);
    known_fields(&mut sub)?;
    Ok(sub.rest().to_vec())
}

/// Writes `known_fields` followed by `suffix` as one envelope.
pub fn write_extensible_string<W, F>(
    w: &mut W,
    suffix: &[u8],
    known_fields: F,
) -> Result<usize, CodecError>
where
    W: Write + ?Sized,
    F: FnOnce(&mut Vec<u8>) -> Result<(), CodecError>,
{
    let mut body = Vec::new();
    known_fields(&mut body)?;
    body.extend_from_slice(suffix);
    write_varstr31(w, &body)
}
