use core::fmt;
use core::str::FromStr;
use std::io::Write;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::constants::ASSET_ID_BYTES;
use crate::error::CodecError;
use crate::varint::{read_varint63, write_varint63};
use crate::wire_read::Reader;

/// 32-byte asset identifier, written raw on the wire and as hex in text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AssetId(pub [u8; ASSET_ID_BYTES]);

impl AssetId {
    pub fn as_bytes(&self) -> &[u8; ASSET_ID_BYTES] {
        &self.0
    }

    pub fn read_from(r: &mut Reader<'_>) -> Result<Self, CodecError> {
        Ok(Self(r.read_array()?))
    }

    pub fn write_to<W: Write + ?Sized>(&self, w: &mut W) -> Result<usize, CodecError> {
        w.write_all(&self.0).map_err(|e| CodecError::sink(&e))?;
        Ok(ASSET_ID_BYTES)
    }
}

impl From<[u8; ASSET_ID_BYTES]> for AssetId {
    fn from(b: [u8; ASSET_ID_BYTES]) -> Self {
        Self(b)
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ParseAssetIdError {
    Hex(hex::FromHexError),
    Length(usize),
}

impl fmt::Display for ParseAssetIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseAssetIdError::Hex(e) => write!(f, "asset id: {e}"),
            ParseAssetIdError::Length(n) => {
                write!(f, "asset id: expected {ASSET_ID_BYTES} bytes, got {n}")
            }
        }
    }
}

impl std::error::Error for ParseAssetIdError {}

impl FromStr for AssetId {
    type Err = ParseAssetIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = hex::decode(s).map_err(ParseAssetIdError::Hex)?;
        let arr: [u8; ASSET_ID_BYTES] = bytes
            .as_slice()
            .try_into()
            .map_err(|_| ParseAssetIdError::Length(bytes.len()))?;
        Ok(Self(arr))
    }
}

impl Serialize for AssetId {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for AssetId {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let s = String::deserialize(d)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// How much of which asset an output carries.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetAmount {
    pub asset_id: AssetId,
    pub amount: u64,
}

impl AssetAmount {
    pub fn new(asset_id: AssetId, amount: u64) -> Self {
        Self { asset_id, amount }
    }

    pub fn read_from(r: &mut Reader<'_>) -> Result<Self, CodecError> {
        let asset_id = AssetId::read_from(r).map_err(|e| e.in_field("asset id"))?;
        let amount = read_varint63(r).map_err(|e| e.in_field("amount"))?;
        Ok(Self { asset_id, amount })
    }

    pub fn write_to<W: Write + ?Sized>(&self, w: &mut W) -> Result<usize, CodecError> {
        let n = self
            .asset_id
            .write_to(w)
            .map_err(|e| e.in_field("asset id"))?;
        let m = write_varint63(w, self.amount).map_err(|e| e.in_field("amount"))?;
        Ok(n + m)
    }
}
