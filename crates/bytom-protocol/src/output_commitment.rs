use std::io::Write;

use sha3::{Digest, Sha3_256};
use tracing::debug;

use crate::asset::AssetAmount;
use crate::constants::CURRENT_ASSET_VERSION;
use crate::error::CodecError;
use crate::extensible::{read_extensible_string, write_extensible_string};
use crate::varint::{read_varint63, read_varstr31, write_varint63, write_varstr31};
use crate::wire_read::Reader;

/// Core payload of an output: what it carries and who may spend it.
///
/// The commitment is written as an extensible string. Only asset version 1
/// has a known field layout; under any other version every byte of the
/// envelope body is treated as suffix and passed through untouched.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OutputCommitment {
    pub asset_amount: AssetAmount,
    pub vm_version: u64,
    pub control_program: Vec<u8>,
}

impl OutputCommitment {
    /// Decodes the envelope into `self` and returns the bytes that followed
    /// the known fields. Fields not present under `asset_version` are left at
    /// their defaults.
    pub fn read_from(
        &mut self,
        r: &mut Reader<'_>,
        asset_version: u64,
    ) -> Result<Vec<u8>, CodecError> {
        *self = OutputCommitment::default();
        let suffix = read_extensible_string(r, |r| {
            if asset_version != CURRENT_ASSET_VERSION {
                return Ok(());
            }
            self.asset_amount = AssetAmount::read_from(r)?;
            self.vm_version = read_varint63(r).map_err(|e| e.in_field("vm version"))?;
            self.control_program = read_varstr31(r)
                .map_err(|e| e.in_field("control program"))?
                .to_vec();
            Ok(())
        })?;

        if !suffix.is_empty() {
            debug!(
                asset_version,
                suffix_len = suffix.len(),
                "preserving unknown output commitment suffix"
            );
        }
        Ok(suffix)
    }

    pub fn write_extensible_string<W: Write + ?Sized>(
        &self,
        w: &mut W,
        suffix: &[u8],
        asset_version: u64,
    ) -> Result<usize, CodecError> {
        write_extensible_string(w, suffix, |body| self.write_contents(body, asset_version))
    }

    fn write_contents(&self, w: &mut Vec<u8>, asset_version: u64) -> Result<(), CodecError> {
        if asset_version != CURRENT_ASSET_VERSION {
            return Ok(());
        }
        self.asset_amount.write_to(w)?;
        write_varint63(w, self.vm_version).map_err(|e| e.in_field("vm version"))?;
        write_varstr31(w, &self.control_program).map_err(|e| e.in_field("control program"))?;
        Ok(())
    }

    /// The exact envelope bytes, length prefix included.
    pub fn commitment_bytes(
        &self,
        suffix: &[u8],
        asset_version: u64,
    ) -> Result<Vec<u8>, CodecError> {
        let mut out = Vec::new();
        self.write_extensible_string(&mut out, suffix, asset_version)?;
        Ok(out)
    }

    /// SHA3-256 over [`Self::commitment_bytes`].
    pub fn commitment_hash(
        &self,
        suffix: &[u8],
        asset_version: u64,
    ) -> Result<[u8; 32], CodecError> {
        let bytes = self.commitment_bytes(suffix, asset_version)?;
        let mut h = Sha3_256::new();
        h.update(&bytes);
        let mut out = [0u8; 32];
        out.copy_from_slice(&h.finalize());
        Ok(out)
    }
}
