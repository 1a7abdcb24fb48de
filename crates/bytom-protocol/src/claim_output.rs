use std::io::Write;

use crate::asset::{AssetAmount, AssetId};
use crate::constants::{CURRENT_ASSET_VERSION, CURRENT_VM_VERSION};
use crate::error::{CodecError, Stage};
use crate::output_commitment::OutputCommitment;
use crate::varint::{read_varint63, read_varstr31, write_varint63, write_varstr31};
use crate::wire_read::Reader;
use crate::wrapped_output::WrappedTxOutput;

/// Top-level record of a claim output.
///
/// Wire layout: asset version (varint63), output commitment envelope,
/// witness (varstr31). The witness is skipped on read and always written
/// empty.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClaimTxOutput {
    pub asset_version: u64,
    pub output_commitment: OutputCommitment,
    /// Commitment bytes this version does not understand, kept verbatim.
    pub commitment_suffix: Vec<u8>,
}

impl ClaimTxOutput {
    pub fn new(asset_id: AssetId, amount: u64, control_program: Vec<u8>) -> Self {
        Self {
            asset_version: CURRENT_ASSET_VERSION,
            output_commitment: OutputCommitment {
                asset_amount: AssetAmount::new(asset_id, amount),
                vm_version: CURRENT_VM_VERSION,
                control_program,
            },
            commitment_suffix: Vec::new(),
        }
    }

    pub fn asset_amount(&self) -> &AssetAmount {
        &self.output_commitment.asset_amount
    }

    pub fn control_program(&self) -> &[u8] {
        &self.output_commitment.control_program
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, CodecError> {
        let mut out = Vec::new();
        self.write_to(&mut out)?;
        Ok(out)
    }

    pub fn commitment_hash(&self) -> Result<[u8; 32], CodecError> {
        self.output_commitment
            .commitment_hash(&self.commitment_suffix, self.asset_version)
    }
}

impl WrappedTxOutput for ClaimTxOutput {
    fn read_from(&mut self, r: &mut Reader<'_>) -> Result<(), CodecError> {
        self.asset_version = read_varint63(r).map_err(|e| e.in_stage(Stage::Version))?;

        self.commitment_suffix = self
            .output_commitment
            .read_from(r, self.asset_version)
            .map_err(|e| e.in_stage(Stage::Commitment))?;

        // Content is never inspected.
        read_varstr31(r).map_err(|e| e.in_stage(Stage::Witness))?;
        Ok(())
    }

    fn write_to(&self, w: &mut dyn Write) -> Result<(), CodecError> {
        write_varint63(w, self.asset_version).map_err(|e| e.in_stage(Stage::Version))?;
        self.write_commitment(w).map_err(|e| e.in_stage(Stage::Commitment))?;
        write_varstr31(w, &[]).map_err(|e| e.in_stage(Stage::Witness))?;
        Ok(())
    }

    fn write_commitment(&self, w: &mut dyn Write) -> Result<(), CodecError> {
        self.output_commitment
            .write_extensible_string(w, &self.commitment_suffix, self.asset_version)?;
        Ok(())
    }
}

/// Decodes one claim output from the front of `b`, returning it with the
/// number of bytes consumed.
pub fn parse_claim_output(b: &[u8]) -> Result<(ClaimTxOutput, usize), CodecError> {
    let mut r = Reader::new(b);
    let mut out = ClaimTxOutput::default();
    out.read_from(&mut r)?;
    Ok((out, r.offset()))
}
