use core::fmt;
use std::io::Write;

use crate::asset::AssetAmount;
use crate::claim_output::ClaimTxOutput;
use crate::error::CodecError;
use crate::wire_read::Reader;

/// Codec surface every output variant provides to the transaction layer.
pub trait WrappedTxOutput {
    /// Decodes the variant's fields from `r`, replacing the current ones.
    fn read_from(&mut self, r: &mut Reader<'_>) -> Result<(), CodecError>;

    /// Writes the full output record, witness included.
    fn write_to(&self, w: &mut dyn Write) -> Result<(), CodecError>;

    /// Writes only the commitment envelope, as hashed into identifiers.
    fn write_commitment(&self, w: &mut dyn Write) -> Result<(), CodecError>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OutputKind {
    Claim,
}

impl fmt::Display for OutputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputKind::Claim => f.write_str("claim"),
        }
    }
}

/// An output of any supported kind. New kinds become new variants; callers
/// keep going through [`WrappedTxOutput`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TypedOutput {
    Claim(ClaimTxOutput),
}

impl TypedOutput {
    /// A blank variant of `kind`, ready for [`WrappedTxOutput::read_from`].
    pub fn empty(kind: OutputKind) -> Self {
        match kind {
            OutputKind::Claim => TypedOutput::Claim(ClaimTxOutput::default()),
        }
    }

    pub fn decode(kind: OutputKind, r: &mut Reader<'_>) -> Result<Self, CodecError> {
        let mut out = Self::empty(kind);
        out.read_from(r)?;
        Ok(out)
    }

    pub fn kind(&self) -> OutputKind {
        match self {
            TypedOutput::Claim(_) => OutputKind::Claim,
        }
    }

    pub fn asset_amount(&self) -> &AssetAmount {
        match self {
            TypedOutput::Claim(o) => o.asset_amount(),
        }
    }

    pub fn control_program(&self) -> &[u8] {
        match self {
            TypedOutput::Claim(o) => o.control_program(),
        }
    }
}

impl From<ClaimTxOutput> for TypedOutput {
    fn from(o: ClaimTxOutput) -> Self {
        TypedOutput::Claim(o)
    }
}

impl WrappedTxOutput for TypedOutput {
    fn read_from(&mut self, r: &mut Reader<'_>) -> Result<(), CodecError> {
        match self {
            TypedOutput::Claim(o) => o.read_from(r),
        }
    }

    fn write_to(&self, w: &mut dyn Write) -> Result<(), CodecError> {
        match self {
            TypedOutput::Claim(o) => o.write_to(w),
        }
    }

    fn write_commitment(&self, w: &mut dyn Write) -> Result<(), CodecError> {
        match self {
            TypedOutput::Claim(o) => o.write_commitment(w),
        }
    }
}
