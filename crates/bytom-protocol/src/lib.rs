pub mod asset;
pub mod claim_output;
pub mod constants;
pub mod error;
mod extensible;
pub mod output_commitment;
mod varint;
mod wire_read;
pub mod wrapped_output;

pub use asset::{AssetAmount, AssetId, ParseAssetIdError};
pub use claim_output::{parse_claim_output, ClaimTxOutput};
pub use error::{CodecError, ErrorCode, Stage};
pub use extensible::{read_extensible_string, write_extensible_string};
pub use output_commitment::OutputCommitment;
pub use varint::{
    encode_varint63, read_varint31, read_varint63, read_varint63_bytes, read_varstr31,
    write_varint31, write_varint63, write_varstr31,
};
pub use wire_read::Reader;
pub use wrapped_output::{OutputKind, TypedOutput, WrappedTxOutput};

#[cfg(test)]
mod tests;
