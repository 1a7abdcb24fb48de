use bytom_protocol::{parse_claim_output, AssetId, ClaimTxOutput};
use serde::Serialize;

use crate::client::CliError;

#[derive(Debug, Serialize)]
pub struct OutputView {
    pub asset_version: u64,
    pub asset_id: AssetId,
    pub amount: u64,
    pub vm_version: u64,
    pub control_program: String,
    pub commitment_suffix: String,
    pub commitment_hash: String,
    pub consumed: usize,
}

pub fn decode_output(output_hex: &str) -> Result<OutputView, CliError> {
    let bytes = hex::decode(output_hex.trim())
        .map_err(|e| CliError::LocalExe(format!("decode-output: {e}")))?;
    let (out, consumed) = parse_claim_output(&bytes)
        .map_err(|e| CliError::LocalExe(format!("decode-output: {e}")))?;
    if consumed != bytes.len() {
        return Err(CliError::LocalExe(format!(
            "decode-output: {} trailing bytes",
            bytes.len() - consumed
        )));
    }
    let hash = out
        .commitment_hash()
        .map_err(|e| CliError::LocalExe(format!("decode-output: {e}")))?;

    let oc = &out.output_commitment;
    Ok(OutputView {
        asset_version: out.asset_version,
        asset_id: oc.asset_amount.asset_id,
        amount: oc.asset_amount.amount,
        vm_version: oc.vm_version,
        control_program: hex::encode(&oc.control_program),
        commitment_suffix: hex::encode(&out.commitment_suffix),
        commitment_hash: hex::encode(hash),
        consumed,
    })
}

pub fn encode_output(
    asset_id: &str,
    amount: &str,
    control_program: &str,
) -> Result<String, CliError> {
    let asset_id: AssetId = asset_id
        .parse()
        .map_err(|e| CliError::LocalExe(format!("encode-output: {e}")))?;
    let amount = amount
        .parse::<u64>()
        .map_err(|e| CliError::LocalExe(format!("encode-output: amount: {e}")))?;
    let control_program = hex::decode(control_program)
        .map_err(|e| CliError::LocalExe(format!("encode-output: control program: {e}")))?;

    let bytes = ClaimTxOutput::new(asset_id, amount, control_program)
        .to_bytes()
        .map_err(|e| CliError::LocalExe(format!("encode-output: {e}")))?;
    Ok(hex::encode(bytes))
}
