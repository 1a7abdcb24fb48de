#![no_main]

use bytom_protocol::{parse_claim_output, AssetId, ClaimTxOutput};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() < 33 {
        return;
    }
    let mut id = [0u8; 32];
    id.copy_from_slice(&data[..32]);
    let cp_end = 33 + usize::from(data[32]).min(data.len() - 33);

    let mut out = ClaimTxOutput::new(AssetId(id), data.len() as u64, data[33..cp_end].to_vec());
    out.commitment_suffix = data[cp_end..].to_vec();

    let enc = out.to_bytes().expect("encode");
    let (got, n) = parse_claim_output(&enc).expect("decode");
    assert_eq!(n, enc.len());
    assert_eq!(got, out);
});
