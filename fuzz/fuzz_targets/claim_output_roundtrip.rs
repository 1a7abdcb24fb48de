#![no_main]

use bytom_protocol::parse_claim_output;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok((out, n)) = parse_claim_output(data) else {
        return;
    };
    let enc = out.to_bytes().expect("decoded output re-encodes");

    // Version and commitment come back byte-for-byte; the witness is always
    // re-emitted empty.
    let head = enc.len() - 1;
    if enc[..head] != data[..head] {
        panic!("re-encoded prefix differs: got={:02x?} want={:02x?}", &enc[..head], &data[..head]);
    }
    if enc[head] != 0x00 {
        panic!("witness echoed back");
    }

    let (again, m) = parse_claim_output(&enc).expect("re-encoded output decodes");
    assert_eq!(again, out);
    assert_eq!(m, enc.len());
    assert!(m <= n);
});
