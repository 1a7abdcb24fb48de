#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok((n, nbytes)) = bytom_protocol::read_varint63_bytes(data) else {
        return;
    };
    let prefix = &data[..nbytes];
    let mut enc = Vec::new();
    bytom_protocol::encode_varint63(n, &mut enc).expect("decoded value is in range");
    if enc != prefix {
        panic!("non-minimal or mismatch: got={enc:02x?} want_prefix={prefix:02x?}");
    }
});
