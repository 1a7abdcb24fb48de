use std::io::{self, Write};

use sha3::{Digest, Sha3_256};

use crate::constants::*;
use crate::error::{ErrorCode, Stage};
use crate::{
    encode_varint63, parse_claim_output, read_extensible_string, read_varint63_bytes,
    read_varstr31, write_varint63, write_varstr31, AssetId, ClaimTxOutput, OutputKind, Reader,
    TypedOutput, WrappedTxOutput,
};

fn asset_one() -> AssetId {
    let mut b = [0u8; 32];
    b[31] = 0x01;
    AssetId(b)
}

fn commitment_body() -> Vec<u8> {
    let mut b = Vec::new();
    b.extend_from_slice(asset_one().as_bytes());
    b.extend_from_slice(&[0xe8, 0x07]); // amount = 1000
    b.push(0x01); // vm_version
    b.extend_from_slice(&[0x02, 0xab, 0xcd]); // control_program
    b
}

fn output_bytes(asset_version: u8, body: &[u8], witness: &[u8]) -> Vec<u8> {
    assert!(body.len() < 0x80 && witness.len() < 0x80);
    let mut b = vec![asset_version];
    b.push(body.len() as u8);
    b.extend_from_slice(body);
    b.push(witness.len() as u8);
    b.extend_from_slice(witness);
    b
}

struct RejectingSink;

impl Write for RejectingSink {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn claim_output_scenario_bytes() {
    let out = ClaimTxOutput::new(asset_one(), 1000, vec![0xab, 0xcd]);
    let b = out.to_bytes().expect("encode");
    assert_eq!(b, output_bytes(0x01, &commitment_body(), &[]));
    assert_eq!(b.len(), 1 + 1 + 38 + 1);

    let (got, n) = parse_claim_output(&b).expect("decode");
    assert_eq!(n, b.len());
    assert_eq!(got.asset_version, CURRENT_ASSET_VERSION);
    assert_eq!(got.asset_amount().asset_id, asset_one());
    assert_eq!(got.asset_amount().amount, 1000);
    assert_eq!(got.output_commitment.vm_version, CURRENT_VM_VERSION);
    assert_eq!(got.control_program(), &[0xab, 0xcd]);
    assert!(got.commitment_suffix.is_empty());
    assert_eq!(got, out);
    assert_eq!(got.to_bytes().expect("re-encode"), b);
}

#[test]
fn varint63_boundaries() {
    let cases: &[(u64, &[u8])] = &[
        (0, &[0x00]),
        (1, &[0x01]),
        (127, &[0x7f]),
        (128, &[0x80, 0x01]),
        (
            MAX_VARINT63,
            &[0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0x7f],
        ),
    ];
    for (v, want) in cases {
        let mut enc = Vec::new();
        let n = encode_varint63(*v, &mut enc).expect("encode");
        assert_eq!(enc, *want);
        assert_eq!(n, want.len());
        assert_eq!(read_varint63_bytes(&enc).expect("decode"), (*v, want.len()));
    }
}

#[test]
fn varint63_out_of_range() {
    // 2^63: fits in 64 bits but not in the 63-bit range.
    let mut b = vec![0x80; 9];
    b.push(0x01);
    let err = read_varint63_bytes(&b).unwrap_err();
    assert_eq!(err.code, ErrorCode::MalformedEncoding);

    // Eleven continuation bytes overflow 64 bits outright.
    let err = read_varint63_bytes(&[0xff; 11]).unwrap_err();
    assert_eq!(err.code, ErrorCode::MalformedEncoding);

    // Tenth byte carrying more than one bit.
    let mut b = vec![0xff; 9];
    b.push(0x02);
    let err = read_varint63_bytes(&b).unwrap_err();
    assert_eq!(err.code, ErrorCode::MalformedEncoding);

    let mut out = Vec::new();
    let err = write_varint63(&mut out, MAX_VARINT63 + 1).unwrap_err();
    assert_eq!(err.code, ErrorCode::ValueOutOfRange);
    assert!(out.is_empty());
}

#[test]
fn varint63_nonminimal() {
    // 0 padded with an empty continuation group.
    let err = read_varint63_bytes(&[0x80, 0x00]).unwrap_err();
    assert_eq!(err.code, ErrorCode::MalformedEncoding);
    assert_eq!(err.msg, "non-minimal varint");

    // 1 padded the same way.
    let err = read_varint63_bytes(&[0x81, 0x80, 0x00]).unwrap_err();
    assert_eq!(err.code, ErrorCode::MalformedEncoding);

    // Non-minimal envelope length.
    let mut b = vec![0x01, 0xa6, 0x00];
    b.extend_from_slice(&commitment_body());
    b.push(0x00);
    let err = parse_claim_output(&b).unwrap_err();
    assert_eq!(err.stage, Some(Stage::Commitment));
}

#[test]
fn varint63_truncated() {
    let err = read_varint63_bytes(&[0x80, 0x80]).unwrap_err();
    assert_eq!(err.code, ErrorCode::MalformedEncoding);
    let err = read_varint63_bytes(&[]).unwrap_err();
    assert_eq!(err.code, ErrorCode::MalformedEncoding);
}

#[test]
fn varstr31_roundtrip_and_limits() {
    let mut out = Vec::new();
    let n = write_varstr31(&mut out, &[0x0a, 0x0b, 0x0c]).expect("encode");
    assert_eq!(n, 4);
    assert_eq!(out, vec![0x03, 0x0a, 0x0b, 0x0c]);

    let mut r = Reader::new(&out);
    assert_eq!(read_varstr31(&mut r).expect("decode"), &[0x0a, 0x0b, 0x0c]);
    assert_eq!(r.remaining(), 0);

    // Declared length larger than the input.
    let mut r = Reader::new(&[0x05, 0x01, 0x02]);
    let err = read_varstr31(&mut r).unwrap_err();
    assert_eq!(err.code, ErrorCode::MalformedEncoding);

    // Length 2^31 does not fit the 31-bit length field.
    let mut r = Reader::new(&[0x80, 0x80, 0x80, 0x80, 0x08]);
    let err = read_varstr31(&mut r).unwrap_err();
    assert_eq!(err.code, ErrorCode::MalformedEncoding);
}

#[test]
fn extensible_string_returns_unread_tail() {
    let b = [0x04, 0x01, 0x02, 0x03, 0x04, 0xff];
    let mut r = Reader::new(&b);
    let suffix = read_extensible_string(&mut r, |sub| {
        sub.read_u8()?;
        Ok(())
    })
    .expect("read");
    assert_eq!(suffix, vec![0x02, 0x03, 0x04]);
    // The byte after the envelope is untouched.
    assert_eq!(r.offset(), 5);
}

#[test]
fn commitment_suffix_preserved() {
    let mut body = commitment_body();
    body.extend_from_slice(&[0xde, 0xad, 0xbe]);
    let b = output_bytes(0x01, &body, &[]);

    let (out, _) = parse_claim_output(&b).expect("decode");
    assert_eq!(out.commitment_suffix, vec![0xde, 0xad, 0xbe]);
    assert_eq!(out.control_program(), &[0xab, 0xcd]);
    assert_eq!(out.to_bytes().expect("re-encode"), b);
}

#[test]
fn unknown_asset_version_passes_through() {
    let body = [0x09, 0x08, 0x07, 0x06];
    let b = output_bytes(0x02, &body, &[]);

    let (out, n) = parse_claim_output(&b).expect("decode");
    assert_eq!(n, b.len());
    assert_eq!(out.asset_version, 2);
    assert_eq!(out.commitment_suffix, body.to_vec());
    assert!(out.control_program().is_empty());
    assert_eq!(out.to_bytes().expect("re-encode"), b);
}

#[test]
fn witness_is_discarded() {
    let b = output_bytes(0x01, &commitment_body(), &[0x01, 0x02, 0x03]);
    let (out, n) = parse_claim_output(&b).expect("decode");
    assert_eq!(n, b.len());

    let re = out.to_bytes().expect("re-encode");
    assert_eq!(re, output_bytes(0x01, &commitment_body(), &[]));
    assert_eq!(re.last(), Some(&0x00));
}

#[test]
fn envelope_shorter_than_known_fields() {
    let b = output_bytes(0x01, &[0u8; 10], &[]);
    let err = parse_claim_output(&b).unwrap_err();
    assert_eq!(err.code, ErrorCode::MalformedEncoding);
    assert_eq!(err.stage, Some(Stage::Commitment));
    assert_eq!(err.field, Some("asset id"));
}

#[test]
fn control_program_length_exceeds_envelope() {
    let mut body = commitment_body();
    let cp_len_off = 32 + 2 + 1;
    body[cp_len_off] = 0x05;
    let b = output_bytes(0x01, &body, &[]);

    let err = parse_claim_output(&b).unwrap_err();
    assert_eq!(err.code, ErrorCode::MalformedEncoding);
    assert_eq!(err.stage, Some(Stage::Commitment));
    assert_eq!(err.field, Some("control program"));
}

#[test]
fn staged_read_errors() {
    let err = parse_claim_output(&[]).unwrap_err();
    assert_eq!(err.stage, Some(Stage::Version));
    assert_eq!(err.field, None);

    // Envelope length present, body missing.
    let err = parse_claim_output(&[0x01, 0x26]).unwrap_err();
    assert_eq!(err.stage, Some(Stage::Commitment));

    let mut b = output_bytes(0x01, &commitment_body(), &[]);
    b.pop();
    let err = parse_claim_output(&b).unwrap_err();
    assert_eq!(err.code, ErrorCode::MalformedEncoding);
    assert_eq!(err.stage, Some(Stage::Witness));
}

#[test]
fn staged_write_errors() {
    let out = ClaimTxOutput::new(asset_one(), 1000, vec![0xab, 0xcd]);
    let err = out.write_to(&mut RejectingSink).unwrap_err();
    assert_eq!(err.code, ErrorCode::SinkWriteFailure);
    assert_eq!(err.stage, Some(Stage::Version));
    assert_eq!(err.io_kind, Some(io::ErrorKind::BrokenPipe));

    let mut bad = out.clone();
    bad.output_commitment.asset_amount.amount = u64::MAX;
    let mut sink = Vec::new();
    let err = bad.write_to(&mut sink).unwrap_err();
    assert_eq!(err.code, ErrorCode::ValueOutOfRange);
    assert_eq!(err.stage, Some(Stage::Commitment));
    assert_eq!(err.field, Some("amount"));
    // The version had already gone out; nothing is rolled back.
    assert_eq!(sink, vec![0x01]);
}

#[test]
fn write_commitment_is_envelope_only() {
    let mut body = commitment_body();
    body.push(0x42);
    let b = output_bytes(0x01, &body, &[]);
    let (out, _) = parse_claim_output(&b).expect("decode");

    let mut commitment = Vec::new();
    out.write_commitment(&mut commitment).expect("commitment");
    assert_eq!(commitment, b[1..b.len() - 1].to_vec());

    let mut want = [0u8; 32];
    want.copy_from_slice(&Sha3_256::digest(&commitment));
    assert_eq!(out.commitment_hash().expect("hash"), want);
}

#[test]
fn typed_output_dispatch() {
    let claim = ClaimTxOutput::new(asset_one(), 7, vec![0x51]);
    let typed = TypedOutput::from(claim.clone());
    assert_eq!(typed.kind(), OutputKind::Claim);
    assert_eq!(typed.asset_amount().amount, 7);
    assert_eq!(typed.control_program(), &[0x51]);

    let mut via_enum = Vec::new();
    typed.write_to(&mut via_enum).expect("encode");
    assert_eq!(via_enum, claim.to_bytes().expect("encode"));

    let outputs: Vec<Box<dyn WrappedTxOutput>> = vec![Box::new(claim), Box::new(typed.clone())];
    let mut all = Vec::new();
    for o in &outputs {
        o.write_to(&mut all).expect("encode");
    }
    assert_eq!(all.len(), via_enum.len() * 2);

    let mut r = Reader::new(&all);
    let first = TypedOutput::decode(OutputKind::Claim, &mut r).expect("decode");
    let second = TypedOutput::decode(OutputKind::Claim, &mut r).expect("decode");
    assert_eq!(first, typed);
    assert_eq!(second, typed);
    assert_eq!(r.remaining(), 0);
}

#[test]
fn reused_output_resets_on_unknown_version() {
    let b = [0x02, 0x04, 0x09, 0x08, 0x07, 0x06, 0x00];

    let mut reused = TypedOutput::from(ClaimTxOutput::new(asset_one(), 1000, vec![0xab]));
    reused.read_from(&mut Reader::new(&b)).expect("decode");
    let fresh = TypedOutput::decode(OutputKind::Claim, &mut Reader::new(&b)).expect("decode");
    assert_eq!(reused, fresh);
    assert_eq!(reused.asset_amount().amount, 0);
    assert_eq!(reused.asset_amount().asset_id, AssetId::default());
    assert!(reused.control_program().is_empty());

    let mut re = Vec::new();
    reused.write_to(&mut re).expect("re-encode");
    assert_eq!(re, b);
}
