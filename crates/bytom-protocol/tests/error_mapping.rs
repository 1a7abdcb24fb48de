use std::io;

use bytom_protocol::{CodecError, ErrorCode, Stage};

#[test]
fn error_code_as_str_covers_all_variants() {
    let cases: &[(ErrorCode, &str)] = &[
        (ErrorCode::MalformedEncoding, "MALFORMED_ENCODING"),
        (ErrorCode::ValueOutOfRange, "VALUE_OUT_OF_RANGE"),
        (ErrorCode::SinkWriteFailure, "SINK_WRITE_FAILURE"),
    ];

    for (code, want) in cases {
        assert_eq!(code.as_str(), *want);
    }
}

#[test]
fn codec_error_display() {
    let e = CodecError::new(ErrorCode::MalformedEncoding, "");
    assert_eq!(e.to_string(), "MALFORMED_ENCODING");

    let e = CodecError::malformed("unexpected EOF (bytes)")
        .in_field("control program")
        .in_stage(Stage::Commitment);
    assert_eq!(
        e.to_string(),
        "MALFORMED_ENCODING: output commitment: control program: unexpected EOF (bytes)"
    );
}

#[test]
fn first_tag_wins() {
    let e = CodecError::malformed("x")
        .in_field("amount")
        .in_field("asset id")
        .in_stage(Stage::Witness)
        .in_stage(Stage::Version);
    assert_eq!(e.field, Some("amount"));
    assert_eq!(e.stage, Some(Stage::Witness));
}

#[test]
fn sink_error_keeps_io_kind() {
    let e = CodecError::sink(&io::Error::new(io::ErrorKind::WriteZero, "full"));
    assert_eq!(e.code, ErrorCode::SinkWriteFailure);
    assert_eq!(e.io_kind, Some(io::ErrorKind::WriteZero));
    assert_eq!(e.to_string(), "SINK_WRITE_FAILURE: sink rejected write");
}
