use core::fmt;
use std::io;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorCode {
    /// Source ran out, a declared length could not be satisfied, or a varint
    /// left its usable range.
    MalformedEncoding,
    /// A value handed to a writer cannot be represented on the wire.
    ValueOutOfRange,
    /// The sink rejected a write.
    SinkWriteFailure,
}

impl ErrorCode {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MalformedEncoding => "MALFORMED_ENCODING",
            ErrorCode::ValueOutOfRange => "VALUE_OUT_OF_RANGE",
            ErrorCode::SinkWriteFailure => "SINK_WRITE_FAILURE",
        }
    }
}

/// Top-level section of an output record in which a failure happened.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    Version,
    Commitment,
    Witness,
}

impl Stage {
    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Version => "asset version",
            Stage::Commitment => "output commitment",
            Stage::Witness => "output witness",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CodecError {
    pub code: ErrorCode,
    pub msg: &'static str,
    pub stage: Option<Stage>,
    pub field: Option<&'static str>,
    pub io_kind: Option<io::ErrorKind>,
}

impl CodecError {
    pub fn new(code: ErrorCode, msg: &'static str) -> Self {
        Self {
            code,
            msg,
            stage: None,
            field: None,
            io_kind: None,
        }
    }

    pub fn malformed(msg: &'static str) -> Self {
        Self::new(ErrorCode::MalformedEncoding, msg)
    }

    pub fn sink(e: &io::Error) -> Self {
        Self {
            io_kind: Some(e.kind()),
            ..Self::new(ErrorCode::SinkWriteFailure, "sink rejected write")
        }
    }

    /// Tags the error with a field name unless an inner layer already did.
    pub fn in_field(mut self, field: &'static str) -> Self {
        if self.field.is_none() {
            self.field = Some(field);
        }
        self
    }

    /// Tags the error with a record stage unless an inner layer already did.
    pub fn in_stage(mut self, stage: Stage) -> Self {
        if self.stage.is_none() {
            self.stage = Some(stage);
        }
        self
    }
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code.as_str())?;
        if let Some(stage) = self.stage {
            write!(f, ": {}", stage.as_str())?;
        }
        if let Some(field) = self.field {
            write!(f, ": {field}")?;
        }
        if !self.msg.is_empty() {
            write!(f, ": {}", self.msg)?;
        }
        Ok(())
    }
}

impl std::error::Error for CodecError {}
