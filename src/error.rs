// SPDX-License-Identifier: MIT

use std::fmt;

pub trait ErrorContext<T: std::fmt::Display> {
    fn context(self, msg: T) -> Self;
}

/// The class of a [`DecodeError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// The input is shorter than the fixed message header.
    TruncatedHeader,
    /// An attribute header or its declared length runs past the
    /// available bytes.
    TruncatedAttribute,
    /// An attribute stream does not end exactly on its declared length.
    LengthMismatch,
    /// A leaf or struct decoder got fewer bytes than it needs.
    ShortPayload,
    /// A small kernel-defined code space received a value without a
    /// symbolic name.
    UnknownEnumValue,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::TruncatedHeader => "truncated header",
            Self::TruncatedAttribute => "truncated attribute",
            Self::LengthMismatch => "length mismatch",
            Self::ShortPayload => "short payload",
            Self::UnknownEnumValue => "unknown enum value",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeError {
    kind: ErrorKind,
    offset: Option<usize>,
    msg: String,
}

impl<T: std::fmt::Display> ErrorContext<T> for DecodeError {
    fn context(self, msg: T) -> Self {
        Self {
            msg: format!("{} caused by {}", msg, self.msg),
            ..self
        }
    }
}

impl<T, M> ErrorContext<M> for Result<T, DecodeError>
where
    M: std::fmt::Display,
{
    fn context(self, msg: M) -> Result<T, DecodeError> {
        match self {
            Ok(t) => Ok(t),
            Err(e) => Err(e.context(msg)),
        }
    }
}

impl std::fmt::Display for DecodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.offset {
            Some(offset) => {
                write!(f, "{} at offset {offset}: {}", self.kind, self.msg)
            }
            None => write!(f, "{}: {}", self.kind, self.msg),
        }
    }
}

impl std::error::Error for DecodeError {}

impl DecodeError {
    fn new(kind: ErrorKind, msg: String) -> Self {
        Self {
            kind,
            offset: None,
            msg,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Absolute byte offset, within the decoded message, of the record
    /// that failed. `None` when the error was raised outside of an
    /// attribute walk.
    pub fn offset(&self) -> Option<usize> {
        self.offset
    }

    /// Record `offset` unless a more precise, inner offset is already
    /// known.
    pub fn at(mut self, offset: usize) -> Self {
        if self.offset.is_none() {
            self.offset = Some(offset);
        }
        self
    }

    pub fn truncated_header(
        name: &str,
        received: usize,
        minimum_length: usize,
    ) -> Self {
        Self::new(
            ErrorKind::TruncatedHeader,
            format!(
                "Invalid buffer {name}. Expected at least {minimum_length} \
                 bytes, received {received} bytes"
            ),
        )
    }

    pub fn short_payload(
        name: &str,
        expected: usize,
        received: usize,
    ) -> Self {
        Self::new(
            ErrorKind::ShortPayload,
            format!(
                "Invalid {name}. Expected {expected} bytes, received \
                 {received} bytes"
            ),
        )
    }

    pub fn invalid_number(expected: usize, received: usize) -> Self {
        Self::short_payload("number", expected, received)
    }

    pub fn unknown_enum_value(name: &str, value: u64) -> Self {
        Self::new(
            ErrorKind::UnknownEnumValue,
            format!("{name} has no symbolic name for value {value}"),
        )
    }

    pub fn nla_buffer_too_small(buffer_len: usize, nla_len: usize) -> Self {
        Self::new(
            ErrorKind::TruncatedAttribute,
            format!(
                "buffer has length {buffer_len}, but an NLA header is \
                 {nla_len} bytes"
            ),
        )
    }

    pub fn nla_length_mismatch(buffer_len: usize, nla_len: usize) -> Self {
        Self::new(
            ErrorKind::TruncatedAttribute,
            format!(
                "buffer has length: {buffer_len}, but the NLA is {nla_len} \
                 bytes"
            ),
        )
    }

    pub fn nla_invalid_length(buffer_len: usize, nla_len: usize) -> Self {
        Self::new(
            ErrorKind::TruncatedAttribute,
            format!(
                "NLA has invalid length: {nla_len} (should be at least \
                 {buffer_len} bytes)"
            ),
        )
    }

    pub fn stream_length_mismatch(declared: usize, walked: usize) -> Self {
        Self::new(
            ErrorKind::LengthMismatch,
            format!(
                "attribute stream declared {declared} bytes, but its \
                 records span {walked} bytes"
            ),
        )
    }

    pub fn declared_length_exceeds_buffer(
        declared: usize,
        buffer_len: usize,
    ) -> Self {
        Self::new(
            ErrorKind::LengthMismatch,
            format!(
                "declared length is {declared} bytes, but only {buffer_len} \
                 bytes are available"
            ),
        )
    }
}
