// SPDX-License-Identifier: MIT

use log::warn;

use crate::DecodeError;

/// What to do with attribute codes missing from the table in use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnknownAttributes {
    /// Skip the record.
    #[default]
    Drop,
    /// Keep the payload as opaque bytes, keyed by the raw code.
    Retain,
}

/// What to do when a small enum field holds a value without a name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnknownEnums {
    /// Abort the decode with an `UnknownEnumValue` error.
    #[default]
    Fail,
    /// Keep the raw integer and omit the symbolic name.
    Retain,
}

/// Decode-time knobs. Both policies apply to every table and every
/// nesting level of a decode call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeOptions {
    pub unknown_attributes: UnknownAttributes,
    pub unknown_enums: UnknownEnums,
}

impl DecodeOptions {
    /// Apply the unknown enum policy to a failed lookup: either hand the
    /// error back or swap in `raw`.
    pub(crate) fn degrade_enum<T>(
        &self,
        err: DecodeError,
        raw: T,
    ) -> Result<T, DecodeError> {
        match self.unknown_enums {
            UnknownEnums::Fail => Err(err),
            UnknownEnums::Retain => {
                warn!("keeping raw value: {err}");
                Ok(raw)
            }
        }
    }
}
