// SPDX-License-Identifier: MIT

use std::{fmt::Write, mem::size_of};

use log::debug;
use pastey::paste;

use crate::DecodeError;

/// Format `payload` as colon separated, lower case hex octets
/// (`00:1b:21:3a:4f:c0`).
pub fn format_hex(payload: &[u8]) -> String {
    let mut out = String::with_capacity(payload.len() * 3);
    for (i, byte) in payload.iter().enumerate() {
        if i > 0 {
            out.push(':');
        }
        // writing into a String cannot fail
        let _ = write!(out, "{byte:02x}");
    }
    out
}

/// Link-layer addresses have no fixed size across hardware types
/// (6 bytes for ethernet, 20 for infiniband, 4 for ipip tunnels...), the
/// attribute length decides.
pub fn parse_link_address(payload: &[u8]) -> Result<String, DecodeError> {
    if payload.is_empty() {
        return Err(DecodeError::short_payload("link-layer address", 1, 0));
    }
    Ok(format_hex(payload))
}

/// Copy exactly `length` bytes from the head of `payload`.
pub fn parse_hex(payload: &[u8], length: usize) -> Result<Vec<u8>, DecodeError> {
    if payload.len() < length {
        return Err(DecodeError::short_payload(
            "opaque region",
            length,
            payload.len(),
        ));
    }
    Ok(payload[..length].to_vec())
}

pub fn parse_string(payload: &[u8]) -> Result<String, DecodeError> {
    // A missing terminator is tolerated: the string then runs to the end
    // of the payload.
    let end = payload
        .iter()
        .position(|&b| b == 0)
        .unwrap_or(payload.len());
    Ok(String::from_utf8_lossy(&payload[..end]).into_owned())
}

// Integers are read from the head of the payload. Anything past the
// width of the type is left alone, the record length still decides where
// the next record starts.
fn number_bytes(payload: &[u8], size: usize) -> Result<&[u8], DecodeError> {
    if payload.len() < size {
        return Err(DecodeError::invalid_number(size, payload.len()));
    }
    if payload.len() > size {
        debug!(
            "ignoring {} bytes past a {size} byte number",
            payload.len() - size
        );
    }
    Ok(&payload[..size])
}

pub fn parse_u8(payload: &[u8]) -> Result<u8, DecodeError> {
    Ok(number_bytes(payload, 1)?[0])
}

macro_rules! gen_int_parser {
    ( $($data_type:ty,)+ ) => {
        $(

            paste! {
                pub fn [<parse_ $data_type >](
                    payload: &[u8]
                ) -> Result<$data_type, DecodeError> {
                    let bytes = number_bytes(payload, size_of::<$data_type>())?;
                    let mut data = [0u8; size_of::<$data_type>()];
                    data.copy_from_slice(bytes);
                    Ok(<$data_type>::from_ne_bytes(data))
                }
            }
        )+
    }
}

gen_int_parser!(u16, u32, i32,);
