// SPDX-License-Identifier: MIT

use crate::{DecodeError, Parseable};

pub const LINK_HEADER_LEN: usize = 16;

buffer!(LinkMessageBuffer(LINK_HEADER_LEN) {
    interface_family: (u8, 0),
    link_layer_type: (u16, 2..4),
    link_index: (i32, 4..8),
    flags: (u32, 8..12),
    change_mask: (u32, 12..LINK_HEADER_LEN),
    payload: (slice, LINK_HEADER_LEN..),
});

/// The fixed `struct ifinfomsg` at the head of `RTM_*LINK` messages.
///
/// ```no_rust
/// 0                8                16              24               32
/// +----------------+----------------+----------------+----------------+
/// |interface family|    reserved    |         link layer type         |
/// +----------------+----------------+----------------+----------------+
/// |                             link index                            |
/// +----------------+----------------+----------------+----------------+
/// |                               flags                               |
/// +----------------+----------------+----------------+----------------+
/// |                            change mask                            |
/// +----------------+----------------+----------------+----------------+
/// ```
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub struct LinkHeader {
    /// Address family, `AF_UNSPEC` for links.
    pub interface_family: u8,
    /// Link type, one of the `ARPHRD_*` constants.
    pub link_layer_type: u16,
    pub index: i32,
    /// `IFF_*` flags.
    pub flags: u32,
    pub change_mask: u32,
}

impl<T: AsRef<[u8]>> Parseable<LinkMessageBuffer<T>> for LinkHeader {
    type Error = DecodeError;

    fn parse(buf: &LinkMessageBuffer<T>) -> Result<Self, DecodeError> {
        Ok(Self {
            interface_family: buf.interface_family(),
            link_layer_type: buf.link_layer_type(),
            index: buf.link_index(),
            flags: buf.flags(),
            change_mask: buf.change_mask(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    #[test]
    fn parse_header() {
        let mut bytes = vec![0u8, 0];
        bytes.extend_from_slice(&772u16.to_ne_bytes());
        bytes.extend_from_slice(&1i32.to_ne_bytes());
        bytes.extend_from_slice(&0x10049u32.to_ne_bytes());
        bytes.extend_from_slice(&0u32.to_ne_bytes());

        let buf = LinkMessageBuffer::new_checked(&bytes[..]).unwrap();
        assert!(buf.payload().is_empty());
        assert_eq!(
            LinkHeader::parse(&buf).unwrap(),
            LinkHeader {
                interface_family: 0,
                link_layer_type: 772,
                index: 1,
                flags: 0x10049,
                change_mask: 0,
            }
        );
    }

    #[test]
    fn truncated() {
        let bytes = [0u8; LINK_HEADER_LEN - 1];
        let err = LinkMessageBuffer::new_checked(&bytes[..]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TruncatedHeader);
    }
}
