// SPDX-License-Identifier: MIT

//! `netlink-packet-ifinfo` decodes the rtnetlink messages that describe a
//! network interface (`RTM_NEWLINK`): the fixed `ifinfomsg` header
//! followed by a stream of netlink attributes (NLAs).
//!
//! The crate only decodes. Reading messages off a netlink socket,
//! splitting multipart dumps and checking sequence numbers is left to the
//! transport: it hands over the bytes of one message body and its
//! declared length.
//!
//! Attributes are decoded through [`AttributeTable`]s, one per parsing
//! context, that map an attribute code to a [`Decoder`] and a display
//! name. A decoder is either a leaf (integer, string, link-layer
//! address...), a fixed-layout kernel struct, a nested attribute stream
//! read with another table, or a sequence of regions. Regions whose
//! layout is not known are kept as [`Value::Opaque`] bytes instead of
//! being guessed.
//!
//! # Example
//!
//! ```rust
//! use netlink_packet_ifinfo::{
//!     link::constants::IFLA_MTU, DecodeOptions, LinkMessage, Value,
//! };
//!
//! // ifinfomsg: AF_UNSPEC, ARPHRD_ETHER, index 2, IFF_UP, no change mask
//! let mut buf = vec![0u8, 0];
//! buf.extend_from_slice(&1u16.to_ne_bytes());
//! buf.extend_from_slice(&2i32.to_ne_bytes());
//! buf.extend_from_slice(&1u32.to_ne_bytes());
//! buf.extend_from_slice(&0u32.to_ne_bytes());
//! // IFLA_MTU: 4 bytes of header, 4 bytes of value
//! buf.extend_from_slice(&8u16.to_ne_bytes());
//! buf.extend_from_slice(&IFLA_MTU.to_ne_bytes());
//! buf.extend_from_slice(&1500u32.to_ne_bytes());
//!
//! let msg = LinkMessage::decode(&buf, buf.len(), &DecodeOptions::default())
//!     .expect("failed to decode link message");
//! assert_eq!(msg.hardware_type, Some("ETHER"));
//! assert_eq!(msg.attributes.get("mtu"), Some(&Value::U32(1500)));
//! assert_eq!(msg.consumed(), buf.len());
//!
//! println!("{}", msg.to_attributes());
//! ```

use core::ops::Range;
/// Represent a multi-bytes field with a fixed size in a packet
pub(crate) type Field = Range<usize>;

#[macro_use]
mod macros;

mod error;
pub mod layout;
pub mod link;
mod nla;
mod options;
mod parsers;
mod table;
mod traits;
mod value;

pub use self::error::{DecodeError, ErrorContext, ErrorKind};
pub use self::link::{
    Arphrd, HardwareTypeLookup, LinkHeader, LinkMessage, LinkMessageBuffer,
    OperState, LINK_HEADER_LEN,
};
pub use self::nla::{
    nla_align, walk_lengths, NlaBuffer, NlasIterator, NLA_ALIGNTO,
    NLA_F_NESTED, NLA_F_NET_BYTEORDER, NLA_HEADER_SIZE, NLA_TYPE_MASK,
};
pub use self::options::{DecodeOptions, UnknownAttributes, UnknownEnums};
pub use self::parsers::{
    format_hex, parse_hex, parse_i32, parse_link_address, parse_string,
    parse_u16, parse_u32, parse_u8,
};
pub use self::table::{AttributeTable, Decoder, Leaf, Segment};
pub use self::traits::{Parseable, ParseableParametrized};
pub use self::value::{AttributeKey, Attributes, Value};
