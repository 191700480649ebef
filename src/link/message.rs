// SPDX-License-Identifier: MIT

use log::trace;

use super::{
    attributes::LINK_ATTRIBUTES,
    hardware::{Arphrd, HardwareTypeLookup},
    header::{LinkHeader, LinkMessageBuffer, LINK_HEADER_LEN},
};
use crate::{
    Attributes, DecodeError, DecodeOptions, ErrorContext, Parseable,
    ParseableParametrized, Value,
};

/// A decoded `RTM_NEWLINK` message: the fixed header and its attributes.
#[derive(Debug, PartialEq, Eq, Clone, Default)]
pub struct LinkMessage {
    pub header: LinkHeader,
    /// Symbolic form of `header.link_layer_type`. `None` only when the
    /// type is unknown and the options asked to keep the raw value.
    pub hardware_type: Option<&'static str>,
    pub attributes: Attributes,
    length: usize,
}

impl LinkMessage {
    /// Decode the first `declared_len` bytes of `buf` as one link
    /// message, resolving the hardware type with the `ARPHRD_*` table.
    pub fn decode(
        buf: &[u8],
        declared_len: usize,
        options: &DecodeOptions,
    ) -> Result<Self, DecodeError> {
        Self::decode_with(buf, declared_len, options, &Arphrd)
    }

    pub fn decode_with<L>(
        buf: &[u8],
        declared_len: usize,
        options: &DecodeOptions,
        hardware_types: &L,
    ) -> Result<Self, DecodeError>
    where
        L: HardwareTypeLookup + ?Sized,
    {
        if declared_len > buf.len() {
            return Err(DecodeError::declared_length_exceeds_buffer(
                declared_len,
                buf.len(),
            )
            .at(0)
            .context("failed to parse link message"));
        }
        let buf = LinkMessageBuffer::new_checked(&buf[..declared_len])
            .map_err(|e| e.at(0))
            .context("failed to parse link message header")?;
        let header = LinkHeader::parse(&buf)?;

        let hardware_type = match hardware_types.name(header.link_layer_type)
        {
            Some(name) => Some(name),
            None => options.degrade_enum(
                DecodeError::unknown_enum_value(
                    "ARPHRD",
                    header.link_layer_type.into(),
                )
                .at(2)
                .context("failed to parse link message header"),
                None,
            )?,
        };

        let payload = buf.payload();
        trace!(
            "link {}: {} bytes of attributes",
            header.index,
            payload.len()
        );
        let (attributes, consumed) = LINK_ATTRIBUTES
            .decode_stream(payload, payload.len(), LINK_HEADER_LEN, options)
            .context(format!(
                "failed to parse attributes of link {}",
                header.index
            ))?;

        Ok(LinkMessage {
            header,
            hardware_type,
            attributes,
            length: LINK_HEADER_LEN + consumed,
        })
    }

    /// Bytes consumed by the header and the attribute stream. Equal to
    /// the declared length of a successfully decoded message.
    pub fn consumed(&self) -> usize {
        self.length
    }

    /// Flatten the message into one mapping: header fields first, then
    /// the attributes in wire order.
    pub fn to_attributes(&self) -> Attributes {
        let mut attrs = Attributes::new();
        attrs.insert("family", Value::U8(self.header.interface_family));
        attrs.insert(
            "ifi_type",
            match self.hardware_type {
                Some(name) => Value::Name(name),
                None => Value::U16(self.header.link_layer_type),
            },
        );
        attrs.insert("index", Value::I32(self.header.index));
        attrs.insert("flags", Value::U32(self.header.flags));
        attrs.insert("change", Value::U32(self.header.change_mask));
        attrs.insert("type", Value::Name("link"));
        attrs.merge(self.attributes.clone());
        attrs
    }
}

impl<'a, T: AsRef<[u8]> + ?Sized>
    ParseableParametrized<LinkMessageBuffer<&'a T>, &DecodeOptions>
    for LinkMessage
{
    type Error = DecodeError;

    fn parse_with_param(
        buf: &LinkMessageBuffer<&'a T>,
        options: &DecodeOptions,
    ) -> Result<Self, DecodeError> {
        let bytes = buf.inner();
        Self::decode(bytes, bytes.len(), options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        layout::{IPV6_DEVCONF, STATS64, STRUCT_TAIL},
        link::{
            attributes::IPV6_CONF_HEAD_LEN, constants::*, OperState,
        },
        nla_align, walk_lengths, AttributeKey, ErrorKind, UnknownAttributes,
        UnknownEnums, NLA_F_NESTED, NLA_HEADER_SIZE,
    };

    fn record(kind: u16, value: &[u8]) -> Vec<u8> {
        let length = (NLA_HEADER_SIZE + value.len()) as u16;
        let mut buf = Vec::new();
        buf.extend_from_slice(&length.to_ne_bytes());
        buf.extend_from_slice(&kind.to_ne_bytes());
        buf.extend_from_slice(value);
        buf.resize(nla_align(buf.len()), 0);
        buf
    }

    fn header(link_layer_type: u16, index: i32, flags: u32) -> Vec<u8> {
        let mut buf = vec![0u8, 0];
        buf.extend_from_slice(&link_layer_type.to_ne_bytes());
        buf.extend_from_slice(&index.to_ne_bytes());
        buf.extend_from_slice(&flags.to_ne_bytes());
        buf.extend_from_slice(&0u32.to_ne_bytes());
        buf
    }

    // A trimmed down dump of `lo` on a 6.x kernel.
    fn loopback() -> Vec<u8> {
        let mut buf = header(772, 1, 0x10049);
        buf.extend(record(IFLA_IFNAME, b"lo\0"));
        buf.extend(record(IFLA_TXQLEN, &1000u32.to_ne_bytes()));
        buf.extend(record(IFLA_OPERSTATE, &[0]));
        buf.extend(record(IFLA_LINKMODE, &[0]));
        buf.extend(record(IFLA_MTU, &65536u32.to_ne_bytes()));
        buf.extend(record(IFLA_GROUP, &0u32.to_ne_bytes()));
        buf.extend(record(IFLA_PROMISCUITY, &0u32.to_ne_bytes()));
        buf.extend(record(IFLA_NUM_TX_QUEUES, &1u32.to_ne_bytes()));
        buf.extend(record(IFLA_NUM_RX_QUEUES, &1u32.to_ne_bytes()));
        buf.extend(record(IFLA_CARRIER, &[1]));
        buf.extend(record(IFLA_QDISC, b"noqueue\0"));
        buf.extend(record(IFLA_ADDRESS, &[0; 6]));
        buf.extend(record(IFLA_BROADCAST, &[0; 6]));
        let stats: Vec<u8> =
            (0..24u64).flat_map(|v| (v * 10).to_ne_bytes()).collect();
        buf.extend(record(IFLA_STATS64, &stats));
        buf
    }

    #[test]
    fn decode_loopback() {
        let buf = loopback();
        let msg =
            LinkMessage::decode(&buf, buf.len(), &DecodeOptions::default())
                .unwrap();

        assert_eq!(msg.consumed(), buf.len());
        assert_eq!(msg.header.index, 1);
        assert_eq!(msg.hardware_type, Some("LOOPBACK"));

        let attrs = &msg.attributes;
        assert_eq!(attrs.get("dev").and_then(Value::as_str), Some("lo"));
        assert_eq!(attrs.get("mtu").and_then(Value::as_u32), Some(65536));
        assert_eq!(
            attrs.get("state"),
            Some(&Value::State(OperState::Unknown))
        );
        assert_eq!(
            attrs.get("hwaddr").and_then(Value::as_str),
            Some("00:00:00:00:00:00")
        );
        assert_eq!(attrs.get("qdisc").and_then(Value::as_str), Some("noqueue"));
        assert_eq!(attrs.get("carrier"), Some(&Value::U8(1)));
        // 24 counters on the wire, 23 known, the last one kept verbatim
        let stats = attrs.get("stats64").and_then(Value::as_attributes).unwrap();
        assert_eq!(stats.len(), STATS64.fields.len() + 1);
        assert_eq!(stats.get("tx_compressed"), Some(&Value::U64(220)));
        assert_eq!(
            stats.get(STRUCT_TAIL).and_then(Value::as_bytes),
            Some(&230u64.to_ne_bytes()[..])
        );
    }

    #[test]
    fn header_and_attributes_cover_declared_length() {
        let buf = loopback();
        let walked = walk_lengths(&buf[LINK_HEADER_LEN..]).unwrap();
        assert_eq!(LINK_HEADER_LEN + walked, buf.len());
    }

    #[test]
    fn flattened_mapping() {
        let mut buf = header(1, 2, 0x1003);
        buf.extend(record(IFLA_MTU, &1500u32.to_ne_bytes()));
        let msg =
            LinkMessage::decode(&buf, buf.len(), &DecodeOptions::default())
                .unwrap();

        let flat = msg.to_attributes();
        let keys: Vec<String> = flat.keys().map(|k| k.to_string()).collect();
        assert_eq!(
            keys,
            vec!["family", "ifi_type", "index", "flags", "change", "type", "mtu"]
        );
        assert_eq!(flat.get("ifi_type"), Some(&Value::Name("ETHER")));
        assert_eq!(flat.get("type"), Some(&Value::Name("link")));
        assert_eq!(flat.get("mtu"), Some(&Value::U32(1500)));
    }

    #[test]
    fn mtu_only_stream() {
        let stream = record(IFLA_MTU, &1500u32.to_ne_bytes());
        assert_eq!(stream.len(), 8);
        let (attrs, consumed) = LINK_ATTRIBUTES
            .decode_stream(&stream, 8, LINK_HEADER_LEN, &DecodeOptions::default())
            .unwrap();
        assert_eq!(consumed, 8);
        assert_eq!(attrs.len(), 1);
        assert_eq!(attrs.get("mtu"), Some(&Value::U32(1500)));
    }

    #[test]
    fn oversized_integer_payload() {
        let mut mtu = 1500u32.to_ne_bytes().to_vec();
        mtu.extend_from_slice(&[0xff; 4]);
        let mut buf = header(1, 8, 0);
        buf.extend(record(IFLA_MTU, &mtu));
        buf.extend(record(IFLA_TXQLEN, &1000u32.to_ne_bytes()));

        let msg =
            LinkMessage::decode(&buf, buf.len(), &DecodeOptions::default())
                .unwrap();
        assert_eq!(msg.attributes.get("mtu"), Some(&Value::U32(1500)));
        assert_eq!(msg.attributes.get("txqlen"), Some(&Value::U32(1000)));
        assert_eq!(msg.consumed(), buf.len());
    }

    #[test]
    fn unknown_top_level_code_is_skipped() {
        let mut buf = header(1, 3, 0);
        buf.extend(record(IFLA_IFNAME, b"eth0\0"));
        buf.extend(record(0x7ff0, &[1, 2, 3, 4, 5]));
        buf.extend(record(IFLA_MTU, &9000u32.to_ne_bytes()));

        let msg =
            LinkMessage::decode(&buf, buf.len(), &DecodeOptions::default())
                .unwrap();
        assert_eq!(msg.attributes.len(), 2);
        assert_eq!(msg.attributes.get("mtu"), Some(&Value::U32(9000)));

        let options = DecodeOptions {
            unknown_attributes: UnknownAttributes::Retain,
            ..Default::default()
        };
        let msg = LinkMessage::decode(&buf, buf.len(), &options).unwrap();
        let keys: Vec<_> = msg.attributes.keys().copied().collect();
        assert_eq!(
            keys,
            vec![
                AttributeKey::Name("dev"),
                AttributeKey::Code(0x7ff0),
                AttributeKey::Name("mtu"),
            ]
        );
    }

    #[test]
    fn nested_link_info_and_af_spec() {
        let mut info = record(IFLA_INFO_KIND, b"vxlan\0");
        info.extend(record(IFLA_INFO_DATA, &[1, 0, 0, 0, 0x2a, 0, 0, 0]));

        let mut inet6 = vec![0; IPV6_CONF_HEAD_LEN];
        inet6.extend((0..30u32).flat_map(|v| v.to_ne_bytes()));
        // statistics the decoder leaves alone
        inet6.extend(vec![0x11; 36 * 8]);
        let af_spec = record(AF_INET6, &inet6);

        let mut buf = header(1, 4, 0);
        buf.extend(record(IFLA_LINKINFO | NLA_F_NESTED, &info));
        buf.extend(record(IFLA_AF_SPEC | NLA_F_NESTED, &af_spec));

        let msg =
            LinkMessage::decode(&buf, buf.len(), &DecodeOptions::default())
                .unwrap();
        let info = msg.attributes.get("linkinfo").and_then(Value::as_attributes);
        let info = info.unwrap();
        assert_eq!(info.get("kind").and_then(Value::as_str), Some("vxlan"));
        assert_eq!(
            info.get("data").and_then(Value::as_bytes).map(<[u8]>::len),
            Some(8)
        );

        let inet6 = msg
            .attributes
            .get("af spec")
            .and_then(Value::as_attributes)
            .and_then(|af| af.get("AF_INET6"))
            .and_then(Value::as_attributes)
            .unwrap();
        assert_eq!(
            inet6
                .get("devconf")
                .and_then(Value::as_attributes)
                .map(Attributes::len),
            Some(IPV6_DEVCONF.fields.len())
        );
        assert_eq!(
            inet6.get("uncoded_tail").and_then(Value::as_bytes).map(<[u8]>::len),
            Some(36 * 8)
        );
    }

    #[test]
    fn truncated_header() {
        let buf = header(1, 1, 0);
        let err = LinkMessage::decode(&buf[..10], 10, &DecodeOptions::default())
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TruncatedHeader);
        assert_eq!(err.offset(), Some(0));
    }

    #[test]
    fn declared_length_beyond_buffer() {
        let buf = loopback();
        let err =
            LinkMessage::decode(&buf, buf.len() + 4, &DecodeOptions::default())
                .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::LengthMismatch);
        assert_eq!(err.offset(), Some(0));
    }

    #[test]
    fn declared_length_mid_record() {
        let buf = loopback();
        let err =
            LinkMessage::decode(&buf, buf.len() - 2, &DecodeOptions::default())
                .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TruncatedAttribute);
        assert!(err.offset().unwrap() >= LINK_HEADER_LEN);
    }

    #[test]
    fn error_reports_absolute_offset() {
        let mut buf = header(1, 5, 0);
        buf.extend(record(IFLA_IFNAME, b"eth0\0"));
        buf.extend(record(IFLA_OPERSTATE, &[7]));

        let err = LinkMessage::decode(&buf, buf.len(), &DecodeOptions::default())
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownEnumValue);
        // header (16) + "eth0\0" record (12)
        assert_eq!(err.offset(), Some(28));
        assert!(err.to_string().contains("attribute 16 (state)"));
    }

    #[test]
    fn unknown_hardware_type() {
        let mut buf = header(0x1234, 6, 0);
        buf.extend(record(IFLA_MTU, &1500u32.to_ne_bytes()));

        let err = LinkMessage::decode(&buf, buf.len(), &DecodeOptions::default())
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownEnumValue);
        assert_eq!(err.offset(), Some(2));

        let options = DecodeOptions {
            unknown_enums: UnknownEnums::Retain,
            ..Default::default()
        };
        let msg = LinkMessage::decode(&buf, buf.len(), &options).unwrap();
        assert_eq!(msg.hardware_type, None);
        assert_eq!(msg.to_attributes().get("ifi_type"), Some(&Value::U16(0x1234)));
        assert_eq!(msg.attributes.get("mtu"), Some(&Value::U32(1500)));
    }

    #[test]
    fn custom_hardware_table() {
        struct Only;
        impl HardwareTypeLookup for Only {
            fn name(&self, code: u16) -> Option<&'static str> {
                (code == 0x1234).then_some("CUSTOM")
            }
            fn code(&self, name: &str) -> Option<u16> {
                (name == "CUSTOM").then_some(0x1234)
            }
        }

        let buf = header(0x1234, 7, 0);
        let msg = LinkMessage::decode_with(
            &buf,
            buf.len(),
            &DecodeOptions::default(),
            &Only,
        )
        .unwrap();
        assert_eq!(msg.hardware_type, Some("CUSTOM"));
        assert!(msg.attributes.is_empty());
        assert_eq!(msg.consumed(), LINK_HEADER_LEN);
    }

    #[test]
    fn parse_from_buffer() {
        let buf = loopback();
        let msg = LinkMessage::parse_with_param(
            &LinkMessageBuffer::new(&buf[..]),
            &DecodeOptions::default(),
        )
        .unwrap();
        assert_eq!(msg.consumed(), buf.len());
        assert_eq!(msg.attributes.get("txqlen"), Some(&Value::U32(1000)));
    }
}
