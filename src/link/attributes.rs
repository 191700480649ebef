// SPDX-License-Identifier: MIT

//! Attribute tables of `RTM_NEWLINK` messages.

use super::constants::*;
use crate::{
    layout::{IFMAP, IPV4_DEVCONF, IPV6_DEVCONF, STATS, STATS64},
    AttributeTable, Decoder, Leaf, Segment,
};

/// Bytes at the head of the `AF_INET6` payload before the device
/// configuration array. They are present on every kernel but their layout
/// is not interpreted.
pub const IPV6_CONF_HEAD_LEN: usize = 8 * 4;

/// `IFLA_LINKINFO`
pub static LINK_INFO: AttributeTable = AttributeTable {
    name: "IFLA_LINKINFO",
    entries: &[
        (IFLA_INFO_UNSPEC, Decoder::Leaf(Leaf::None), "none"),
        (IFLA_INFO_KIND, Decoder::Leaf(Leaf::String), "kind"),
        (IFLA_INFO_DATA, Decoder::Leaf(Leaf::Hex), "data"),
        (IFLA_INFO_XSTATS, Decoder::Leaf(Leaf::Hex), "xstats"),
        (IFLA_INFO_SLAVE_KIND, Decoder::Leaf(Leaf::String), "slave kind"),
        (IFLA_INFO_SLAVE_DATA, Decoder::Leaf(Leaf::Hex), "slave data"),
    ],
};

/// `AF_INET6` payload: an uninterpreted head, the `DEVCONF_*` array, then
/// everything else (per-device and ICMPv6 statistics included) kept
/// verbatim.
pub static IPV6_CONF: [Segment; 3] = [
    Segment::Opaque("uncoded_head", IPV6_CONF_HEAD_LEN),
    Segment::Struct("devconf", &IPV6_DEVCONF),
    Segment::Remainder("uncoded_tail"),
];

/// `IFLA_AF_SPEC`: codes are address families.
pub static AF_SPEC: AttributeTable = AttributeTable {
    name: "IFLA_AF_SPEC",
    entries: &[
        (AF_INET, Decoder::Struct(&IPV4_DEVCONF), "AF_INET"),
        (AF_INET6, Decoder::Sequence(&IPV6_CONF), "AF_INET6"),
    ],
};

/// Top level link attributes.
#[rustfmt::skip]
pub static LINK_ATTRIBUTES: AttributeTable = AttributeTable {
    name: "IFLA",
    entries: &[
        (IFLA_UNSPEC,        Decoder::Leaf(Leaf::None),        "none"),
        (IFLA_ADDRESS,       Decoder::Leaf(Leaf::LinkAddress), "hwaddr"),
        (IFLA_BROADCAST,     Decoder::Leaf(Leaf::LinkAddress), "broadcast"),
        (IFLA_IFNAME,        Decoder::Leaf(Leaf::String),      "dev"),
        (IFLA_MTU,           Decoder::Leaf(Leaf::U32),         "mtu"),
        (IFLA_LINK,          Decoder::Leaf(Leaf::U32),         "link"),
        (IFLA_QDISC,         Decoder::Leaf(Leaf::String),      "qdisc"),
        (IFLA_STATS,         Decoder::Struct(&STATS),          "stats"),
        (IFLA_MASTER,        Decoder::Leaf(Leaf::U32),         "master"),
        (IFLA_WIRELESS,      Decoder::Leaf(Leaf::Hex),         "wireless"),
        (IFLA_PROTINFO,      Decoder::Leaf(Leaf::Hex),         "protinfo"),
        (IFLA_TXQLEN,        Decoder::Leaf(Leaf::U32),         "txqlen"),
        (IFLA_MAP,           Decoder::Struct(&IFMAP),          "ifmap"),
        (IFLA_WEIGHT,        Decoder::Leaf(Leaf::U32),         "weight"),
        (IFLA_OPERSTATE,     Decoder::Leaf(Leaf::OperState),   "state"),
        (IFLA_LINKMODE,      Decoder::Leaf(Leaf::U8),          "linkmode"),
        (IFLA_LINKINFO,      Decoder::Nested(&LINK_INFO),      "linkinfo"),
        (IFLA_NET_NS_PID,    Decoder::Leaf(Leaf::U32),         "netns pid"),
        (IFLA_IFALIAS,       Decoder::Leaf(Leaf::String),      "ifalias"),
        (IFLA_NUM_VF,        Decoder::Leaf(Leaf::U32),         "vf number"),
        (IFLA_VFINFO_LIST,   Decoder::Leaf(Leaf::Hex),         "vfinfo list"),
        (IFLA_STATS64,       Decoder::Struct(&STATS64),        "stats64"),
        (IFLA_VF_PORTS,      Decoder::Leaf(Leaf::Hex),         "vf ports"),
        (IFLA_PORT_SELF,     Decoder::Leaf(Leaf::Hex),         "port self"),
        (IFLA_AF_SPEC,       Decoder::Nested(&AF_SPEC),        "af spec"),
        (IFLA_GROUP,         Decoder::Leaf(Leaf::U32),         "group"),
        (IFLA_EXT_MASK,      Decoder::Leaf(Leaf::U32),         "ext mask"),
        (IFLA_PROMISCUITY,   Decoder::Leaf(Leaf::U32),         "promiscuity"),
        (IFLA_NUM_TX_QUEUES, Decoder::Leaf(Leaf::U32),         "tx queues"),
        (IFLA_NUM_RX_QUEUES, Decoder::Leaf(Leaf::U32),         "rx queues"),
        (IFLA_CARRIER,       Decoder::Leaf(Leaf::U8),          "carrier"),
    ],
};
