// SPDX-License-Identifier: MIT

use byteorder::{ByteOrder, NativeEndian};

use crate::{Attributes, DecodeError, Value};

/// Width of one field of a fixed-layout kernel struct. Fields are read in
/// native byte order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Width {
    U8,
    U16,
    U32,
    U64,
}

impl Width {
    pub const fn size(self) -> usize {
        match self {
            Self::U8 => 1,
            Self::U16 => 2,
            Self::U32 => 4,
            Self::U64 => 8,
        }
    }
}

/// Key under which the bytes past the known fields of a struct are kept.
pub const STRUCT_TAIL: &str = "uncoded_tail";

/// A kernel struct described as an ordered list of packed fields.
#[derive(Debug, PartialEq, Eq)]
pub struct StructLayout {
    pub name: &'static str,
    pub fields: &'static [(&'static str, Width)],
    /// Where bytes past the field list go when the struct is an
    /// attribute payload of its own: kept as opaque bytes under this key,
    /// or dropped when `None`.
    pub tail: Option<&'static str>,
}

impl StructLayout {
    /// Bytes covered by the field list.
    pub const fn size(&self) -> usize {
        let mut size = 0;
        let mut i = 0;
        while i < self.fields.len() {
            size += self.fields[i].1.size();
            i += 1;
        }
        size
    }

    /// Unpack every field, in declared order, from the head of `payload`.
    ///
    /// Bytes past [`size`](Self::size) are not read: they are either
    /// struct tail padding or fields appended by a newer kernel, and the
    /// caller owns the decision of what to do with them.
    pub fn decode(&self, payload: &[u8]) -> Result<Attributes, DecodeError> {
        let size = self.size();
        if payload.len() < size {
            return Err(DecodeError::short_payload(
                self.name,
                size,
                payload.len(),
            ));
        }

        let mut attrs = Attributes::new();
        let mut offset = 0;
        for &(name, width) in self.fields {
            let field = &payload[offset..offset + width.size()];
            let value = match width {
                Width::U8 => Value::U8(field[0]),
                Width::U16 => Value::U16(NativeEndian::read_u16(field)),
                Width::U32 => Value::U32(NativeEndian::read_u32(field)),
                Width::U64 => Value::U64(NativeEndian::read_u64(field)),
            };
            attrs.insert(name, value);
            offset += width.size();
        }
        Ok(attrs)
    }
}

macro_rules! layout {
    ($name:ident, $display:expr, $width:ident { $($field:expr),* $(,)? }) => {
        layout!($name, $display, $width, None, { $($field),* });
    };
    (
        $name:ident, $display:expr, $width:ident, $tail:expr,
        { $($field:expr),* $(,)? }
    ) => {
        pub static $name: StructLayout = StructLayout {
            name: $display,
            fields: &[$(($field, Width::$width)),*],
            tail: $tail,
        };
    };
}

/// `struct rtnl_link_ifmap`
pub static IFMAP: StructLayout = StructLayout {
    name: "ifmap",
    fields: &[
        ("mem_start", Width::U64),
        ("mem_end", Width::U64),
        ("base_addr", Width::U64),
        ("irq", Width::U16),
        ("dma", Width::U8),
        ("port", Width::U8),
    ],
    tail: Some(STRUCT_TAIL),
};

macro_rules! link_stats {
    ($name:ident, $display:expr, $width:ident) => {
        layout!($name, $display, $width, Some(STRUCT_TAIL), {
            "rx_packets", "tx_packets", "rx_bytes", "tx_bytes",
            "rx_errors", "tx_errors", "rx_dropped", "tx_dropped",
            "multicast", "collisions", "rx_length_errors", "rx_over_errors",
            "rx_crc_errors", "rx_frame_errors", "rx_fifo_errors",
            "rx_missed_errors", "tx_aborted_errors", "tx_carrier_errors",
            "tx_fifo_errors", "tx_heartbeat_errors", "tx_window_errors",
            "rx_compressed", "tx_compressed",
        });
    };
}

link_stats!(STATS, "stats", U32);
link_stats!(STATS64, "stats64", U64);

// struct ifla_cacheinfo
layout!(IPV6_CACHE_INFO, "ipv6 cache info", U32 {
    "max_reasm_len", "tstamp", "reachable_time", "retrans_time",
});

// struct ipv4_devconf, in IPV4_DEVCONF_* order
layout!(IPV4_DEVCONF, "ipv4 devconf", U32 {
    "sysctl",
    "forwarding",
    "mc_forwarding",
    "proxy_arp",
    "accept_redirects",
    "secure_redirects",
    "send_redirects",
    "shared_media",
    "rp_filter",
    "accept_source_route",
    "bootp_relay",
    "log_martians",
    "tag",
    "arp_filter",
    "medium_id",
    "disable_xfrm",
    "disable_policy",
    "force_igmp_version",
    "arp_announce",
    "arp_ignore",
    "promote_secondaries",
    "arp_accept",
    "arp_notify",
    "accept_local",
    "src_valid_mark",
    "proxy_arp_pvlan",
});

// DEVCONF_* order from include/uapi/linux/ipv6.h
layout!(IPV6_DEVCONF, "ipv6 devconf", U32 {
    "forwarding",
    "hop_limit",
    "mtu",
    "accept_ra",
    "accept_redirects",
    "autoconf",
    "dad_transmits",
    "router_solicitations",
    "router_solicitation_interval",
    "router_solicitation_delay",
    "use_tempaddr",
    "temp_valid_lft",
    "temp_prefered_lft",
    "regen_max_retry",
    "max_desync_factor",
    "max_addresses",
    "force_mld_version",
    "accept_ra_defrtr",
    "accept_ra_pinfo",
    "accept_ra_rtr_pref",
    "router_probe_interval",
    "accept_ra_rt_info_max_plen",
    "proxy_ndp",
    "optimistic_dad",
    "accept_source_route",
    "mc_forwarding",
    "disable_ipv6",
    "accept_dad",
    "force_tllao",
    "ndisc_notify",
});
