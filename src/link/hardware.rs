// SPDX-License-Identifier: MIT

/// Resolves the `ifi_type` field of a link header to a symbolic name.
pub trait HardwareTypeLookup {
    fn name(&self, code: u16) -> Option<&'static str>;

    fn code(&self, name: &str) -> Option<u16>;
}

/// The `ARPHRD_*` values from `include/uapi/linux/if_arp.h`, named
/// without their prefix.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Arphrd;

const ARPHRD: &[(u16, &str)] = &[
    (0, "NETROM"),
    (1, "ETHER"),
    (2, "EETHER"),
    (3, "AX25"),
    (4, "PRONET"),
    (5, "CHAOS"),
    (6, "IEEE802"),
    (7, "ARCNET"),
    (8, "APPLETLK"),
    (15, "DLCI"),
    (19, "ATM"),
    (23, "METRICOM"),
    (24, "IEEE1394"),
    (27, "EUI64"),
    (32, "INFINIBAND"),
    (256, "SLIP"),
    (257, "CSLIP"),
    (258, "SLIP6"),
    (259, "CSLIP6"),
    (260, "RSRVD"),
    (264, "ADAPT"),
    (270, "ROSE"),
    (271, "X25"),
    (272, "HWX25"),
    (280, "CAN"),
    (290, "MCTP"),
    (512, "PPP"),
    (513, "CISCO"),
    (516, "LAPB"),
    (517, "DDCMP"),
    (518, "RAWHDLC"),
    (519, "RAWIP"),
    (768, "TUNNEL"),
    (769, "TUNNEL6"),
    (770, "FRAD"),
    (771, "SKIP"),
    (772, "LOOPBACK"),
    (773, "LOCALTLK"),
    (774, "FDDI"),
    (775, "BIF"),
    (776, "SIT"),
    (777, "IPDDP"),
    (778, "IPGRE"),
    (779, "PIMREG"),
    (780, "HIPPI"),
    (781, "ASH"),
    (782, "ECONET"),
    (783, "IRDA"),
    (784, "FCPP"),
    (785, "FCAL"),
    (786, "FCPL"),
    (787, "FCFABRIC"),
    (800, "IEEE802_TR"),
    (801, "IEEE80211"),
    (802, "IEEE80211_PRISM"),
    (803, "IEEE80211_RADIOTAP"),
    (804, "IEEE802154"),
    (805, "IEEE802154_MONITOR"),
    (820, "PHONET"),
    (821, "PHONET_PIPE"),
    (822, "CAIF"),
    (823, "IP6GRE"),
    (824, "NETLINK"),
    (825, "6LOWPAN"),
    (826, "VSOCKMON"),
    (0xfffe, "NONE"),
    (0xffff, "VOID"),
];

impl HardwareTypeLookup for Arphrd {
    fn name(&self, code: u16) -> Option<&'static str> {
        ARPHRD
            .iter()
            .find(|(c, _)| *c == code)
            .map(|&(_, name)| name)
    }

    fn code(&self, name: &str) -> Option<u16> {
        ARPHRD
            .iter()
            .find(|(_, n)| n.eq_ignore_ascii_case(name))
            .map(|&(code, _)| code)
    }
}
