//! Interface nodes and their attributes.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, IntoStaticStr};

use crate::id::{InterfaceId, NamespaceId};
use crate::label::Property;

/// MTU assumed for Ethernet devices; not worth printing.
pub const DEFAULT_MTU: u32 = 1500;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct IfFlags: u32 {
        /// Administratively up.
        const UP = 1 << 0;
        /// Carrier present.
        const HAS_LINK = 1 << 1;
        /// Internal construct without a real device behind it.
        const INTERNAL = 1 << 2;
        const LOOPBACK = 1 << 3;
        /// Enslaved to its master without forwarding traffic through it.
        const PASSIVE_SLAVE = 1 << 4;
        /// The link edge is informational only.
        const LINK_WEAK = 1 << 5;
    }
}

/// Operational state derived from the flags, first match wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoStaticStr, Display)]
#[strum(serialize_all = "snake_case")]
pub enum IfState {
    /// Internal interfaces have no meaningful state.
    None,
    Down,
    UpNoLink,
    Up,
}

impl IfState {
    pub fn classify(flags: IfFlags) -> Self {
        if flags.contains(IfFlags::INTERNAL) {
            IfState::None
        } else if !flags.contains(IfFlags::UP) {
            IfState::Down
        } else if !flags.contains(IfFlags::HAS_LINK) {
            IfState::UpNoLink
        } else {
            IfState::Up
        }
    }

    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AddrFamily {
    Inet,
    Inet6,
    #[default]
    #[serde(other)]
    Unknown,
}

impl AddrFamily {
    pub fn as_str(self) -> &'static str {
        match self {
            AddrFamily::Inet => "INET",
            AddrFamily::Inet6 => "INET6",
            AddrFamily::Unknown => "unknown",
        }
    }
}

/// An address assigned to an interface, already formatted for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddrBinding {
    pub family: AddrFamily,
    pub address: String,
    /// Remote end of a point-to-point link.
    pub peer: Option<String>,
}

impl AddrBinding {
    pub fn new(family: AddrFamily, address: impl Into<String>) -> Self {
        Self {
            family,
            address: address.into(),
            peer: None,
        }
    }

    pub fn with_peer(mut self, peer: impl Into<String>) -> Self {
        self.peer = Some(peer.into());
        self
    }
}

/// A network device or virtual construct inside a namespace.
///
/// Plain attributes are public. Relationship fields are private and only set
/// through [`TopologyBuilder`](crate::TopologyBuilder), which keeps the
/// reverse indices consistent.
#[derive(Debug, Clone)]
pub struct Interface {
    id: InterfaceId,
    namespace: NamespaceId,
    pub name: String,
    pub driver: Option<String>,
    /// Zero when unknown.
    pub mtu: u32,
    pub flags: IfFlags,
    pub properties: Vec<Property>,
    pub addresses: Vec<AddrBinding>,
    pub warnings: Vec<String>,
    /// Label shared by the master and link edges.
    pub edge_label: Option<String>,

    pub(crate) master: Option<InterfaceId>,
    pub(crate) link: Option<InterfaceId>,
    pub(crate) peer: Option<InterfaceId>,
    pub(crate) physfn: Option<InterfaceId>,
    pub(crate) rev_master: Vec<InterfaceId>,
    pub(crate) rev_link: Vec<InterfaceId>,
}

impl Interface {
    pub(crate) fn new(id: InterfaceId, namespace: NamespaceId, name: impl Into<String>) -> Self {
        Self {
            id,
            namespace,
            name: name.into(),
            driver: None,
            mtu: 0,
            flags: IfFlags::empty(),
            properties: Vec::new(),
            addresses: Vec::new(),
            warnings: Vec::new(),
            edge_label: None,
            master: None,
            link: None,
            peer: None,
            physfn: None,
            rev_master: Vec::new(),
            rev_link: Vec::new(),
        }
    }

    pub fn id(&self) -> InterfaceId {
        self.id
    }

    pub fn namespace(&self) -> NamespaceId {
        self.namespace
    }

    /// Interface this one is enslaved to.
    pub fn master(&self) -> Option<InterfaceId> {
        self.master
    }

    /// Interface this one is stacked on.
    pub fn link(&self) -> Option<InterfaceId> {
        self.link
    }

    pub fn peer(&self) -> Option<InterfaceId> {
        self.peer
    }

    /// Physical function of an SR-IOV virtual function.
    pub fn physfn(&self) -> Option<InterfaceId> {
        self.physfn
    }

    /// Interfaces enslaved to this one, in insertion order.
    pub fn rev_master(&self) -> &[InterfaceId] {
        &self.rev_master
    }

    /// Interfaces stacked on this one, in insertion order.
    pub fn rev_link(&self) -> &[InterfaceId] {
        &self.rev_link
    }

    pub fn state(&self) -> IfState {
        IfState::classify(self.flags)
    }

    pub fn is_internal(&self) -> bool {
        self.flags.contains(IfFlags::INTERNAL)
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// MTU worth showing: known, not the Ethernet default, not on loopback.
    pub fn notable_mtu(&self) -> Option<u32> {
        if self.mtu == 0 || self.mtu == DEFAULT_MTU || self.flags.contains(IfFlags::LOOPBACK) {
            None
        } else {
            Some(self.mtu)
        }
    }

    /// Edge label for the master edge, suppressed whenever a link edge exists.
    pub fn master_label(&self) -> Option<&str> {
        if self.link.is_some() {
            None
        } else {
            self.edge_label.as_deref()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn iface(flags: IfFlags) -> Interface {
        let mut iface = Interface::new(InterfaceId::new(1), NamespaceId::new(0), "eth0");
        iface.flags = flags;
        iface
    }

    #[test]
    fn test_state_priority() {
        assert_eq!(
            IfState::classify(IfFlags::INTERNAL | IfFlags::UP | IfFlags::HAS_LINK),
            IfState::None
        );
        assert_eq!(IfState::classify(IfFlags::HAS_LINK), IfState::Down);
        assert_eq!(IfState::classify(IfFlags::UP), IfState::UpNoLink);
        assert_eq!(IfState::classify(IfFlags::UP | IfFlags::HAS_LINK), IfState::Up);
    }

    #[test]
    fn test_state_tokens() {
        assert_eq!(IfState::None.as_str(), "none");
        assert_eq!(IfState::Down.as_str(), "down");
        assert_eq!(IfState::UpNoLink.as_str(), "up_no_link");
        assert_eq!(IfState::Up.as_str(), "up");
    }

    #[test]
    fn test_notable_mtu() {
        let mut eth = iface(IfFlags::UP);
        assert_eq!(eth.notable_mtu(), None);
        eth.mtu = DEFAULT_MTU;
        assert_eq!(eth.notable_mtu(), None);
        eth.mtu = 9000;
        assert_eq!(eth.notable_mtu(), Some(9000));

        let mut lo = iface(IfFlags::UP | IfFlags::LOOPBACK);
        lo.mtu = 65536;
        assert_eq!(lo.notable_mtu(), None);
    }

    #[test]
    fn test_master_label_suppressed_by_link() {
        let mut vlan = iface(IfFlags::UP);
        vlan.edge_label = Some("vlan 10".to_string());
        vlan.master = Some(InterfaceId::new(2));
        assert_eq!(vlan.master_label(), Some("vlan 10"));

        vlan.link = Some(InterfaceId::new(3));
        assert_eq!(vlan.master_label(), None);
    }

    #[test]
    fn test_family_tokens() {
        assert_eq!(AddrFamily::Inet.as_str(), "INET");
        assert_eq!(AddrFamily::Inet6.as_str(), "INET6");
        assert_eq!(AddrFamily::Unknown.as_str(), "unknown");
    }
}
