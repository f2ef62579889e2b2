//! Topology to [`Document`] conversion.

use std::collections::BTreeMap;

use netplot_core::label::visible_properties;
use netplot_core::{
    AddrBinding, AddrFamily, Interface, Namespace, PrintMask, PropCategory, Stamp, Topology,
};

use crate::schema::{
    AddressRecord, Connection, Document, FORMAT_VERSION, InterfaceRecord, NamespaceRecord,
};

pub fn to_document(topo: &Topology, mask: PrintMask, stamp: &Stamp) -> Document {
    let namespaces = topo
        .namespaces()
        .iter()
        .map(|ns| (ns.id().to_string(), namespace_record(topo, ns, mask)))
        .collect();

    Document {
        format: FORMAT_VERSION,
        version: stamp.version.clone(),
        date: stamp.date.clone(),
        root: topo.root().id().to_string(),
        namespaces,
    }
}

fn namespace_record(topo: &Topology, ns: &Namespace, mask: PrintMask) -> NamespaceRecord {
    NamespaceRecord {
        id: ns.id().to_string(),
        name: ns.display_name().to_string(),
        interfaces: topo
            .interfaces_of(ns)
            .map(|iface| (iface.id().to_string(), interface_record(topo, iface, mask)))
            .collect(),
        warnings: ns.warnings.clone(),
    }
}

fn interface_record(topo: &Topology, iface: &Interface, mask: PrintMask) -> InterfaceRecord {
    let config = mask.visible(PropCategory::Config);

    InterfaceRecord {
        id: iface.id().to_string(),
        namespace: iface.namespace().to_string(),
        name: iface.name.clone(),
        driver: iface.driver.clone().unwrap_or_default(),
        info: visible_properties(&iface.properties, mask)
            .map(|p| (p.key.clone(), p.value.clone()))
            .collect(),
        addresses: config.then(|| iface.addresses.iter().map(address_record).collect()),
        mtu: config.then_some(iface.mtu),
        kind: if iface.is_internal() { "internal" } else { "device" }.to_string(),
        state: mask
            .visible(PropCategory::State)
            .then(|| iface.state().as_str().to_string()),
        warning: iface.has_warnings().then_some(true),
        parents: parents(topo, iface),
        children: children(topo, iface),
        peer: iface.peer().map(|peer| Connection::new(peer.to_string(), None)),
    }
}

/// The master if there is one, otherwise everything stacked on this interface.
pub fn parents(topo: &Topology, iface: &Interface) -> BTreeMap<String, Connection> {
    let mut parents = BTreeMap::new();
    if let Some(master) = iface.master() {
        parents.insert(
            master.to_string(),
            Connection::new(master.to_string(), iface.master_label()),
        );
    } else {
        for upper in iface.rev_link() {
            let upper = &topo[*upper];
            parents.insert(
                upper.id().to_string(),
                Connection::new(upper.id().to_string(), upper.edge_label.as_deref()),
            );
        }
    }
    parents
}

/// The lower device if there is one, otherwise every slave of this interface.
pub fn children(topo: &Topology, iface: &Interface) -> BTreeMap<String, Connection> {
    let mut children = BTreeMap::new();
    if let Some(link) = iface.link() {
        children.insert(
            link.to_string(),
            Connection::new(link.to_string(), iface.edge_label.as_deref()),
        );
    } else {
        for slave in iface.rev_master() {
            let slave = &topo[*slave];
            children.insert(
                slave.id().to_string(),
                Connection::new(slave.id().to_string(), slave.master_label()),
            );
        }
    }
    children
}

fn address_record(binding: &AddrBinding) -> AddressRecord {
    AddressRecord {
        family: binding.family.as_str().to_string(),
        address: binding.address.clone(),
        peer: binding
            .peer
            .as_ref()
            .map(|peer| Box::new(plain_address(binding.family, peer))),
    }
}

fn plain_address(family: AddrFamily, address: &str) -> AddressRecord {
    AddressRecord {
        family: family.as_str().to_string(),
        address: address.to_string(),
        peer: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use netplot_core::fixtures;

    fn busy() -> (Topology, Document) {
        let topo = fixtures::busy_host();
        let doc = to_document(&topo, PrintMask::all(), &Stamp::fixed("t", "d"));
        (topo, doc)
    }

    #[test]
    fn test_bond_children_follow_reverse_master() {
        let (_, doc) = busy();
        let bond = doc.interface("if4").unwrap();
        let children: Vec<&str> = bond.children.keys().map(String::as_str).collect();
        assert_eq!(children, vec!["if2", "if3"]);
        assert_eq!(bond.children["if2"].info, vec!["active"]);
        // bond0 has no master, so parents come from what is stacked on it
        assert_eq!(bond.parents["if5"].info, vec!["VLAN 20"]);
    }

    #[test]
    fn test_vlan_with_master_and_link() {
        let (_, doc) = busy();
        let vlan = doc.interface("if5").unwrap();
        assert_eq!(vlan.parents.len(), 1);
        assert!(vlan.parents["if6"].info.is_empty());
        assert_eq!(vlan.children.len(), 1);
        assert_eq!(vlan.children["if4"].info, vec!["VLAN 20"]);

        // br0 lists the vlan as a child without its label
        let br = doc.interface("if6").unwrap();
        assert!(br.children["if5"].info.is_empty());
        assert!(br.children["if10"].info.is_empty());
    }

    #[test]
    fn test_leaf_has_no_relationship_maps() {
        let (_, doc) = busy();
        let lo = doc.interface("if0").unwrap();
        assert!(lo.parents.is_empty());
        assert!(lo.children.is_empty());
        assert!(lo.peer.is_none());
    }

    #[test]
    fn test_point_to_point_address() {
        let (_, doc) = busy();
        let tun = doc.interface("if9").unwrap();
        let addr = &tun.addresses.as_ref().unwrap()[0];
        assert_eq!(addr.family, "INET");
        assert_eq!(addr.peer.as_ref().unwrap().address, "10.8.0.2");
        assert_eq!(tun.state.as_deref(), Some("down"));
    }
}
