//! Hand-built topologies for tests.

use crate::builder::TopologyBuilder;
use crate::iface::{AddrBinding, AddrFamily, IfFlags};
use crate::label::Property;
use crate::topology::Topology;

const RUNNING: IfFlags = IfFlags::UP.union(IfFlags::HAS_LINK);

/// Root: `eth0` with `eth0.10` stacked on it, and `veth0`.
/// Namespace `blue`: `veth1`, paired with `veth0`.
pub fn two_namespace_veth_vlan() -> Topology {
    let mut b = TopologyBuilder::new();
    let root = b.root();
    let blue = b.add_namespace("blue");

    let eth0 = b.add_interface(root, "eth0").unwrap();
    let vlan = b.add_interface(root, "eth0.10").unwrap();
    let veth0 = b.add_interface(root, "veth0").unwrap();
    let veth1 = b.add_interface(blue, "veth1").unwrap();

    for id in [eth0, vlan, veth0, veth1] {
        b.interface_mut(id).unwrap().flags = RUNNING;
    }
    {
        let eth = b.interface_mut(eth0).unwrap();
        eth.driver = Some("e1000e".to_string());
        eth.mtu = 1500;
        eth.addresses
            .push(AddrBinding::new(AddrFamily::Inet, "192.0.2.10/24"));
    }
    b.interface_mut(vlan).unwrap().edge_label = Some("VLAN 10".to_string());
    b.set_link(vlan, Some(eth0)).unwrap();
    b.set_peer(veth0, veth1).unwrap();
    b.build()
}

/// A busier host covering every relationship kind, flag and annotation.
///
/// Root: `lo`, `eth0` (PF, 9000 MTU, warning), `eth1` and `eth2` enslaved to
/// `bond0` (`eth2` passive), `bond0.20` stacked on `bond0` and enslaved to
/// `br0`, `vf0` (VF of `eth0`), `ovs-system` (internal, weakly linked to
/// `eth0`), `tun0` (point-to-point, down).
/// Namespace `red` (two warnings): `veth-red`, paired with root `veth-host`
/// which is enslaved to `br0`.
pub fn busy_host() -> Topology {
    let mut b = TopologyBuilder::new();
    let root = b.root();

    let lo = b.add_interface(root, "lo").unwrap();
    let eth0 = b.add_interface(root, "eth0").unwrap();
    let eth1 = b.add_interface(root, "eth1").unwrap();
    let eth2 = b.add_interface(root, "eth2").unwrap();
    let bond0 = b.add_interface(root, "bond0").unwrap();
    let vlan = b.add_interface(root, "bond0.20").unwrap();
    let br0 = b.add_interface(root, "br0").unwrap();
    let vf0 = b.add_interface(root, "vf0").unwrap();
    let ovs = b.add_interface(root, "ovs-system").unwrap();
    let tun0 = b.add_interface(root, "tun0").unwrap();
    let veth_host = b.add_interface(root, "veth-host").unwrap();

    let red = b.add_namespace("red");
    let veth_red = b.add_interface(red, "veth-red").unwrap();
    b.namespace_mut(red).unwrap().warnings = vec![
        "red: cannot read routing table".to_string(),
        "red: unsupported tunnel type".to_string(),
    ];

    for id in [lo, eth0, eth1, eth2, bond0, vlan, br0, vf0, veth_host, veth_red] {
        b.interface_mut(id).unwrap().flags = RUNNING;
    }
    {
        let lo = b.interface_mut(lo).unwrap();
        lo.flags |= IfFlags::LOOPBACK;
        lo.mtu = 65536;
        lo.addresses.push(AddrBinding::new(AddrFamily::Inet, "127.0.0.1/8"));
        lo.addresses.push(AddrBinding::new(AddrFamily::Inet6, "::1/128"));
    }
    {
        let eth0 = b.interface_mut(eth0).unwrap();
        eth0.driver = Some("ixgbe".to_string());
        eth0.mtu = 9000;
        eth0.properties.push(Property::config("sriov", "4 VFs"));
        eth0.properties.push(Property::state("speed", "10000Mb/s"));
        eth0.warnings.push("eth0: firmware too old".to_string());
    }
    {
        let eth2 = b.interface_mut(eth2).unwrap();
        eth2.flags = IfFlags::UP | IfFlags::PASSIVE_SLAVE;
        eth2.edge_label = Some("backup".to_string());
    }
    b.interface_mut(eth1).unwrap().edge_label = Some("active".to_string());
    {
        let bond = b.interface_mut(bond0).unwrap();
        bond.driver = Some("bonding".to_string());
        bond.properties.push(Property::config("mode", "active-backup"));
    }
    b.interface_mut(vlan).unwrap().edge_label = Some("VLAN 20".to_string());
    {
        let ovs = b.interface_mut(ovs).unwrap();
        ovs.flags = IfFlags::INTERNAL | IfFlags::LINK_WEAK;
        ovs.edge_label = Some("uplink".to_string());
    }
    {
        let tun = b.interface_mut(tun0).unwrap();
        tun.driver = Some("tun".to_string());
        tun.addresses.push(
            AddrBinding::new(AddrFamily::Inet, "10.8.0.1/32").with_peer("10.8.0.2"),
        );
    }

    b.set_master(eth1, Some(bond0)).unwrap();
    b.set_master(eth2, Some(bond0)).unwrap();
    b.set_link(vlan, Some(bond0)).unwrap();
    b.set_master(vlan, Some(br0)).unwrap();
    b.set_master(veth_host, Some(br0)).unwrap();
    b.set_physfn(vf0, Some(eth0)).unwrap();
    b.set_link(ovs, Some(eth0)).unwrap();
    b.set_peer(veth_red, veth_host).unwrap();
    b.build()
}
