//! Serialized topology descriptions.
//!
//! A snapshot names interfaces instead of using ids, which makes it practical
//! to write by hand or to produce from another tool. Relationship references
//! default to the referencing interface's namespace; `netns: ""` names the
//! root namespace.
//!
//! ```json
//! { "namespaces": [
//!     { "interfaces": [ { "name": "eth0", "up": true, "has_link": true } ] },
//!     { "name": "blue",
//!       "interfaces": [ { "name": "eth0.10", "link": { "netns": "", "name": "eth0" } } ] }
//! ] }
//! ```

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use netplot_error::{Error, Result};

use crate::builder::TopologyBuilder;
use crate::id::{InterfaceId, NamespaceId};
use crate::iface::{AddrBinding, AddrFamily, IfFlags};
use crate::label::Property;
use crate::topology::Topology;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TopologySnapshot {
    /// The first namespace is the root namespace.
    #[serde(default)]
    pub namespaces: Vec<NamespaceSnapshot>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NamespaceSnapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
    #[serde(default)]
    pub interfaces: Vec<InterfaceSnapshot>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InterfaceSnapshot {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub driver: Option<String>,
    pub mtu: u32,

    pub up: bool,
    pub has_link: bool,
    pub internal: bool,
    pub loopback: bool,
    pub passive_slave: bool,
    pub link_weak: bool,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub properties: Vec<Property>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub addresses: Vec<AddressSnapshot>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edge_label: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub master: Option<IfRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<IfRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub peer: Option<IfRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub physfn: Option<IfRef>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressSnapshot {
    #[serde(default)]
    pub family: AddrFamily,
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub peer: Option<String>,
}

/// Reference to another interface, either `"eth0"` or `{ "netns": "blue", "name": "eth0" }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IfRef {
    Name(String),
    Qualified {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        netns: Option<String>,
        name: String,
    },
}

impl IfRef {
    fn parts(&self) -> (Option<&str>, &str) {
        match self {
            IfRef::Name(name) => (None, name),
            IfRef::Qualified { netns, name } => (netns.as_deref(), name),
        }
    }
}

impl InterfaceSnapshot {
    fn flags(&self) -> IfFlags {
        let mut flags = IfFlags::empty();
        flags.set(IfFlags::UP, self.up);
        flags.set(IfFlags::HAS_LINK, self.has_link);
        flags.set(IfFlags::INTERNAL, self.internal);
        flags.set(IfFlags::LOOPBACK, self.loopback);
        flags.set(IfFlags::PASSIVE_SLAVE, self.passive_slave);
        flags.set(IfFlags::LINK_WEAK, self.link_weak);
        flags
    }
}

impl TopologySnapshot {
    pub fn from_json_str(input: &str) -> Result<Self> {
        serde_json::from_str(input)
            .map_err(|e| Error::from(e).with_operation("snapshot::from_json_str"))
    }

    pub fn from_toml_str(input: &str) -> Result<Self> {
        toml::from_str(input).map_err(|e| Error::from(e).with_operation("snapshot::from_toml_str"))
    }

    /// Load a snapshot file; `.toml` files are read as TOML, anything else as JSON.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let input = std::fs::read_to_string(path).map_err(|e| {
            Error::from(e)
                .with_operation("snapshot::load")
                .with_context("path", path.display().to_string())
        })?;
        let is_toml = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));
        debug!(path = %path.display(), toml = is_toml, "loading topology snapshot");
        if is_toml {
            Self::from_toml_str(&input)
        } else {
            Self::from_json_str(&input)
        }
    }

    /// Resolve names and build the topology.
    pub fn into_topology(&self) -> Result<Topology> {
        let mut builder = TopologyBuilder::new();
        let mut ns_ids = Vec::with_capacity(self.namespaces.len());
        let mut seen_names = HashSet::new();

        for (index, ns) in self.namespaces.iter().enumerate() {
            if !seen_names.insert(ns.name.clone().unwrap_or_default()) {
                return Err(Error::config_invalid("namespace listed twice")
                    .with_operation("snapshot::into_topology")
                    .with_context("namespace", ns.name.clone().unwrap_or_default()));
            }
            let id = if index == 0 {
                let root = builder.root();
                builder.namespace_mut(root)?.name = ns.name.clone();
                root
            } else {
                let name = ns.name.clone().ok_or_else(|| {
                    Error::config_invalid("only the first namespace may be unnamed")
                        .with_operation("snapshot::into_topology")
                        .with_context("index", index.to_string())
                })?;
                builder.add_namespace(name)
            };
            builder.namespace_mut(id)?.warnings = ns.warnings.clone();

            for entry in &ns.interfaces {
                let if_id = builder.add_interface(id, entry.name.clone())?;
                let iface = builder.interface_mut(if_id)?;
                iface.driver = entry.driver.clone();
                iface.mtu = entry.mtu;
                iface.flags = entry.flags();
                iface.properties = entry.properties.clone();
                iface.addresses = entry
                    .addresses
                    .iter()
                    .map(|a| AddrBinding {
                        family: a.family,
                        address: a.address.clone(),
                        peer: a.peer.clone(),
                    })
                    .collect();
                iface.warnings = entry.warnings.clone();
                iface.edge_label = entry.edge_label.clone();
            }
            ns_ids.push(id);
        }

        let mut declared_peers = Vec::new();
        for (ns, ns_id) in self.namespaces.iter().zip(&ns_ids) {
            for entry in &ns.interfaces {
                let id = builder.find_interface(*ns_id, &entry.name).ok_or_else(|| {
                    Error::interface_not_found(entry.name.clone())
                        .with_operation("snapshot::into_topology")
                })?;
                if let Some(target) = &entry.master {
                    let target = resolve(&builder, *ns_id, target)?;
                    builder.set_master(id, Some(target))?;
                }
                if let Some(target) = &entry.link {
                    let target = resolve(&builder, *ns_id, target)?;
                    builder.set_link(id, Some(target))?;
                }
                if let Some(target) = &entry.physfn {
                    let target = resolve(&builder, *ns_id, target)?;
                    builder.set_physfn(id, Some(target))?;
                }
                if let Some(target) = &entry.peer {
                    let target = resolve(&builder, *ns_id, target)?;
                    builder.set_peer(id, target)?;
                    declared_peers.push((id, target));
                }
            }
        }

        // A peer declared on only one end is fine; conflicting declarations are not.
        let topo = builder.build();
        for (id, target) in declared_peers {
            if topo[id].peer() != Some(target) {
                let name = topo[id].name.clone();
                warn!(interface = %name, "peer declaration overridden by a later pairing");
                return Err(Error::config_invalid("conflicting peer declarations")
                    .with_operation("snapshot::into_topology")
                    .with_context("interface", name));
            }
        }
        Ok(topo)
    }
}

fn resolve(builder: &TopologyBuilder, current: NamespaceId, target: &IfRef) -> Result<InterfaceId> {
    let (netns, name) = target.parts();
    let ns = match netns {
        None => current,
        Some("") => builder.root(),
        Some(netns) => builder.find_namespace(Some(netns)).ok_or_else(|| {
            warn!(namespace = netns, interface = name, "dangling namespace reference");
            Error::namespace_not_found(netns).with_operation("snapshot::resolve")
        })?,
    };
    builder.find_interface(ns, name).ok_or_else(|| {
        warn!(namespace = %ns, interface = name, "dangling interface reference");
        Error::interface_not_found(name)
            .with_operation("snapshot::resolve")
            .with_context("namespace", ns.to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::iface::IfState;
    use crate::label::PropCategory;
    use netplot_error::ErrorKind;

    const SAMPLE: &str = r#"{
        "namespaces": [
            { "interfaces": [
                { "name": "eth0", "driver": "e1000e", "mtu": 9000, "up": true, "has_link": true,
                  "properties": [ { "category": "config", "key": "speed", "value": "1000" } ],
                  "addresses": [ { "family": "inet", "address": "192.0.2.1/24" } ] },
                { "name": "veth0", "peer": { "netns": "blue", "name": "veth1" }, "up": true }
            ] },
            { "name": "blue",
              "warnings": [ "cannot read routes" ],
              "interfaces": [
                { "name": "veth1", "up": true, "has_link": true },
                { "name": "veth1.10", "link": "veth1", "edge_label": "VLAN 10" },
                { "name": "vf0", "physfn": { "netns": "", "name": "eth0" } }
            ] }
        ]
    }"#;

    #[test]
    fn test_json_snapshot_resolves_references() {
        let topo = TopologySnapshot::from_json_str(SAMPLE)
            .unwrap()
            .into_topology()
            .unwrap();

        let root = topo.root().id();
        let blue = topo.find_namespace(Some("blue")).unwrap().id();
        let eth0 = topo.find_interface(root, "eth0").unwrap();
        let veth0 = topo.find_interface(root, "veth0").unwrap();
        let veth1 = topo.find_interface(blue, "veth1").unwrap();
        let vlan = topo.find_interface(blue, "veth1.10").unwrap();
        let vf0 = topo.find_interface(blue, "vf0").unwrap();

        assert_eq!(veth0.peer(), Some(veth1.id()));
        assert_eq!(veth1.peer(), Some(veth0.id()));
        assert_eq!(vlan.link(), Some(veth1.id()));
        assert_eq!(veth1.rev_link(), &[vlan.id()]);
        assert_eq!(vf0.physfn(), Some(eth0.id()));
        assert_eq!(eth0.state(), IfState::Up);
        assert_eq!(eth0.properties[0].category, PropCategory::Config);
        assert_eq!(eth0.addresses[0].family, AddrFamily::Inet);
        assert_eq!(topo.warnings().collect::<Vec<_>>(), vec!["cannot read routes"]);
    }

    #[test]
    fn test_toml_snapshot() {
        let input = r#"
            [[namespaces]]

            [[namespaces.interfaces]]
            name = "bond0"
            up = true

            [[namespaces.interfaces]]
            name = "eth1"
            master = "bond0"
            passive_slave = true
        "#;
        let topo = TopologySnapshot::from_toml_str(input)
            .unwrap()
            .into_topology()
            .unwrap();
        let root = topo.root().id();
        let bond = topo.find_interface(root, "bond0").unwrap();
        let eth1 = topo.find_interface(root, "eth1").unwrap();
        assert_eq!(eth1.master(), Some(bond.id()));
        assert!(eth1.flags.contains(IfFlags::PASSIVE_SLAVE));
    }

    #[test]
    fn test_dangling_reference_is_an_error() {
        let input = r#"{ "namespaces": [ { "interfaces": [ { "name": "eth0", "master": "br9" } ] } ] }"#;
        let err = TopologySnapshot::from_json_str(input)
            .unwrap()
            .into_topology()
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InterfaceNotFound);
    }

    #[test]
    fn test_conflicting_peers_rejected() {
        let input = r#"{ "namespaces": [ { "interfaces": [
            { "name": "a", "peer": "b" },
            { "name": "b" },
            { "name": "c", "peer": "a" }
        ] } ] }"#;
        let err = TopologySnapshot::from_json_str(input)
            .unwrap()
            .into_topology()
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
        assert_eq!(err.context()[0], ("interface", "a".to_string()));
    }

    #[test]
    fn test_unnamed_secondary_namespace_rejected() {
        let input = r#"{ "namespaces": [ {}, {} ] }"#;
        let err = TopologySnapshot::from_json_str(input)
            .unwrap()
            .into_topology()
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
    }

    #[test]
    fn test_load_picks_format_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("topo.toml");
        std::fs::write(&path, "[[namespaces]]\nname = \"red\"\n").unwrap();
        let snapshot = TopologySnapshot::load(&path).unwrap();
        assert_eq!(snapshot.namespaces[0].name.as_deref(), Some("red"));

        let err = TopologySnapshot::load(dir.path().join("missing.json")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::FileNotFound);
    }
}
