//! Incremental construction of a [`Topology`].
//!
//! Forward edges (master, link, peer, physfn) are only set through the
//! builder. Every setter updates the matching reverse index in the same call,
//! so the finished topology never needs a fix-up pass.

use tracing::debug;

use netplot_error::{Error, Result};

use crate::id::{InterfaceId, NamespaceId};
use crate::iface::Interface;
use crate::netns::Namespace;
use crate::topology::Topology;

#[derive(Debug)]
pub struct TopologyBuilder {
    topo: Topology,
}

impl Default for TopologyBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TopologyBuilder {
    /// Start a topology with an unnamed root namespace.
    pub fn new() -> Self {
        Self {
            topo: Topology {
                namespaces: vec![Namespace::new(NamespaceId::new(0), None)],
                interfaces: Vec::new(),
            },
        }
    }

    pub fn root(&self) -> NamespaceId {
        NamespaceId::new(0)
    }

    pub fn add_namespace(&mut self, name: impl Into<String>) -> NamespaceId {
        let id = NamespaceId::new(self.topo.namespaces.len() as u32);
        self.topo
            .namespaces
            .push(Namespace::new(id, Some(name.into())));
        id
    }

    pub fn add_interface(&mut self, ns: NamespaceId, name: impl Into<String>) -> Result<InterfaceId> {
        let name = name.into();
        if self.topo.namespace(ns).is_none() {
            return Err(Error::namespace_not_found(ns.to_string())
                .with_operation("builder::add_interface"));
        }
        if self.topo.find_interface(ns, &name).is_some() {
            let ns_name = self.topo[ns].display_name().to_string();
            return Err(Error::duplicate_interface(ns_name, name)
                .with_operation("builder::add_interface"));
        }

        let id = InterfaceId::new(self.topo.interfaces.len() as u32);
        self.topo.interfaces.push(Interface::new(id, ns, name));
        self.topo.namespaces[ns.index()].interfaces.push(id);
        Ok(id)
    }

    pub fn namespace_mut(&mut self, id: NamespaceId) -> Result<&mut Namespace> {
        self.topo.namespaces.get_mut(id.index()).ok_or_else(|| {
            Error::namespace_not_found(id.to_string()).with_operation("builder::namespace_mut")
        })
    }

    pub fn interface_mut(&mut self, id: InterfaceId) -> Result<&mut Interface> {
        self.check(id, "builder::interface_mut")?;
        Ok(&mut self.topo.interfaces[id.index()])
    }

    pub fn find_namespace(&self, name: Option<&str>) -> Option<NamespaceId> {
        self.topo.find_namespace(name).map(Namespace::id)
    }

    pub fn find_interface(&self, ns: NamespaceId, name: &str) -> Option<InterfaceId> {
        self.topo.find_interface(ns, name).map(Interface::id)
    }

    /// Enslave `slave` to `master`, or release it with `None`.
    pub fn set_master(&mut self, slave: InterfaceId, master: Option<InterfaceId>) -> Result<()> {
        const OP: &str = "builder::set_master";
        self.check(slave, OP)?;
        if let Some(master) = master {
            self.check(master, OP)?;
            self.check_distinct(slave, master, OP)?;
        }

        if let Some(old) = self.topo.interfaces[slave.index()].master.take() {
            self.topo.interfaces[old.index()]
                .rev_master
                .retain(|id| *id != slave);
        }
        if let Some(master) = master {
            self.topo.interfaces[slave.index()].master = Some(master);
            self.topo.interfaces[master.index()].rev_master.push(slave);
        }
        Ok(())
    }

    /// Stack `upper` on `lower`, or unstack it with `None`.
    pub fn set_link(&mut self, upper: InterfaceId, lower: Option<InterfaceId>) -> Result<()> {
        const OP: &str = "builder::set_link";
        self.check(upper, OP)?;
        if let Some(lower) = lower {
            self.check(lower, OP)?;
            self.check_distinct(upper, lower, OP)?;
        }

        if let Some(old) = self.topo.interfaces[upper.index()].link.take() {
            self.topo.interfaces[old.index()]
                .rev_link
                .retain(|id| *id != upper);
        }
        if let Some(lower) = lower {
            self.topo.interfaces[upper.index()].link = Some(lower);
            self.topo.interfaces[lower.index()].rev_link.push(upper);
        }
        Ok(())
    }

    /// Pair `a` and `b`. Any previous partner of either side is unpaired.
    pub fn set_peer(&mut self, a: InterfaceId, b: InterfaceId) -> Result<()> {
        const OP: &str = "builder::set_peer";
        self.check(a, OP)?;
        self.check(b, OP)?;
        self.check_distinct(a, b, OP)?;

        self.clear_peer(a)?;
        self.clear_peer(b)?;
        self.topo.interfaces[a.index()].peer = Some(b);
        self.topo.interfaces[b.index()].peer = Some(a);
        Ok(())
    }

    pub fn clear_peer(&mut self, id: InterfaceId) -> Result<()> {
        self.check(id, "builder::clear_peer")?;
        if let Some(old) = self.topo.interfaces[id.index()].peer.take() {
            self.topo.interfaces[old.index()].peer = None;
        }
        Ok(())
    }

    pub fn set_physfn(&mut self, vf: InterfaceId, pf: Option<InterfaceId>) -> Result<()> {
        const OP: &str = "builder::set_physfn";
        self.check(vf, OP)?;
        if let Some(pf) = pf {
            self.check(pf, OP)?;
            self.check_distinct(vf, pf, OP)?;
        }
        self.topo.interfaces[vf.index()].physfn = pf;
        Ok(())
    }

    pub fn build(self) -> Topology {
        debug_assert!(
            self.topo.check_invariants().is_ok(),
            "topology invariants violated: {:?}",
            self.topo.check_invariants()
        );
        debug!(
            namespaces = self.topo.namespaces.len(),
            interfaces = self.topo.interfaces.len(),
            "topology built"
        );
        self.topo
    }

    fn check(&self, id: InterfaceId, op: &'static str) -> Result<()> {
        if self.topo.interface(id).is_none() {
            return Err(Error::interface_not_found(id.to_string()).with_operation(op));
        }
        Ok(())
    }

    fn check_distinct(&self, a: InterfaceId, b: InterfaceId, op: &'static str) -> Result<()> {
        if a == b {
            return Err(Error::invalid_argument(format!("{a} cannot be related to itself"))
                .with_operation(op)
                .with_context("interface", self.topo[a].name.clone()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use netplot_error::ErrorKind;

    fn builder_with(names: &[&str]) -> (TopologyBuilder, Vec<InterfaceId>) {
        let mut builder = TopologyBuilder::new();
        let root = builder.root();
        let ids = names
            .iter()
            .map(|name| builder.add_interface(root, *name).unwrap())
            .collect();
        (builder, ids)
    }

    #[test]
    fn test_ids_are_sequential() {
        let (mut builder, ids) = builder_with(&["lo", "eth0"]);
        assert_eq!(ids, vec![InterfaceId::new(0), InterfaceId::new(1)]);
        let blue = builder.add_namespace("blue");
        assert_eq!(blue, NamespaceId::new(1));
        assert_eq!(builder.add_interface(blue, "lo").unwrap(), InterfaceId::new(2));
    }

    #[test]
    fn test_duplicate_interface_rejected() {
        let (mut builder, _) = builder_with(&["eth0"]);
        let root = builder.root();
        let err = builder.add_interface(root, "eth0").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DuplicateInterface);
    }

    #[test]
    fn test_unknown_namespace_rejected() {
        let mut builder = TopologyBuilder::new();
        let err = builder
            .add_interface(NamespaceId::new(5), "eth0")
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NamespaceNotFound);
    }

    #[test]
    fn test_master_maintains_reverse_index() {
        let (mut builder, ids) = builder_with(&["eth0", "eth1", "bond0", "br0"]);
        let (eth0, eth1, bond0, br0) = (ids[0], ids[1], ids[2], ids[3]);
        builder.set_master(eth0, Some(bond0)).unwrap();
        builder.set_master(eth1, Some(bond0)).unwrap();
        builder.set_master(eth1, Some(br0)).unwrap();

        let topo = builder.build();
        assert_eq!(topo[bond0].rev_master(), &[eth0]);
        assert_eq!(topo[br0].rev_master(), &[eth1]);
        assert_eq!(topo[eth1].master(), Some(br0));
        topo.check_invariants().unwrap();
    }

    #[test]
    fn test_link_release() {
        let (mut builder, ids) = builder_with(&["eth0", "eth0.10"]);
        builder.set_link(ids[1], Some(ids[0])).unwrap();
        builder.set_link(ids[1], None).unwrap();
        let topo = builder.build();
        assert!(topo[ids[0]].rev_link().is_empty());
        assert_eq!(topo[ids[1]].link(), None);
    }

    #[test]
    fn test_peer_is_symmetric_and_repairs() {
        let (mut builder, ids) = builder_with(&["veth0", "veth1", "veth2"]);
        builder.set_peer(ids[0], ids[1]).unwrap();
        builder.set_peer(ids[2], ids[1]).unwrap();
        let topo = builder.build();
        assert_eq!(topo[ids[0]].peer(), None);
        assert_eq!(topo[ids[1]].peer(), Some(ids[2]));
        assert_eq!(topo[ids[2]].peer(), Some(ids[1]));
    }

    #[test]
    fn test_self_relation_rejected() {
        let (mut builder, ids) = builder_with(&["eth0"]);
        let err = builder.set_master(ids[0], Some(ids[0])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        let err = builder.set_peer(ids[0], ids[0]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn test_unknown_interface_rejected() {
        let (mut builder, ids) = builder_with(&["eth0"]);
        let err = builder
            .set_physfn(ids[0], Some(InterfaceId::new(42)))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InterfaceNotFound);
        assert_eq!(err.operation(), "builder::set_physfn");
    }
}
