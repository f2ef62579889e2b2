//! The immutable topology graph handed to renderers.

use std::ops::Index;

use netplot_error::{Error, Result};

use crate::id::{InterfaceId, NamespaceId};
use crate::iface::Interface;
use crate::netns::Namespace;

/// Namespaces and interfaces in enumeration order. The first namespace is the root.
///
/// Built once by [`TopologyBuilder`](crate::TopologyBuilder) and read-only
/// afterwards, so any number of renderers may borrow it at the same time.
#[derive(Debug, Clone)]
pub struct Topology {
    pub(crate) namespaces: Vec<Namespace>,
    pub(crate) interfaces: Vec<Interface>,
}

impl Topology {
    pub fn root(&self) -> &Namespace {
        &self.namespaces[0]
    }

    pub fn namespaces(&self) -> &[Namespace] {
        &self.namespaces
    }

    pub fn namespace(&self, id: NamespaceId) -> Option<&Namespace> {
        self.namespaces.get(id.index())
    }

    pub fn interface(&self, id: InterfaceId) -> Option<&Interface> {
        self.interfaces.get(id.index())
    }

    /// Interfaces of `ns` in enumeration order.
    pub fn interfaces_of<'a>(
        &'a self,
        ns: &'a Namespace,
    ) -> impl Iterator<Item = &'a Interface> + 'a {
        ns.interface_ids().iter().map(move |id| &self[*id])
    }

    /// All interfaces, namespace by namespace.
    pub fn interfaces(&self) -> impl Iterator<Item = &Interface> + '_ {
        self.namespaces.iter().flat_map(move |ns| self.interfaces_of(ns))
    }

    pub fn interface_count(&self) -> usize {
        self.interfaces.len()
    }

    pub fn find_namespace(&self, name: Option<&str>) -> Option<&Namespace> {
        self.namespaces.iter().find(|ns| ns.name.as_deref() == name)
    }

    pub fn find_interface(&self, ns: NamespaceId, name: &str) -> Option<&Interface> {
        let ns = self.namespace(ns)?;
        self.interfaces_of(ns).find(|iface| iface.name == name)
    }

    /// Every namespace warning in namespace order.
    pub fn warnings(&self) -> impl Iterator<Item = &str> + '_ {
        self.namespaces
            .iter()
            .flat_map(|ns| ns.warnings.iter().map(String::as_str))
    }

    /// Verify peer symmetry and reverse index consistency.
    pub fn check_invariants(&self) -> Result<()> {
        for iface in &self.interfaces {
            let owner = self.namespace(iface.namespace()).ok_or_else(|| {
                Error::namespace_not_found(iface.namespace().to_string())
                    .with_operation("topology::check_invariants")
            })?;
            if !owner.interface_ids().contains(&iface.id()) {
                return Err(violation(iface, "interface missing from its namespace"));
            }

            if let Some(peer) = iface.peer() {
                if self[peer].peer() != Some(iface.id()) {
                    return Err(violation(iface, "peer relationship is not symmetric"));
                }
            }
            if let Some(master) = iface.master() {
                if !self[master].rev_master().contains(&iface.id()) {
                    return Err(violation(iface, "master target lacks reverse entry"));
                }
            }
            if let Some(link) = iface.link() {
                if !self[link].rev_link().contains(&iface.id()) {
                    return Err(violation(iface, "link target lacks reverse entry"));
                }
            }
            for slave in iface.rev_master() {
                if self[*slave].master() != Some(iface.id()) {
                    return Err(violation(iface, "stale reverse master entry"));
                }
            }
            for upper in iface.rev_link() {
                if self[*upper].link() != Some(iface.id()) {
                    return Err(violation(iface, "stale reverse link entry"));
                }
            }
        }
        Ok(())
    }
}

fn violation(iface: &Interface, message: &str) -> Error {
    Error::invariant_violation(message)
        .with_operation("topology::check_invariants")
        .with_context("interface", iface.id().to_string())
        .with_context("name", iface.name.clone())
}

impl Index<InterfaceId> for Topology {
    type Output = Interface;

    fn index(&self, id: InterfaceId) -> &Interface {
        &self.interfaces[id.index()]
    }
}

impl Index<NamespaceId> for Topology {
    type Output = Namespace;

    fn index(&self, id: NamespaceId) -> &Namespace {
        &self.namespaces[id.index()]
    }
}
