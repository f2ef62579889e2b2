//! Namespace nodes.

use crate::id::{InterfaceId, NamespaceId};

/// An isolated group of interfaces. The root namespace usually has no name.
#[derive(Debug, Clone)]
pub struct Namespace {
    id: NamespaceId,
    pub name: Option<String>,
    pub warnings: Vec<String>,
    pub(crate) interfaces: Vec<InterfaceId>,
}

impl Namespace {
    pub(crate) fn new(id: NamespaceId, name: Option<String>) -> Self {
        Self {
            id,
            name,
            warnings: Vec::new(),
            interfaces: Vec::new(),
        }
    }

    pub fn id(&self) -> NamespaceId {
        self.id
    }

    /// Name for display, empty for an unnamed namespace.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }

    /// Interfaces owned by this namespace, in enumeration order.
    pub fn interface_ids(&self) -> &[InterfaceId] {
        &self.interfaces
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}
