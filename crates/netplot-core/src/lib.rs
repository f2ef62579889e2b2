//! Network topology model shared by the netplot renderers.
//!
//! A [`Topology`] is an ordered list of [`Namespace`]s, each owning an ordered
//! list of [`Interface`]s. Interfaces are linked by master, link, peer and
//! physfn relationships; the builder keeps the reverse master/link indices in
//! sync so renderers can walk the graph in either direction without mutation.

pub mod builder;
pub mod frontend;
pub mod id;
pub mod iface;
pub mod label;
pub mod netns;
pub mod snapshot;
pub mod topology;

#[cfg(any(test, feature = "testing"))]
pub mod fixtures;

pub use builder::TopologyBuilder;
pub use frontend::{Frontend, Stamp};
pub use id::{InterfaceId, NamespaceId};
pub use iface::{AddrBinding, AddrFamily, IfFlags, Interface, IfState};
pub use label::{PrintMask, PropCategory, Property};
pub use netns::Namespace;
pub use netplot_error::{Error, ErrorKind, Result};
pub use snapshot::TopologySnapshot;
pub use topology::Topology;

/// Tool version embedded in rendered output.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
