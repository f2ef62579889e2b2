//! JSON rendering of a network topology.
//!
//! Produces one compact document per render with sorted keys, so output can
//! be diffed and scripted against. Unlike the DOT output, relationships are
//! reported per interface: `parents`, `children` and `peer` appear at every
//! interface they concern, including both ends of a peer pair.

pub mod convert;
pub mod schema;

use std::io::Write;

use tracing::debug;

use netplot_core::{Error, ErrorKind, Frontend, PrintMask, Result, Stamp, Topology};

pub use convert::to_document;
pub use schema::{AddressRecord, Connection, Document, FORMAT_VERSION, InterfaceRecord, NamespaceRecord};

/// Render the topology as JSON stamped with the current time.
pub fn render_json(topo: &Topology, mask: PrintMask, sink: &mut dyn Write) -> Result<()> {
    render_json_with_stamp(topo, mask, &Stamp::now(), sink)
}

/// Render the topology as JSON with an explicit provenance stamp.
pub fn render_json_with_stamp(
    topo: &Topology,
    mask: PrintMask,
    stamp: &Stamp,
    sink: &mut dyn Write,
) -> Result<()> {
    let output = render_json_to_string(topo, mask, stamp)?;
    sink.write_all(output.as_bytes())
        .and_then(|()| sink.flush())
        .map_err(|e| Error::from(e).with_operation("json::render"))
}

/// Build the compact, key-sorted JSON document in memory.
pub fn render_json_to_string(topo: &Topology, mask: PrintMask, stamp: &Stamp) -> Result<String> {
    debug!(
        namespaces = topo.namespaces().len(),
        interfaces = topo.interface_count(),
        mask = %mask,
        "rendering json document"
    );

    let document = to_document(topo, mask, stamp);
    // Round trip through Value: its map type keeps keys sorted.
    let value = serde_json::to_value(&document).map_err(|e| {
        Error::new(ErrorKind::SerializationFailed, e.to_string())
            .with_operation("json::render")
            .set_source(e)
    })?;
    serde_json::to_string(&value).map_err(|e| {
        Error::new(ErrorKind::SerializationFailed, e.to_string())
            .with_operation("json::render")
            .set_source(e)
    })
}

/// The `json` output format.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFrontend;

impl Frontend for JsonFrontend {
    fn format(&self) -> &'static str {
        "json"
    }

    fn description(&self) -> &'static str {
        "JSON document, format version 2"
    }

    fn render_with_stamp(
        &self,
        topo: &Topology,
        mask: PrintMask,
        stamp: &Stamp,
        sink: &mut dyn Write,
    ) -> Result<()> {
        render_json_with_stamp(topo, mask, stamp, sink)
    }
}
