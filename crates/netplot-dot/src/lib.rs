//! Graphviz DOT rendering of a network topology.
//!
//! All node declarations are emitted before any edge so each named namespace
//! can be drawn as its own cluster. Node styling encodes interface state,
//! edge styling encodes the relationship kind.
//!
//! # Module Structure
//!
//! - [`dot`]: DOT format utilities and the [`DotBuilder`]
//! - `node`: node declarations (pass 1)
//! - `edge`: relationship edges and the warning footer (pass 2)

pub mod dot;
mod edge;
mod node;

use std::io::Write;

use tracing::debug;

use netplot_core::{Error, Frontend, PrintMask, Result, Stamp, Topology};

pub use dot::{Attr, AttrValue, DotBuilder};
pub use node::node_label;

// ============================================================================
// Public API
// ============================================================================

/// Render the topology as a DOT graph stamped with the current time.
pub fn render_dot(topo: &Topology, mask: PrintMask, sink: &mut dyn Write) -> Result<()> {
    render_dot_with_stamp(topo, mask, &Stamp::now(), sink)
}

/// Render the topology as a DOT graph with an explicit provenance stamp.
pub fn render_dot_with_stamp(
    topo: &Topology,
    mask: PrintMask,
    stamp: &Stamp,
    sink: &mut dyn Write,
) -> Result<()> {
    let output = render_dot_to_string(topo, mask, stamp);
    sink.write_all(output.as_bytes())
        .and_then(|()| sink.flush())
        .map_err(|e| Error::from(e).with_operation("dot::render"))
}

/// Build the complete DOT document in memory.
pub fn render_dot_to_string(topo: &Topology, mask: PrintMask, stamp: &Stamp) -> String {
    debug!(
        namespaces = topo.namespaces().len(),
        interfaces = topo.interface_count(),
        mask = %mask,
        "rendering dot graph"
    );

    let mut b = DotBuilder::new(&format!(
        "generated by netplot {} on {}",
        stamp.version, stamp.date
    ));
    b.node_style(&[Attr::id("shape", "box")]);
    node::render_nodes(&mut b, topo, mask);
    edge::render_edges(&mut b, topo);
    edge::render_warnings(&mut b, topo);
    b.build()
}

/// The `dot` output format.
#[derive(Debug, Clone, Copy, Default)]
pub struct DotFrontend;

impl Frontend for DotFrontend {
    fn format(&self) -> &'static str {
        "dot"
    }

    fn description(&self) -> &'static str {
        "dot language (suitable for graphviz)"
    }

    fn render_with_stamp(
        &self,
        topo: &Topology,
        mask: PrintMask,
        stamp: &Stamp,
        sink: &mut dyn Write,
    ) -> Result<()> {
        render_dot_with_stamp(topo, mask, stamp, sink)
    }
}
