//! Pass 2: relationship edges, and the aggregated warning footer.

use netplot_core::{IfFlags, Interface, Topology};

use crate::dot::{Attr, DotBuilder};

pub fn render_edges(b: &mut DotBuilder, topo: &Topology) {
    for iface in topo.interfaces() {
        render_iface_edges(b, topo, iface);
    }
}

fn render_iface_edges(b: &mut DotBuilder, topo: &Topology, iface: &Interface) {
    let id = iface.id().to_string();

    if let Some(master) = iface.master() {
        let style = if iface.flags.contains(IfFlags::PASSIVE_SLAVE) {
            "dashed"
        } else {
            "solid"
        };
        let mut attrs = vec![Attr::id("style", style)];
        if let Some(label) = iface.master_label() {
            attrs.push(Attr::text("label", label));
        }
        b.edge(&id, &master.to_string(), &attrs);
    }

    if let Some(physfn) = iface.physfn() {
        b.edge(
            &id,
            &physfn.to_string(),
            &[Attr::id("style", "dotted"), Attr::text("taillabel", "PF")],
        );
    }

    // Drawn from the lower device up, in dependency direction.
    if let Some(link) = iface.link() {
        let style = if iface.flags.contains(IfFlags::LINK_WEAK) {
            "dashed"
        } else {
            "solid"
        };
        let mut attrs = vec![Attr::id("style", style)];
        if let Some(label) = &iface.edge_label {
            attrs.push(Attr::text("label", label.as_str()));
        }
        b.edge(&link.to_string(), &id, &attrs);
    }

    // Only the endpoint with the greater id draws the pair.
    if let Some(peer) = iface.peer() {
        debug_assert_eq!(topo[peer].peer(), Some(iface.id()), "asymmetric peer");
        if iface.id() > peer {
            b.edge(&id, &peer.to_string(), &[Attr::id("dir", "none")]);
        }
    }
}

/// Attach every namespace warning to the graph as one red label.
pub fn render_warnings(b: &mut DotBuilder, topo: &Topology) {
    let warnings: Vec<&str> = topo.warnings().collect();
    if warnings.is_empty() {
        return;
    }
    b.attr(Attr::text("label", warnings.join("\n")));
    b.attr(Attr::text("fontcolor", "red"));
}
