//! Pass 1: node declarations, clustered per named namespace.

use std::fmt::Write;

use netplot_core::label::visible_properties;
use netplot_core::{IfState, Interface, PrintMask, PropCategory, Topology};

use crate::dot::{Attr, DotBuilder};

pub fn render_nodes(b: &mut DotBuilder, topo: &Topology, mask: PrintMask) {
    for ns in topo.namespaces() {
        if let Some(name) = &ns.name {
            b.start_cluster(&ns.id().to_string(), name);
        }
        for iface in topo.interfaces_of(ns) {
            render_node(b, iface, mask);
        }
        if ns.name.is_some() {
            b.end_cluster();
        }
    }
}

fn render_node(b: &mut DotBuilder, iface: &Interface, mask: PrintMask) {
    let mut attrs = vec![Attr::text("label", node_label(iface, mask))];
    if mask.visible(PropCategory::State) {
        attrs.extend(state_style(iface.state()));
    }
    if iface.has_warnings() {
        attrs.push(Attr::text("color", "red"));
    }
    b.node(&iface.id().to_string(), &attrs);
}

/// Multi-line node label: name and driver, visible properties, then MTU and
/// addresses when configuration is visible.
pub fn node_label(iface: &Interface, mask: PrintMask) -> String {
    let mut label = iface.name.clone();
    if let Some(driver) = &iface.driver {
        let _ = write!(label, " ({driver})");
    }
    for prop in visible_properties(&iface.properties, mask) {
        let _ = write!(label, "\n{}: {}", prop.key, prop.value);
    }
    if mask.visible(PropCategory::Config) {
        if let Some(mtu) = iface.notable_mtu() {
            let _ = write!(label, "\nMTU {mtu}");
        }
        for addr in &iface.addresses {
            let _ = write!(label, "\n{}", addr.address);
            if let Some(peer) = &addr.peer {
                let _ = write!(label, " peer {peer}");
            }
        }
    }
    label
}

fn state_style(state: IfState) -> Vec<Attr<'static>> {
    match state {
        IfState::None => vec![Attr::id("style", "dotted")],
        IfState::Down => vec![Attr::id("style", "filled"), Attr::text("fillcolor", "grey")],
        IfState::UpNoLink => vec![Attr::id("style", "filled"), Attr::text("fillcolor", "pink")],
        IfState::Up => vec![
            Attr::id("style", "filled"),
            Attr::text("fillcolor", "darkolivegreen1"),
        ],
    }
}
