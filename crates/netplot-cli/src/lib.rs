//! netplot command-line interface.
//!
pub mod options;
pub mod registry;

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use tracing::info;

use netplot_core::{Error, Result, Stamp, Topology, TopologySnapshot};

pub use options::RenderOptions;
pub use registry::Registry;

/// Load a topology snapshot file and resolve it into a topology.
pub fn load_topology(path: impl AsRef<Path>) -> Result<Topology> {
    let path = path.as_ref();
    let snapshot = TopologySnapshot::load(path)?;
    let topo = snapshot
        .into_topology()
        .map_err(|e| e.with_context("path", path.display().to_string()))?;
    info!(
        path = %path.display(),
        namespaces = topo.namespaces().len(),
        interfaces = topo.interface_count(),
        "topology loaded"
    );
    Ok(topo)
}

/// Render `topo` with the selected frontend into `sink`.
pub fn render_to(
    registry: &Registry,
    topo: &Topology,
    opts: &RenderOptions,
    stamp: &Stamp,
    sink: &mut dyn Write,
) -> Result<()> {
    let frontend = registry.lookup(&opts.format)?;
    frontend.render_with_stamp(topo, opts.print_mask, stamp, sink)
}

/// Render to the output file, or stdout when none is given.
pub fn run_render(registry: &Registry, topo: &Topology, opts: &RenderOptions) -> Result<()> {
    let stamp = Stamp::now();
    match &opts.output {
        Some(path) => {
            let file = File::create(path).map_err(|e| {
                Error::from(e)
                    .with_operation("cli::create_output")
                    .with_context("path", path.clone())
            })?;
            let mut sink = BufWriter::new(file);
            render_to(registry, topo, opts, &stamp, &mut sink)?;
            info!(path, format = %opts.format, "output written");
        }
        None => {
            let stdout = io::stdout();
            let mut sink = stdout.lock();
            render_to(registry, topo, opts, &stamp, &mut sink)?;
        }
    }
    Ok(())
}
