use clap::Parser;

use netplot_cli::{Registry, RenderOptions, load_topology, run_render};
use netplot_core::{Error, Result};

#[derive(Parser, Debug)]
#[command(
    name = "netplot",
    about = "netplot: draw network namespaces, interfaces and how they connect",
    version
)]
pub struct Cli {
    /// Topology snapshot to render (.json or .toml)
    #[arg(
        short = 'i',
        long = "input",
        value_name = "FILE",
        required_unless_present = "list_formats"
    )]
    input: Option<String>,

    #[command(flatten)]
    render: RenderOptions,

    /// List available output formats and exit
    #[arg(long = "list-formats", default_value_t = false)]
    list_formats: bool,
}

pub fn run(args: Cli) -> Result<()> {
    // Initialize tracing subscriber for logging
    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .init();
    }

    let registry = Registry::new();
    if args.list_formats {
        print!("{}", registry.listing());
        return Ok(());
    }

    let input = args
        .input
        .ok_or_else(|| Error::config_invalid("missing --input").with_operation("cli::run"))?;
    let topo = load_topology(&input)?;

    if let Err(e) = run_render(&registry, &topo, &args.render) {
        eprintln!("Error: {e}");
        tracing::error!(error = %e, "render failed");
        return Err(e);
    }
    Ok(())
}

pub fn main() -> Result<()> {
    let args = Cli::parse();
    run(args)
}
