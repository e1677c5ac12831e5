//! logicnet-run - simulate a logic diagram document.
//!
//! Usage: `logicnet-run <diagram.yaml> [--config run.yaml] [--cycles N]`

use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing::{error, info};

use logicnet_run::{RunConfig, Session, format_state, init_logging};
use logicnet_shapes::DiagramDocument;
use logicnet_sim::SimulationRegistry;

#[derive(Parser, Debug)]
#[command(name = "logicnet-run")]
#[command(about = "Extract the logic network of a diagram and simulate it")]
struct Args {
    /// Path to the diagram document (YAML)
    diagram: PathBuf,

    /// Run configuration (YAML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the number of cycles
    #[arg(long)]
    cycles: Option<u64>,

    /// Override the cycle length in milliseconds
    #[arg(long)]
    resolution_ms: Option<u32>,

    /// Group id to log every cycle (repeatable)
    #[arg(long = "watch")]
    watch: Vec<String>,

    /// Run feedback loops in best-effort order instead of failing
    #[arg(long)]
    ignore_cycles: bool,
}

fn main() {
    init_logging();

    let args = Args::parse();
    if let Err(e) = run(args) {
        error!("{e}");
        process::exit(1);
    }
}

fn run(args: Args) -> logicnet_run::Result<()> {
    let mut config = match &args.config {
        Some(path) => {
            info!("Loading run config from: {}", path.display());
            RunConfig::load(path)?
        }
        None => RunConfig::default(),
    };
    if let Some(cycles) = args.cycles {
        config.cycles = cycles;
    }
    if let Some(resolution) = args.resolution_ms {
        config.resolution_ms = resolution;
    }
    if !args.watch.is_empty() {
        config.watch = args.watch;
    }
    config.ignore_cycles |= args.ignore_cycles;

    info!("Loading diagram from: {}", args.diagram.display());
    let loaded = DiagramDocument::load(&args.diagram)?.build()?;

    let registry = SimulationRegistry::with_builtins();
    let mut session = Session::new(loaded, config, &registry)?;
    session.run()?;

    println!("{:<24} STATE", "GROUP");
    for (id, state) in session.states() {
        println!("{id:<24} {}", format_state(state));
    }
    Ok(())
}
