use anyhow::Context;
use clap::Parser;
use gdbjs::config::{BridgeConfig, SymbolErrorPolicy};
use gdbjs::debugger::snapshot::SnapshotDebugger;
use gdbjs::output::Output;
use gdbjs::session::Session;
use std::io;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Debugger state to replay (TOML)
    #[clap(long, env = "GDBJS_STATE")]
    state: PathBuf,

    /// What to do with symbols that can't be evaluated: `sentinel` or `skip`
    #[clap(long, default_value_t = SymbolErrorPolicy::Sentinel)]
    symbol_errors: SymbolErrorPolicy,

    /// Don't re-read the source list after object files change
    #[clap(long)]
    no_refresh_sources: bool,

    /// Disable diagnostic logging
    #[clap(short, long)]
    quiet: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    gdbjs::log::init(args.quiet);

    let output = Output::stdout();
    let debugger = SnapshotDebugger::from_file(&args.state, output.clone())
        .with_context(|| format!("load debugger state {}", args.state.display()))?;

    let config = BridgeConfig {
        symbol_errors: args.symbol_errors,
        refresh_sources: !args.no_refresh_sources,
    };
    let session = Session::new(debugger, output, config);
    session.run(io::stdin().lock())?;

    Ok(())
}
