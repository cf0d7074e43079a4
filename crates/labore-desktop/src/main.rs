use std::path::PathBuf;

use clap::Parser;
use eyre::Result;

use labore_desktop::state::AppState;
use labore_desktop::{config, interactive, selftest};

#[derive(Parser, Debug)]
#[command(name = "labore-checklist", version)]
#[command(about = "Occupational exam checklist generator")]
struct Args {
    /// Run the built-in checks in a temporary directory and exit
    #[arg(long = "self-test", visible_alias = "test")]
    self_test: bool,

    /// Where the catalog, config, history and documents live
    #[arg(long, env = config::DATA_DIR_ENV)]
    data_dir: Option<PathBuf>,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    if args.self_test {
        let stdout = std::io::stdout();
        let passed = selftest::run(&mut stdout.lock())?;
        std::process::exit(if passed { 0 } else { 1 });
    }

    let root = config::resolve_data_dir(args.data_dir.as_deref())?;
    let paths = config::prepare_data_dir(&root)?;
    let mut state = AppState::load(paths);

    interactive::run(&mut state)
}
