use std::path::PathBuf;

use clap::Parser;

use zerofile::config::settings::{FilterMode, ScanConfig};

#[derive(Parser, Debug)]
#[command(
    name = "zerofile",
    version,
    about = "Find and remove zero-length files and empty folders"
)]
struct Cli {
    /// Object types to scan for; one concurrent pass per entry
    object_types: Vec<String>,

    /// Suppress console narration
    #[arg(long)]
    mute: bool,

    /// Recurse through the folder structure (otherwise just list the root)
    #[arg(long)]
    recursive: bool,

    /// Delete all zero-length files
    #[arg(long)]
    delete: bool,

    /// Remove all empty folders, including parents they leave empty
    #[arg(long)]
    prune: bool,

    /// Path to top of search tree
    #[arg(long, default_value = ".")]
    root: PathBuf,

    /// Treat object types as file-name globs instead of full-tree passes
    #[arg(long)]
    glob: bool,

    /// Cancel the remaining passes when one fails
    #[arg(long)]
    fail_fast: bool,

    /// Maximum passes touching the filesystem at once
    #[arg(short = 'j', long, value_parser = clap::value_parser!(u32).range(1..))]
    jobs: Option<u32>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing (logs to stderr)
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialise logging: {}", e))?;

    let cli = Cli::parse();

    let mut config = ScanConfig::with_root(cli.root);
    config.recursive = cli.recursive;
    config.delete_zero_files = cli.delete;
    config.prune_empty_dirs = cli.prune;
    config.mute = cli.mute;
    config.object_types = cli.object_types;
    config.fail_fast = cli.fail_fast;
    if cli.glob {
        config.filter_mode = FilterMode::Glob;
    }
    if let Some(jobs) = cli.jobs {
        config.max_concurrent_scans = jobs as usize;
    }

    let code = zerofile::app::App::new(config).run().await;
    std::process::exit(code.code());
}
