//! Stress and snapshot inspection subcommands.
//!
//! Flags override the `RANDBST_STRESS_*` environment variables, which in
//! turn override the built-in defaults.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use randbst::RandomBst;
use randbst::snapshot::{read_snapshot, write_snapshot};
use randbst::stress::{StressConfig, drain, fill};

/// Arguments for the stress subcommand
#[derive(Args, Debug)]
pub struct StressArgs {
    /// Number of puts during the fill phase
    #[arg(long, short = 'n')]
    pub count: Option<usize>,

    /// Insert keys 0..n in order instead of random keys
    #[arg(long)]
    pub ordered: bool,

    /// Skip the min/max check after every put
    #[arg(long)]
    pub no_check_min_max: bool,

    /// Verify the whole tree every N operations (0 disables)
    #[arg(long)]
    pub verify_every: Option<usize>,

    /// Report progress every N operations (0 disables)
    #[arg(long)]
    pub report_every: Option<usize>,

    /// Random seed for reproducible runs
    #[arg(long)]
    pub seed: Option<u64>,

    /// Write a snapshot of the filled tree to this path
    #[arg(long)]
    pub snapshot: Option<PathBuf>,

    /// Stop after the fill phase
    #[arg(long)]
    pub skip_drain: bool,
}

impl StressArgs {
    fn config(&self) -> Result<StressConfig> {
        let mut config =
            StressConfig::from_env().context("Failed to read stress configuration")?;
        if let Some(count) = self.count {
            config.count = count;
        }
        if self.ordered {
            config.ordered = true;
        }
        if self.no_check_min_max {
            config.check_min_max = false;
        }
        if let Some(verify_every) = self.verify_every {
            config.verify_every = verify_every;
        }
        if let Some(report_every) = self.report_every {
            config.report_every = report_every;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        Ok(config)
    }
}

/// Arguments for the inspect subcommand
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Snapshot file written by `stress --snapshot`
    pub path: PathBuf,
}

/// Runs the stress subcommand.
pub fn run(args: &StressArgs) -> Result<()> {
    let config = args.config()?;
    tracing::info!(?config, "starting stress run");

    let (mut tree, filled) = fill(&config).context("Fill phase failed")?;
    tracing::info!(
        operations = filled.operations,
        size = filled.size,
        height = filled.height,
        "fill phase passed"
    );

    if let Some(path) = &args.snapshot {
        write_snapshot(&tree, path)
            .with_context(|| format!("Failed to write snapshot to {}", path.display()))?;
        tracing::info!(path = %path.display(), "snapshot written");
    }

    if args.skip_drain {
        return Ok(());
    }

    let drained = drain(&mut tree, &config).context("Drain phase failed")?;
    tracing::info!(
        removals = drained.removals,
        last_min = ?drained.last_min,
        last_max = ?drained.last_max,
        "drain phase passed"
    );
    Ok(())
}

/// Runs the inspect subcommand.
pub fn inspect(args: &InspectArgs) -> Result<()> {
    let tree: RandomBst<i64, i64> = read_snapshot(&args.path)
        .with_context(|| format!("Failed to load snapshot from {}", args.path.display()))?;

    tracing::info!(
        size = tree.len(),
        height = tree.height(),
        min = ?tree.min_key(),
        max = ?tree.max_key(),
        "snapshot loaded and verified"
    );
    Ok(())
}
