#![forbid(unsafe_code)]

mod output;

use anyhow::Context;
use clap::Parser;
use netcent_core::config::CONFIG_FILE_NAME;
use netcent_core::{Config, InputMode, Pipeline, input_mode, load_config, resolve_inputs, timing};
use output::{OutputMode, RunSummary};
use std::env;
use std::io;
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[allow(clippy::struct_excessive_bools)]
#[command(
    author,
    version,
    about = "netcent: network images and centrality tables from edge lists",
    long_about = "Load tab-separated weighted edge lists (columns Source, Target, Weight), \
                  draw each network and write per-node degree, betweenness and eigenvector \
                  centrality.",
    after_help = "EXAMPLES:\n    # One file, read from in/toy.csv\n    netcent -i toy.csv\n\n    # Every file in in/networks/\n    netcent --input networks\n\n    # Machine-readable summary\n    netcent -i toy.csv --json"
)]
struct Cli {
    /// Input data: a file name ending in .csv, or a directory name, under the input root.
    #[arg(short, long)]
    input: String,

    /// Config file (default: ./netcent.toml if present).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Directory that --input is resolved against.
    #[arg(long, value_name = "DIR")]
    input_root: Option<PathBuf>,

    /// Directory the images and tables are written to.
    #[arg(long, value_name = "DIR")]
    output_root: Option<PathBuf>,

    /// Seed for the spring layout, for reproducible images.
    #[arg(long)]
    seed: Option<u64>,

    /// Use the Weight column in betweenness and eigenvector centrality.
    #[arg(long)]
    weighted: bool,

    /// Enable verbose logging.
    #[arg(short, long)]
    verbose: bool,

    /// Print time spent per stage (load, render, metrics) to stderr.
    #[arg(long)]
    timing: bool,

    /// Emit a JSON run summary instead of human-readable text.
    #[arg(long)]
    json: bool,
}

impl Cli {
    fn output_mode(&self) -> OutputMode {
        if self.json {
            OutputMode::Json
        } else {
            OutputMode::Human
        }
    }

    /// Load the config file and apply flag overrides on top.
    fn resolve_config(&self) -> anyhow::Result<Config> {
        let path = self
            .config
            .clone()
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME));
        if self.config.is_some() && !path.exists() {
            anyhow::bail!("config file {} does not exist", path.display());
        }
        let mut config = load_config(&path)?;

        if let Some(root) = &self.input_root {
            config.input_root.clone_from(root);
        }
        if let Some(root) = &self.output_root {
            config.output_root.clone_from(root);
        }
        if self.seed.is_some() {
            config.layout.seed = self.seed;
        }
        if self.weighted {
            config.metrics.weighted = true;
        }
        Ok(config)
    }
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("NETCENT_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if verbose {
            "netcent=debug,netcent_core=debug,info"
        } else {
            "netcent=info,netcent_core=info,warn"
        })
    });

    let format = env::var("NETCENT_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    // stdout carries the run output; logs go to stderr.
    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(io::stderr))
                .init();
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = cli.resolve_config()?;
    debug!(?config, "effective config");

    let mode = cli.output_mode();
    let stdout = io::stdout();
    output::render_start(mode, &mut stdout.lock())?;

    let inputs = resolve_inputs(&cli.input, &config.input_root)
        .with_context(|| format!("cannot resolve input {:?}", cli.input))?;
    let input_kind = input_mode(&cli.input);
    info!(count = inputs.len(), mode = ?input_kind, "resolved inputs");

    let pipeline = Pipeline::new(config);
    let show_progress = input_kind == InputMode::Directory;
    let mut current: Option<PathBuf> = None;
    let result = pipeline.run_batch(&inputs, |progress| {
        current = Some(progress.input.path.clone());
        if show_progress {
            output::report_progress(&progress, &mut io::stderr().lock());
        }
    });
    let files = result.with_context(|| match &current {
        Some(path) => format!("failed to process {}", path.display()),
        None => "failed to prepare output directory".to_string(),
    })?;

    let summary = RunSummary {
        input: cli.input.clone(),
        mode: input_kind,
        files,
    };
    output::render_finish(mode, &summary, &mut stdout.lock())?;

    if cli.timing {
        let rows = timing::summarize(summary.files.iter().map(|f| &f.timings));
        eprint!("{}", timing::format_summary(&rows));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn short_and_long_input_flags() {
        let cli = Cli::parse_from(["netcent", "-i", "toy.csv"]);
        assert_eq!(cli.input, "toy.csv");
        let cli = Cli::parse_from(["netcent", "--input", "networks"]);
        assert_eq!(cli.input, "networks");
    }

    #[test]
    fn input_is_required() {
        let err = Cli::try_parse_from(["netcent"]).expect_err("missing --input");
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn json_flag_sets_output_mode() {
        let cli = Cli::parse_from(["netcent", "-i", "x.csv", "--json"]);
        assert!(cli.output_mode().is_json());
        let cli = Cli::parse_from(["netcent", "-i", "x.csv"]);
        assert!(!cli.output_mode().is_json());
    }

    #[test]
    fn flags_override_config_defaults() {
        let cli = Cli::parse_from([
            "netcent",
            "-i",
            "x.csv",
            "--config",
            "/nonexistent/but/unused.toml",
        ]);
        assert!(cli.resolve_config().is_err(), "explicit missing config must fail");

        let dir = tempfile::TempDir::new().expect("tempdir");
        let path = dir.path().join("netcent.toml");
        std::fs::write(&path, "output_root = \"from-file\"\n[layout]\nseed = 3\n")
            .expect("write config");
        let path_arg = path.to_string_lossy().into_owned();

        let cli = Cli::parse_from([
            "netcent",
            "-i",
            "x.csv",
            "--config",
            path_arg.as_str(),
            "--input-root",
            "data",
            "--seed",
            "11",
            "--weighted",
        ]);
        let config = cli.resolve_config().expect("config");
        assert_eq!(config.input_root, PathBuf::from("data"));
        assert_eq!(config.output_root, PathBuf::from("from-file"));
        assert_eq!(config.layout.seed, Some(11));
        assert!(config.metrics.weighted);
    }
}
