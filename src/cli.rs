use clap::Parser;
use std::path::PathBuf;

use dep_visualizer::application::dto::OutputFormat;
use dep_visualizer::config::ConfigOverrides;

/// Explore a package's dependency tree, detect cycles and list reverse dependencies
#[derive(Parser, Debug)]
#[command(name = "dep-visualizer")]
#[command(version)]
#[command(
    about = "Explore a package's dependency tree, detect cycles and list reverse dependencies",
    long_about = None
)]
pub struct Args {
    /// Path to a TOML config file (defaults to ./dep-visualizer.toml when present)
    #[arg(value_name = "CONFIG")]
    pub config: Option<PathBuf>,

    /// Root package to explore
    #[arg(short, long = "package", value_name = "NAME")]
    pub package: Option<String>,

    /// Maximum exploration depth (0-100, default 3)
    #[arg(short = 'd', long)]
    pub max_depth: Option<usize>,

    /// Exclude packages whose name contains this substring
    #[arg(long, value_name = "SUBSTRING")]
    pub filter: Option<String>,

    /// Also list the packages that depend on the root
    #[arg(short, long)]
    pub reverse: bool,

    /// Read dependencies from an adjacency file instead of the registry
    #[arg(long, value_name = "PATH")]
    pub test_repo: Option<PathBuf>,

    /// Use the local test source (the built-in demo table when no file is given)
    #[arg(long)]
    pub test_mode: bool,

    /// Base URL of the package registry JSON API
    #[arg(long, value_name = "URL")]
    pub repository_url: Option<String>,

    /// Stop querying the source after this many requests
    #[arg(long, value_name = "N")]
    pub max_requests: Option<usize>,

    /// Draw the tree with box-drawing characters instead of ASCII
    #[arg(long)]
    pub unicode: bool,

    /// Output format: text, markdown or json
    #[arg(short, long)]
    pub format: Option<OutputFormat>,

    /// Output file path (if not specified, outputs to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Command-line values that take precedence over the config file
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            package_name: self.package.clone(),
            max_depth: self.max_depth,
            filter_substring: self.filter.clone(),
            show_reverse: self.reverse,
            test_mode: self.test_mode,
            test_repository_path: self.test_repo.clone(),
            repository_url: self.repository_url.clone(),
            max_requests: self.max_requests,
            unicode: self.unicode,
            format: self.format,
        }
    }
}
