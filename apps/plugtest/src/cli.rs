//! CLI argument parsing via `clap`.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "plugtest",
    version,
    about = "Plugin component linter and quality scorer",
    long_about = "plugtest: discover plugins on disk, validate their components, and score plugin quality.\n\nConfiguration precedence: CLI > plugtest.toml > defaults.",
    after_help = "Examples:\n  plugtest discover --path ~/.claude/plugins/cache\n  plugtest validate --plugin my-plugin\n  plugtest test --filter 'acme-*' --workers 8\n  plugtest score --plugin my-plugin --output json",
    arg_required_else_help = true
)]
/// Top-level CLI options and subcommands.
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand)]
/// Supported subcommands.
pub enum Commands {
    /// Show version
    #[command(about = "Show version", long_about = "Print the current plugtest version.")]
    Version,
    /// List plugins found under the plugins root
    #[command(
        about = "Discover plugins",
        long_about = "List plugin versions found under the plugins root. Exits non-zero when none are found.",
        after_help = "Examples:\n  plugtest discover\n  plugtest discover --filter 'acme-*' --output json"
    )]
    Discover {
        #[arg(long, help = "Plugins root (default: ~/.claude/plugins/cache)")]
        path: Option<String>,
        #[arg(long, help = "Glob filter on plugin names")]
        filter: Option<String>,
        #[arg(long, help = "Output mode: human|json (default: human)")]
        output: Option<String>,
    },
    /// Validate one plugin's components
    #[command(
        about = "Validate a plugin",
        long_about = "Validate every component of the first plugin matching --plugin. Exits non-zero unless all components are valid.",
        after_help = "Examples:\n  plugtest validate --plugin my-plugin\n  plugtest validate --plugin my-plugin --output json"
    )]
    Validate {
        #[arg(long, help = "Plugin name (glob allowed)")]
        plugin: String,
        #[arg(long, help = "Plugins root (default: ~/.claude/plugins/cache)")]
        path: Option<String>,
        #[arg(long, help = "Output mode: human|json (default: human)")]
        output: Option<String>,
    },
    /// Validate and score all plugins in parallel
    #[command(
        about = "Run full test suite",
        long_about = "Validate all discovered plugins on a worker pool and print a summary. Exits non-zero when any plugin has invalid components.",
        after_help = "Examples:\n  plugtest test\n  plugtest test --filter 'acme-*' --workers 8"
    )]
    Test {
        #[arg(long, help = "Plugins root (default: ~/.claude/plugins/cache)")]
        path: Option<String>,
        #[arg(long, help = "Glob filter on plugin names")]
        filter: Option<String>,
        #[arg(long, help = "Number of parallel workers (default: 4)")]
        workers: Option<usize>,
        #[arg(long, help = "Output mode: human|json (default: human)")]
        output: Option<String>,
    },
    /// Score one plugin's quality
    #[command(
        about = "Score plugin quality",
        long_about = "Print the aggregated quality score, per-type breakdown, and top recommendations for the first plugin matching --plugin.",
        after_help = "Examples:\n  plugtest score --plugin my-plugin"
    )]
    Score {
        #[arg(long, help = "Plugin name (glob allowed)")]
        plugin: String,
        #[arg(long, help = "Plugins root (default: ~/.claude/plugins/cache)")]
        path: Option<String>,
        #[arg(long, help = "Output mode: human|json (default: human)")]
        output: Option<String>,
    },
}
