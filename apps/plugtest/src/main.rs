//! plugtest CLI binary entry point.
//! Resolves configuration, delegates to the library, and prints results.

use clap::Parser;
use plugtest::cli::{Cli, Commands};
use plugtest::config::{self, Effective, Overrides};
use plugtest::discover::{discover_plugins, PluginInfo};
use plugtest::output;
use plugtest::runner::{aggregate_results, Runner};
use std::path::PathBuf;
use std::process::exit;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cli = Cli::parse();
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    match cli.cmd {
        Commands::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
        }
        Commands::Discover {
            path,
            filter,
            output,
        } => {
            let eff = config::resolve_effective(
                &cwd,
                &Overrides {
                    path: path.as_deref(),
                    filter: filter.as_deref(),
                    output: output.as_deref(),
                    ..Overrides::default()
                },
            );
            if eff.output != "json" {
                println!("Discovering plugins in: {}", eff.plugins_root.display());
            }
            let plugins = discover_or_exit(&eff, eff.filter.as_deref());
            output::print_discover(&plugins, &eff.output);
            if plugins.is_empty() {
                exit(1);
            }
        }
        Commands::Validate {
            plugin,
            path,
            output,
        } => {
            let eff = config::resolve_effective(
                &cwd,
                &Overrides {
                    path: path.as_deref(),
                    output: output.as_deref(),
                    ..Overrides::default()
                },
            );
            if eff.output != "json" {
                println!("Validating plugin: {}", plugin);
            }
            let info = first_plugin_or_exit(&eff, &plugin);
            let run = run_one(&Runner::new(eff.workers), &info);
            output::print_validate(&run, &eff.output);
            let total = run.score.total_components;
            if total == 0 || run.score.valid_components != total {
                exit(1);
            }
        }
        Commands::Test {
            path,
            filter,
            workers,
            output,
        } => {
            let eff = config::resolve_effective(
                &cwd,
                &Overrides {
                    path: path.as_deref(),
                    filter: filter.as_deref(),
                    workers,
                    output: output.as_deref(),
                },
            );
            let plugins = discover_or_exit(&eff, eff.filter.as_deref());
            if plugins.is_empty() {
                if eff.output == "json" {
                    output::print_discover(&plugins, &eff.output);
                } else {
                    println!("No plugins found.");
                }
                exit(1);
            }
            if eff.output != "json" {
                println!("Testing plugins in: {}\n", eff.plugins_root.display());
                println!("Found {} plugin(s). Running tests...\n", plugins.len());
            }
            let out_mode = eff.output.clone();
            let progress = move |done: usize, total: usize, name: &str| {
                output::print_progress(done, total, name, &out_mode);
            };
            let runs = match Runner::new(eff.workers).run_all(&plugins, Some(&progress)) {
                Ok(r) => r,
                Err(e) => {
                    eprintln!("{} {}", output::error_prefix(), e);
                    exit(2);
                }
            };
            let summary = aggregate_results(&runs);
            output::print_summary(&runs, &summary, &eff.output);
            if summary.plugins_with_errors > 0 {
                exit(1);
            }
        }
        Commands::Score {
            plugin,
            path,
            output,
        } => {
            let eff = config::resolve_effective(
                &cwd,
                &Overrides {
                    path: path.as_deref(),
                    output: output.as_deref(),
                    ..Overrides::default()
                },
            );
            if eff.output != "json" {
                println!("Scoring plugin: {}", plugin);
            }
            let info = first_plugin_or_exit(&eff, &plugin);
            let run = run_one(&Runner::new(eff.workers), &info);
            output::print_score(&run, &eff.output);
        }
    }
}

fn discover_or_exit(eff: &Effective, filter: Option<&str>) -> Vec<PluginInfo> {
    match discover_plugins(&eff.plugins_root, filter) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("{} {}", output::error_prefix(), e);
            exit(2);
        }
    }
}

fn first_plugin_or_exit(eff: &Effective, name: &str) -> PluginInfo {
    match discover_or_exit(eff, Some(name)).into_iter().next() {
        Some(p) => p,
        None => {
            eprintln!("{} Plugin '{}' not found.", output::error_prefix(), name);
            exit(1);
        }
    }
}

fn run_one(runner: &Runner, info: &PluginInfo) -> plugtest::runner::PluginRun {
    match runner.run(info) {
        Ok(run) => run,
        Err(e) => {
            eprintln!("{} {}", output::error_prefix(), e);
            exit(2);
        }
    }
}
