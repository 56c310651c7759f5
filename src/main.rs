mod commands;
mod core;
mod ui;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use core::error::{FleetError, print_error};

/// Batch maintenance for a fleet of charm repositories
#[derive(Parser)]
#[command(name = "charm-fleet")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
#[command(styles = get_styles())]
struct FleetCli {
  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Classify a charm checkout as source, classic or unknown
  WhatIs {
    /// Charm directory to classify (default: current directory)
    path: Option<PathBuf>,
  },

  /// Show kind and path for every charm in the fleet
  Status {
    /// Output status in JSON format
    #[arg(long)]
    json: bool,
  },

  /// Re-apply the per-kind templates across the fleet
  Sync,

  /// Create the stable branch for one charm and pin its dependencies
  Bump {
    /// Stable release to pin dependencies at, e.g. 22.10
    release: Option<String>,
    /// Stable branch to create, e.g. 22.10
    branch: Option<String>,
  },

  /// Extend every charm's test bundles and CI matrix to a new release
  AddRelease {
    /// Previous series bundle filename, e.g. jammy-yoga.yaml
    prev_series: Option<String>,
    /// Previous UCA bundle filename, e.g. focal-yoga.yaml
    prev_uca: Option<String>,
    /// New series bundle filename, e.g. kinetic-zed.yaml
    new_series: Option<String>,
    /// New UCA bundle filename, e.g. jammy-zed.yaml
    new_uca: Option<String>,
    /// New Ubuntu version, e.g. 22.10
    ubuntu_version: Option<String>,
  },

  /// Build and extract src/build.lock for a source charm
  Lock {
    /// Charm directory to lock (default: current directory)
    #[arg(long)]
    charm_dir: Option<PathBuf>,
  },
}

fn get_styles() -> clap::builder::Styles {
  clap::builder::Styles::styled()
    .usage(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .header(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .literal(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))))
    .invalid(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .error(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .valid(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))),
    )
    .placeholder(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::White))))
}

fn main() {
  let cli = FleetCli::parse();

  let result = match cli.command {
    Commands::WhatIs { path } => commands::run_what_is(path),
    Commands::Status { json } => commands::run_status(json),
    Commands::Sync => commands::run_sync(),
    Commands::Bump { release, branch } => commands::run_bump(release, branch),
    Commands::AddRelease {
      prev_series,
      prev_uca,
      new_series,
      new_uca,
      ubuntu_version,
    } => commands::run_add_release(prev_series, prev_uca, new_series, new_uca, ubuntu_version),
    Commands::Lock { charm_dir } => commands::run_lock(charm_dir),
  };

  if let Err(err) = result {
    handle_error(err);
  }
}

fn handle_error(err: FleetError) -> ! {
  print_error(&err);
  std::process::exit(err.exit_code().as_i32());
}
