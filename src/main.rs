use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use clap::{ArgAction, Parser};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use token_forge::{TokenBuildContext, TokenBuilder, TokenConfig};

/// Create MapTool tokens from a CSV table.
///
/// For each line an image is looked up in `<imgdir>/<Source>/` using the `Name` column. The
/// name becomes the GM name and the archive name; players see it ROT13 encoded. All other
/// columns become token properties. `Skills` is split into `name value` pieces with a
/// leading `+` removed. Archives are written next to the matched image and each resolved
/// name is printed.
#[derive(Debug, Parser)]
#[command(name = "token_forge", version)]
struct Cli {
  /// Dataset to process.
  csvfile: PathBuf,
  /// Image directory holding one subdirectory per `Source`; tokens are written there too.
  imgdir: PathBuf,
  /// Map the `Space` column (1, 2.5, 5, 10, 15, 20, 30) to MapTool token sizes.
  #[arg(short, long)]
  sizes: bool,
  /// Configuration file; defaults to `token_forge.config.json` in the working directory.
  #[arg(short, long, value_name = "FILE")]
  config: Option<PathBuf>,
  /// Increase log verbosity (repeatable).
  #[arg(short, long, action = ArgAction::Count)]
  verbose: u8,
}

fn main() -> ExitCode {
  let cli = Cli::parse();
  init_tracing(cli.verbose);

  match run(&cli) {
    Ok(()) => ExitCode::SUCCESS,
    Err(err) => {
      eprintln!("error: {err:#}");
      ExitCode::FAILURE
    }
  }
}

fn init_tracing(verbose: u8) {
  let default_level = match verbose {
    0 => "warn",
    1 => "info",
    2 => "debug",
    _ => "trace",
  };
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(io::stderr)
    .with_target(false)
    .init();
}

fn run(cli: &Cli) -> Result<()> {
  let config = match &cli.config {
    Some(path) => TokenConfig::load(path)
      .with_context(|| format!("failed to load configuration {}", path.display()))?,
    None => {
      let cwd = std::env::current_dir().context("failed to determine working directory")?;
      TokenConfig::discover(&cwd)
    }
  };
  debug!(?config, "loaded configuration");

  if !cli.imgdir.is_dir() {
    bail!("image directory {} does not exist", cli.imgdir.display());
  }

  let rules = config.to_rules();
  let template = config.to_template();
  let builder = TokenBuilder::new(TokenBuildContext {
    image_root: &cli.imgdir,
    rules: &rules,
    template: &template,
    map_sizes: cli.sizes,
  });

  let stdout = io::stdout();
  let summary = builder
    .build(&cli.csvfile, &mut stdout.lock())
    .with_context(|| format!("failed to build tokens from {}", cli.csvfile.display()))?;
  debug!(
    written = summary.written.len(),
    unresolved = ?summary.unresolved,
    "done"
  );
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;
  use clap::CommandFactory;

  #[test]
  fn cli_definition_is_consistent() {
    Cli::command().debug_assert();
  }

  #[test]
  fn parses_positional_arguments_and_flags() {
    let cli = Cli::try_parse_from(["token_forge", "bestiary.csv", "img", "-s", "-vv"]).unwrap();
    assert_eq!(cli.csvfile, PathBuf::from("bestiary.csv"));
    assert_eq!(cli.imgdir, PathBuf::from("img"));
    assert!(cli.sizes);
    assert_eq!(cli.verbose, 2);
    assert!(cli.config.is_none());
  }

  #[test]
  fn sizes_default_to_off() {
    let cli = Cli::try_parse_from(["token_forge", "bestiary.csv", "img", "--config", "tf.json"])
      .unwrap();
    assert!(!cli.sizes);
    assert_eq!(cli.config, Some(PathBuf::from("tf.json")));
  }
}
