//! fsxattr - inspect and edit extended attributes from the command line
//!
//! Provides commands for:
//! - Reading, writing and removing single attributes
//! - Listing attribute names
//! - Dumping every attribute with its value

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use fsxattr_core::config::Config;
use fsxattr_core::Accessor;

mod commands;
mod output;

use commands::{
    completions::CompletionsCommand, dump::DumpCommand, get::GetCommand, list::ListCommand,
    remove::RemoveCommand, set::SetCommand, CommandContext,
};
use output::{get_formatter, OutputFormat};

#[derive(Debug, Parser)]
#[command(name = "fsxattr", version, about = "Inspect and edit extended file attributes")]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    json: bool,

    /// Verbose output (can be repeated: -v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Use alternate config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Minimal output
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print the value of one attribute
    Get(GetCommand),
    /// Create or replace one attribute
    Set(SetCommand),
    /// Remove one attribute
    Remove(RemoveCommand),
    /// List attribute names
    List(ListCommand),
    /// Print every attribute with its value
    Dump(DumpCommand),
    /// Generate shell completions
    Completions(CompletionsCommand),
}

impl Cli {
    fn format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        }
    }

    /// Default filter when `RUST_LOG` is unset: `-v` wins over the config.
    fn log_level<'a>(&self, config: &'a Config) -> &'a str {
        match self.verbose {
            0 => config.logging.level.as_str(),
            1 => "debug",
            _ => "trace",
        }
    }

    /// Loads the config file. An explicit `--config` must load and validate;
    /// the default one is optional.
    fn load_config(&self) -> Result<Config> {
        match &self.config {
            Some(path) => Config::load_validated(path)
                .with_context(|| format!("Failed to load config from {}", path.display())),
            None => Ok(self.load_default_config(&Config::default_path())),
        }
    }

    /// A missing default file means defaults; a broken one is warned about
    /// and replaced by them.
    fn load_default_config(&self, path: &Path) -> Config {
        if !path.exists() {
            return Config::default();
        }
        Config::load_validated(path).unwrap_or_else(|err| {
            get_formatter(self.format(), self.quiet)
                .warn(&format!("ignoring {}: {err:#}", path.display()));
            Config::default()
        })
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = cli.load_config()?;

    // Setup tracing
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.log_level(&config)));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(
        initial_capacity = config.buffer.initial_capacity,
        "configuration loaded"
    );

    let ctx = CommandContext {
        format: cli.format(),
        quiet: cli.quiet,
        accessor: Accessor::new(&config.buffer),
    };

    match &cli.command {
        Commands::Get(cmd) => cmd.execute(&ctx),
        Commands::Set(cmd) => cmd.execute(&ctx),
        Commands::Remove(cmd) => cmd.execute(&ctx),
        Commands::List(cmd) => cmd.execute(&ctx),
        Commands::Dump(cmd) => cmd.execute(&ctx),
        Commands::Completions(cmd) => cmd.execute(),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            get_formatter(cli.format(), cli.quiet).error(&format!("{err:#}"));
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use clap::CommandFactory;
    use fsxattr_core::config::ConfigBuilder;
    use fsxattr_core::{XATTR_CREATE, XATTR_REPLACE};

    use super::*;
    use crate::commands::ValueEncoding;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_get() {
        let cli = Cli::try_parse_from([
            "fsxattr", "--json", "get", "/tmp/f", "-n", "color", "--namespace", "user", "-P",
            "-e", "base64",
        ])
        .unwrap();
        assert_eq!(cli.format(), OutputFormat::Json);

        let Commands::Get(cmd) = cli.command else {
            panic!("expected get");
        };
        assert_eq!(cmd.name, "color");
        assert_eq!(cmd.encoding, ValueEncoding::Base64);
        assert_eq!(cmd.target.namespace.as_deref(), Some("user"));
        assert!(cmd.target.no_dereference);
        assert_eq!(cmd.target.path, Some(PathBuf::from("/tmp/f")));
    }

    #[test]
    fn test_parse_set_flags() {
        let parse = |extra: &[&str]| {
            let mut args = vec!["fsxattr", "set", "/tmp/f", "-n", "user.a", "--value", "-1"];
            args.extend_from_slice(extra);
            match Cli::try_parse_from(args).map(|cli| cli.command) {
                Ok(Commands::Set(cmd)) => Ok(cmd),
                Ok(other) => panic!("unexpected command {other:?}"),
                Err(err) => Err(err),
            }
        };

        let cmd = parse(&[]).unwrap();
        assert_eq!(cmd.value, "-1");
        assert_eq!(cmd.flags(), 0);
        assert_eq!(parse(&["--create"]).unwrap().flags(), XATTR_CREATE);
        assert_eq!(parse(&["--replace"]).unwrap().flags(), XATTR_REPLACE);
        assert!(parse(&["--create", "--replace"]).is_err());
    }

    #[test]
    fn test_target_is_path_or_fd() {
        let cli = Cli::try_parse_from(["fsxattr", "list", "--fd", "0"]).unwrap();
        let Commands::List(cmd) = cli.command else {
            panic!("expected list");
        };
        assert_eq!(cmd.target.fd, Some(0));
        assert!(cmd.target.path.is_none());

        assert!(Cli::try_parse_from(["fsxattr", "list"]).is_err());
        assert!(Cli::try_parse_from(["fsxattr", "list", "/tmp", "--fd", "0"]).is_err());
    }

    #[test]
    fn test_log_level_precedence() {
        let config = ConfigBuilder::new().logging_level("error").build();

        let cli = Cli::try_parse_from(["fsxattr", "list", "/tmp"]).unwrap();
        assert_eq!(cli.log_level(&config), "error");
        let cli = Cli::try_parse_from(["fsxattr", "-v", "list", "/tmp"]).unwrap();
        assert_eq!(cli.log_level(&config), "debug");
        let cli = Cli::try_parse_from(["fsxattr", "list", "/tmp", "-vv"]).unwrap();
        assert_eq!(cli.log_level(&config), "trace");
    }

    #[test]
    fn test_explicit_config_is_loaded_and_validated() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "buffer:\n  initial_capacity: 16").unwrap();
        let path = file.path().to_str().unwrap();

        let cli = Cli::try_parse_from(["fsxattr", "--config", path, "list", "/tmp"]).unwrap();
        assert_eq!(cli.load_config().unwrap().buffer.initial_capacity, 16);

        let mut bad = tempfile::NamedTempFile::new().unwrap();
        writeln!(bad, "logging:\n  level: loud").unwrap();
        let path = bad.path().to_str().unwrap();
        let cli = Cli::try_parse_from(["fsxattr", "--config", path, "list", "/tmp"]).unwrap();
        let err = cli.load_config().unwrap_err();
        assert!(format!("{err:#}").contains("logging.level"));

        let cli =
            Cli::try_parse_from(["fsxattr", "--config", "/nonexistent/c.yaml", "list", "/tmp"])
                .unwrap();
        assert!(cli.load_config().is_err());
    }

    #[test]
    fn test_broken_default_config_falls_back() {
        let cli = Cli::try_parse_from(["fsxattr", "-q", "list", "/tmp"]).unwrap();

        let mut invalid = tempfile::NamedTempFile::new().unwrap();
        writeln!(invalid, "logging:\n  level: loud").unwrap();
        assert_eq!(cli.load_default_config(invalid.path()), Config::default());

        let mut malformed = tempfile::NamedTempFile::new().unwrap();
        writeln!(malformed, "buffer: [unclosed").unwrap();
        assert_eq!(cli.load_default_config(malformed.path()), Config::default());

        let missing = Path::new("/nonexistent/fsxattr/config.yaml");
        assert_eq!(cli.load_default_config(missing), Config::default());

        let mut valid = tempfile::NamedTempFile::new().unwrap();
        writeln!(valid, "buffer:\n  initial_capacity: 32").unwrap();
        assert_eq!(cli.load_default_config(valid.path()).buffer.initial_capacity, 32);
    }

    #[test]
    fn test_commands_against_a_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let path = file.path().to_str().unwrap();
        let ctx = CommandContext {
            format: OutputFormat::Human,
            quiet: true,
            accessor: Accessor::default(),
        };

        let set = Cli::try_parse_from([
            "fsxattr", "set", path, "--namespace", "user", "-n", "cli", "--value", "aGk=", "-e",
            "base64",
        ])
        .unwrap();
        let Commands::Set(cmd) = set.command else {
            panic!("expected set");
        };
        if let Err(err) = cmd.execute(&ctx) {
            // Filesystem without user xattrs (e.g. tmpfs on older kernels).
            eprintln!("skipping: {err:#}");
            return;
        }

        let value = fsxattr_core::get(file.path(), b"user.cli", Default::default()).unwrap();
        assert_eq!(value, b"hi");

        let remove = Cli::try_parse_from(["fsxattr", "remove", path, "-n", "user.cli"]).unwrap();
        let Commands::Remove(cmd) = remove.command else {
            panic!("expected remove");
        };
        cmd.execute(&ctx).unwrap();
        assert!(cmd.execute(&ctx).is_err());
    }
}
