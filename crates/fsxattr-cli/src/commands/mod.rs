//! Subcommands and the arguments they share.
//!
//! Every attribute command acts on one target, given either as a path or as
//! an already-open descriptor (`--fd`), with optional `--namespace` and
//! `--no-dereference`.

use std::path::PathBuf;

use anyhow::{Context, Result};
use base64::Engine;
use clap::{Args, ValueEnum};

use fsxattr_core::{Accessor, Item, Options};

use crate::output::{get_formatter, OutputFormat, OutputFormatter};

pub mod completions;
pub mod dump;
pub mod get;
pub mod list;
pub mod remove;
pub mod set;

/// State every command runs with.
pub struct CommandContext {
    pub format: OutputFormat,
    pub quiet: bool,
    pub accessor: Accessor,
}

impl CommandContext {
    pub fn formatter(&self) -> Box<dyn OutputFormatter> {
        get_formatter(self.format, self.quiet)
    }

    pub fn is_json(&self) -> bool {
        matches!(self.format, OutputFormat::Json)
    }
}

// ============================================================================
// Target selection
// ============================================================================

/// Which filesystem object to act on
#[derive(Debug, Clone, Args)]
pub struct TargetArgs {
    /// File, directory or symlink
    #[arg(value_name = "PATH", required_unless_present = "fd", conflicts_with = "fd")]
    pub path: Option<PathBuf>,

    /// Act on an inherited open file descriptor instead of a path
    #[arg(long, value_name = "N")]
    pub fd: Option<i32>,

    /// Namespace for attribute names (e.g. `user`); names are then given and
    /// shown without it
    #[arg(long, value_name = "NS")]
    pub namespace: Option<String>,

    /// Act on symlinks themselves instead of what they point to
    #[arg(short = 'P', long)]
    pub no_dereference: bool,
}

impl TargetArgs {
    pub fn item(&self) -> Item<'_> {
        match (&self.path, self.fd) {
            (Some(path), _) => Item::Path(path),
            (None, Some(fd)) => Item::Fd(fd),
            // clap enforces one of the two; an empty path fails resolution.
            (None, None) => Item::Bytes(b""),
        }
    }

    pub fn options(&self) -> Options<'_> {
        Options {
            namespace: self.namespace.as_deref().map(str::as_bytes),
            nofollow: self.no_dereference,
        }
    }

    /// Human-readable target, for messages
    pub fn describe(&self) -> String {
        match (&self.path, self.fd) {
            (Some(path), _) => path.display().to_string(),
            (None, Some(fd)) => format!("fd {fd}"),
            (None, None) => String::new(),
        }
    }
}

// ============================================================================
// Value encoding
// ============================================================================

/// How attribute values are read from and written to the terminal
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ValueEncoding {
    /// UTF-8 text; invalid bytes are shown as U+FFFD
    #[default]
    Text,
    /// Standard base64
    Base64,
}

impl ValueEncoding {
    pub fn as_str(self) -> &'static str {
        match self {
            ValueEncoding::Text => "text",
            ValueEncoding::Base64 => "base64",
        }
    }

    pub fn encode(self, value: &[u8]) -> String {
        match self {
            ValueEncoding::Text => String::from_utf8_lossy(value).into_owned(),
            ValueEncoding::Base64 => base64::engine::general_purpose::STANDARD.encode(value),
        }
    }

    pub fn decode(self, input: &str) -> Result<Vec<u8>> {
        match self {
            ValueEncoding::Text => Ok(input.as_bytes().to_vec()),
            ValueEncoding::Base64 => base64::engine::general_purpose::STANDARD
                .decode(input)
                .context("Value is not valid base64"),
        }
    }
}

/// Attribute names are bytes; shown lossily.
pub fn show_name(name: &[u8]) -> String {
    String::from_utf8_lossy(name).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target(path: Option<&str>, fd: Option<i32>) -> TargetArgs {
        TargetArgs {
            path: path.map(PathBuf::from),
            fd,
            namespace: None,
            no_dereference: false,
        }
    }

    #[test]
    fn test_target_item_prefers_path() {
        let args = target(Some("/tmp/x"), None);
        assert!(matches!(args.item(), Item::Path(p) if p == std::path::Path::new("/tmp/x")));
        assert_eq!(args.describe(), "/tmp/x");

        let args = target(None, Some(4));
        assert!(matches!(args.item(), Item::Fd(4)));
        assert_eq!(args.describe(), "fd 4");
    }

    #[test]
    fn test_target_options() {
        let mut args = target(Some("/tmp/x"), None);
        args.namespace = Some("user".into());
        args.no_dereference = true;

        let options = args.options();
        assert_eq!(options.namespace, Some(&b"user"[..]));
        assert!(options.nofollow);
    }

    #[test]
    fn test_value_encoding_base64() {
        let encoded = ValueEncoding::Base64.encode(b"\0\x01abc");
        assert_eq!(encoded, "AAFhYmM=");
        assert_eq!(ValueEncoding::Base64.decode(&encoded).unwrap(), b"\0\x01abc");
        assert!(ValueEncoding::Base64.decode("not base64!").is_err());
    }

    #[test]
    fn test_value_encoding_text() {
        assert_eq!(ValueEncoding::Text.encode(b"hello"), "hello");
        assert_eq!(ValueEncoding::Text.encode(b"a\xffb"), "a\u{fffd}b");
        assert_eq!(ValueEncoding::Text.decode("hi").unwrap(), b"hi");
    }
}
