//! Set command - write one attribute value

use std::ffi::c_int;

use anyhow::{Context, Result};
use clap::Args;

use fsxattr_core::{XATTR_CREATE, XATTR_REPLACE};

use super::{CommandContext, TargetArgs, ValueEncoding};

/// Arguments for the set subcommand
#[derive(Debug, Args)]
pub struct SetCommand {
    #[command(flatten)]
    pub target: TargetArgs,

    /// Attribute name (without namespace when --namespace is given)
    #[arg(short = 'n', long)]
    pub name: String,

    /// Value to store; an empty string stores an empty value
    #[arg(long, allow_hyphen_values = true)]
    pub value: String,

    /// How the value argument is encoded
    #[arg(short = 'e', long, value_enum, default_value_t)]
    pub encoding: ValueEncoding,

    /// Fail if the attribute already exists
    #[arg(long, conflicts_with = "replace")]
    pub create: bool,

    /// Fail if the attribute does not exist yet
    #[arg(long)]
    pub replace: bool,
}

impl SetCommand {
    pub fn flags(&self) -> c_int {
        if self.create {
            XATTR_CREATE
        } else if self.replace {
            XATTR_REPLACE
        } else {
            0
        }
    }

    pub fn execute(&self, ctx: &CommandContext) -> Result<()> {
        let value = self.encoding.decode(&self.value)?;
        ctx.accessor
            .set(
                self.target.item(),
                self.name.as_bytes(),
                &value,
                self.flags(),
                self.target.options(),
            )
            .with_context(|| {
                format!(
                    "Failed to set attribute '{}' on {}",
                    self.name,
                    self.target.describe()
                )
            })?;

        let formatter = ctx.formatter();
        if ctx.is_json() {
            formatter.print_json(&serde_json::json!({
                "success": true,
                "name": self.name,
                "size": value.len(),
            }));
        } else {
            formatter.success(&format!(
                "Set '{}' on {} ({} bytes)",
                self.name,
                self.target.describe(),
                value.len()
            ));
        }
        Ok(())
    }
}
