//! Get command - print one attribute value

use anyhow::{Context, Result};
use clap::Args;

use super::{show_name, CommandContext, TargetArgs, ValueEncoding};

/// Arguments for the get subcommand
#[derive(Debug, Args)]
pub struct GetCommand {
    #[command(flatten)]
    pub target: TargetArgs,

    /// Attribute name (without namespace when --namespace is given)
    #[arg(short = 'n', long)]
    pub name: String,

    /// How to print the value
    #[arg(short = 'e', long, value_enum, default_value_t)]
    pub encoding: ValueEncoding,
}

impl GetCommand {
    pub fn execute(&self, ctx: &CommandContext) -> Result<()> {
        let value = ctx
            .accessor
            .get(self.target.item(), self.name.as_bytes(), self.target.options())
            .with_context(|| {
                format!(
                    "Failed to read attribute '{}' of {}",
                    self.name,
                    self.target.describe()
                )
            })?;

        let formatter = ctx.formatter();
        if ctx.is_json() {
            formatter.print_json(&serde_json::json!({
                "name": show_name(self.name.as_bytes()),
                "value": self.encoding.encode(&value),
                "encoding": self.encoding.as_str(),
                "size": value.len(),
            }));
        } else {
            formatter.line(&self.encoding.encode(&value));
        }
        Ok(())
    }
}
