//! Dump command - print every attribute with its value

use anyhow::{Context, Result};
use clap::Args;

use super::{show_name, CommandContext, TargetArgs, ValueEncoding};

/// Arguments for the dump subcommand
#[derive(Debug, Args)]
pub struct DumpCommand {
    #[command(flatten)]
    pub target: TargetArgs,

    /// How to print values
    #[arg(short = 'e', long, value_enum, default_value_t)]
    pub encoding: ValueEncoding,
}

impl DumpCommand {
    pub fn execute(&self, ctx: &CommandContext) -> Result<()> {
        let entries = ctx
            .accessor
            .get_all(self.target.item(), self.target.options())
            .with_context(|| {
                format!("Failed to read attributes of {}", self.target.describe())
            })?;

        let formatter = ctx.formatter();
        if ctx.is_json() {
            let attributes: Vec<serde_json::Value> = entries
                .iter()
                .map(|(name, value)| {
                    serde_json::json!({
                        "name": show_name(name),
                        "value": self.encoding.encode(value),
                        "size": value.len(),
                    })
                })
                .collect();
            formatter.print_json(&serde_json::json!({
                "target": self.target.describe(),
                "attributes": attributes,
            }));
        } else {
            for (name, value) in &entries {
                formatter.line(&format!(
                    "{}=\"{}\"",
                    show_name(name),
                    self.encoding.encode(value)
                ));
            }
        }
        Ok(())
    }
}
