//! Remove command - delete one attribute

use anyhow::{Context, Result};
use clap::Args;

use super::{CommandContext, TargetArgs};

/// Arguments for the remove subcommand
#[derive(Debug, Args)]
pub struct RemoveCommand {
    #[command(flatten)]
    pub target: TargetArgs,

    /// Attribute name (without namespace when --namespace is given)
    #[arg(short = 'n', long)]
    pub name: String,
}

impl RemoveCommand {
    pub fn execute(&self, ctx: &CommandContext) -> Result<()> {
        ctx.accessor
            .remove(self.target.item(), self.name.as_bytes(), self.target.options())
            .with_context(|| {
                format!(
                    "Failed to remove attribute '{}' from {}",
                    self.name,
                    self.target.describe()
                )
            })?;

        let formatter = ctx.formatter();
        if ctx.is_json() {
            formatter.print_json(&serde_json::json!({
                "success": true,
                "name": self.name,
            }));
        } else {
            formatter.success(&format!(
                "Removed '{}' from {}",
                self.name,
                self.target.describe()
            ));
        }
        Ok(())
    }
}
