//! List command - print attribute names, one per line

use anyhow::{Context, Result};
use clap::Args;

use super::{show_name, CommandContext, TargetArgs};

/// Arguments for the list subcommand
#[derive(Debug, Args)]
pub struct ListCommand {
    #[command(flatten)]
    pub target: TargetArgs,
}

impl ListCommand {
    pub fn execute(&self, ctx: &CommandContext) -> Result<()> {
        let names = ctx
            .accessor
            .list(self.target.item(), self.target.options())
            .with_context(|| {
                format!("Failed to list attributes of {}", self.target.describe())
            })?;

        let names: Vec<String> = names.iter().map(|n| show_name(n)).collect();
        let formatter = ctx.formatter();
        if ctx.is_json() {
            formatter.print_json(&serde_json::json!({
                "target": self.target.describe(),
                "names": names,
            }));
        } else {
            for name in &names {
                formatter.line(name);
            }
        }
        Ok(())
    }
}
