use std::path::PathBuf;

use clap::Args;
use console::style;

#[derive(Args)]
pub struct CloneArgs {
    /// Repository name
    repo: String,
    /// Output directory
    #[arg(short, long, value_name = "DIR")]
    output: Option<PathBuf>,
}

pub fn run(args: CloneArgs) -> anyhow::Result<()> {
    println!(
        "{} Clone from the dashboard ships in a later release.",
        style("i").yellow()
    );
    let target = args
        .output
        .map(|dir| format!(" {}", dir.display()))
        .unwrap_or_default();
    println!(
        "{}",
        style(format!(
            "For now, use: git clone <remote-url>{target} (the remote URL for {} is on your dashboard)",
            args.repo
        ))
        .dim()
    );
    Ok(())
}
