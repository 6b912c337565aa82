use std::path::Path;

use clap::Args;
use console::style;

use sweepr_core::error::SweeprError;

use crate::commands::{prompt, spinner};

#[derive(Args)]
pub struct DeleteArgs {
    /// Repository name or path
    repo: String,
    /// Skip the confirmation prompt
    #[arg(short, long)]
    force: bool,
}

pub async fn run(args: DeleteArgs) -> anyhow::Result<()> {
    let repo_path = std::path::absolute(Path::new(&args.repo))?;
    if !repo_path.exists() {
        return Err(SweeprError::PathNotFound { path: repo_path }.into());
    }

    if !args.force {
        let answer = prompt(&format!(
            "Delete local directory \"{}\"? The remote is kept. [y/N] ",
            repo_path.display()
        ))?;
        if !matches!(answer.to_lowercase().as_str(), "y" | "yes") {
            println!("{}", style("Cancelled.").dim());
            return Ok(());
        }
    }

    let pb = spinner(&format!("Deleting {}...", repo_path.display()));
    match tokio::fs::remove_dir_all(&repo_path).await {
        Ok(()) => {
            pb.finish_with_message(format!("Deleted {}", repo_path.display()));
            Ok(())
        }
        Err(e) => {
            pb.finish_and_clear();
            anyhow::bail!("failed to delete: {e}");
        }
    }
}
