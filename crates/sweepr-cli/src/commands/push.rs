use std::path::Path;

use clap::Args;
use console::style;

use sweepr_core::error::SweeprError;
use sweepr_scan::command::{run_git, PUSH_TIMEOUT};

use crate::commands::spinner;

#[derive(Args)]
pub struct PushArgs {
    /// Repository name or path
    repo: String,
}

pub async fn run(args: PushArgs) -> anyhow::Result<()> {
    let repo_path = std::path::absolute(Path::new(&args.repo))?;
    if !repo_path.join(".git").exists() {
        anyhow::bail!("'{}' is not a git repository", repo_path.display());
    }

    let pb = spinner(&format!("Pushing {}...", args.repo));
    match run_git(&repo_path, &["push"], PUSH_TIMEOUT).await {
        Ok(out) if out.success => {
            pb.finish_with_message(format!("Pushed {} successfully", args.repo));
            // git push writes its summary to stderr.
            let summary = out.stderr.trim();
            if !summary.is_empty() {
                println!("{}", style(summary).dim());
            }
            Ok(())
        }
        Ok(out) => {
            pb.finish_and_clear();
            Err(SweeprError::Git {
                message: format!("push failed: {}", out.stderr.trim()),
            }
            .into())
        }
        Err(e) => {
            pb.finish_and_clear();
            Err(e.into())
        }
    }
}
