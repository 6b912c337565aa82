use std::path::PathBuf;

use clap::Args;
use comfy_table::{Cell, Color, Table};
use console::style;

use sweepr_api::{ApiClient, DashboardApi};
use sweepr_auth::{KeyringStore, Session};
use sweepr_core::config::Config;
use sweepr_core::error::SweeprError;
use sweepr_core::models::descriptor::RepoDescriptor;
use sweepr_core::models::sync_state::SyncState;
use sweepr_scan::Scanner;

use crate::commands::spinner;

#[derive(Args)]
pub struct ScanArgs {
    /// Directory to scan
    #[arg(default_value = ".")]
    path: PathBuf,
    /// Scan subdirectories recursively
    #[arg(
        short,
        long,
        default_value_t = true,
        action = clap::ArgAction::Set,
        num_args = 0..=1,
        default_missing_value = "true"
    )]
    recursive: bool,
    /// Max depth for the recursive scan
    #[arg(short = 'd', long, value_name = "N")]
    max_depth: Option<usize>,
}

#[derive(Args)]
pub struct ScanAllArgs {
    /// Max depth for each scanned directory
    #[arg(short = 'd', long, value_name = "N")]
    max_depth: Option<usize>,
}

/// Home-relative directories tried by `scan-all` when no scan paths are
/// configured.
const CANDIDATE_DIRS: &[&str] = &[
    "projects",
    "Projects",
    "code",
    "Code",
    "dev",
    "src",
    "repos",
    "work",
    "Documents/GitHub",
];

pub async fn run(args: ScanArgs) -> anyhow::Result<()> {
    let config = Config::load()?;
    let max_depth = if args.recursive {
        args.max_depth.unwrap_or(config.max_scan_depth)
    } else {
        0
    };

    let root = std::path::absolute(&args.path)?;
    if !root.is_dir() {
        anyhow::bail!("'{}' is not a directory", root.display());
    }

    println!("\n{} {}", style("Scanning:").bold(), root.display());
    println!("{}\n", style(format!("  max depth: {max_depth}")).dim());

    let pb = spinner("Finding git repositories...");
    let scanner = Scanner::new(max_depth, config.scan_concurrency);
    let repos = scanner.scan(&root).await;
    tracing::debug!(count = repos.len(), root = %root.display(), "scan finished");

    if repos.is_empty() {
        pb.finish_with_message("No git repositories found.");
        return Ok(());
    }
    pb.finish_with_message(format!("Found {} repositories", repos.len()));

    print_repo_table(&repos);
    dispatch(&config, &repos).await
}

pub async fn run_all(args: ScanAllArgs) -> anyhow::Result<()> {
    let config = Config::load()?;
    let max_depth = args.max_depth.unwrap_or(config.max_scan_depth);

    let roots: Vec<PathBuf> = if !config.scan_paths.is_empty() {
        config.scan_paths.clone()
    } else {
        let home = dirs::home_dir()
            .ok_or_else(|| anyhow::anyhow!("could not determine home directory"))?;
        CANDIDATE_DIRS.iter().map(|d| home.join(d)).collect()
    };
    let existing: Vec<PathBuf> = roots.into_iter().filter(|p| p.is_dir()).collect();

    if existing.is_empty() {
        println!("No project directories found to scan.");
        return Ok(());
    }

    println!("\n{}", style("Scanning project directories:").bold());
    for root in &existing {
        println!("  {}", style(root.display()).dim());
    }
    println!();

    let pb = spinner("Finding git repositories...");
    let scanner = Scanner::new(max_depth, config.scan_concurrency);
    let repos = scanner.scan_paths(&existing).await;

    if repos.is_empty() {
        pb.finish_with_message("No git repositories found.");
        return Ok(());
    }
    pb.finish_with_message(format!("Found {} repositories", repos.len()));

    print_repo_table(&repos);
    dispatch(&config, &repos).await
}

fn print_repo_table(repos: &[RepoDescriptor]) {
    let mut table = Table::new();
    table.set_header(vec!["REPO", "STATUS", "SIZE", "REMOTE"]);

    for repo in repos {
        let status_color = match repo.sync_status {
            SyncState::Synced => Color::Green,
            SyncState::Dirty => Color::Yellow,
            SyncState::Behind => Color::Blue,
            SyncState::Unknown => Color::White,
        };
        table.add_row(vec![
            Cell::new(&repo.name),
            Cell::new(repo.sync_status.to_string()).fg(status_color),
            Cell::new(format_size(repo.size_bytes)),
            Cell::new(repo.remote_url.as_deref().unwrap_or("-")),
        ]);
    }

    println!("{table}");
}

fn format_size(bytes: u64) -> String {
    const KIB: u64 = 1024;
    const MIB: u64 = KIB * 1024;
    const GIB: u64 = MIB * 1024;
    match bytes {
        b if b >= GIB => format!("{:.1} GiB", b as f64 / GIB as f64),
        b if b >= MIB => format!("{:.1} MiB", b as f64 / MIB as f64),
        b if b >= KIB => format!("{:.1} KiB", b as f64 / KIB as f64),
        b => format!("{b} B"),
    }
}

/// Ship the batch to the dashboard; partial success warns, auth or
/// endpoint failure is fatal to the command.
async fn dispatch(config: &Config, repos: &[RepoDescriptor]) -> anyhow::Result<()> {
    let store = KeyringStore::new();
    let session = Session::load(&store, config)?.ok_or(SweeprError::NotLoggedIn)?;

    let pb = spinner("Syncing to dashboard...");
    let client = ApiClient::new(config.api_base(), config.api_key.clone())
        .with_access_token(&session.access_token);

    let report = match client.sync_repositories(repos).await {
        Ok(report) => report,
        Err(e) => {
            pb.finish_and_clear();
            return Err(e.into());
        }
    };

    if report.errors.is_empty() {
        pb.finish_with_message(format!(
            "Synced {}/{} repositories to dashboard",
            report.upserted, report.total
        ));
    } else {
        pb.finish_with_message(format!(
            "Synced {}/{} repositories ({} errors)",
            report.upserted,
            report.total,
            report.errors.len()
        ));
        for err in &report.errors {
            println!("  {} {err}", style("✗").red());
        }
    }
    Ok(())
}
