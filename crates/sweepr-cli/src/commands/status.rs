use console::style;

use sweepr_auth::{KeyringStore, Session};
use sweepr_core::config::Config;

pub fn run() -> anyhow::Result<()> {
    let config = Config::load()?;
    let store = KeyringStore::new();
    let session = Session::load(&store, &config)?;

    println!();
    match session {
        Some(session) => {
            println!(
                "  {} Logged in as {}",
                style("●").green(),
                style(&session.email).bold()
            );
            if let Some(at) = config.logged_in_at {
                println!(
                    "    {}",
                    style(format!("since {}", at.format("%Y-%m-%d %H:%M UTC"))).dim()
                );
            }
        }
        None => {
            println!("  {} Not logged in", style("●").red());
            println!("  {}", style("Run: sweepr login").dim());
        }
    }

    println!("  {} {}", style("API:").dim(), config.api_base());
    if !config.scan_paths.is_empty() {
        let paths: Vec<String> = config
            .scan_paths
            .iter()
            .map(|p| p.display().to_string())
            .collect();
        println!("  {} {}", style("Scan paths:").dim(), paths.join(", "));
    }
    println!("  {} {}", style("Max depth:").dim(), config.max_scan_depth);
    println!();
    Ok(())
}
