pub mod clone;
pub mod delete;
pub mod login;
pub mod logout;
pub mod push;
pub mod scan;
pub mod star;
pub mod status;

use std::time::Duration;

use clap::Subcommand;
use indicatif::{ProgressBar, ProgressStyle};

#[derive(Subcommand)]
pub enum Command {
    /// Log in with your dashboard credentials
    Login(login::LoginArgs),
    /// Clear saved credentials
    Logout,
    /// Show current auth status and config
    Status,
    /// Scan a directory for git repositories and sync them to the dashboard
    Scan(scan::ScanArgs),
    /// Scan the usual project directories and sync everything found
    ScanAll(scan::ScanAllArgs),
    /// Push a repository to its remote
    Push(push::PushArgs),
    /// Delete a local repository (the remote is kept)
    Delete(delete::DeleteArgs),
    /// Star or unstar a repository
    Star(star::StarArgs),
    /// Clone a repository from your synced list
    Clone(clone::CloneArgs),
}

pub async fn run(cmd: Command) -> anyhow::Result<()> {
    match cmd {
        Command::Login(args) => login::run(args).await,
        Command::Logout => logout::run(),
        Command::Status => status::run(),
        Command::Scan(args) => scan::run(args).await,
        Command::ScanAll(args) => scan::run_all(args).await,
        Command::Push(args) => push::run(args).await,
        Command::Delete(args) => delete::run(args).await,
        Command::Star(args) => star::run(args),
        Command::Clone(args) => clone::run(args),
    }
}

/// Spinner used by long-running steps.
pub(crate) fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.green} {msg}")
            .unwrap()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

/// Prompt on stderr and read one trimmed line from stdin.
pub(crate) fn prompt(message: &str) -> anyhow::Result<String> {
    eprint!("{message}");
    let mut input = String::new();
    std::io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}
