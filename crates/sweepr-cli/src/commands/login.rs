use clap::Args;
use console::style;

use sweepr_api::{ApiClient, DashboardApi};
use sweepr_auth::{KeyringStore, Session};
use sweepr_core::config::Config;

use crate::commands::{prompt, spinner};

#[derive(Args)]
pub struct LoginArgs {
    /// Email to log in with (prompted when omitted)
    #[arg(long)]
    email: Option<String>,
}

pub async fn run(args: LoginArgs) -> anyhow::Result<()> {
    let mut config = Config::load()?;

    if let Some(current) = &config.email {
        println!("{}", style(format!("Currently logged in as {current}")).dim());
    }

    let email = match args.email {
        Some(e) => e,
        None => prompt("Email: ")?,
    };
    if !email.contains('@') {
        anyhow::bail!("'{email}' is not a valid email");
    }

    let term = console::Term::stderr();
    term.write_str("Password: ")?;
    let password = term.read_secure_line()?;
    if password.len() < 6 {
        anyhow::bail!("password must be at least 6 characters");
    }

    let pb = spinner("Logging in...");
    let client = ApiClient::new(config.api_base(), config.api_key.clone());
    let tokens = match client.sign_in(&email, &password).await {
        Ok(tokens) => tokens,
        Err(e) => {
            pb.finish_and_clear();
            return Err(e.into());
        }
    };
    pb.finish_and_clear();

    let session = Session {
        email: tokens.email,
        access_token: tokens.access_token,
        refresh_token: tokens.refresh_token,
    };
    let store = KeyringStore::new();
    session.save(&store, &mut config)?;
    config.save()?;

    println!(
        "{} Logged in as {}",
        style("✓").green(),
        style(&session.email).bold()
    );
    Ok(())
}
