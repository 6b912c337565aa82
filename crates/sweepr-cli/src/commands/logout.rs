use console::style;

use sweepr_auth::{KeyringStore, Session};
use sweepr_core::config::Config;

pub fn run() -> anyhow::Result<()> {
    let mut config = Config::load()?;
    let store = KeyringStore::new();
    Session::clear(&store, &mut config)?;
    config.save()?;

    println!("{} Logged out", style("✓").green());
    Ok(())
}
