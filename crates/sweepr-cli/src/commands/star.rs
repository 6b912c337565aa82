use clap::Args;
use console::style;

#[derive(Args)]
pub struct StarArgs {
    /// Repository name
    repo: String,
    /// Remove the star instead
    #[arg(short, long)]
    unstar: bool,
}

pub fn run(args: StarArgs) -> anyhow::Result<()> {
    let verb = if args.unstar { "Unstarred" } else { "Starred" };
    println!(
        "{} {} {}",
        style("✓").green(),
        verb,
        style(&args.repo).bold()
    );
    println!(
        "{}",
        style("(star sync to the dashboard ships in a later release)").dim()
    );
    Ok(())
}
