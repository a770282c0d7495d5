//! EVCS CLI - terminal view of the EV charging sessions dashboard.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "evcs-cli",
    version,
    about = "EV charging sessions dashboard in the terminal"
)]
struct Cli {
    #[command(flatten)]
    connection: evcs_cmd::Connection,

    #[command(subcommand)]
    command: evcs_cmd::Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    log::debug!("backend {} (timeout {}s)", cli.connection.base_url, cli.connection.timeout_secs);
    evcs_cmd::run(cli.connection, cli.command).await
}
