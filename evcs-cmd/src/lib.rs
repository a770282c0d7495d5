//! Command implementations for the EVCS CLI.
//!
//! Every command runs the same load sequence as the dashboard page against a
//! live backend and prints the resulting view in the terminal.

use clap::{Args, Subcommand, ValueEnum};
use evcs_data::driver;
use evcs_data::session::{Phase, Session};
use evcs_model::UserFilter;
use log::info;
use std::io;
use std::time::Duration;

pub mod client;
pub mod report;

use client::HttpClient;

/// Backend connection settings shared by every command.
#[derive(Args, Debug, Clone)]
pub struct Connection {
    /// Base URL of the dashboard backend
    #[arg(long, env = "EVCS_BASE_URL", default_value = "http://localhost:5000", global = true)]
    pub base_url: String,

    /// Request timeout in seconds
    #[arg(long, env = "EVCS_TIMEOUT_SECS", default_value_t = 30, global = true)]
    pub timeout_secs: u64,
}

impl Connection {
    pub fn client(&self) -> anyhow::Result<HttpClient> {
        HttpClient::new(&self.base_url, Duration::from_secs(self.timeout_secs))
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TableFormat {
    #[default]
    Text,
    Csv,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print the summary cards and chart buckets
    Stats {
        /// Restrict to one user id
        #[arg(short, long)]
        user: Option<String>,
    },

    /// Print the session table
    Table {
        /// Restrict to one user id
        #[arg(short, long)]
        user: Option<String>,

        #[arg(short, long, value_enum, default_value_t = TableFormat::Text)]
        format: TableFormat,
    },

    /// Print the station map markers
    Stations {
        /// Restrict to one user id
        #[arg(short, long)]
        user: Option<String>,
    },

    /// List the user filter options
    Users,

    /// Cluster the sessions on two numeric features
    Classify {
        feat1: String,
        feat2: String,
    },
}

fn filter_for(user: Option<String>) -> UserFilter {
    user.map(|u| UserFilter::from_value(&u)).unwrap_or_default()
}

/// Run the page load sequence scoped to `user`, so the map is fetched once
/// for that user.
async fn load_session(client: &HttpClient, user: Option<String>) -> anyhow::Result<Session> {
    let mut session = Session::with_filter(filter_for(user));
    if let Phase::Error(message) = driver::load(client, &mut session).await {
        anyhow::bail!("failed to load sessions from {}: {}", client.base_url(), message);
    }
    Ok(session)
}

pub async fn run(connection: Connection, command: Command) -> anyhow::Result<()> {
    let client = connection.client()?;
    info!("using backend {}", client.base_url());

    match command {
        Command::Stats { user } => {
            let session = load_session(&client, user).await?;
            print!("{}", report::render_stats(session.view()));
        }
        Command::Table { user, format } => {
            let session = load_session(&client, user).await?;
            match format {
                TableFormat::Text => print!("{}", report::render_table(&session.view().table)),
                TableFormat::Csv => report::write_table_csv(&session.view().table, io::stdout())?,
            }
        }
        Command::Stations { user } => {
            let session = load_session(&client, user).await?;
            print!("{}", report::render_stations(&session.view().map));
        }
        Command::Users => {
            let session = load_session(&client, None).await?;
            for option in &session.view().user_options {
                println!("{}\t{}", option.value, option.label);
            }
        }
        Command::Classify { feat1, feat2 } => {
            let mut session = load_session(&client, None).await?;
            driver::classify(&client, &mut session, &feat1, &feat2).await?;
            match &session.view().scatter {
                Some(spec) => print!("{}", report::render_clusters(spec)),
                None => anyhow::bail!("classification of {} x {} failed", feat1, feat2),
            }
        }
    }
    Ok(())
}
