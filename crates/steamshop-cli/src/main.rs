mod account;
mod render;
mod shop;

use clap::{Parser, Subcommand};
use steamshop_client::{ClientSettings, Notice, StoreClient};
use steamshop_core::{GameId, Session};
use tracing_subscriber::EnvFilter;

use crate::account::ProfileCommands;

#[derive(Debug, Parser)]
#[command(name = "steamshop")]
#[command(about = "SteamShop storefront command line interface")]
struct Cli {
    /// Bearer token from `steamshop login` (falls back to STEAMSHOP_TOKEN)
    #[arg(long, global = true)]
    token: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Sign in and print the session token
    Login {
        #[arg(long)]
        username: String,
        #[arg(long, env = "STEAMSHOP_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Create a new account
    Register {
        #[arg(long)]
        email: String,
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
        /// Repeat the password
        #[arg(long)]
        confirm_password: String,
    },
    /// Show, create, or edit the signed-in user's profile
    Profile {
        #[command(subcommand)]
        command: ProfileCommands,
    },
    /// List the catalog
    Games {
        /// Category tab to show (e.g. action, rpg); "all" shows everything
        #[arg(long, default_value = "all")]
        category: String,
        /// Filter by title; `--remote` sends the query to the server instead
        #[arg(long)]
        search: Option<String>,
        #[arg(long, requires = "search")]
        remote: bool,
    },
    /// Show one game
    Game { id: String },
    /// Toggle your like on a game
    Like { id: String },
    /// Buy a game
    Buy {
        id: String,
        #[arg(long, default_value = "1")]
        quantity: u32,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Show your purchase history
    History,
    /// Show games recommended for you
    Recommend,
}

/// Prints the notice for a failed `action` to stderr and converts the error
/// for `main`.
pub(crate) fn report<T>(
    action: &str,
    result: Result<T, steamshop_client::ClientError>,
) -> anyhow::Result<T> {
    result.map_err(|e| {
        eprintln!("{}", Notice::from_error(action, &e));
        anyhow::Error::new(e).context(format!("{action} failed"))
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = steamshop_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let client = StoreClient::new(&ClientSettings::from(&config))?;
    let session = Session::from_token(
        cli.token
            .as_deref()
            .or(config.session_token.as_deref()),
    );
    tracing::debug!(env = %config.env, authenticated = session.is_authenticated(), "starting");

    let Some(command) = cli.command else {
        println!("steamshop: pass --help to list commands");
        return Ok(());
    };

    match command {
        Commands::Login { username, password } => {
            account::run_login(&client, username, password).await
        }
        Commands::Register {
            email,
            username,
            password,
            confirm_password,
        } => account::run_register(&client, &email, &username, &password, &confirm_password).await,
        Commands::Profile { command } => account::run_profile(&client, &session, command).await,
        Commands::Games {
            category,
            search,
            remote,
        } => shop::run_games(&client, &session, &category, search.as_deref(), remote).await,
        Commands::Game { id } => shop::run_game(&client, &session, &GameId::new(id)).await,
        Commands::Like { id } => shop::run_like(&client, &session, &GameId::new(id)).await,
        Commands::Buy { id, quantity, yes } => {
            shop::run_buy(&client, &session, &GameId::new(id), quantity, yes).await
        }
        Commands::History => shop::run_history(&client, &session).await,
        Commands::Recommend => shop::run_recommend(&client, &session).await,
    }
}
