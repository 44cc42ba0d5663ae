use clap::{Parser, Subcommand};
use kakeibo::config::{API_URL_ENV, DEFAULT_API_URL};
use kakeibo::pages::Route;
use kakeibo::{AppState, ClientConfig, ClientError, PageError};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Client(#[from] ClientError),
    #[error(transparent)]
    Page(#[from] PageError),
    #[error("auth check task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "kakeibo", about = "Bookkeeping client session and page-loader CLI")]
struct Cli {
    #[arg(long, env = API_URL_ENV, default_value = DEFAULT_API_URL)]
    api_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the startup auth check and print the current user.
    Whoami,
    /// Resolve a page path and print its loader output.
    Route { path: String },
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let mut config = ClientConfig::from_env();
    config.api_url = ClientConfig::new(&cli.api_url).api_url;

    match cli.command {
        Command::Whoami => {
            let (state, auth_check) = AppState::bootstrap(&config)?;
            tracing::info!(api_url = %config.api_url, "checking session");
            auth_check.await?;
            match state.session.current_user() {
                Some(user) => println!("{}", serde_json::to_string_pretty(&user)?),
                None => println!("not authenticated"),
            }
        }
        Command::Route { path } => {
            let route = Route::parse(&path)?;
            let output = serde_json::json!({
                "prerender": route.prerender(),
                "data": route.load()?,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }
    Ok(())
}
