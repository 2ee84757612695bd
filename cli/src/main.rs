use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde::Serialize;
use wallet::config::ConfigError;
use wallet::net::types::filter_banks;
use wallet::util::validate::{self, QUICK_DEPOSIT_AMOUNTS, ValidationError};
use wallet::{ApiError, AuthStatus, GuardDecision, Route, WalletApp, WalletConfig};

mod render;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("{0}")]
    Invalid(#[from] ValidationError),
    #[error("login required to open {0}; run `wallet-cli login` first")]
    LoginRequired(Route),
    #[error("output encode failed: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "wallet-cli", about = "Digital wallet client")]
struct Cli {
    /// Backend origin, e.g. https://digiwallet2.onrender.com
    #[arg(long, env = "WALLET_API_BASE_URL")]
    base_url: Option<String>,

    /// File holding the persisted session token.
    #[arg(long, env = "WALLET_TOKEN_PATH")]
    token_path: Option<PathBuf>,

    #[arg(long, env = "WALLET_LOG_LEVEL", default_value = "warn")]
    log_level: String,

    /// Print raw JSON instead of the formatted view.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sign in and store the session token.
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Create an account.
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        profile_image: Option<PathBuf>,
    },
    /// Forget the stored session.
    Logout,
    /// Show the session state and which views it unlocks.
    Status,
    /// Balance and account details.
    Dashboard,
    /// List destination banks.
    Banks {
        /// Case-insensitive filter on the bank name.
        #[arg(long)]
        search: Option<String>,
    },
    /// Send money to a bank account.
    Transfer {
        #[arg(long)]
        amount: String,
        #[arg(long)]
        bank_code: String,
        #[arg(long)]
        account_number: String,
        /// Defaults to "Transfer".
        #[arg(long)]
        narration: Option<String>,
    },
    /// Fund the wallet through the hosted payment page.
    #[command(after_help = quick_amounts_help())]
    Deposit {
        #[arg(long)]
        amount: String,
    },
    /// Transaction history.
    Transactions,
}

fn quick_amounts_help() -> String {
    let amounts: Vec<String> = QUICK_DEPOSIT_AMOUNTS.iter().map(ToString::to_string).collect();
    format!("Quick amounts: {}", amounts.join(", "))
}

#[derive(Serialize)]
struct StatusReport {
    authenticated: bool,
    routes: Vec<RouteReport>,
}

#[derive(Serialize)]
struct RouteReport {
    path: &'static str,
    allowed: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let dotenv = dotenvy::dotenv();
    let cli = Cli::parse();

    let filter = cli
        .log_level
        .parse::<tracing_subscriber::filter::LevelFilter>()
        .unwrap_or(tracing_subscriber::filter::LevelFilter::WARN);
    tracing_subscriber::fmt()
        .with_max_level(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = dotenv {
        if !e.not_found() {
            tracing::warn!(error = %e, "failed to load .env");
        }
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let mut config = WalletConfig::from_env()?;
    if let Some(base_url) = &cli.base_url {
        config = config.with_base_url(base_url)?;
    }
    if let Some(token_path) = cli.token_path {
        config.token_path = token_path;
    }
    let app = WalletApp::new(config)?;
    let json = cli.json;

    match cli.command {
        Command::Login { email, password } => run_login(&app, &email, &password, json).await,
        Command::Register { name, email, phone, password, profile_image } => {
            let registration = validate::registration(&name, &email, &phone, &password, profile_image)?;
            let body = app.api().register(&registration).await?;
            if json {
                return print_json(&body);
            }
            println!("Registration successful. Run `wallet-cli login` to sign in.");
            Ok(())
        }
        Command::Logout => {
            app.session().logout();
            println!("Signed out.");
            Ok(())
        }
        Command::Status => run_status(&app, json),
        Command::Dashboard => {
            require(&app, Route::Dashboard)?;
            let user = app.api().refresh_user().await?;
            if json {
                return print_json(&user);
            }
            println!("{}", render::dashboard(&user));
            Ok(())
        }
        Command::Banks { search } => {
            require(&app, Route::Transfer)?;
            let banks = app.api().banks().await?;
            let shown = filter_banks(&banks, search.as_deref().unwrap_or_default());
            if json {
                return print_json(&shown);
            }
            println!("{}", render::banks(&shown));
            Ok(())
        }
        Command::Transfer { amount, bank_code, account_number, narration } => {
            require(&app, Route::Transfer)?;
            let user = app.api().refresh_user().await?;
            let transfer = validate::transfer(
                &amount,
                &bank_code,
                &account_number,
                narration.as_deref(),
                Some(user.wallet_balance),
            )?;
            let body = app.api().initiate_transfer(&transfer).await?;
            if json {
                return print_json(&body);
            }
            println!("{}", render::transfer_submitted(&transfer));
            Ok(())
        }
        Command::Deposit { amount } => {
            require(&app, Route::Deposit)?;
            let amount = validate::deposit_amount(&amount)?;
            let deposit = app.api().initiate_deposit(amount).await?;
            if json {
                return print_json(&deposit);
            }
            println!("{}", render::deposit_started(amount, &deposit));
            Ok(())
        }
        Command::Transactions => {
            require(&app, Route::Transactions)?;
            let user = app.api().refresh_user().await?;
            let transactions = app.api().transactions(&user.id).await?;
            if json {
                return print_json(&transactions);
            }
            println!("{}", render::transactions(&transactions));
            Ok(())
        }
    }
}

async fn run_login(app: &WalletApp, email: &str, password: &str, json: bool) -> Result<(), CliError> {
    let (email, password) = validate::login(email, password)?;
    app.api().sign_in(&email, &password).await?;
    if json {
        return print_json(&serde_json::json!({ "authenticated": true, "email": email }));
    }
    println!("Signed in as {email}.");
    Ok(())
}

fn run_status(app: &WalletApp, json: bool) -> Result<(), CliError> {
    let report = StatusReport {
        authenticated: app.session().status() == AuthStatus::Authenticated,
        routes: Route::ALL
            .into_iter()
            .map(|route| RouteReport { path: route.path(), allowed: app.guard(route).is_allowed() })
            .collect(),
    };
    if json {
        return print_json(&report);
    }
    let decisions: Vec<(Route, GuardDecision)> = Route::ALL.into_iter().map(|r| (r, app.guard(r))).collect();
    println!("{}", render::status(app.session().status(), &decisions));
    Ok(())
}

/// Consult the route guard before anything protected touches the backend.
fn require(app: &WalletApp, route: Route) -> Result<(), CliError> {
    match app.guard(route) {
        GuardDecision::Allow => Ok(()),
        GuardDecision::Redirect(to) => {
            tracing::debug!(%route, redirect = %to, "guard redirect");
            Err(CliError::LoginRequired(route))
        }
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
