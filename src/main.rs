//! Bank-Link command-line client

use anyhow::Context;
use banklink_app::{
    AmountForm, BankApp, ConsoleDashboard, ConsoleNotifier, ControllerContext, LoginForm,
    RegisterForm, SubmitOutcome, TransferForm,
};
use banklink_client::HttpBankApi;
use banklink_config::{Config, StatementFormat};
use banklink_core::{FileStore, SessionStore};
use banklink_utils::CurrencyFormat;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(name = "banklink")]
#[command(version = "0.1.0")]
#[command(about = "Command-line client for the Bank-Link banking backend", long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "banklink.yaml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write the default configuration file
    InitConfig,
    /// Log in and remember the session
    Login {
        #[arg(long)]
        email: String,
        /// Prompted for when omitted
        #[arg(long)]
        password: Option<String>,
    },
    /// Create an account and log in
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        surname: String,
        /// 13-digit national ID number
        #[arg(long)]
        id_number: String,
        #[arg(long)]
        email: String,
        /// Prompted for (twice) when omitted
        #[arg(long)]
        password: Option<String>,
    },
    /// Forget the current session
    Logout,
    /// Show balances and recent activity
    Accounts,
    Deposit {
        account: String,
        amount: String,
    },
    Withdraw {
        account: String,
        amount: String,
    },
    Transfer {
        from: String,
        to: String,
        amount: String,
    },
    /// Export an account statement
    Statement {
        account: String,
        /// pdf or csv; defaults to statement.format
        #[arg(long)]
        format: Option<StatementFormat>,
    },
}

fn main() -> ExitCode {
    let args = Args::parse();

    let config = match Config::load_or_default(args.config.clone()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e.to_details());
            return ExitCode::FAILURE;
        }
    };

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.logging.level.as_str()),
    )
    .init();
    log::debug!("Using API at {}", config.api.base_url);

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("Failed to start runtime: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(run(args, config)) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            log::error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn prompt_password(prompt: &str) -> anyhow::Result<String> {
    rpassword::prompt_password(prompt).context("could not read password")
}

fn build_app(config: &Config) -> anyhow::Result<BankApp> {
    let api = HttpBankApi::from_config(config).context("invalid api.base_url")?;
    let session = SessionStore::new(Arc::new(FileStore::new(config.session.path.clone())));
    let view = ConsoleDashboard::new(
        CurrencyFormat::new(config.currency.symbol.clone(), config.currency.decimal_places),
        3,
    );
    let ctx = ControllerContext::new(
        Arc::new(api),
        Arc::new(ConsoleNotifier),
        Arc::new(view),
        session,
    );
    log::debug!("Session file: {}", config.session.path.display());
    Ok(BankApp::from_config(ctx, config))
}

async fn init_config(path: &Path) -> anyhow::Result<bool> {
    Config::write_default(path)
        .await
        .map_err(|e| anyhow::anyhow!("{}", e.to_details()))?;
    println!("Wrote {}", path.display());
    Ok(true)
}

/// Returns whether the command succeeded
async fn run(args: Args, config: Config) -> anyhow::Result<bool> {
    let command = match args.command {
        Command::InitConfig => return init_config(&args.config).await,
        command => command,
    };

    let mut app = build_app(&config)?;

    let outcome = match command {
        Command::InitConfig => return init_config(&args.config).await,
        Command::Login { email, password } => {
            let password = match password {
                Some(p) => p,
                None => prompt_password("Password: ")?,
            };
            app.login(LoginForm { email, password }).await
        }
        Command::Register {
            name,
            surname,
            id_number,
            email,
            password,
        } => {
            let (password, confirm_password) = match password {
                Some(p) => (p.clone(), p),
                None => (
                    prompt_password("Password: ")?,
                    prompt_password("Confirm password: ")?,
                ),
            };
            app.register(RegisterForm {
                name,
                surname,
                id_number,
                email,
                password,
                confirm_password,
            })
            .await
        }
        Command::Logout => app.logout(),
        Command::Accounts => app.open_dashboard().await,
        Command::Deposit { account, amount } => {
            gate(app.open_dashboard().await)?;
            app.deposit(AmountForm::new(account, amount)).await
        }
        Command::Withdraw { account, amount } => {
            gate(app.open_dashboard().await)?;
            app.withdraw(AmountForm::new(account, amount)).await
        }
        Command::Transfer { from, to, amount } => {
            gate(app.open_dashboard().await)?;
            app.transfer(TransferForm::new(from, to, amount)).await
        }
        Command::Statement { account, format } => {
            gate(app.open_dashboard().await)?;
            let today = chrono::Local::now().date_naive();
            app.download_statement(&account, format, today).await
        }
    };

    if let SubmitOutcome::Succeeded(message) = &outcome {
        log::debug!("{}", message);
    }
    Ok(outcome.is_success())
}

/// Stop when the dashboard could not be opened; the user has already been told why
fn gate(outcome: SubmitOutcome) -> anyhow::Result<()> {
    if outcome.is_success() {
        Ok(())
    } else {
        Err(anyhow::anyhow!("{}", outcome.message()))
    }
}
