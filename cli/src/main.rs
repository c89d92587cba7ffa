mod http;
mod local_file;
mod render;
mod store;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use agriscan::cell::{LocalCell, local};
use agriscan::config::{API_URL_ENV, ApiConfig, DEFAULT_API_URL};
use agriscan::error::ClientError;
use agriscan::history::{HistoryController, HistoryState};
use agriscan::intake::{ImageIntake, InputSource, IntakeState};
use agriscan::session::{SessionState, SessionStore};
use agriscan::submission::{SubmissionController, SubmissionState};
use agriscan::types::HistoryId;
use agriscan::StateCell;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::http::ReqwestBackend;
use crate::local_file::LocalFile;
use crate::store::FileStore;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("{0}")]
    Client(#[from] ClientError),
    #[error("cannot locate a config directory; pass --state-file or set AGRISCAN_STATE_FILE")]
    NoStateFile,
    #[error("http client setup failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("failed to read from terminal: {0}")]
    Io(#[from] io::Error),
    #[error("nothing to submit")]
    NothingStaged,
}

#[derive(Parser, Debug)]
#[command(name = "agriscan", about = "AgriScan crop-disease diagnosis from the terminal")]
struct Cli {
    #[arg(long, env = API_URL_ENV, default_value = DEFAULT_API_URL)]
    api_url: String,

    /// Where the session is persisted between runs.
    #[arg(long, env = "AGRISCAN_STATE_FILE")]
    state_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sign in and remember the session.
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "AGRISCAN_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
    /// Create an account. Does not sign in.
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long, env = "AGRISCAN_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
    /// Forget the stored session.
    Logout,
    /// Show the signed-in user.
    Whoami,
    /// Diagnose a leaf photo.
    Predict { path: PathBuf },
    History(HistoryCommand),
}

#[derive(Args, Debug)]
struct HistoryCommand {
    #[command(subcommand)]
    command: HistorySubcommand,
}

#[derive(Subcommand, Debug)]
enum HistorySubcommand {
    /// List past diagnoses, newest first.
    List,
    /// Delete one diagnosis.
    Delete {
        id: HistoryId,
        /// Skip the confirmation prompt.
        #[arg(long, default_value_t = false)]
        yes: bool,
    },
}

type Session = SessionStore<LocalCell<SessionState>, FileStore>;

struct CliContext {
    backend: ReqwestBackend,
    session: Session,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    if let Err(e) = run(Cli::parse()).await {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let state_file = cli.state_file.or_else(store::default_state_file).ok_or(CliError::NoStateFile)?;
    let session = SessionStore::new(local(SessionState::default()), FileStore::new(state_file));
    session.restore();
    let ctx = CliContext { backend: ReqwestBackend::new(ApiConfig::new(cli.api_url))?, session };
    tracing::debug!(api = ctx.backend.config().base_url(), "starting");

    match cli.command {
        Command::Login { email, password } => run_login(&ctx, &email, password).await,
        Command::Register { name, email, password } => run_register(&ctx, &name, &email, password).await,
        Command::Logout => {
            ctx.session.logout();
            println!("Signed out.");
            Ok(())
        }
        Command::Whoami => {
            println!("{}", render::whoami(&ctx.session.state().snapshot()));
            Ok(())
        }
        Command::Predict { path } => run_predict(&ctx, path).await,
        Command::History(history) => match history.command {
            HistorySubcommand::List => run_history_list(&ctx).await,
            HistorySubcommand::Delete { id, yes } => run_history_delete(&ctx, id, yes).await,
        },
    }
}

async fn run_login(ctx: &CliContext, email: &str, password: Option<String>) -> Result<(), CliError> {
    let password = match password {
        Some(password) => password,
        None => prompt("Password: ")?,
    };
    ctx.session.login(&ctx.backend, email, &password).await?;
    println!("Signed in as {}.", render::whoami(&ctx.session.state().snapshot()));
    Ok(())
}

async fn run_register(ctx: &CliContext, name: &str, email: &str, password: Option<String>) -> Result<(), CliError> {
    let password = match password {
        Some(password) => password,
        None => prompt("Password: ")?,
    };
    ctx.session.register(&ctx.backend, name, email, &password).await?;
    println!("Registration successful! Please login.");
    Ok(())
}

async fn run_predict(ctx: &CliContext, path: PathBuf) -> Result<(), CliError> {
    let intake = ImageIntake::new(local(IntakeState::default()));
    intake.select(InputSource::Picker, &LocalFile::new(path)).await?;

    let submission = SubmissionController::new(local(SubmissionState::default()));
    let artifact = intake.artifact();
    let result = submission
        .submit(&ctx.backend, &ctx.session, artifact.as_ref())
        .await
        .ok_or(CliError::NothingStaged)??;
    print!("{}", render::prediction_report(&result));
    Ok(())
}

async fn run_history_list(ctx: &CliContext) -> Result<(), CliError> {
    let history = HistoryController::new(local(HistoryState::default()));
    history.load(&ctx.backend, &ctx.session).await?;
    history.state().with(|s| print!("{}", render::history_table(&s.entries)));
    Ok(())
}

async fn run_history_delete(ctx: &CliContext, id: HistoryId, yes: bool) -> Result<(), CliError> {
    let history = HistoryController::new(local(HistoryState::default()));
    let confirm = |question: &str| yes || confirm_on_terminal(question);
    match history.delete(&ctx.backend, &ctx.session, &confirm, id).await {
        Ok(()) => {
            println!("Deleted {id}.");
            Ok(())
        }
        Err(ClientError::ConfirmationDeclined) => {
            println!("Cancelled.");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

fn prompt(label: &str) -> Result<String, CliError> {
    let mut stderr = io::stderr();
    write!(stderr, "{label}")?;
    stderr.flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_owned())
}

fn confirm_on_terminal(question: &str) -> bool {
    prompt(&format!("{question} [y/N] ")).is_ok_and(|answer| is_yes(&answer))
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

#[cfg(test)]
#[path = "main_test.rs"]
mod main_test;
