//! `medqr-cli`: drive the MedQR admin API from a terminal.
//!
//! Uses the same session service as the browser app. Credentials persist to
//! a JSON file instead of `localStorage`.

mod file_store;
mod transport;


use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use medinfo::config::DEFAULT_API_URL;
use medinfo::records::{DashboardStats, PAGE_LIMIT};
use medinfo::validation::{FieldErrors, SignupForm, validate_login, validate_record, validate_signup};
use medinfo::{ApiClient, ApiConfig, ApiError, AuthOutcome, LoginRequest, NewInfoRecord, SessionService};
use serde_json::Value;

use file_store::FileStore;
use transport::ReqwestTransport;

type CliSession = SessionService<ReqwestTransport, FileStore>;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("{0}")]
    Api(#[from] ApiError),
    #[error("{0}")]
    Auth(String),
    #[error("invalid input:\n{0}")]
    Validation(String),
    #[error("not logged in; run `medqr-cli login` first")]
    NotLoggedIn,
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

impl From<FieldErrors> for CliError {
    fn from(errors: FieldErrors) -> Self {
        let lines: Vec<String> = errors.iter().map(|(field, message)| format!("  {field}: {message}")).collect();
        Self::Validation(lines.join("\n"))
    }
}

#[derive(Parser, Debug)]
#[command(name = "medqr-cli", about = "MedQR admin API CLI")]
struct Cli {
    #[arg(long, env = "MEDQR_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,

    /// Credentials file [default: ~/.medqr/credentials.json]
    #[arg(long, env = "MEDQR_CREDENTIALS")]
    credentials: Option<PathBuf>,

    /// Log requests and session transitions to stderr.
    #[arg(long, short)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check that the API is reachable.
    Health,
    /// Register a new admin and store the session.
    Signup {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long, env = "MEDQR_PASSWORD", hide_env_values = true)]
        password: String,
        /// Defaults to `--password`.
        #[arg(long)]
        confirm_password: Option<String>,
    },
    /// Sign in and store the session.
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "MEDQR_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Forget the stored session.
    Logout,
    /// Revalidate the stored session and print the admin profile.
    Whoami,
    Records(RecordsCommand),
    /// List the languages offered for translation.
    Languages,
    /// Translate texts into a target language.
    Translate {
        #[arg(long)]
        lang: String,
        #[arg(required = true)]
        texts: Vec<String>,
    },
}

#[derive(Args, Debug)]
struct RecordsCommand {
    #[command(subcommand)]
    command: RecordsSubcommand,
}

#[derive(Subcommand, Debug)]
enum RecordsSubcommand {
    List {
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, default_value_t = PAGE_LIMIT)]
        limit: u32,
    },
    Create(RecordArgs),
    /// Fetch a record by its public id, as a QR scan would.
    View {
        unique_id: String,
    },
    Toggle {
        id: String,
    },
    Delete {
        id: String,
    },
}

#[derive(Args, Debug)]
struct RecordArgs {
    #[arg(long)]
    medicine_name: String,
    #[arg(long)]
    usage: String,
    #[arg(long)]
    dosage: String,
    /// Expiry date, `YYYY-MM-DD`.
    #[arg(long)]
    exp: String,
    /// Manufacturing date, `YYYY-MM-DD`.
    #[arg(long)]
    man: String,
    #[arg(long)]
    price: String,
    /// Batch number.
    #[arg(long)]
    btno: String,
    #[arg(long)]
    comp_name: String,
    /// Storage instructions.
    #[arg(long)]
    instr: String,
    /// Drug composition.
    #[arg(long)]
    drugs: String,
}

impl From<RecordArgs> for NewInfoRecord {
    fn from(args: RecordArgs) -> Self {
        Self {
            medicine_name: args.medicine_name,
            usage: args.usage,
            dosage: args.dosage,
            exp: args.exp,
            man: args.man,
            price: args.price,
            btno: args.btno,
            comp_name: args.comp_name,
            instr: args.instr,
            drugs: args.drugs,
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();
    let level = if cli.verbose { tracing::Level::DEBUG } else { tracing::Level::WARN };
    tracing_subscriber::fmt().with_max_level(level).with_writer(std::io::stderr).init();

    let store = FileStore::new(cli.credentials.clone().unwrap_or_else(file_store::default_path));
    tracing::debug!(path = %store.path().display(), "credentials file");
    let api = ApiClient::new(ReqwestTransport::new(), store, ApiConfig::new(&cli.api_url));
    let session = SessionService::new(api);

    if let Err(e) = run(&session, cli.command).await {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

async fn run(session: &CliSession, command: Command) -> Result<(), CliError> {
    match command {
        Command::Health => print_json(&session.api().health().await?),
        Command::Signup { name, email, password, confirm_password } => {
            let form = SignupForm { confirm_password: confirm_password.unwrap_or_else(|| password.clone()), name, email, password };
            validate_signup(&form).into_result()?;
            let outcome = session.signup(&form.to_request()).await;
            print_outcome(outcome)
        }
        Command::Login { email, password } => {
            let credentials = LoginRequest { email: email.trim().to_owned(), password };
            validate_login(&credentials).into_result()?;
            let outcome = session.login(&credentials).await;
            print_outcome(outcome)
        }
        Command::Logout => {
            session.logout();
            println!("logged out");
            Ok(())
        }
        Command::Whoami => {
            let resolved = session.init().await;
            let admin = resolved.admin().ok_or(CliError::NotLoggedIn)?;
            print_json(&serde_json::to_value(admin)?)
        }
        Command::Records(records) => run_records(session, records.command).await,
        Command::Languages => print_json(&serde_json::to_value(session.api().languages().await?)?),
        Command::Translate { lang, texts } => {
            let translated = session.api().translate_batch(&texts, &lang).await?;
            print_json(&serde_json::to_value(translated)?)
        }
    }
}

async fn run_records(session: &CliSession, command: RecordsSubcommand) -> Result<(), CliError> {
    let api = session.api();
    match command {
        RecordsSubcommand::List { page, limit } => {
            require_login(session)?;
            let listing = api.list_records(page, limit).await?;
            let stats = DashboardStats::from_page(&listing);
            eprintln!(
                "page {}/{}: {} total, {} active here, {} views here",
                listing.pagination.current,
                listing.pagination.pages.max(1),
                stats.total,
                stats.active_on_page,
                stats.views_on_page
            );
            print_json(&serde_json::to_value(listing)?)
        }
        RecordsSubcommand::Create(args) => {
            require_login(session)?;
            let record = NewInfoRecord::from(args);
            validate_record(&record).into_result()?;
            print_json(&serde_json::to_value(api.create_record(&record).await?)?)
        }
        RecordsSubcommand::View { unique_id } => print_json(&serde_json::to_value(api.record_by_unique_id(&unique_id).await?)?),
        RecordsSubcommand::Toggle { id } => {
            require_login(session)?;
            print_json(&serde_json::to_value(api.toggle_record(&id).await?)?)
        }
        RecordsSubcommand::Delete { id } => {
            require_login(session)?;
            api.delete_record(&id).await?;
            println!("deleted {id}");
            Ok(())
        }
    }
}

/// Fail early when no credentials are stored; the API would answer `401`.
fn require_login(session: &CliSession) -> Result<(), CliError> {
    if medinfo::store::stored_token(session.api().store()).is_some() { Ok(()) } else { Err(CliError::NotLoggedIn) }
}

fn print_outcome(outcome: AuthOutcome) -> Result<(), CliError> {
    match outcome {
        AuthOutcome::Success(admin) => print_json(&serde_json::to_value(admin)?),
        AuthOutcome::Failure { error } => Err(CliError::Auth(error)),
    }
}

fn print_json(value: &Value) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
