//! Registry client entry-point: wires adapters and runs the login or catalog flow.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::ffi::OsString;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use ortho_config::OrthoConfig;
use tokio::runtime::Builder;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use registry_client::ClientSettings;
use registry_client::domain::ports::KeyValueStorage;
use registry_client::domain::{
    CatalogFlow, CatalogOutcome, CatalogRenderer, LoginFlow, LoginForm, LoginOutcome,
    RequestGateway, SessionStore, bootstrap_session,
};
use registry_client::outbound::display::{HtmlDocumentSurface, RecordingNavigator, StderrNotifier};
use registry_client::outbound::http::ReqwestRegistryTransport;
use registry_client::outbound::storage::FileKeyValueStorage;

/// `registry-client` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "registry-client",
    about = "Sign in to the package registry and render its model catalog",
    version
)]
struct CliArgs {
    /// Registry base URL. Overrides `REGISTRY_BASE_URL`.
    #[arg(long = "base-url", value_name = "url", global = true)]
    base_url: Option<String>,
    /// Directory holding the persisted session. Overrides `REGISTRY_SESSION_DIR`.
    #[arg(long = "session-dir", value_name = "path", global = true)]
    session_dir: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Subcommand)]
enum Command {
    /// Submit the login form and persist the issued session.
    Login {
        /// Account email address.
        #[arg(long, value_name = "email")]
        email: String,
        /// Account password. Read from the first line of stdin when omitted.
        #[arg(long, value_name = "password")]
        password: Option<String>,
    },
    /// Load the model catalog and write it as an HTML page.
    Models {
        /// Output file. Writes to stdout when omitted.
        #[arg(long, value_name = "path")]
        output: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => {
            if let Err(write_err) = writeln!(io::stderr().lock(), "{err}") {
                drop(write_err);
            }
            ExitCode::FAILURE
        }
    }
}

fn run() -> io::Result<ExitCode> {
    let args = CliArgs::parse();
    let mut settings = ClientSettings::load_from_iter([OsString::from("registry-client")])
        .map_err(|error| io::Error::other(format!("load settings: {error}")))?;
    init_tracing(settings.json_logs);

    if let Some(base_url) = args.base_url {
        settings.base_url = Some(base_url);
    }
    if let Some(session_dir) = args.session_dir {
        settings.session_dir = Some(session_dir);
    }

    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|error| io::Error::other(format!("create Tokio runtime: {error}")))?;
    runtime.block_on(async_main(settings, args.command))
}

fn init_tracing(json: bool) {
    let builder = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr);
    let result = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    if let Err(e) = result {
        warn!(error = %e, "tracing init failed");
    }
}

async fn async_main(settings: ClientSettings, command: Command) -> io::Result<ExitCode> {
    let base_url = settings.base_url().map_err(io::Error::other)?;
    let timeout = settings.timeout().map_err(io::Error::other)?;
    let transport = ReqwestRegistryTransport::new(base_url, timeout)
        .map_err(|error| io::Error::other(format!("build HTTP client: {error}")))?;
    let storage = FileKeyValueStorage::open(settings.session_dir()).map_err(|error| {
        io::Error::other(format!(
            "open session directory '{}': {error}",
            settings.session_dir().display()
        ))
    })?;

    let gateway = RequestGateway::new(Arc::new(transport));
    let store = SessionStore::new(Arc::new(storage) as Arc<dyn KeyValueStorage>);

    match command {
        Command::Login { email, password } => {
            let password = match password {
                Some(password) => password,
                None => read_password_line()?,
            };
            let navigator = Arc::new(RecordingNavigator::new());
            let flow = LoginFlow::new(
                gateway,
                store,
                Arc::new(StderrNotifier),
                navigator.clone(),
            )
            .with_catalog_page(settings.catalog_page());

            let outcome = flow.submit(&LoginForm { email, password }).await;
            if outcome != LoginOutcome::SignedIn {
                return Ok(ExitCode::FAILURE);
            }
            if let Some(target) = navigator.target() {
                writeln!(io::stdout().lock(), "Signed in. Continue at {target}")?;
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Models { output } => {
            let context = bootstrap_session(&store);
            let surface = Arc::new(HtmlDocumentSurface::new());
            let flow = CatalogFlow::new(gateway, CatalogRenderer::new(surface.clone()));

            let outcome = flow.load(&context).await;
            let document = surface.to_html_document();
            match output {
                Some(path) => std::fs::write(&path, document).map_err(|error| {
                    io::Error::other(format!("write '{}': {error}", path.display()))
                })?,
                None => io::stdout().lock().write_all(document.as_bytes())?,
            }

            Ok(if outcome == CatalogOutcome::Failed {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            })
        }
    }
}

fn read_password_line() -> io::Result<String> {
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_owned())
}
