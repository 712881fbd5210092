//! Patent report server
//!
//! Renders the patent tracking spreadsheet into a formatted report document:
//! cover page, abstract, classification codes, the claim tree and the
//! application history.
//!
//! ## Modes
//!
//! - `serve`: REST API (`POST /api/convert`) for on-demand conversions
//! - `convert`: one-shot conversion from the command line
//!
//! Remote access uses an OAuth access token supplied by the caller, usually
//! through `GOOGLE_ACCESS_TOKEN` in the environment or a `.env` file.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use clap::{Args as ClapArgs, Parser, Subcommand};
use doc_assembly::{DocumentEditPlanner, PlannerConfig};
use patent_records::ranges::DEFAULT_PREPARED_BY;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, Level};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod api;
mod error;
mod google;
mod ids;
mod workflow;

use api::{handle_convert, handle_health};
use google::{DocsClient, SheetsClient, DEFAULT_DOCS_BASE_URL, DEFAULT_SHEETS_BASE_URL};
use ids::require_id;
use workflow::ConvertWorkflow;

/// Command-line arguments for the patent report server
#[derive(Parser, Debug)]
#[command(name = "patentdoc-server")]
#[command(about = "Renders a patent tracking spreadsheet into a report document")]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the conversion API
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Host address to bind to
        #[arg(long, default_value = "0.0.0.0")]
        host: String,

        #[command(flatten)]
        remote: RemoteArgs,
    },

    /// Convert one spreadsheet into one document and exit
    Convert {
        /// Spreadsheet id or share link
        #[arg(long)]
        sheet: String,

        /// Document id or share link
        #[arg(long)]
        doc: String,

        #[command(flatten)]
        remote: RemoteArgs,
    },
}

/// Remote API and report template options
#[derive(ClapArgs, Debug)]
struct RemoteArgs {
    /// OAuth access token for the Sheets and Docs APIs
    #[arg(long, env = "GOOGLE_ACCESS_TOKEN", hide_env_values = true)]
    access_token: String,

    #[arg(long, env = "SHEETS_API_BASE_URL", default_value = DEFAULT_SHEETS_BASE_URL)]
    sheets_base_url: String,

    #[arg(long, env = "DOCS_API_BASE_URL", default_value = DEFAULT_DOCS_BASE_URL)]
    docs_base_url: String,

    /// Image placed at the top of the cover page
    #[arg(long, env = "BANNER_IMAGE_URI")]
    banner_image_uri: Option<String>,

    /// Name printed after "Prepared by:" on the cover page
    #[arg(long, env = "PREPARED_BY", default_value = DEFAULT_PREPARED_BY)]
    prepared_by: String,
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub workflow: Arc<ConvertWorkflow>,
}

/// Routes with CORS and request tracing applied.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handle_health))
        .route("/api/convert", post(handle_convert))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

fn build_workflow(remote: &RemoteArgs) -> anyhow::Result<ConvertWorkflow> {
    let mut config = PlannerConfig::default();
    if let Some(uri) = &remote.banner_image_uri {
        config.banner_image_uri = uri.clone();
    }

    let reader = SheetsClient::new(&remote.sheets_base_url, &remote.access_token)?;
    let editor = DocsClient::new(&remote.docs_base_url, &remote.access_token)?;

    Ok(ConvertWorkflow::new(
        Arc::new(reader),
        Arc::new(editor),
        DocumentEditPlanner::new(config),
        remote.prepared_by.clone(),
    ))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(log_level.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    match args.command {
        Command::Serve { port, host, remote } => {
            let workflow = build_workflow(&remote)?;
            info!("Starting patentdoc server on {}:{}", host, port);

            let state = AppState {
                workflow: Arc::new(workflow),
            };
            let app = build_router(state);

            let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
            let listener = tokio::net::TcpListener::bind(addr).await?;

            info!("Server listening on http://{}", addr);
            axum::serve(listener, app).await?;
        }
        Command::Convert { sheet, doc, remote } => {
            let workflow = build_workflow(&remote)?;
            let sheet_id = require_id(&sheet, "spreadsheet")?;
            let document_id = require_id(&doc, "document")?;

            let report = workflow.convert(&sheet_id, &document_id).await?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}
