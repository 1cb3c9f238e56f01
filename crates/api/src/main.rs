//! Namecast - display-name composition server and batch runner.

use std::sync::Arc;

use anyhow::Context;
use clap::{Args as ClapArgs, Parser, Subcommand};
use namecast_core::{BatchTransport, ProgressObserver, ProgressReporter, RunOutcome};
use namecast_domain::{Config, ProgressSnapshot};
use namecast_infra::{config, BatchEndpointClient, HttpClient};
use namecast_lib::utils::init_tracing;
use namecast_lib::{router, AppContext};
use tracing::info;

/// CLI entry point
#[derive(Parser, Debug)]
#[command(name = "namecast")]
#[command(about = "Compose user display names from configured profile fields")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the HTTP API
    Serve {
        /// Bind address (overrides config)
        #[arg(long)]
        bind: Option<String>,
    },
    /// Re-process every user's display name, page by page
    Batch(BatchArgs),
    /// Show or change the display-name field selection
    Fields {
        #[command(subcommand)]
        action: FieldsAction,
    },
}

#[derive(ClapArgs, Debug)]
struct BatchArgs {
    /// Server base URL (overrides config)
    #[arg(long)]
    endpoint: Option<String>,

    /// Admin bearer token (overrides config)
    #[arg(long, env = "NAMECAST_ADMIN_TOKEN")]
    token: Option<String>,

    /// Drive the batch against the local database instead of a server
    #[arg(long)]
    local: bool,
}

#[derive(Subcommand, Debug)]
enum FieldsAction {
    /// Print the saved selection
    Show,
    /// Replace the saved selection with the given tokens, in order
    Set { tokens: Vec<String> },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let config = config::load().context("failed to load configuration")?;

    match cli.command {
        Command::Serve { bind } => serve(config, bind).await,
        Command::Batch(args) => batch(config, args).await,
        Command::Fields { action } => fields(config, action).await,
    }
}

async fn serve(mut config: Config, bind: Option<String>) -> anyhow::Result<()> {
    if let Some(bind) = bind {
        config.server.bind_addr = bind;
    }
    let bind_addr = config.server.bind_addr.clone();

    let ctx = Arc::new(AppContext::new(config).context("failed to initialise application")?);
    let app = router(ctx);

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;
    info!(addr = %bind_addr, "Namecast listening");

    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;
    info!("Namecast stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown signal received");
    }
}

async fn batch(config: Config, args: BatchArgs) -> anyhow::Result<()> {
    // Held for the whole run so the local store keeps its hook sink.
    let mut local_ctx = None;
    let transport: Arc<dyn BatchTransport> = if args.local {
        let ctx = AppContext::new(config.clone()).context("failed to initialise application")?;
        let transport: Arc<dyn BatchTransport> = Arc::new(ctx.local_transport());
        local_ctx = Some(ctx);
        transport
    } else {
        let http = HttpClient::builder()
            .timeout(config.batch.request_timeout())
            .user_agent(concat!("namecast/", env!("CARGO_PKG_VERSION")))
            .build()?;
        let endpoint = args.endpoint.unwrap_or_else(|| config.batch.endpoint.clone());
        let token = args.token.or_else(|| config.server.admin_token.clone());
        Arc::new(BatchEndpointClient::new(http, endpoint).with_token(token))
    };

    let reporter = ProgressReporter::new(transport).with_request_timeout(config.batch.request_timeout());

    let outcome = reporter.run(&ConsoleObserver).await?;
    drop(local_ctx);
    match outcome {
        RunOutcome::Completed { .. } => Ok(()),
        RunOutcome::Failed { message, .. } => anyhow::bail!(message),
    }
}

/// Prints progress lines to stdout.
struct ConsoleObserver;

impl ProgressObserver for ConsoleObserver {
    fn on_progress(&self, snapshot: &ProgressSnapshot) {
        println!(
            "Processed {} of {} users ({:.0}%)",
            snapshot.processed,
            snapshot.total,
            snapshot.percentage()
        );
    }

    fn on_finished(&self, outcome: &RunOutcome) {
        match outcome {
            RunOutcome::Completed { processed, pages } => {
                println!("Completed! Processed {processed} users over {pages} pages.");
            }
            RunOutcome::Failed { processed, message, .. } => {
                println!("Error: {message} (after {processed} users)");
            }
        }
    }
}

async fn fields(config: Config, action: FieldsAction) -> anyhow::Result<()> {
    let ctx = AppContext::new(config).context("failed to initialise application")?;

    match action {
        FieldsAction::Show => {
            let selection = ctx.settings.load().await?;
            if selection.is_empty() {
                println!("(no fields selected)");
            } else {
                println!("{}", selection.to_tokens().join(" "));
            }
        }
        FieldsAction::Set { tokens } => {
            let report = ctx.settings.save_tokens(&tokens).await?;
            println!("Saved: {}", report.selection.to_tokens().join(" "));
            if !report.rejected.is_empty() {
                println!("Ignored: {}", report.rejected.join(" "));
            }
        }
    }
    Ok(())
}
