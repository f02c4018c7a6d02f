use std::{process::ExitCode, sync::Arc, time::Duration};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use client_core::{
    config::{load_settings, validate_base_url},
    Draft, FormController, HttpGuestbookApi, Notice, Settings, SUCCESS_MESSAGE,
};
use shared::domain::FormField;
use tokio::io::{stdin, stdout, BufReader};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod session;

#[derive(Parser, Debug)]
#[command(name = "guestbook", about = "Buku Tamu Digital")]
struct Cli {
    /// Overrides the configured API base url.
    #[arg(long, global = true)]
    api_base_url: Option<String>,
    /// Request timeout applied by the HTTP transport.
    #[arg(long, global = true)]
    timeout_secs: Option<u64>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Submit one guest entry and exit.
    Submit {
        #[arg(long)]
        name: String,
        #[arg(long)]
        organization: String,
        #[arg(long, default_value = "")]
        message: String,
    },
    /// Fill in the form line by line.
    Interactive,
}

fn build_api(settings: &Settings, timeout_secs: Option<u64>) -> Result<HttpGuestbookApi> {
    let mut builder = reqwest::Client::builder();
    if let Some(secs) = timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    let http = builder.build().context("failed to build HTTP client")?;
    Ok(HttpGuestbookApi::with_client(
        http,
        settings.api_base_url.clone(),
    ))
}

async fn submit_once(controller: &FormController, draft: Draft) -> ExitCode {
    for field in FormField::ALL {
        controller
            .update_field(field, draft.get(field).to_string())
            .await;
    }

    match controller.submit().await {
        Ok(entry) => {
            println!(
                "{} (id={})",
                session::render_notice(&Notice::success(SUCCESS_MESSAGE)),
                entry.id
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            println!(
                "{}",
                session::render_notice(&Notice::error(err.notice_message()))
            );
            ExitCode::FAILURE
        }
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();

    let mut settings = load_settings().context("failed to load guestbook settings")?;
    if let Some(url) = cli.api_base_url {
        validate_base_url(&url).context("invalid --api-base-url")?;
        settings.api_base_url = url;
    }
    info!(api_base_url = %settings.api_base_url, "guestbook client starting");

    let api = build_api(&settings, cli.timeout_secs)?;
    let controller = FormController::new(Arc::new(api));

    match cli.command {
        Command::Submit {
            name,
            organization,
            message,
        } => Ok(submit_once(&controller, Draft::new(name, organization, message)).await),
        Command::Interactive => {
            session::run(&controller, BufReader::new(stdin()), stdout())
                .await
                .context("interactive session failed")?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
