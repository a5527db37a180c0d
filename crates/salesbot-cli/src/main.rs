//! salesbot CLI — command-line admin for promotional shop PDFs.
//!
//! Set SALESBOT_API_URL (or API_URL) and optionally SALESBOT_API_KEY.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use salesbot_api_client::ApiClient;
use salesbot_cli::{init_tracing, render_table, report_error};
use salesbot_core::models::{UpdateForm, UploadForm};
use salesbot_core::source::{fetch_and_present, SnapshotSource};
use salesbot_core::{Clock, ClientConfig, DocumentAction, FixedClock, ListOrder, SystemClock};
use serde::Serialize;

#[derive(Parser)]
#[command(name = "salesbot", about = "Admin CLI for promotional shop PDFs")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// List documents with validity, near-expiry and trigger state
    List {
        /// Sort by end date: desc (latest first) or asc (soonest first)
        #[arg(long)]
        order: Option<ListOrder>,
        /// Evaluate as of this date (YYYY-MM-DD) instead of today
        #[arg(long)]
        today: Option<NaiveDate>,
        /// Output format
        #[arg(long, value_enum, default_value = "table")]
        format: OutputFormat,
        /// Read documents from a JSON export instead of the backend
        #[arg(long)]
        snapshot: Option<PathBuf>,
    },
    /// List the shop directory
    Shops,
    /// Upload a new PDF from a local file or a URL
    Upload {
        /// Shop name
        #[arg(long)]
        shop: String,
        /// First valid day (YYYY-MM-DD)
        #[arg(long)]
        from: String,
        /// Last valid day (YYYY-MM-DD)
        #[arg(long)]
        to: String,
        /// Local PDF to upload
        #[arg(long, required_unless_present = "url")]
        file: Option<PathBuf>,
        /// URL the backend should download the PDF from (ignored when --file is given)
        #[arg(long)]
        url: Option<String>,
    },
    /// Replace shop name and validity window of a PDF
    Update {
        /// Filename of the document
        filename: String,
        /// Shop name
        #[arg(long)]
        shop: String,
        /// First valid day (YYYY-MM-DD)
        #[arg(long)]
        from: String,
        /// Last valid day (YYYY-MM-DD)
        #[arg(long)]
        to: String,
        /// Replacement PDF
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// Delete a PDF
    Delete {
        /// Filename of the document
        filename: String,
    },
    /// Trigger the processing pipeline for a PDF, if it is eligible
    Trigger {
        /// Filename of the document
        filename: String,
        /// Evaluate eligibility as of this date (YYYY-MM-DD) instead of today
        #[arg(long)]
        today: Option<NaiveDate>,
    },
}

fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    let out = serde_json::to_string_pretty(value).context("Serialize response")?;
    println!("{}", out);
    Ok(())
}

fn clock_for(today: Option<NaiveDate>) -> Box<dyn Clock> {
    match today {
        Some(date) => Box::new(FixedClock(date)),
        None => Box::new(SystemClock),
    }
}

fn load_config() -> anyhow::Result<ClientConfig> {
    ClientConfig::from_env().context(
        "Failed to load configuration. Check SALESBOT_API_URL and SALESBOT_API_TIMEOUT_SECS",
    )
}

fn connect() -> anyhow::Result<(ClientConfig, ApiClient)> {
    let config = load_config()?;
    let client = ApiClient::from_config(&config).context("Failed to create API client")?;
    Ok((config, client))
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::List {
            order,
            today,
            format,
            snapshot,
        } => {
            let clock = clock_for(today);
            // A snapshot is listed offline; the backend settings are not needed.
            let (rows, api_url) = match snapshot {
                Some(path) => {
                    let source = SnapshotSource::from_json_file(&path)?;
                    let order = match order {
                        Some(order) => order,
                        None => ClientConfig::list_order_from_env()?,
                    };
                    let api_url = load_config().ok().map(|c| c.api_url);
                    (fetch_and_present(&source, clock.as_ref(), order).await?, api_url)
                }
                None => {
                    let (config, client) = connect()?;
                    let order = order.unwrap_or(config.list_order);
                    let rows = fetch_and_present(&client, clock.as_ref(), order).await?;
                    (rows, Some(config.api_url))
                }
            };

            match format {
                OutputFormat::Json => print_json(&rows)?,
                OutputFormat::Table => print!("{}", render_table(&rows, api_url.as_deref())),
            }
        }
        Commands::Shops => {
            let (_, client) = connect()?;
            let shops = client.list_shops().await?;
            print_json(&shops)?;
        }
        Commands::Upload {
            shop,
            from,
            to,
            file,
            url,
        } => {
            let (_, client) = connect()?;
            let form = UploadForm {
                shop_name: shop,
                valid_from: from,
                valid_to: to,
                file,
                file_url: url,
            };
            let response = client.upload_document(&form).await?;
            print_json(&response)?;
        }
        Commands::Update {
            filename,
            shop,
            from,
            to,
            file,
        } => {
            let action = DocumentAction::update(UpdateForm {
                filename,
                shop_name: shop,
                valid_from: from,
                valid_to: to,
                file,
            })?;
            let (_, client) = connect()?;
            let message = client.execute(&action).await?;
            print_json(&serde_json::json!({ "success": true, "message": message }))?;
        }
        Commands::Delete { filename } => {
            let action = DocumentAction::delete(&filename)?;
            let (_, client) = connect()?;
            let message = client.execute(&action).await?;
            print_json(&serde_json::json!({ "success": true, "message": message }))?;
        }
        Commands::Trigger { filename, today } => {
            let (config, client) = connect()?;
            // Decide on the same view `list` would show right now.
            let clock = clock_for(today);
            let rows = fetch_and_present(&client, clock.as_ref(), config.list_order).await?;
            let action = DocumentAction::trigger_in(&rows, &filename)?;
            let message = client.execute(&action).await?;
            print_json(&serde_json::json!({ "success": true, "message": message }))?;
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report_error(&err);
            ExitCode::FAILURE
        }
    }
}
