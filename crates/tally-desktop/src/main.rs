use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use eyre::Result;

use tally_core::form::FormData;
use tally_desktop::config;
use tally_desktop::{
    DownloadOutcome, FileDownloadSink, HtmlFilePrinter, NavigationState, PageOptions, Phase,
    TemplatePage,
};
use tally_storage::FileDraftStore;

/// Render an invoice record with one of the built-in templates and export it.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// JSON record to export. Without it the saved draft is resumed.
    input: Option<PathBuf>,

    /// Template identifier (1-6).
    #[arg(short, long)]
    template: Option<u32>,

    /// Also write the print page next to the PDF.
    #[arg(long, default_value_t = false)]
    print: bool,

    /// Forget the saved draft and exit.
    #[arg(long, default_value_t = false)]
    new: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let config = config::load_or_default()?;
    if config.created_at.is_none() {
        config::save_config(&config)?;
    }

    let store = Arc::new(FileDraftStore::new(&config.data_dir));
    let sink = Arc::new(FileDownloadSink::new(&config.output_dir));
    let page = TemplatePage::new(store, sink, PageOptions::from(&config));

    if args.new {
        page.start_new_document().await?;
        return Ok(());
    }

    let navigation = match &args.input {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .map_err(|e| eyre::eyre!("failed to read {}: {e}", path.display()))?;
            let mut nav = NavigationState::new(FormData::from_json_str(&raw)?);
            nav.selected_template = args.template;
            Some(nav)
        }
        None => None,
    };

    if page.load(navigation).await == Phase::Loading {
        tracing::warn!("no record given and no saved draft found");
        return Ok(());
    }
    // A template flag given while resuming a draft overrides the configured one.
    if args.input.is_none()
        && let Some(template) = args.template
    {
        page.select_template(template).await;
    }

    if args.print {
        page.print(&HtmlFilePrinter::new(&config.output_dir)).await?;
    }

    match page.download_pdf().await {
        DownloadOutcome::Saved { path, page_count } => {
            println!("{} ({page_count} page(s))", path.display());
            Ok(())
        }
        DownloadOutcome::Failed(reason) => Err(eyre::eyre!("export failed: {reason}")),
        other => Err(eyre::eyre!("nothing exported: {other:?}")),
    }
}

