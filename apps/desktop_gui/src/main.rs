mod backend_bridge;
mod controller;
mod ui;

use anyhow::{anyhow, Context};
use clap::Parser;
use client_core::{config::load_settings, HttpRecordsClient};
use crossbeam_channel::bounded;
use eframe::egui;
use tracing_subscriber::EnvFilter;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::ui::DesktopGuiApp;

#[derive(Parser, Debug)]
#[command(name = "records-desktop", about = "Desktop table for person records")]
struct Args {
    /// Base url of the records backend (overrides records.toml and env).
    #[arg(long)]
    api_url: Option<String>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();
    let args = Args::parse();

    let mut settings = load_settings();
    if let Some(api_url) = args.api_url {
        settings.api_url = api_url;
    }
    let client = HttpRecordsClient::from_settings(&settings)
        .with_context(|| format!("invalid api url '{}'", settings.api_url))?;
    tracing::info!(collection = %client.collection_url(), "starting desktop app");

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(256);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(2048);
    backend_bridge::runtime::launch(client, cmd_rx, ui_tx);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Records")
            .with_inner_size([1100.0, 700.0])
            .with_min_inner_size([760.0, 480.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Records",
        options,
        Box::new(move |_cc| Ok(Box::new(DesktopGuiApp::new(cmd_tx, ui_rx, &settings)))),
    )
    .map_err(|err| anyhow!("desktop window failed: {err}"))
}
