use clap::Parser;
use crossbeam_channel::bounded;
use shared::domain::RendererConfig;
use store::StoreState;
use tracing::error;

mod backend;
mod ui;

use backend::ViewSnapshot;

/// Desktop shell for the dashboard renderer: boots a page from a dashboard
/// server and renders it.
#[derive(Debug, Parser)]
#[command(name = "dashboard_gui")]
struct Args {
    /// Dashboard server to bootstrap from.
    #[arg(long, default_value = "http://127.0.0.1:8050")]
    server_url: String,

    /// Pathname prefix the server mounts its resource routes under.
    #[arg(long, default_value = "/")]
    requests_pathname_prefix: String,

    /// Wrap the hydrated tree in the global error boundary.
    #[arg(long)]
    ui: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();
    let args = Args::parse();

    let config = RendererConfig {
        ui: args.ui,
        requests_pathname_prefix: args.requests_pathname_prefix.clone(),
    };
    let client = client::ApiClient::new(&args.server_url, &args.requests_pathname_prefix)?;

    let (snapshot_tx, snapshot_rx) = bounded::<ViewSnapshot>(64);

    eframe::run_native(
        "Dashboard",
        eframe::NativeOptions::default(),
        Box::new(move |cc| {
            let egui_ctx = cc.egui_ctx.clone();
            let initial = StoreState::started(config.clone());
            std::thread::spawn(move || {
                if let Err(err) = backend::run(client, initial, snapshot_tx, move || {
                    egui_ctx.request_repaint();
                }) {
                    error!(%err, "bootstrap worker failed");
                }
            });
            Ok(Box::new(ui::DashboardApp::new(snapshot_rx)))
        }),
    )
    .map_err(|err| anyhow::anyhow!("eframe failed: {err}"))
}
