mod backend_bridge;
mod config;
mod controller;
mod media;
mod router;
mod ui;

use anyhow::Context;
use clap::Parser;
use crossbeam_channel::bounded;
use eframe::egui;
use tracing_subscriber::EnvFilter;

use crate::{
    backend_bridge::commands::BackendCommand, config::load_startup_config,
    controller::events::UiEvent, router::Route, ui::CandidateFormApp,
};

#[derive(Parser, Debug)]
#[command(about = "Candidate document submission form")]
struct Args {
    /// Submission endpoint; overrides config file and environment.
    #[arg(long)]
    endpoint: Option<String>,
    /// Initial page path.
    #[arg(long, default_value = "/")]
    route: String,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let startup = load_startup_config(args.endpoint, args.route)?;
    tracing::info!(endpoint = %startup.endpoint, route = %startup.initial_route, "starting candidate form");

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(64);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(256);
    backend_bridge::runtime::launch(cmd_rx, ui_tx, startup.endpoint.clone());

    let route = Route::resolve(&startup.initial_route);
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Candidate Document Submission")
            .with_inner_size([820.0, 900.0])
            .with_min_inner_size([560.0, 600.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Candidate Document Submission",
        options,
        Box::new(move |_cc| Ok(Box::new(CandidateFormApp::new(cmd_tx, ui_rx, route)))),
    )
    .map_err(|err| anyhow::anyhow!("{err}"))
    .context("failed to run the desktop window")
}
