mod repl;

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use insightiq::api::HttpBackend;
use insightiq::conf::Config;
use insightiq::core::{CliArgs, setup_logging};
use insightiq::session::{FileStore, KeyValueStore, SessionProvider};
use insightiq::view::{App, Theme};
use log::info;

use crate::repl::Repl;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    setup_logging();
    let args = CliArgs::parse();
    info!(args = args; "InsightIQ started.");

    let mut config = Config::load(args.config.as_deref()).context("loading config")?;
    config.apply_args(&args);

    let store: Arc<dyn KeyValueStore> = Arc::new(FileStore::open(&config.storage.state_dir)?);
    let theme = Theme::resolve(args.theme, Theme::load(store.as_ref())?, config.ui.theme);
    let session = Arc::new(SessionProvider::new(store));
    let backend = Arc::new(HttpBackend::new(&config.backend)?);
    info!("using backend {}", backend.base_url());

    let app = App::new(&config.ui, theme, backend, session);
    Repl::new(app)?.run().await
}
