use {
    eegflow::{
        config::{Config, SourceKind},
        headless, ui, Controller, HttpSource, SampleSource, SimulatedSource,
    },
    std::sync::Arc,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    let config = Config::from_env();

    // Logs go to stderr. In TUI mode they still land on the terminal and can
    // tear the dashboard, so redirect stderr (`2>eegflow.log`) when RUST_LOG is set.
    // Headless mode has nothing else to show, so it logs at info by default.
    let mut builder = if config.rust_log.is_some() || config.headless {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
    } else {
        env_logger::Builder::from_default_env()
    };
    builder.target(env_logger::Target::Stderr).init();

    log::info!("🚀 Starting eegflow...");
    log::info!("📊 Configuration:");
    log::info!("   Source: {:?}", config.source);
    log::info!("   Base URL: {}", config.base_url);
    log::info!("   Poll interval: {}ms", config.poll_interval.as_millis());
    log::info!("   Export dir: {}", config.export_dir.display());

    let source: Arc<dyn SampleSource> = match config.source {
        SourceKind::Http => Arc::new(HttpSource::new(&config.base_url, config.request_timeout)?),
        SourceKind::Simulated => Arc::new(SimulatedSource::default()),
    };

    let controller = Controller::new(source, config.poll_interval);

    if config.headless {
        headless::run_headless(controller, &config).await?;
    } else {
        ui::run_ui(controller, &config).await?;
    }

    log::info!("👋 eegflow exited");
    Ok(())
}
