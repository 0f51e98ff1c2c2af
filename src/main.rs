use cammeter::{run_cammeter, MeterConfig, TestPatternProvider};
use tracing_subscriber::EnvFilter;

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cfg = MeterConfig::load_or_default().unwrap_or_else(|e| {
        tracing::warn!("failed to load config, using defaults: {e}");
        MeterConfig::default()
    });

    let provider = TestPatternProvider::new(
        cfg.stream.pattern_devices,
        cfg.stream.width,
        cfg.stream.height,
    );
    run_cammeter(&provider, cfg, None, None)
}
