// Entry point: runs the fixed analysis pipeline over the default dataset.
//
// Nothing is read from the command line. Diagnostics go to stderr through
// `tracing` and honour `RUST_LOG`; the report itself goes to stdout.
use chrono::Local;
use order_trends::config::AnalysisConfig;
use order_trends::pipeline;
use std::error::Error;
use tracing::error;
use tracing_subscriber::EnvFilter;

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<(), Box<dyn Error>> {
    init_tracing();
    let cfg = AnalysisConfig::default();

    println!("{}", pipeline::banner(&Local::now().format(TIME_FORMAT).to_string()));

    if let Err(e) = pipeline::run(&cfg) {
        error!(error = %e, input = %cfg.input_path, "Analysis aborted");
        return Err(e.into());
    }

    println!("Analysis completed at: {}", Local::now().format(TIME_FORMAT));
    Ok(())
}
