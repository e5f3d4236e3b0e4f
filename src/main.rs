use clap::Parser;
use necta_results::utils::logger;
use necta_results::{CliConfig, EtlEngine, LocalStorage, NectaError, ResultsPipeline};

const PERSISTENCE_EXIT_CODE: i32 = 5;

fn fail(e: &NectaError) -> ! {
    tracing::error!("❌ {} (Category: {:?})", e, e.category());
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
    std::process::exit(e.exit_code());
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();

    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }
    tracing::debug!("CLI config: {:?}", cli);

    let config = match cli.resolve() {
        Ok(config) => config,
        Err(e) => fail(&e),
    };
    tracing::info!("Analysing results from {}", config.source);

    let pipeline = match ResultsPipeline::new(LocalStorage::default(), config) {
        Ok(pipeline) => pipeline,
        Err(e) => fail(&e),
    };
    let engine = EtlEngine::new(pipeline);

    let report = match engine.run().await {
        Ok(report) => report,
        Err(e) => fail(&e),
    };

    println!("{}", report.console_summary);
    for path in &report.load.written {
        println!("📁 Saved {}", path);
    }
    for failure in &report.load.failed {
        eprintln!("❌ Could not save {}: {}", failure.artifact, failure.message);
    }

    if !report.load.is_complete() {
        std::process::exit(PERSISTENCE_EXIT_CODE);
    }
    Ok(())
}
