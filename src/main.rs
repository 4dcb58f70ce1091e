use clap::Parser;
use lrn_etl::config::cli::FetchArgs;
use lrn_etl::config::toml_config::ServiceConfig;
use lrn_etl::utils::error::ErrorSeverity;
use lrn_etl::utils::{logger, validation::Validate};
use lrn_etl::{EtlEngine, FetchConfig, FetchPipeline, LocalStorage};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = FetchArgs::parse();

    logger::init_cli_logger(args.verbose);

    tracing::info!("🚀 Starting lrn-fetch");
    tracing::info!("📁 Loading configuration from: {}", args.config_file);

    let service = match ServiceConfig::from_file(&args.config_file) {
        Ok(service) => service,
        Err(e) => {
            eprintln!(
                "❌ Failed to load config file '{}': {}",
                args.config_file, e
            );
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    let config = match FetchConfig::resolve(&args, &service) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Configuration validation failed: {}", e);
            tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(3);
        }
    };

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(3);
    }

    if args.monitor {
        tracing::info!("🔍 System monitoring enabled");
    }

    let storage = LocalStorage::new(config.output_dir.clone());
    let pipeline = FetchPipeline::new(storage, config);

    let engine = EtlEngine::new_with_monitoring(pipeline, args.monitor);

    match engine.run().await {
        Ok(output_dir) => {
            tracing::info!("✅ Fetch completed successfully!");
            tracing::info!("📁 Responses saved under: {}", output_dir);
            println!("✅ Fetch completed successfully!");
            println!("📁 Responses saved under: {}", output_dir);
        }
        Err(e) => {
            tracing::error!(
                "❌ Fetch failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                ErrorSeverity::Low => 0,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };

            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}
