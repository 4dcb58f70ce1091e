use clap::Parser;
use lrn_etl::config::cli::ConvertArgs;
use lrn_etl::utils::error::ErrorSeverity;
use lrn_etl::utils::logger;
use lrn_etl::{ConvertPipeline, EtlEngine, LocalStorage};
use std::path::Path;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = ConvertArgs::parse();

    logger::init_cli_logger(args.verbose);

    tracing::info!("🚀 Starting lrn-convert");
    tracing::info!("📁 Reading records from [{}]", args.input_dir);

    if !Path::new(&args.input_dir).is_dir() {
        eprintln!("❌ Input directory '{}' does not exist", args.input_dir);
        std::process::exit(3);
    }

    let output_path = Path::new(&args.output_file);
    let Some(output_name) = output_path.file_name().and_then(|name| name.to_str()) else {
        eprintln!("❌ Output file '{}' has no file name", args.output_file);
        std::process::exit(3);
    };
    let output_dir = match output_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => Path::new(".").to_path_buf(),
    };

    if args.monitor {
        tracing::info!("🔍 System monitoring enabled");
    }

    let source = LocalStorage::new(args.input_dir.clone());
    let sink = LocalStorage::new(output_dir);
    let pipeline = ConvertPipeline::new(source, sink, output_name);

    let engine = EtlEngine::new_with_monitoring(pipeline, args.monitor);

    match engine.run().await {
        Ok(_) => {
            tracing::info!("✅ Conversion completed successfully!");
            tracing::info!("📁 Output saved to: {}", args.output_file);
            println!("✅ Conversion completed successfully!");
            println!("📁 Output saved to: {}", args.output_file);
        }
        Err(e) => {
            tracing::error!(
                "❌ Conversion failed: {} (Category: {:?}, Severity: {:?})",
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
