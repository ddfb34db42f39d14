use clap::Parser;
use project365::core::Storage;
use project365::utils::error::{ErrorSeverity, PageError};
use project365::utils::{logger, validation::Validate};
use project365::{CliConfig, FlickrSource, LocalStorage, PageCreator};
use std::path::Path;

fn exit_code(e: &PageError) -> i32 {
    match e.severity() {
        ErrorSeverity::Medium => 2, // worth retrying later
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    }
}

fn report(e: &PageError) {
    tracing::error!(
        "❌ Page build failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
}

fn main() {
    let config = CliConfig::parse();

    if config.json_logs {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting project365 for {}", config.year);

    if let Err(e) = config.validate() {
        report(&e);
        std::process::exit(exit_code(&e));
    }

    let storage = LocalStorage::new(config.output_path.clone());
    let output_file = config.output_file();
    let write_to_stdout = config.stdout;
    let year = config.year.clone();
    let user_id = config.user_id.clone();
    let template_dir = config.template_dir.clone();

    let creator = PageCreator::new(FlickrSource::new(config));

    let result = creator
        .update(&year, &user_id, Path::new(&template_dir))
        .and_then(|html| {
            if write_to_stdout {
                println!("{}", html);
                return Ok(());
            }
            storage.write_file(&output_file, html.as_bytes())?;
            let saved_to = storage.full_path(&output_file);
            tracing::info!("✅ Page saved to: {}", saved_to);
            println!("✅ Page built successfully!");
            println!("📁 Output saved to: {}", saved_to);
            Ok(())
        });

    if let Err(e) = result {
        report(&e);
        std::process::exit(exit_code(&e));
    }
}
