use anyhow::Context;
use clap::Parser;
use project365::core::renderer::LIST_TEMPLATE;
use project365::core::{ConfigProvider, SearchQuery, Storage};
use project365::utils::{logger, validation::Validate};
use project365::{FlickrSource, LocalStorage, PageCreator, TomlConfig};

#[derive(Parser)]
#[command(name = "toml-page")]
#[command(about = "Builds year pages for every year listed in a TOML configuration")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "project365.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,

    /// Show the planned searches without calling the API
    #[arg(long)]
    dry_run: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.json_logs {
        logger::init_json_logger(args.verbose);
    } else {
        logger::init_cli_logger(args.verbose);
    }

    tracing::info!("🚀 Loading configuration from: {}", args.config);

    let config = TomlConfig::from_file(&args.config)
        .with_context(|| format!("Failed to load config file '{}'", args.config))?;
    config.validate().context("Configuration validation failed")?;

    if args.dry_run {
        perform_dry_run(&config);
        return Ok(());
    }

    let storage = LocalStorage::new(config.output_path().to_string());
    let user_id = config.user_id().to_string();
    let template_dir = config.template_dir().to_path_buf();
    let years = config.years().to_vec();

    let creator = PageCreator::new(FlickrSource::new(config));

    for year in &years {
        let html = creator
            .update(year, &user_id, &template_dir)
            .with_context(|| format!("Failed to build page for {}", year))?;

        let file_name = format!("{}.html", year);
        storage.write_file(&file_name, html.as_bytes())?;
        let saved_to = storage.full_path(&file_name);
        tracing::info!("📁 Page saved to: {}", saved_to);
        println!("📁 {} saved to: {}", year, saved_to);
    }

    tracing::info!("✅ Built {} pages", years.len());
    println!("✅ Built {} pages successfully!", years.len());
    Ok(())
}

fn perform_dry_run(config: &TomlConfig) {
    println!("🔍 Dry run:");
    println!("  Endpoint: {}", config.api_endpoint());
    println!("  User: {}", config.user_id());
    println!("  Template: {}", config.template_dir().join(LIST_TEMPLATE).display());
    for year in config.years() {
        let query = SearchQuery::new(year.as_str(), config.user_id());
        println!(
            "  {} -> tag {} -> {}/{}.html",
            year,
            query.tag(),
            config.output_path(),
            year
        );
    }
}
