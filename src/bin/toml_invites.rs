use anyhow::Context;
use clap::Parser;
use customer_invites::core::ConfigProvider;
use customer_invites::utils::error::EtlError;
use customer_invites::utils::{logger, validation::Validate};
use customer_invites::{EtlEngine, InvitePipeline, LocalStorage, TomlConfig};
use std::path::Path;

#[derive(Parser)]
#[command(name = "toml-invites")]
#[command(about = "Generate the invite list from a TOML configuration file")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "invites.toml")]
    config: String,

    /// Override the distance (km) from the config
    #[arg(long)]
    distance: Option<f64>,

    /// Enable debug logs
    #[arg(short, long)]
    debug: bool,

    /// Dry run - show what would be processed without reading or writing files
    #[arg(long)]
    dry_run: bool,
}

fn main() {
    let args = Args::parse();

    // 載入 TOML 配置
    let mut config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    // 初始化日誌
    logger::init_cli_logger(args.debug || config.debug_enabled());
    tracing::info!("📁 Loaded configuration from: {}", args.config);

    // 應用命令列覆蓋設定
    if let Some(distance) = args.distance {
        config.set_distance_km(distance);
        tracing::info!("🔧 Distance overridden to: {} km", distance);
    }

    if let Err(e) = config.validate() {
        exit_with(e);
    }

    tracing::info!("✅ Configuration loaded and validated successfully");

    if args.dry_run {
        if let Err(e) = perform_dry_run(&config, &args) {
            eprintln!("❌ Dry run failed: {:#}", e);
            std::process::exit(1);
        }
        return;
    }

    let pipeline = InvitePipeline::new(LocalStorage::default(), config);
    let engine = EtlEngine::new(pipeline);

    match engine.run() {
        Ok(output_path) => {
            tracing::info!("✅ Invite list generated successfully, saved to {}", output_path);
        }
        Err(e) => exit_with(e),
    }
}

fn exit_with(e: EtlError) -> ! {
    tracing::error!(
        "❌ Run failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    std::process::exit(e.exit_code());
}

fn perform_dry_run(config: &TomlConfig, args: &Args) -> anyhow::Result<()> {
    let office = config.office();

    println!("📋 Configuration Summary:");
    println!("  Config file: {}", args.config);
    println!(
        "  Office: {} ({}, {})",
        config.office_name(),
        office.latitude,
        office.longitude
    );
    println!("  Distance: {} km", config.distance_km());
    println!("  Input: {}", config.input_path());
    println!("  Duplicate user_id: {}", config.duplicate_policy());
    println!("  Output: {}", config.output_path());

    let input = Path::new(config.input_path());
    let metadata = input.metadata().ok();
    match metadata {
        Some(meta) => println!("  Input size: {} bytes", meta.len()),
        None => println!("  ⚠️ Input file does not exist yet"),
    }

    let output_dir = Path::new(config.output_path())
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    if output_dir.exists() {
        let output_dir = output_dir.canonicalize().with_context(|| {
            format!("output directory {} is not accessible", output_dir.display())
        })?;
        if !output_dir.is_dir() {
            anyhow::bail!("{} is not a directory", output_dir.display());
        }
        println!("  Output directory: {}", output_dir.display());
    } else {
        println!("  Output directory: {} (will be created)", output_dir.display());
    }

    println!();
    println!("🔍 DRY RUN - no files were read or written");
    Ok(())
}
