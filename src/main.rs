use clap::Parser;
use customer_invites::utils::error::EtlError;
use customer_invites::utils::{logger, validation::Validate};
use customer_invites::{CliConfig, EtlEngine, InvitePipeline, LocalStorage};

fn main() {
    let config = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(config.debug);

    tracing::info!("Starting customer-invites");
    tracing::debug!("CLI config: {:?}", config);

    // 驗證配置
    if let Err(e) = config.validate() {
        exit_with(e);
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
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    std::process::exit(e.exit_code());
}
