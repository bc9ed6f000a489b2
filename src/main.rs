use clap::Parser;
use feed_poller::app::console::{self, Command, HELP};
use feed_poller::core::ConfigProvider;
use feed_poller::utils::error::ErrorSeverity;
use feed_poller::utils::logger;
use feed_poller::{CliConfig, ConsoleDisplay, FeedWidget, HttpFeedSource, LocalStorage, Poller};
use std::sync::Arc;
use tokio::io::BufReader;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("🚀 Starting feed-poller");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    // 合併並驗證配置
    let settings = match cli.resolve() {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!("❌ Configuration validation failed: {}", e);
            tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            let exit_code = match e.severity() {
                ErrorSeverity::Critical => 3,
                _ => 1,
            };
            std::process::exit(exit_code);
        }
    };

    let storage = settings.output_path().map(|path| LocalStorage::new(path.to_string()));
    if let Some(storage) = &storage {
        tracing::info!("📁 Snapshots will be saved to: {}", storage.base_path());
    }

    let interval = settings.poll_interval();
    let image_content_type = settings.image_content_type().to_string();
    let initial_category = settings.initial_category;
    let autostart = settings.autostart;

    let source = HttpFeedSource::new(settings)?;
    let display = ConsoleDisplay::new(storage);
    let poller = Poller::new(Arc::new(source), Arc::new(display), interval)
        .with_image_content_type(image_content_type);
    let mut widget = FeedWidget::from_poller(poller);

    widget.select_category(initial_category).await;
    if autostart {
        console::execute(&mut widget, Command::Start).await;
    }

    println!("{}", HELP);

    let stdin = BufReader::new(tokio::io::stdin());
    let outcome = tokio::select! {
        result = console::run_console(&mut widget, stdin) => result,
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Interrupted, shutting down");
            Ok(())
        }
    };

    if let Some(summary) = widget.shutdown().await {
        tracing::debug!("Final poll summary: {:?}", summary);
    }

    if let Err(e) = outcome {
        tracing::error!(
            "❌ Console failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    tracing::info!("👋 Bye");
    Ok(())
}
