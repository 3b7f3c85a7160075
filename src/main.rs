use clap::Parser;
use coffee_pos::app::checkout::{fill_order, OrderScript};
use coffee_pos::core::pricing::format_amount;
use coffee_pos::core::receipt::StoreProfile;
use coffee_pos::utils::error::ErrorCategory;
use coffee_pos::utils::{logger, validation::Validate};
use coffee_pos::{ApiClient, CheckoutSession, CliConfig, Command, PosConfig, PosError, Result};

fn print_menu(session: &CheckoutSession, store: &StoreProfile) {
    let mut categories: Vec<&str> = Vec::new();
    for item in session.catalog() {
        if !categories.contains(&item.category.as_str()) {
            categories.push(&item.category);
        }
    }

    for category in categories {
        println!("== {} ==", category);
        for item in session.catalog().iter().filter(|i| i.category == category) {
            println!(
                "  {:<12} {:<28} {:>10}",
                item.id,
                item.name,
                store.money(item.base_price)
            );
            for size in &item.sizes {
                println!(
                    "      size {:<20} {:>10}",
                    size.name,
                    format_amount(size.price_modifier)
                );
            }
            for group in &item.customizations {
                let options: Vec<String> = group
                    .options
                    .iter()
                    .map(|o| format!("{}={} (+{})", o.id, o.name, store.money(o.price)))
                    .collect();
                println!("      {}: {}", group.id, options.join(", "));
            }
        }
    }
}

async fn run(cli: &CliConfig, config: &PosConfig) -> Result<()> {
    let api = ApiClient::new(config)?;
    let mut session = CheckoutSession::new();
    session.load_catalog(&api).await?;

    match &cli.command {
        Command::Menu => {
            print_menu(&session, &config.store);
        }
        Command::Checkout { order, dry_run } => {
            let script = OrderScript::from_file(order)?;
            fill_order(&mut session, &script)?;
            println!("{}", session.receipt(&config.store));

            if *dry_run {
                tracing::info!("Dry run: transaction not submitted");
                return Ok(());
            }

            let record = session.complete_transaction(&api).await?;
            println!("Transaction Complete!");
            println!(
                "Transaction ID: {}",
                record.id.as_deref().unwrap_or_default()
            );
            println!();
            println!("{}", session.receipt(&config.store));
        }
    }

    Ok(())
}

fn exit_code(e: &PosError) -> i32 {
    match e.category() {
        ErrorCategory::Validation | ErrorCategory::Workflow => 1,
        ErrorCategory::Network => 2,
        ErrorCategory::Configuration => 3,
        ErrorCategory::System => 4,
    }
}

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    // 載入配置
    let config = match cli.load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(exit_code(&e));
        }
    };

    // 初始化日誌
    logger::init_logger(config.logging.format, cli.verbose);
    tracing::info!("Starting coffee-pos against {}", config.api.base_url);
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(exit_code(&e));
    }

    if let Err(e) = run(&cli, &config).await {
        tracing::error!("❌ {} (Category: {:?})", e, e.category());
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(exit_code(&e));
    }
}
