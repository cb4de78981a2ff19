use anyhow::{Result, Context};
use clap::Parser;
use log::info;

use mailtriage::config::Config;
use mailtriage::email::Email;
use mailtriage::gmail_client::GmailClient;
use mailtriage::llm::ChatCompletionClient;
use mailtriage::processor::EmailProcessor;
use mailtriage::strategy::{CategorizationStrategy, EmbeddingCategorizer, LlmCategorizer, StrategyKind};

#[derive(Parser)]
#[command(name = "mailtriage")]
#[command(about = "Fetch unread Gmail messages and sort them into categories")]
#[command(version = "0.1.0")]
struct Args {
    /// Maximum number of unread emails to fetch (default: MAX_RESULTS or 5)
    #[arg(short = 'n', long)]
    max_results: Option<u32>,

    /// Classification strategy
    #[arg(short, long, value_enum, default_value_t = StrategyKind::Llm)]
    strategy: StrategyKind,

    /// Only fetch and display emails, without classifying them
    #[arg(long)]
    no_classify: bool,

    /// Print the emails as JSON instead of text
    #[arg(long)]
    json: bool,

    /// Check the configuration without connecting
    #[arg(long)]
    check_config: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let args = Args::parse();

    env_logger::init();

    info!("🚀 Starting mailtriage");

    let config = Config::new()?;
    config.validate()?;

    if args.check_config {
        println!("✅ Configuration valid!");
        println!("📧 Gmail API OAuth2");
        println!("🔑 Credentials: {}", config.gmail.credentials_path);
        println!("💾 Token cache: {}", config.gmail.token_cache_path);
        println!("🤖 Model: {} at {}", config.llm.model, config.llm.base_url);
        println!("📬 Max results: {}", config.max_results);
        return Ok(());
    }

    let max_results = args.max_results.unwrap_or(config.max_results);

    let strategy: Box<dyn CategorizationStrategy> = match args.strategy {
        StrategyKind::Llm => {
            let client = ChatCompletionClient::new(&config.llm)
                .context("Unable to create completion client")?;
            Box::new(LlmCategorizer::new(client))
        }
        StrategyKind::Embedding => Box::new(EmbeddingCategorizer),
    };

    let gmail = GmailClient::new(&config.gmail)
        .await
        .context("Unable to connect to Gmail API")?;

    let processor = EmailProcessor::new(Box::new(gmail), strategy);

    let emails = if args.no_classify {
        processor.fetch_emails(max_results).await
    } else {
        processor.process_emails(max_results).await
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&emails)?);
        return Ok(());
    }

    if emails.is_empty() {
        println!("No emails to process. Exiting.");
        return Ok(());
    }

    println!("\n--- Here are your latest emails ---\n");
    for (index, email) in emails.iter().enumerate() {
        print_email(index + 1, email);
    }

    Ok(())
}

fn print_email(number: usize, email: &Email) {
    let heading = format!("--- Email #{} ---", number);
    let preview: String = email.body.chars().take(100).collect();

    println!("{}", heading);
    println!("  Subject: {}", email.subject);
    println!("     From: {}", email.sender);
    println!(" Received: {}", email.received_at.format("%Y-%m-%d %H:%M"));
    if let Some(category) = &email.category {
        println!(" Category: {}", category);
    }
    if let Some(summary) = &email.summary {
        println!("  Summary: {}", summary);
    }
    println!("Body: {}...", preview);
    println!("{}", "-".repeat(heading.chars().count()));
    println!();
}
