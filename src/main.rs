use std::sync::Arc;
use std::time::Duration;

use letter_assist::config::{GenerationConfig, ServerConfig};
use letter_assist::llm::create_generator;
use letter_assist::server::letter_routes;
use letter_assist::triage::directory::CompanyDirectory;
use letter_assist::triage::pipeline::TriagePipeline;

/// Default OpenAI-compatible endpoint (Yandex AI Studio compatibility surface).
const DEFAULT_BASE_URL: &str = "https://rest-assistant.api.cloud.yandex.net/v1";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    // Read generation credentials from environment
    let api_key = std::env::var("LETTER_ASSIST_API_KEY").unwrap_or_else(|_| {
        eprintln!("Error: LETTER_ASSIST_API_KEY not set");
        eprintln!("  export LETTER_ASSIST_API_KEY=...");
        std::process::exit(1);
    });

    let model = std::env::var("LETTER_ASSIST_MODEL")
        .unwrap_or_else(|_| "yandexgpt/latest".to_string());

    let base_url = std::env::var("LETTER_ASSIST_BASE_URL")
        .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

    let timeout_secs: u64 = std::env::var("LETTER_ASSIST_GENERATION_TIMEOUT_SECS")
        .unwrap_or_else(|_| "30".to_string())
        .parse()
        .unwrap_or(30);

    let server_config = ServerConfig {
        bind_addr: std::env::var("LETTER_ASSIST_ADDR")
            .unwrap_or_else(|_| ServerConfig::default().bind_addr),
    };

    eprintln!("📨 Letter Assist v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Model: {}", model);
    eprintln!("   API: http://{}/process", server_config.bind_addr);

    let generation_config = GenerationConfig {
        base_url,
        api_key: secrecy::SecretString::from(api_key),
        model,
        timeout: Duration::from_secs(timeout_secs),
    };
    let generator = create_generator(&generation_config)?;

    let directory = Arc::new(CompanyDirectory::default_directory());
    let pipeline = Arc::new(TriagePipeline::new(directory, generator));
    let app = letter_routes(pipeline);

    let listener = tokio::net::TcpListener::bind(&server_config.bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
