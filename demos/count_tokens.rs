//! Token counting example for Firebase AI.
//!
//! This example demonstrates:
//! - Loading settings from environment variables
//! - Counting the tokens of a prompt
//! - Inspecting classified errors
//!
//! # Usage
//!
//! ```bash
//! export FIREBASE_API_KEY="your-api-key"
//! export FIREBASE_PROJECT_ID="your-project"
//! export FIREBASE_AI_BACKEND="vertexai"   # or googleai
//! cargo run --example count_tokens
//! ```

use integrations_firebase_ai::{
    AiErrorCode, ApiSettings, Content, CountTokensRequest, FirebaseAiClient, RequestOptions,
};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let settings = ApiSettings::from_env()?;
    println!("Backend: {}", settings.backend);

    let client = FirebaseAiClient::builder().settings(settings).build()?;

    let request = CountTokensRequest {
        contents: vec![Content::user_text(
            "Explain quantum computing in simple terms, in 2-3 sentences.",
        )],
        ..Default::default()
    };
    let options = RequestOptions::builder()
        .timeout(Duration::from_secs(30))
        .build();

    match client
        .count_tokens("gemini-2.0-flash", &request, Some(&options))
        .await
    {
        Ok(response) => {
            println!("Total tokens: {}", response.total_tokens);
            if let Some(chars) = response.total_billable_characters {
                println!("Billable characters: {chars}");
            }
            for detail in response.prompt_tokens_details.unwrap_or_default() {
                println!("  {}: {}", detail.modality, detail.token_count);
            }
        }
        Err(err) if err.code == AiErrorCode::ApiNotEnabled => {
            eprintln!("{}", err.message);
        }
        Err(err) => {
            eprintln!("Request failed: {err}");
            if let Some(data) = &err.custom_error_data {
                eprintln!("  status: {} {}", data.status, data.status_text);
            }
            if err.is_retryable() {
                eprintln!("  the request may succeed if retried");
            }
        }
    }

    Ok(())
}
