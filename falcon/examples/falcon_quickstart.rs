//! Upload a CSV and ask a question about it.
//!
//! ```bash
//! export FALCON_API_KEY=TESTKEY123
//! export FALCON_HOST_NAME_PORT=localhost:8888
//! cargo run --example falcon_quickstart -- ~/Downloads/01Aug2023.csv
//! ```

#![allow(clippy::print_stdout)]

use falcon::prelude::*;
use serde_json::Value;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter("falcon=debug")
        .init();

    let client = Falcon::from_env()?;

    let models = client.list_models();
    if matches!(models.get("models"), None | Some(Value::Null)) {
        println!("No suitable model found");
        return Ok(());
    }

    let paths: Vec<String> = std::env::args().skip(1).collect();
    if !paths.is_empty() {
        let response = client.create_embedding(paths.as_slice()).await?;
        println!("Embedding: {response}");
    }

    let request = GenerateRequest::new("What is Account status key?")
        .use_default(1)
        .conversation_config(ConversationConfig::default().k(5).fetch_k(50000))
        .config(GenerationConfig::default());

    let completion = client.generate_text(&request).await?;
    println!("{completion}");

    Ok(())
}
