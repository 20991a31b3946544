//! `ollama-dev`: smoke test for a local Ollama server.
//!
//! Checks connectivity, lists models, generates a snippet and explains a
//! hard-coded one. Configuration comes from `OLLAMA_HOST`, `OLLAMA_PORT`,
//! `OLLAMA_MODEL` and the `OLLAMA_DEV_LOG_*` variables.

use std::process::ExitCode;

use ollama_dev::{OllamaClient, OllamaConfig, telemetry};

const GENERATE_PROMPT: &str = "Write a Python function that computes the factorial of a number";

const SAMPLE_CODE: &str = r#"
def quicksort(arr):
    if len(arr) <= 1:
        return arr
    pivot = arr[len(arr) // 2]
    left = [x for x in arr if x < pivot]
    middle = [x for x in arr if x == pivot]
    right = [x for x in arr if x > pivot]
    return quicksort(left) + middle + quicksort(right)
"#;

#[tokio::main]
async fn main() -> ExitCode {
    let _guard = match telemetry::init_from_env() {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Invalid logging configuration: {e}");
            return ExitCode::FAILURE;
        }
    };

    let client = match OllamaConfig::from_env().and_then(OllamaClient::new) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Invalid Ollama configuration: {e}");
            return ExitCode::FAILURE;
        }
    };

    println!("Checking connection to Ollama at {}...", client.base_url());
    if !client.is_connected().await {
        println!("Cannot connect to Ollama. Make sure it is running.");
        return ExitCode::FAILURE;
    }
    println!("Connected!");

    let models = client.list_models().await;
    println!("Available models: {models:?}");

    println!("\nGenerating code...");
    if let Some(code) = client.generate_code(GENERATE_PROMPT, None).await
        && !code.is_empty()
    {
        println!("Generated code:");
        println!("{code}");
    }

    println!("\nExplaining code...");
    if let Some(explanation) = client.explain_code(SAMPLE_CODE, "Python").await
        && !explanation.is_empty()
    {
        println!("Explanation:");
        println!("{explanation}");
    }

    ExitCode::SUCCESS
}
