//! Basic OpenAI client usage example

use openai_client::{ChatRequest, FunctionRequest, Message, OpenAIClient, ToolDefinition};
use serde_json::json;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize from environment
    let client = OpenAIClient::from_env()?;

    // JSON-mode chat completion
    println!("=== Chat Completion (JSON mode) ===");
    let response = client
        .chat_completion(
            ChatRequest::new("gpt-4o-mini")
                .message(Message::system("Answer with a JSON object."))
                .message(Message::user("Give {\"language\": ...} for the Rust compiler."))
                .json_object(),
        )
        .await?;

    println!("Response: {}", response.content);

    // Function calling
    println!("\n=== Function Calling ===");
    let lookup = ToolDefinition::new(
        "lookup_weather",
        "Look up today's weather for a city",
        json!({
            "type": "object",
            "properties": {"city": {"type": "string"}},
            "required": ["city"],
            "additionalProperties": false
        }),
    );

    let response = client
        .function_calling(FunctionRequest::new(
            "gpt-4o-mini",
            vec![Message::user("What's the weather in Duluth?")],
            &[lookup],
        ))
        .await?;

    match response.first_call() {
        Some(call) => println!("Model called {} with {}", call.name, call.arguments),
        None => println!("No tool chosen: {:?}", response.content),
    }

    Ok(())
}
