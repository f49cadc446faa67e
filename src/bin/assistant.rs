//! Stock Market Information Assistant CLI
//!
//! An interactive command-line interface for stock price lookups,
//! intraday data, and market research.
//!
//! # Usage
//!
//! ```bash
//! # Set up environment variables
//! export ALPHAVANTAGE_API_KEY="your-key"
//!
//! # Run the assistant
//! cargo run --bin assistant
//! ```

use std::env;
use std::io::{self, BufRead, Write};
use stock_assistant::bot::Assistant;
use stock_assistant::AssistantConfig;

fn print_banner() {
    println!(
        r#"
╔══════════════════════════════════════════════════════════════╗
║            Stock Market Information Assistant                ║
║                                                              ║
║  Commands:                                                   ║
║    /price <company>       - Live stock price                 ║
║    /intraday <company>    - Latest intraday bar              ║
║    /info <company>        - Company information              ║
║    /research <topic>      - Market research                  ║
║    /help                  - Show help                        ║
║    /exit                  - Exit                             ║
║                                                              ║
║  Or just ask: "how is apple doing?"                          ║
╚══════════════════════════════════════════════════════════════╝
"#
    );
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            env::var("RUST_LOG").unwrap_or_else(|_| "warn,stock_assistant=info".to_string()),
        )
        .init();

    print_banner();

    let config = AssistantConfig::builder().with_env_api_key().build()?;
    let mut assistant = Assistant::new(config)?;

    if !assistant.has_api_key() {
        eprintln!("Warning: ALPHAVANTAGE_API_KEY not set; price lookups will be unavailable.\n");
    }

    // Run REPL
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("{}", assistant.prompt());
        stdout.flush()?;

        let mut input = String::new();
        match stdin.lock().read_line(&mut input) {
            Ok(0) => {
                // EOF
                println!("\nGoodbye!");
                break;
            }
            Ok(_) => {}
            Err(e) => {
                eprintln!("Error reading input: {}", e);
                continue;
            }
        }

        let input = input.trim();
        if input.is_empty() {
            continue;
        }

        match assistant.process_input(input).await {
            Ok(response) => {
                println!("{}\n", response);
            }
            Err(e) => {
                if e.to_string() == "exit" {
                    println!("Goodbye!");
                    break;
                }
                eprintln!("Error: {}\n", e);
            }
        }
    }

    Ok(())
}
