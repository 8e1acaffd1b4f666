use clap::{Parser, Subcommand};
use reqwest::header::AUTHORIZATION;
use serde_json::Value;

#[derive(Parser)]
#[command(name = "relay-cli")]
#[command(about = "Command-line client for the item relay", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch one item through the relay
    GetCallObj {
        #[arg(short, long)]
        query: Option<String>,
    },
    /// Fetch the item list
    GetCallList,
    /// Post-call endpoint
    PostCall {
        #[arg(short, long)]
        query: Option<String>,
    },
    /// Exchange-call endpoint, sends the token as the Authorization header
    ExchangeCall {
        #[arg(short, long)]
        token: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = cli.url.trim_end_matches('/');

    let request = match cli.command {
        Commands::GetCallObj { query } => {
            let mut req = client.get(format!("{}/api/client/get-call-obj", base));
            if let Some(q) = query {
                req = req.query(&[("query", q)]);
            }
            req
        }
        Commands::GetCallList => client.get(format!("{}/api/client/get-call-list", base)),
        Commands::PostCall { query } => {
            let mut req = client.get(format!("{}/api/client/post-call", base));
            if let Some(q) = query {
                req = req.query(&[("query", q)]);
            }
            req
        }
        Commands::ExchangeCall { token } => client
            .get(format!("{}/api/client/exchange-call", base))
            .header(AUTHORIZATION, token),
    };

    print_response(request.send().await?).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: relay returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(());
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
