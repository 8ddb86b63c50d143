//! Manual test utility: log in against a real server and list libraries
//!
//! Reads `credentials.json` (or the path given as the first argument).
//! Run with: cargo run --bin login_check

use abs_probe::api::{AbsClient, Body};
use std::error::Error;
use std::path::PathBuf;

#[path = "../test_utils.rs"]
mod test_utils;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn Error>> {
    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("credentials.json"));

    println!("Loading credentials from {}...", path.display());
    let credentials = test_utils::load_credentials(&path)?;

    let mut client = AbsClient::new(&credentials.server_url);
    println!("Pinging {}...", client.server_url());
    let ping = client.ping().await?;
    println!("  {} {}", ping.status, ping.body);

    println!("Logging in as {}...", credentials.username);
    client
        .authenticate(&credentials.username, &credentials.password)
        .await?;
    println!("  token received");

    let libraries = client.libraries().await?;
    match &libraries.body {
        Body::Json(value) => println!("Libraries:\n{}", serde_json::to_string_pretty(value)?),
        other => println!("Libraries response was not JSON ({}): {}", libraries.status, other),
    }

    Ok(())
}
