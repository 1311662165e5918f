use anyhow::Result;
use bbbx::{BbbClient, BbbConfig};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    // Example usage - replace with your server URL and shared secret
    let config = BbbConfig::new(
        "https://bbb.example.com/bigbluebutton".to_string(),
        "your_shared_secret".to_string(),
    );

    let client = BbbClient::new(&config)?;

    println!("Fetching API version...");
    match client.get_api_version().await {
        Ok(version) => {
            println!("Server version: {}", version);
        }
        Err(e) => {
            println!("Error fetching version: {}", e);
        }
    }

    println!("Fetching meetings...");
    match client.get_meetings().await {
        Ok(meetings) => {
            println!("Meetings: {}", meetings);
        }
        Err(e) => {
            println!("Error fetching meetings: {}", e);
        }
    }

    Ok(())
}
