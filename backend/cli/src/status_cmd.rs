//! `krishimitra status`: query a running server's health endpoint.

use std::time::Duration;

use anyhow::Result;

use crate::terminal_output::{note_success, note_warn};

pub async fn run(port: u16) -> Result<()> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(5))
        .build()?;

    match client
        .get(format!("http://localhost:{port}/api/health"))
        .send()
        .await
    {
        Ok(resp) => {
            let body: serde_json::Value = resp.json().await?;
            note_success(&format!("KrishiMitra is running on port {port}"));
            println!("{}", serde_json::to_string_pretty(&body)?);
        }
        Err(_) => note_warn(&format!("KrishiMitra is not running on port {port}")),
    }
    Ok(())
}
