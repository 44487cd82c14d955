// ABOUTME: OAuth authorization command for the paceline CLI
// ABOUTME: Prints the consent URL or exchanges an authorization code for tokens
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use paceline::config::AppConfig;
use paceline::errors::Result;
use paceline::oauth2_client::TokenManager;
use tracing::info;

/// Run the auth command.
///
/// Without a code this prints the consent URL and instructions; with one it
/// performs the code exchange and persists the resulting credential.
pub async fn run(config: &AppConfig, code: Option<&str>, redirect_uri: &str) -> Result<()> {
    let manager = TokenManager::new(config);

    match code {
        None => {
            let url = manager.authorization_url(redirect_uri)?;
            println!("Visit this URL to authorize:");
            println!("{url}");
            println!();
            println!("After authorizing, copy the \"code\" parameter from the redirect URL and run:");
            println!("  paceline auth YOUR_CODE_HERE");
        }
        Some(code) => {
            info!("Exchanging authorization code for tokens");
            manager.exchange_code(code).await?;
            println!("Credential saved. You can now run: paceline sync");
        }
    }
    Ok(())
}
