//! Server command implementation

use anyhow::Result;

use greengap_core::AnalysisConfig;
use greengap_server::{ServerConfig, ALLOWED_ORIGINS_ENV};

/// Origins from the command line win over the environment
pub fn server_config(allowed_origins: Vec<String>) -> ServerConfig {
    if allowed_origins.is_empty() {
        ServerConfig::from_env()
    } else {
        ServerConfig { allowed_origins }
    }
}

pub async fn cmd_serve(
    config: AnalysisConfig,
    host: &str,
    port: u16,
    allowed_origins: Vec<String>,
) -> Result<()> {
    let from_cli = !allowed_origins.is_empty();
    let server = server_config(allowed_origins);

    println!("🚀 Starting GreenGap web server...");
    println!("   Listening: http://{}:{}", host, port);
    println!("   Advisor: {}", config.advisor.as_str());
    match &config.reduction_factor {
        Some(f) => println!("   Scenario reduction: {:.0}%", f * 100.0),
        None => println!("   Scenario reduction: disabled"),
    }
    if server.allowed_origins.is_empty() {
        println!("   🔒 CORS: no cross-origin access");
    } else {
        println!(
            "   🌐 CORS origins: {} ({})",
            server.allowed_origins.join(", "),
            if from_cli {
                "--allowed-origin"
            } else {
                ALLOWED_ORIGINS_ENV
            }
        );
    }
    println!();

    greengap_server::serve(host, port, config, server).await
}
