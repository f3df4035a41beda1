/// Main entry point for the Health Dashboard MCP server
///
/// This file sets up logging, parses command line arguments, and starts the
/// MCP server. The server listens for JSON-RPC requests over stdin/stdout
/// following the MCP protocol.

use clap::Parser;
use std::path::PathBuf;
use tracing::info;

use health_dashboard_mcp::HealthDashboardServer;

/// Get the default data file path with robust fallback strategy
fn get_default_data_path() -> Result<PathBuf, Box<dyn std::error::Error>> {
    // Try various locations in order of preference
    let potential_paths = [
        // 1. User's home directory (preferred)
        dirs::home_dir().map(|mut p| {
            p.push(".health_dashboard");
            p
        }),
        // 2. User's data directory (platform-specific)
        dirs::data_dir().map(|mut p| {
            p.push("health_dashboard");
            p
        }),
        // 3. User's config directory
        dirs::config_dir().map(|mut p| {
            p.push("health_dashboard");
            p
        }),
        // 4. Current working directory (last resort)
        std::env::current_dir().ok().map(|mut p| {
            p.push(".health_dashboard");
            p
        }),
    ];

    for potential_path in potential_paths.iter().flatten() {
        if let Ok(()) = std::fs::create_dir_all(potential_path) {
            // Test if we can write to this directory
            let test_file = potential_path.join(".test_write");
            if std::fs::write(&test_file, "test").is_ok() {
                let _ = std::fs::remove_file(&test_file);
                let mut data_path = potential_path.clone();
                data_path.push("health_data.json");
                return Ok(data_path);
            }
        }
    }

    // Ultimate fallback: use a temporary directory
    let mut temp_path = std::env::temp_dir();
    temp_path.push("health_dashboard");
    std::fs::create_dir_all(&temp_path)?;
    temp_path.push("health_data.json");

    tracing::warn!("Using temporary directory for data file: {}", temp_path.display());
    Ok(temp_path)
}

/// Command line arguments for the Health Dashboard MCP server
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the JSON data file
    /// If not provided, uses a default location in the user's home directory
    #[arg(long)]
    data: Option<PathBuf>,

    /// Serve the built-in demo dataset without touching any data file
    #[arg(long)]
    demo: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Enable verbose output (implies debug)
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Set up logging based on command line flags
    let log_level = if args.verbose {
        "debug"
    } else if args.debug {
        "info"
    } else {
        "warn"
    };

    tracing_subscriber::fmt()
        .with_env_filter(format!("health_dashboard_mcp={}", log_level))
        .with_writer(std::io::stderr) // Send logs to stderr, not stdout
        .init();

    info!("Starting Health Dashboard MCP server");

    let server = if args.demo {
        info!("Running with in-memory demo data");
        HealthDashboardServer::demo()
    } else {
        // Determine data file path
        let data_path = match args.data {
            Some(path) => {
                if let Some(parent) = path.parent() {
                    if !parent.exists() {
                        std::fs::create_dir_all(parent)?;
                    }
                }
                path
            }
            None => get_default_data_path()?,
        };

        info!("Using data file at: {}", data_path.display());
        HealthDashboardServer::new(data_path).await?
    };

    // Run the MCP server - this will handle JSON-RPC communication over stdin/stdout
    server.run().await?;

    info!("Health Dashboard MCP server shutdown complete");
    Ok(())
}
