//! Basic logger usage example
//!
//! Demonstrates the eight levels, console filtering and caller annotation.
//!
//! Run with: cargo run --example basic_usage
//! Try again with CONSOLE_LOG_LEVEL=warning to hide the lower levels.

use unified_logger::prelude::*;
use unified_logger::{info, success};

fn main() -> Result<()> {
    println!("=== Unified Logger - Basic Usage Example ===\n");

    let log_path = std::env::temp_dir().join("unified_logger_basic.log");
    let logger = get_logger(&log_path, true);

    println!("1. Logging at every level (console threshold: {}):", logger.console_threshold());
    logger.debug("This is a debug message (file only by default)");
    logger.info("This is an info message");
    logger.success("This is a success message");
    logger.message("This is a message-level record");
    logger.warning("This is a warning message");
    logger.failed("This is a failed message");
    logger.error("This is an error message");
    logger.critical("This is a critical message");

    println!("\n2. Formatting macros:");
    let port = 8080;
    info!(logger, "Server listening on port {}", port);
    success!(logger, "Warmed {} cache entries", 512);

    println!("\n3. Same path, same instance:");
    let again = get_logger(&log_path, false);
    println!("   shared: {}", std::sync::Arc::ptr_eq(&logger, &again));

    logger.flush()?;
    println!("\nFull log written to {}", log_path.display());
    println!("\n=== Example completed successfully! ===");

    Ok(())
}
