//! File logging example
//!
//! Demonstrates payloads, exceptions and a configured logger instance.
//!
//! Run with: cargo run --example file_logging

use serde::Serialize;
use serde_json::json;
use unified_logger::prelude::*;

#[derive(Serialize, Debug)]
struct Deployment {
    service: &'static str,
    version: &'static str,
    replicas: u32,
}

fn main() -> Result<()> {
    println!("=== Unified Logger - File Logging Example ===\n");

    let log_path = std::env::temp_dir().join("unified_logger_file.log");
    let logger = Logger::builder(&log_path)
        .truncate(true)
        .console_level(LogLevel::Debug)
        .payload_style(PayloadStyle::Pretty)
        .get_or_init()?;

    logger.info_with_data("request served", json!({"method": "GET", "status": 200}));
    logger.success_with_data(
        "deployment finished",
        Payload::from_serialize(&Deployment {
            service: "billing",
            version: "2.3.1",
            replicas: 3,
        }),
    );

    match "ten".parse::<u32>() {
        Ok(n) => logger.info(format!("parsed {}", n)),
        Err(err) => logger.exception(Some("invalid replica count"), &err),
    }

    let caught = std::panic::catch_unwind(|| {
        let shards: Vec<u32> = Vec::new();
        shards[2]
    });
    if let Err(payload) = caught {
        let info = ExceptionInfo::from_panic(payload.as_ref());
        logger.exception_info(Some("shard lookup crashed"), Some(info));
    }

    logger.exception_info(None, None);

    logger.flush()?;
    println!("\nLog file contents ({}):\n", log_path.display());
    print!("{}", std::fs::read_to_string(&log_path)?);

    Ok(())
}
