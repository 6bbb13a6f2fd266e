//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `verdant_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

use verdant_core::db::open_db_in_memory;
use verdant_core::{ContactRepository, CoreConfig, SqliteContactRepository};

fn main() {
    // Tiny probe: bootstrap an in-memory inbox and read its (empty)
    // dashboard counts, independently from any hosting web runtime.
    let config = CoreConfig::from_env();
    println!("verdant_core version={}", verdant_core::core_version());
    println!("verdant_core auth_domain={}", config.auth_domain);

    if let Some(log_dir) = config.log_dir.as_deref().and_then(|dir| dir.to_str()) {
        if let Err(err) = verdant_core::init_logging(&config.log_level, log_dir) {
            eprintln!("verdant_core logging init failed: {err}");
        }
    }

    let conn = match open_db_in_memory() {
        Ok(conn) => conn,
        Err(err) => {
            eprintln!("verdant_core db bootstrap failed: {err}");
            std::process::exit(1);
        }
    };

    match SqliteContactRepository::try_new(&conn).and_then(|repo| repo.counts()) {
        Ok(counts) => println!(
            "verdant_core inbox total={} new={} last_seven_days={}",
            counts.total, counts.new, counts.last_seven_days
        ),
        Err(err) => {
            eprintln!("verdant_core inbox probe failed: {err}");
            std::process::exit(1);
        }
    }
}
