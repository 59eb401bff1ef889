//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `taskhub_core` linkage and that
//!   a fresh database migrates cleanly.
//! - Keep output deterministic for quick local sanity checks.

fn main() {
    println!("taskhub_core version={}", taskhub_core::core_version());

    match taskhub_core::db::open_db_in_memory() {
        Ok(_conn) => println!("taskhub_core db=ok"),
        Err(err) => {
            eprintln!("taskhub_core db=error {err}");
            std::process::exit(1);
        }
    }
}
