//! fieldrep - visit report export CLI
//!
//! Writes the signed-in representative's visits as XML, text and CSV
//! reports.
//!
//! ## Quick Start
//!
//! ```bash
//! # Export this month's visits
//! fieldrep export
//!
//! # Export March 2025 as CSV only
//! fieldrep export --period 2025-03 --format csv
//!
//! # List what an export would contain
//! fieldrep visits --all
//! ```

mod commands;

fn main() {
    match commands::run() {
        Ok(0) => {}
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("Error: {:#}", err);
            std::process::exit(1);
        }
    }
}
