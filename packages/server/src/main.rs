#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Process entry point for the job board API server.
//!
//! Supervisory boundary: a fatal startup or server failure is logged and
//! the process exits nonzero. Request-path failures are handled inside
//! the server and never reach this point.

#[actix_web::main]
async fn main() {
    if let Err(e) = job_board_server::run_server().await {
        log::error!("Error: {e}");
        log::error!("Shutting down the server");
        std::process::exit(1);
    }
}
