//! # Grocer Storefront Entry Point
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Grocer Storefront                                │
//! │                                                                         │
//! │  stdin ──► shell.rs ──► commands/ ──► state/ ──► grocer-core            │
//! │                              │                                          │
//! │                              └──► place_order ──► grocer-checkout ──►   │
//! │                                                   order endpoint (HTTP) │
//! │  stdout ◄── plain-text results          stderr ◄── tracing logs        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The actual setup is in lib.rs for testability.

fn main() {
    if let Err(err) = grocer_storefront_lib::run() {
        eprintln!("error: {}", err);
        std::process::exit(1);
    }
}
