//! Application initialization and resource setup.
//!
//! This module provides functions to initialize shared resources:
//! - Logger
//! - DNS resolver and name-server pool
//! - Validation HTTP client
//! - TLS crypto provider

mod client;
mod logger;
mod resolver;

use rustls::crypto::{ring::default_provider, CryptoProvider};

// Re-export public API
pub use client::init_validation_client;
pub use logger::init_logger_with;
pub use resolver::{init_name_server_pool, init_resolver};

/// Initializes the crypto provider for TLS operations.
///
/// Configures the global crypto provider for `rustls`. Call it before any TLS
/// connection is established.
pub fn init_crypto_provider() {
    // The return value is ignored because reinstalling the provider is harmless
    let _ = CryptoProvider::install_default(default_provider());
}
