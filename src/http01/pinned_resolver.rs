//! Address-pinning DNS resolver for reqwest.
//!
//! Implements `reqwest::dns::Resolve` by ignoring the requested name and
//! answering with one fixed socket address. A CA's validation agent dials the
//! address it was handed for the whole attempt, redirects to other hostnames
//! included, so the simulator does the same.

use std::net::SocketAddr;

use reqwest::dns::{Addrs, Name, Resolve, Resolving};

/// A resolver that answers every query with the same address.
///
/// A port of `0` lets the connector use the URL's port (explicit, or the
/// scheme default); any other port overrides it for URLs without an explicit
/// port.
#[derive(Debug, Clone, Copy)]
pub struct PinnedResolver {
    address: SocketAddr,
}

impl PinnedResolver {
    pub fn new(address: SocketAddr) -> Self {
        Self { address }
    }
}

impl Resolve for PinnedResolver {
    fn resolve(&self, name: Name) -> Resolving {
        let address = self.address;
        log::trace!("Dialing {} for {}", address, name.as_str());
        Box::pin(async move {
            let addrs: Addrs = Box::new(std::iter::once(address));
            Ok::<Addrs, Box<dyn std::error::Error + Send + Sync>>(addrs)
        })
    }
}
