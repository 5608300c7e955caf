//! Status endpoints exposing attach results to the host

use crate::registry::SanRegistry;
use std::collections::HashSet;

/// Version string reported by the `version` endpoint.
pub const DRIVER_VERSION: &str = "0.1";

/// The fixed set of status endpoints published while the notify device
/// is attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// First battery attachment state.
    Bat1,
    /// Second battery attachment state.
    Bat2,
    /// Power adapter registration state.
    Adp1,
    /// Bridge version.
    Version,
}

impl Endpoint {
    pub const ALL: [Endpoint; 4] = [
        Endpoint::Bat1,
        Endpoint::Bat2,
        Endpoint::Adp1,
        Endpoint::Version,
    ];

    /// Name the endpoint is published under.
    pub fn name(&self) -> &'static str {
        match self {
            Endpoint::Bat1 => "BAT1",
            Endpoint::Bat2 => "BAT2",
            Endpoint::Adp1 => "ADP1",
            Endpoint::Version => "version",
        }
    }

    /// Render the endpoint body from the current registry state.
    pub fn render(&self, registry: &SanRegistry) -> String {
        match self {
            Endpoint::Bat1 => format!("attached: {}\n", registry.bat1_attached as u8),
            Endpoint::Bat2 => format!("attached: {}\n", registry.bat2_attached as u8),
            Endpoint::Adp1 => format!("registered: {}\n", registry.psu_registered as u8),
            Endpoint::Version => format!("driver: {}\n", DRIVER_VERSION),
        }
    }
}

/// Which endpoints are currently published.
///
/// Publication happens at the end of a successful notify attach; removal
/// happens on detach and is safe to repeat.
#[derive(Debug, Default)]
pub struct EndpointSet {
    published: HashSet<Endpoint>,
}

impl EndpointSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish every endpoint.
    pub fn publish_all(&mut self) {
        self.published.extend(Endpoint::ALL);
    }

    /// Remove every endpoint. Removing an endpoint that was never
    /// published, or removing twice, is a no-op.
    pub fn remove_all(&mut self) {
        self.published.clear();
    }

    pub fn is_published(&self, endpoint: Endpoint) -> bool {
        self.published.contains(&endpoint)
    }

    pub fn is_empty(&self) -> bool {
        self.published.is_empty()
    }
}
