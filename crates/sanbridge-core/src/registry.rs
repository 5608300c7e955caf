//! Shared attach state for the bridge

use crate::device::ObjectHandle;
use crate::status::{Endpoint, EndpointSet};

/// State shared between the two sub-devices of the platform.
///
/// Created lazily by whichever device attaches first and reused by the
/// second, so both attaches observe the same flags and handles.
#[derive(Debug, Default)]
pub struct SanRegistry {
    /// Namespace object of the notify device, once attached.
    pub notify_handle: Option<ObjectHandle>,
    /// Namespace object of the controller device, once attached.
    pub controller_handle: Option<ObjectHandle>,
    /// Resolved request object, if the namespace provides one.
    pub rqst_handle: Option<ObjectHandle>,
    /// Resolved extended request object, if the namespace provides one.
    pub rqsx_handle: Option<ObjectHandle>,
    /// First battery reported present during bring-up.
    pub bat1_attached: bool,
    /// Second battery reported present during bring-up.
    pub bat2_attached: bool,
    /// Power adapter registered during bring-up.
    pub psu_registered: bool,
}

impl SanRegistry {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Everything the bridge keeps alive between attach and removal.
///
/// Owned by the embedding application and handed to each operation that
/// needs it; nothing here is process-global.
#[derive(Debug, Default)]
pub struct SanContext {
    registry: Option<SanRegistry>,
    endpoints: EndpointSet,
}

impl SanContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// The shared registry, if any device has attached yet.
    pub fn registry(&self) -> Option<&SanRegistry> {
        self.registry.as_ref()
    }

    /// The shared registry, created on first use.
    pub fn registry_mut(&mut self) -> &mut SanRegistry {
        self.registry.get_or_insert_with(SanRegistry::new)
    }

    pub fn endpoints(&self) -> &EndpointSet {
        &self.endpoints
    }

    pub fn endpoints_mut(&mut self) -> &mut EndpointSet {
        &mut self.endpoints
    }

    /// Render the body of a status endpoint, or `None` when the endpoint
    /// is not currently published.
    pub fn render_endpoint(&self, endpoint: Endpoint) -> Option<String> {
        if !self.endpoints.is_published(endpoint) {
            return None;
        }
        Some(endpoint.render(self.registry.as_ref()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_created_once() {
        let mut ctx = SanContext::new();
        assert!(ctx.registry().is_none());

        ctx.registry_mut().bat1_attached = true;
        ctx.registry_mut().psu_registered = true;

        let registry = ctx.registry().unwrap();
        assert!(registry.bat1_attached);
        assert!(!registry.bat2_attached);
        assert!(registry.psu_registered);
    }

    #[test]
    fn test_render_requires_publication() {
        let mut ctx = SanContext::new();
        ctx.registry_mut().bat1_attached = true;
        assert_eq!(ctx.render_endpoint(Endpoint::Bat1), None);

        ctx.endpoints_mut().publish_all();
        assert_eq!(
            ctx.render_endpoint(Endpoint::Bat1),
            Some("attached: 1\n".to_string())
        );
    }
}
