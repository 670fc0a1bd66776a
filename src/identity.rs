use crate::types::{ChannelContext, DeviceId};

/// Maps the identifier a device reports to the id it is known by.
pub trait IdentityResolver {
    /// Returns `None` for devices that are not registered.
    fn resolve(&self, identifier: &str, context: &ChannelContext) -> Option<DeviceId>;
}

impl<T: IdentityResolver + ?Sized> IdentityResolver for std::sync::Arc<T> {
    fn resolve(&self, identifier: &str, context: &ChannelContext) -> Option<DeviceId> {
        (**self).resolve(identifier, context)
    }
}

/// Immutable identifier -> device table, loaded once from configuration.
#[derive(Debug, Default, Clone)]
pub struct DeviceRegistry {
    devices: std::collections::HashMap<String, DeviceId>,
}

impl DeviceRegistry {
    #[must_use]
    pub fn new(devices: std::collections::HashMap<String, DeviceId>) -> Self {
        DeviceRegistry { devices }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.devices.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }
}

impl IdentityResolver for DeviceRegistry {
    fn resolve(&self, identifier: &str, context: &ChannelContext) -> Option<DeviceId> {
        let device_id = self.devices.get(identifier).copied();
        if device_id.is_none() {
            log::warn!("Unknown device - {identifier} from {context}");
        }
        device_id
    }
}

impl FromIterator<(String, DeviceId)> for DeviceRegistry {
    fn from_iter<I: IntoIterator<Item = (String, DeviceId)>>(iter: I) -> Self {
        DeviceRegistry::new(iter.into_iter().collect())
    }
}
