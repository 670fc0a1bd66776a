pub const KEY_ARCHIVE: &str = "archive";
pub const KEY_RFID: &str = "rfid";

#[derive(Debug, PartialEq, Clone, Copy, Eq, Hash, PartialOrd, Ord, serde::Deserialize)]
#[serde(transparent)]
pub struct DeviceId(u64);

impl DeviceId {
    #[must_use]
    pub fn new(value: u64) -> Self {
        DeviceId(value)
    }

    #[must_use]
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for DeviceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Where a sentence came from. Handed to identity resolution alongside the
/// device identifier.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct ChannelContext {
    pub remote_address: Option<std::net::SocketAddr>,
    pub source: String,
}

impl ChannelContext {
    #[must_use]
    pub fn new(source: impl Into<String>, remote_address: Option<std::net::SocketAddr>) -> Self {
        ChannelContext {
            remote_address,
            source: source.into(),
        }
    }
}

impl std::fmt::Display for ChannelContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.remote_address {
            Some(address) => write!(f, "{} ({address})", self.source),
            None => write!(f, "{}", self.source),
        }
    }
}

#[derive(Debug, PartialEq, Clone)]
pub struct InboundSentence {
    pub context: ChannelContext,
    pub sentence: String,
}

#[derive(Debug, PartialEq, Clone)]
pub struct PositionRecord {
    pub protocol: &'static str,
    pub device_id: DeviceId,
    pub device_time: chrono::DateTime<chrono::FixedOffset>,
    pub fix_time: chrono::DateTime<chrono::FixedOffset>,
    pub valid: bool,
    pub latitude: f64,
    pub longitude: f64,
    /// Present, and `true`, only for fixes replayed from the device's buffer.
    pub archive: Option<bool>,
    pub rfid: Option<String>,
}

impl PositionRecord {
    /// Optional attributes as key/value pairs, in a stable order.
    #[must_use]
    pub fn attributes(&self) -> Vec<(&'static str, String)> {
        let mut attributes = Vec::new();
        if let Some(archive) = self.archive {
            attributes.push((KEY_ARCHIVE, archive.to_string()));
        }
        if let Some(rfid) = &self.rfid {
            attributes.push((KEY_RFID, rfid.clone()));
        }
        attributes
    }
}

impl std::fmt::Display for PositionRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} device={} fix={} device_time={} valid={} lat={} lon={}",
            self.protocol,
            self.device_id,
            self.fix_time.to_rfc3339(),
            self.device_time.to_rfc3339(),
            self.valid,
            self.latitude,
            self.longitude,
        )?;
        for (key, value) in self.attributes() {
            write!(f, " {key}={value}")?;
        }
        Ok(())
    }
}
