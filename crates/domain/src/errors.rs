use std::fmt;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid IP address: {0}")]
    InvalidIpAddress(String),

    #[error("Invalid MAC address: {0}")]
    InvalidMacAddress(String),
}

/// Every validation problem found in one request, in field order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationErrors(Vec<ValidationError>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, error: ValidationError) {
        self.0.push(error);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ValidationError> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[ValidationError] {
        &self.0
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}", error)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

impl From<ValidationError> for ValidationErrors {
    fn from(error: ValidationError) -> Self {
        Self(vec![error])
    }
}

impl IntoIterator for ValidationErrors {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RouteError {
    #[error("Invalid route target: {0}")]
    InvalidTarget(String),

    #[error("No route to {target}: {reason}")]
    Connect { target: String, reason: String },

    #[error("Route probe to {target} timed out after {timeout_ms}ms")]
    Timeout { target: String, timeout_ms: u64 },

    #[error("Failed to enumerate local interfaces: {0}")]
    InterfaceEnumeration(String),

    #[error("Interface not found for local address: {0}")]
    NoMatchingInterface(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CaptureError {
    #[error("Failed to open capture on {interface}: {reason}")]
    Open { interface: String, reason: String },

    #[error("Failed to install filter '{expression}': {reason}")]
    Filter { expression: String, reason: String },

    #[error("Capture source failed: {0}")]
    Source(String),

    /// The capture device went down or was removed while streaming.
    #[error("Capture interface gone: {0}")]
    InterfaceGone(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FrameDecodeError {
    #[error("{layer} header truncated ({len} bytes)")]
    Truncated { layer: &'static str, len: usize },

    #[error("Unsupported ARP hardware/protocol type {hardware:#06x}/{protocol:#06x}")]
    UnsupportedLinkLayer { hardware: u16, protocol: u16 },

    #[error("Unsupported ARP address lengths hw={hardware} proto={protocol}")]
    UnsupportedAddressLength { hardware: u8, protocol: u8 },
}
