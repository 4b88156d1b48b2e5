//! Downstream function address.

use std::fmt;

/// Where card requests are sent: a function name or ARN, and its region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Destination {
    /// Function name, ARN, or alias ARN.
    address: String,
    /// Region the function runs in.
    region: String,
}

impl Destination {
    /// Creates a destination.
    pub fn new(address: impl Into<String>, region: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            region: region.into(),
        }
    }

    /// Returns the function address.
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Returns the function region.
    pub fn region(&self) -> &str {
        &self.region
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.address, self.region)
    }
}
