//! NetBox REST wire types. Only the keys the checker reads are modelled;
//! everything else in the payload is ignored.

use serde::{Deserialize, Serialize};

/// One page of a NetBox list endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    #[serde(default)]
    pub count: u64,
    /// Absolute URL of the next page, absent on the last page.
    #[serde(default)]
    pub next: Option<String>,
    pub results: Vec<T>,
}

/// A record from `/api/dcim/devices/`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeviceRecord {
    pub id: u64,
    /// NetBox allows unnamed devices.
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub primary_ip4: Option<IpAddressRef>,
    /// Role key used up to NetBox 3.x.
    #[serde(default)]
    pub device_role: Option<NestedRef>,
    /// Role key used from NetBox 3.6 on.
    #[serde(default)]
    pub role: Option<NestedRef>,
    #[serde(default)]
    pub site: Option<NestedRef>,
    #[serde(default)]
    pub rack: Option<NestedRef>,
    #[serde(default)]
    pub tags: Vec<NestedRef>,
}

impl DeviceRecord {
    /// Name for log lines and errors; falls back to `#<id>` for unnamed devices.
    pub fn display_name(&self) -> String {
        match self.name.as_deref() {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => format!("#{}", self.id),
        }
    }
}

/// Nested IP address object (`primary_ip4`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IpAddressRef {
    pub address: String,
}

/// Nested object carrying a `name` (role, site, rack, tag).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NestedRef {
    pub name: String,
}

/// A record from `/api/dcim/interfaces/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterfaceRecord {
    pub name: String,
}
