use serde::{Deserialize, Serialize};

/// A NetBox device after mapping, as seen by the rule evaluator.
///
/// Nested attributes that NetBox may leave unset stay `None` here; they are
/// read as the empty string only through [`Device::field_value`] and
/// [`Device::primary_ip_str`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    pub name: String,
    pub tags: Vec<String>,
    /// Address as reported by NetBox, usually with a prefix length (`10.0.0.1/24`).
    pub primary_ip: Option<String>,
    pub role: Option<String>,
    pub site: Option<String>,
    pub rack: Option<String>,
    /// Interface names in the order the API returned them.
    pub interfaces: Vec<String>,
}

impl Device {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn primary_ip_str(&self) -> &str {
        self.primary_ip.as_deref().unwrap_or("")
    }

    /// Look up a device attribute by rule field name.
    ///
    /// Unset attributes and unsupported names both read as `""`.
    pub fn field_value(&self, field: &str) -> &str {
        let value = match DeviceField::parse(field) {
            Some(DeviceField::Role) => &self.role,
            Some(DeviceField::Site) => &self.site,
            Some(DeviceField::Rack) => &self.rack,
            Some(DeviceField::PrimaryIp) => &self.primary_ip,
            None => return "",
        };
        value.as_deref().unwrap_or("")
    }
}

/// Device attributes addressable from `allowed_values` and `required_fields` rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeviceField {
    Role,
    Site,
    Rack,
    PrimaryIp,
}

impl DeviceField {
    /// Every field name accepted by [`DeviceField::parse`].
    pub const NAMES: &'static [&'static str] = &["role", "site", "rack", "primary_ip4", "primary_ip"];

    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "role" => Some(DeviceField::Role),
            "site" => Some(DeviceField::Site),
            "rack" => Some(DeviceField::Rack),
            "primary_ip4" | "primary_ip" => Some(DeviceField::PrimaryIp),
            _ => None,
        }
    }
}

impl std::fmt::Display for DeviceField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeviceField::Role => write!(f, "role"),
            DeviceField::Site => write!(f, "site"),
            DeviceField::Rack => write!(f, "rack"),
            DeviceField::PrimaryIp => write!(f, "primary_ip4"),
        }
    }
}
