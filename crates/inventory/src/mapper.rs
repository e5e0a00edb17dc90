//! Wire record → [`Device`] mapping.

use netcheck_core::Device;

use crate::model::{DeviceRecord, NestedRef};

/// Map a NetBox device record plus its fetched interface names into a [`Device`].
///
/// Nested objects that NetBox left `null` stay `None`; the evaluator reads
/// them as empty strings.
pub fn map_device(record: DeviceRecord, interfaces: Vec<String>) -> Device {
    Device {
        name: record.name.unwrap_or_default(),
        tags: record.tags.into_iter().map(|t| t.name).collect(),
        primary_ip: record.primary_ip4.map(|ip| ip.address),
        role: nested_name(record.device_role.or(record.role)),
        site: nested_name(record.site),
        rack: nested_name(record.rack),
        interfaces,
    }
}

fn nested_name(nested: Option<NestedRef>) -> Option<String> {
    nested.map(|n| n.name)
}
