//! Operating-system disk enumeration.

use model::OsDisk;
use sysinfo::{DiskKind, Disks};
use tracing::debug;

/// Enumerates OS disks into collaborator records.
///
/// Mounted volumes of the same physical device are collapsed by model
/// name, keeping the first (largest mounts share the device size anyway).
/// The result may legitimately be empty; the core treats that as "no OS
/// enumeration available".
pub fn enumerate_disks() -> Vec<OsDisk> {
    let disks = Disks::new_with_refreshed_list();
    let mut seen: Vec<String> = Vec::new();
    let mut records: Vec<OsDisk> = Vec::new();

    for disk in disks.iter() {
        let model = disk.name().to_string_lossy().trim().to_string();
        if model.is_empty() || seen.contains(&model) {
            continue;
        }
        seen.push(model.clone());
        records.push(OsDisk {
            model,
            media_type: kind_label(disk.kind()).to_string(),
            size_bytes: disk.total_space(),
        });
    }

    debug!(count = records.len(), "enumerated OS disks");
    records
}

fn kind_label(kind: DiskKind) -> &'static str {
    match kind {
        DiskKind::SSD => "SSD",
        DiskKind::HDD => "HDD",
        DiskKind::Unknown(_) => "Unknown",
    }
}
