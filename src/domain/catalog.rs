use serde::{Deserialize, Serialize};

use super::EquipmentKey;

/// One lab device
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquipmentItem {
    /// Inventory code shown on the card (e.g. `RAIZ-001`)
    pub id: String,
    pub key: EquipmentKey,
    pub name: String,
    pub icon: String,
    pub location: String,
}

/// Fixed equipment catalog, loaded once at process start
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    items: Vec<EquipmentItem>,
}

impl Catalog {
    /// Builds a catalog, rejecting duplicate keys.
    pub fn new(items: Vec<EquipmentItem>) -> Result<Self, DuplicateKey> {
        for (i, item) in items.iter().enumerate() {
            if items[..i].iter().any(|other| other.key == item.key) {
                return Err(DuplicateKey(item.key.clone()));
            }
        }
        Ok(Self { items })
    }

    /// The lab's built-in inventory.
    pub fn lab_default() -> Result<Self, DuplicateKey> {
        let item = |id: &str, key: &str, name: &str, icon: &str, location: &str| EquipmentItem {
            id: id.to_string(),
            key: EquipmentKey::new(key),
            name: name.to_string(),
            icon: icon.to_string(),
            location: location.to_string(),
        };

        Self::new(vec![
            item("RAIZ-001", "jetson-nano-board", "Jetson Nano Board", "🤖", "Parts cabinet"),
            item("RAIZ-002", "jetracer-ros-ai-kit", "JetRacer ROS AI Kit", "🚗", "Desk"),
            item("RAIZ-003", "jetson-orin", "Jetson Orin", "🤖", "Parts cabinet"),
            item("RAIZ-004", "3d-printer", "3D Printer", "🧱", "Parts cabinet"),
            item("RAIZ-005", "raspberry-board", "Raspberry Pi Board", "🍓", "Parts cabinet"),
            item("RAIZ-006", "raspberry-board-2", "Raspberry Pi Board", "🍓", "Parts cabinet"),
        ])
    }

    pub fn items(&self) -> &[EquipmentItem] {
        &self.items
    }

    pub fn find(&self, key: &EquipmentKey) -> Option<&EquipmentItem> {
        self.items.iter().find(|item| &item.key == key)
    }

    pub fn contains(&self, key: &EquipmentKey) -> bool {
        self.find(key).is_some()
    }
}

/// Two catalog items share a key
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Duplicate equipment key: {0}")]
pub struct DuplicateKey(pub EquipmentKey);
