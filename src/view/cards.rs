use std::collections::BTreeMap;

use crate::domain::{Catalog, EquipmentItem, EquipmentKey, StatusRecord, checkout::ItemState};

use super::TimestampFormat;

/// Availability shown on a card's status pill
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Availability {
    Available,
    Borrowed,
}

impl Availability {
    pub fn icon(&self) -> &'static str {
        match self {
            Availability::Available => "✅",
            Availability::Borrowed => "⏳",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Availability::Available => "Available",
            Availability::Borrowed => "In use",
        }
    }
}

/// View model of one equipment card
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView {
    pub item: EquipmentItem,
    pub availability: Availability,
    /// Last-activity line
    pub activity: String,
    /// Current or last holder line
    pub holder: String,
}

/// Render one card from the item's status record
pub fn render_card(
    item: &EquipmentItem,
    status: Option<&StatusRecord>,
    format: &TimestampFormat,
) -> CardView {
    let Some(record) = status else {
        return CardView {
            item: item.clone(),
            availability: Availability::Available,
            activity: "No history".to_string(),
            holder: "Not with anyone right now.".to_string(),
        };
    };

    let at = format.format(&record.timestamp);
    let phone = if record.phone.is_empty() {
        String::new()
    } else {
        format!(" (phone: {})", record.phone)
    };

    match ItemState::of(Some(record)) {
        ItemState::Borrowed(_) => CardView {
            item: item.clone(),
            availability: Availability::Borrowed,
            activity: format!("Borrowed at: {}", at),
            holder: format!("With: {}{}", record.full_name, phone),
        },
        ItemState::Available => CardView {
            item: item.clone(),
            availability: Availability::Available,
            activity: format!("Last returned at: {}", at),
            holder: format!("Last used by: {}{}", record.full_name, phone),
        },
    }
}

/// Render every catalog item, in catalog order
pub fn render_cards(
    catalog: &Catalog,
    statuses: &BTreeMap<EquipmentKey, StatusRecord>,
    format: &TimestampFormat,
) -> Vec<CardView> {
    catalog
        .items()
        .iter()
        .map(|item| render_card(item, statuses.get(&item.key), format))
        .collect()
}
