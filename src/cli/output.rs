//! Plain-text rendering for kiosk commands

use crate::domain::Catalog;
use crate::view::{CardView, LogFilter, LogTableView, filter_options};

/// `--filter` value that names no catalog item
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown filter '{given}'; choose one of: {choices}")]
pub struct UnknownFilter {
    pub given: String,
    pub choices: String,
}

/// Parse a `--filter` value against the catalog's filter options
pub fn parse_filter(raw: &str, catalog: &Catalog) -> Result<LogFilter, UnknownFilter> {
    let options = filter_options(catalog);
    let value = raw.trim();
    let value = if value.is_empty() { "all" } else { value };

    if options.iter().any(|(option, _)| option == value) {
        return Ok(value.parse().unwrap_or_default());
    }

    Err(UnknownFilter {
        given: raw.to_string(),
        choices: options
            .iter()
            .map(|(option, label)| format!("{} ({})", option, label))
            .collect::<Vec<_>>()
            .join(", "),
    })
}

/// One block per card, in catalog order
pub fn format_cards(cards: &[CardView]) -> String {
    cards
        .iter()
        .map(|card| {
            format!(
                "{} {} [{}] {} {}\n    {}\n    {}\n    {}\n",
                card.item.icon,
                card.item.name,
                card.item.key,
                card.availability.icon(),
                card.availability.label(),
                card.item.location,
                card.activity,
                card.holder
            )
        })
        .collect()
}

/// Tab-separated rows, or the placeholder line
pub fn format_log(table: &LogTableView) -> String {
    match table {
        LogTableView::Empty { message } => format!("{}\n", message),
        LogTableView::Rows(rows) => rows
            .iter()
            .map(|row| {
                format!(
                    "{}\t{}\t{}\t{}\t{}\n",
                    row.equipment_name, row.holder_name, row.phone, row.action, row.timestamp
                )
            })
            .collect(),
    }
}
