use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

use depotgen_core::{is_integer_id, DepotRecord};

use super::trimmed_text;

/// Any row under any table body; the listing's table id and classes are not
/// assumed stable.
static ROW_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("table tbody tr").expect("valid table row selector"));

const TYPE_MARKER: &str = "depot";

/// Table scan: columns are (id, name, type).
///
/// A row yields a record when its first cell is an integer and its third cell
/// contains "depot" in any case. The third column is what separates depots
/// from DLC rows sharing the same table shape.
#[must_use]
pub fn primary_depots(html: &Html) -> Vec<DepotRecord> {
    html.select(&ROW_SELECTOR).filter_map(row_to_depot).collect()
}

fn row_to_depot(row: ElementRef<'_>) -> Option<DepotRecord> {
    let id = cell_text(row, 1).filter(|id| is_integer_id(id))?;
    let kind = cell_text(row, 3)?;
    if !kind.to_lowercase().contains(TYPE_MARKER) {
        return None;
    }
    let name = cell_text(row, 2).unwrap_or_default();
    Some(DepotRecord::new(id, &name))
}

/// Trimmed text of the row's `position`-th child element (1-based), if that
/// element is a `td`. Mirrors `td:nth-child(n)` on direct children.
fn cell_text(row: ElementRef<'_>, position: usize) -> Option<String> {
    row.children()
        .filter_map(ElementRef::wrap)
        .nth(position.checked_sub(1)?)
        .filter(|cell| cell.value().name() == "td")
        .and_then(trimmed_text)
}
