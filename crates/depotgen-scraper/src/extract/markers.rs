use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

use depotgen_core::{is_integer_id, DepotRecord};

use super::trimmed_text;

const DEPOT_ID_ATTR: &str = "data-depot-id";
const DEPOT_NAME_ATTR: &str = "data-depot-name";

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("valid depot marker selector")
}

static CANDIDATE_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| selector(".depot-row, .table-depots tr, [data-depot-id]"));
static DEPOT_ID_SELECTOR: LazyLock<Selector> = LazyLock::new(|| selector("[data-depot-id]"));
static FIRST_CELL_SELECTOR: LazyLock<Selector> = LazyLock::new(|| selector("td:first-child"));
static NAME_CLASS_SELECTOR: LazyLock<Selector> = LazyLock::new(|| selector(".depot-name"));
static SECOND_CELL_SELECTOR: LazyLock<Selector> = LazyLock::new(|| selector("td:nth-child(2)"));

/// Reads one candidate value for a field from an element.
type FieldSource = fn(ElementRef<'_>) -> Option<String>;

/// Depot id sources, highest precedence first.
const ID_SOURCES: [FieldSource; 3] = [own_depot_id, descendant_depot_id, first_cell_text];

/// Depot name sources, highest precedence first.
const NAME_SOURCES: [FieldSource; 3] = [name_class_text, second_cell_text, own_depot_name];

/// Marker scan over depot row classes and `data-depot-id` attributes.
///
/// Candidates are visited in document order, each element once, including
/// marked elements nested inside other candidates.
#[must_use]
pub fn fallback_depots(html: &Html) -> Vec<DepotRecord> {
    html.select(&CANDIDATE_SELECTOR)
        .filter_map(candidate_to_depot)
        .collect()
}

fn candidate_to_depot(element: ElementRef<'_>) -> Option<DepotRecord> {
    let id = first_non_empty(element, &ID_SOURCES).filter(|id| is_integer_id(id))?;
    let name = first_non_empty(element, &NAME_SOURCES).unwrap_or_default();
    Some(DepotRecord::new(id, &name))
}

/// First source yielding a non-blank value wins.
fn first_non_empty(element: ElementRef<'_>, sources: &[FieldSource]) -> Option<String> {
    sources.iter().find_map(|source| source(element))
}

fn attr_value(element: ElementRef<'_>, attr: &str) -> Option<String> {
    element
        .value()
        .attr(attr)
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_owned)
}

fn own_depot_id(element: ElementRef<'_>) -> Option<String> {
    attr_value(element, DEPOT_ID_ATTR)
}

/// Only the first marked descendant is consulted.
fn descendant_depot_id(element: ElementRef<'_>) -> Option<String> {
    element
        .select(&DEPOT_ID_SELECTOR)
        .next()
        .and_then(|marked| attr_value(marked, DEPOT_ID_ATTR))
}

fn first_cell_text(element: ElementRef<'_>) -> Option<String> {
    element
        .select(&FIRST_CELL_SELECTOR)
        .next()
        .and_then(trimmed_text)
}

fn name_class_text(element: ElementRef<'_>) -> Option<String> {
    element
        .select(&NAME_CLASS_SELECTOR)
        .next()
        .and_then(trimmed_text)
}

fn second_cell_text(element: ElementRef<'_>) -> Option<String> {
    element
        .select(&SECOND_CELL_SELECTOR)
        .next()
        .and_then(trimmed_text)
}

fn own_depot_name(element: ElementRef<'_>) -> Option<String> {
    attr_value(element, DEPOT_NAME_ATTR)
}
