//! Product lookup parsing: back-order disclaimers in `model[].additionalProperty`.

use serde_json::Value;

use super::{decode, ERROR_CODE_MARKER};
use crate::catalog::AvailabilityRecord;
use crate::json_nav::{find_value, render_text, Nav};

const IN_STOCK_PATTERN: &str = "name:backOrderDisclaimer value:false";
const BACK_ORDER_PATTERN: &str = "name:backOrderDisclaimer value:true";

/// What a single `additionalProperty` entry says about stock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackOrderState {
    /// Disclaimer off: orderable now.
    InStock,
    /// Disclaimer on: back-order only.
    BackOrder,
}

impl BackOrderState {
    pub fn is_available(self) -> bool {
        self == BackOrderState::InStock
    }
}

/// Classify one property entry by its flat textual form.
///
/// Entries are loosely shaped (`{"@type":..,"name":..,"value":..}` with
/// extra keys on some SKUs), so the rule is a substring match rather than a
/// field comparison.
pub fn back_order_state(property: &Value) -> Option<BackOrderState> {
    let text = render_text(property);
    if text.contains(IN_STOCK_PATTERN) {
        Some(BackOrderState::InStock)
    } else if text.contains(BACK_ORDER_PATTERN) {
        Some(BackOrderState::BackOrder)
    } else {
        None
    }
}

/// First disclaimer found in a model item's properties.
fn item_state(item: &Value) -> Option<BackOrderState> {
    Nav::root(item)
        .field("additionalProperty")
        .items()
        .iter()
        .find_map(back_order_state)
}

fn model_items(root: &Value) -> &[Value] {
    Nav::root(root).field("model").items()
}

/// Availability of `sku` from a product lookup body. Defaults to unavailable.
pub(super) fn for_sku(body: &str, sku: &str) -> AvailabilityRecord {
    if body.contains(ERROR_CODE_MARKER) {
        return AvailabilityRecord::new(sku, false);
    }
    let Some(root) = decode(body) else {
        return AvailabilityRecord::new(sku, false);
    };

    let available = model_items(&root)
        .iter()
        .filter(|item| find_value(item, "identifier").and_then(Value::as_str) == Some(sku))
        .find_map(item_state)
        .is_some_and(BackOrderState::is_available);

    AvailabilityRecord::new(sku, available)
}

/// One record per model item that has an identifier and a disclaimer, in
/// response order. `None` on an upstream error.
pub(super) fn for_family(body: &str) -> Option<Vec<AvailabilityRecord>> {
    if body.contains(ERROR_CODE_MARKER) {
        return None;
    }
    let Some(root) = decode(body) else {
        return Some(Vec::new());
    };

    let records = model_items(&root)
        .iter()
        .filter_map(|item| {
            let identifier = find_value(item, "identifier").filter(|v| !v.is_null())?;
            let state = item_state(item)?;
            Some(AvailabilityRecord::new(
                render_text(identifier),
                state.is_available(),
            ))
        })
        .collect();

    Some(records)
}
