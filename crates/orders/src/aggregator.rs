//! Flat product report derived from order line items.
//!
//! The report is disposable: it is rebuilt from the full order list after every
//! fetch, create or delete and never written back to the store.

use serde::Serialize;

use shopdash_core::DocumentId;

use crate::order::{LineItem, OrderDocument};

/// One line item, tagged with the id of the order that holds it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRow {
    pub id: DocumentId,
    pub product_name: Option<String>,
    pub price: Option<f64>,
    pub quantity: Option<i64>,
}

impl ProductRow {
    fn from_item(order_id: &DocumentId, item: &LineItem) -> Self {
        Self {
            id: order_id.clone(),
            product_name: item.product_name.clone(),
            price: item.price,
            quantity: item.quantity,
        }
    }

    /// `price × quantity`, with a missing number counted as zero.
    pub fn value(&self) -> f64 {
        self.price.unwrap_or(0.0) * self.quantity.unwrap_or(0) as f64
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryStats {
    pub total_products: usize,
    pub total_stock: i64,
    pub total_value: f64,
}

/// Flatten orders into product rows.
///
/// Orders without `orderItems` contribute nothing. Output order follows the
/// input: orders in sequence, then items in declaration order.
pub fn flatten_orders(orders: &[OrderDocument]) -> Vec<ProductRow> {
    orders
        .iter()
        .filter_map(|order| order.order_items.as_deref().map(|items| (&order.id, items)))
        .flat_map(|(order_id, items)| {
            items
                .iter()
                .map(move |item| ProductRow::from_item(order_id, item))
        })
        .collect()
}

/// Single pass over the rows: count, stock sum, value sum.
///
/// Stock is summed wide and clamped to the `i64` range, so store quantities
/// near the limits cannot overflow the total.
pub fn summarize(rows: &[ProductRow]) -> SummaryStats {
    let (total_products, stock, total_value) = rows.iter().fold(
        (0usize, 0i128, 0.0f64),
        |(count, stock, value), row| {
            (
                count + 1,
                stock + i128::from(row.quantity.unwrap_or(0)),
                value + row.value(),
            )
        },
    );

    SummaryStats {
        total_products,
        total_stock: clamp_stock(stock),
        total_value,
    }
}

fn clamp_stock(stock: i128) -> i64 {
    i64::try_from(stock).unwrap_or(if stock > 0 { i64::MAX } else { i64::MIN })
}

/// Rows plus their summary, recomputed together.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct OrderReport {
    pub items: Vec<ProductRow>,
    pub stats: SummaryStats,
}

impl OrderReport {
    pub fn build(orders: &[OrderDocument]) -> Self {
        let items = flatten_orders(orders);
        let stats = summarize(&items);
        Self { items, stats }
    }
}
