//! `shopdash-orders` — order documents and the derived product report.

pub mod aggregator;
pub mod order;

pub use aggregator::{OrderReport, ProductRow, SummaryStats, flatten_orders, summarize};
pub use order::{
    Dimensions, LineItem, OrderDocument, OrderDraft, Package, ShipmentDetails, ShippingAddress,
    Weight,
};
