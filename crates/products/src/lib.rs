//! Catalog products (`_type == "product"`).

pub mod product;

pub use product::{CatalogStats, ImageAsset, Product, ProductDraft, ProductImage, catalog_stats};
