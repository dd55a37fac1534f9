use serde::{Deserialize, Serialize};

use shopdash_core::{Document, DocumentId, DomainError, DomainResult};

/// Resolved image asset reference (`asset->{_id, url}`).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ImageAsset {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProductImage {
    #[serde(default)]
    pub asset: ImageAsset,
}

/// A stored catalog product.
///
/// Only `_id`, `title`, `price` and the image are projected by the listing
/// query; the rest is kept so full documents decode too.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: DocumentId,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub product_image: Option<ProductImage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(rename = "dicountPercentage", default, skip_serializing_if = "Option::is_none")]
    pub discount_percentage: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_new: Option<bool>,
}

impl Document for Product {
    const DOC_TYPE: &'static str = "product";

    type Draft = ProductDraft;

    fn list_query() -> String {
        format!(
            "*[_type == \"{}\"]{{ _id, title, price, productImage{{ asset->{{_id,url}} }} }}",
            Self::DOC_TYPE
        )
    }
}

/// A product about to be created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDraft {
    pub title: String,
    pub price: f64,
    #[serde(default)]
    pub product_image: ProductImage,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(rename = "dicountPercentage", default, skip_serializing_if = "Option::is_none")]
    pub discount_percentage: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_new: Option<bool>,
}

impl ProductDraft {
    pub fn new(title: impl Into<String>, price: f64) -> Self {
        Self {
            title: title.into(),
            price,
            product_image: ProductImage::default(),
            description: None,
            tags: Vec::new(),
            discount_percentage: None,
            is_new: None,
        }
    }

    pub fn validate(&self) -> DomainResult<()> {
        if self.title.trim().is_empty() {
            return Err(DomainError::validation("title is required"));
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(DomainError::validation(
                "price must be a non-negative number",
            ));
        }
        if let Some(d) = self.discount_percentage {
            if !(0.0..=100.0).contains(&d) {
                return Err(DomainError::validation(
                    "discount percentage must be between 0 and 100",
                ));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogStats {
    pub total_products: usize,
    pub total_value: f64,
}

/// Count and price sum over the catalog. A product without a price adds 0.
pub fn catalog_stats(products: &[Product]) -> CatalogStats {
    CatalogStats {
        total_products: products.len(),
        total_value: products.iter().map(|p| p.price.unwrap_or(0.0)).sum(),
    }
}
