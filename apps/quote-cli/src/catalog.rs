//! Product catalog files.
//!
//! Accepts the CMS list response (`{ "data": [...] }`) or a bare array of
//! products. Unknown CMS fields are ignored.

use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use quote_core::{Product, ProductId};

use crate::error::{CliError, CliResult};

#[derive(Deserialize)]
#[serde(untagged)]
enum CatalogFile {
    Envelope { data: Vec<Product> },
    Bare(Vec<Product>),
}

/// Products loaded from one catalog file.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    pub fn from_json(raw: &str) -> CliResult<Self> {
        let file: CatalogFile = serde_json::from_str(raw)
            .map_err(|e| CliError::catalog(format!("Invalid catalog: {}", e)))?;
        let products = match file {
            CatalogFile::Envelope { data } => data,
            CatalogFile::Bare(products) => products,
        };
        Ok(Catalog { products })
    }

    pub fn load(path: &Path) -> CliResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            CliError::catalog(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let catalog = Self::from_json(&raw)?;
        debug!(?path, products = catalog.products.len(), "Catalog loaded");
        Ok(catalog)
    }

    pub fn find(&self, id: ProductId) -> CliResult<&Product> {
        self.products
            .iter()
            .find(|product| product.id == id)
            .ok_or_else(|| CliError::not_found("Product", &id.to_string()))
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    const CMS_RESPONSE: &str = r#"{
        "data": [
            {
                "id": 3,
                "documentId": "abc123",
                "name": "Silla Ergo",
                "price": 149.9,
                "description": null,
                "locale": "es",
                "picture": [{"id": 1, "name": "silla.png", "url": "/uploads/silla.png",
                             "width": 800, "height": 600, "hash": "h", "ext": ".png",
                             "mime": "image/png", "size": 12.5}]
            },
            {"id": 4, "name": "Mesa", "price": 99.5, "picture": null}
        ],
        "meta": {"pagination": {"page": 1, "pageSize": 25, "pageCount": 1, "total": 2}}
    }"#;

    #[test]
    fn test_cms_envelope() {
        let catalog = Catalog::from_json(CMS_RESPONSE).unwrap();

        let chair = catalog.find(3).unwrap();
        assert_eq!(chair.price.cents(), 14990);
        assert_eq!(chair.primary_image(), Some("/uploads/silla.png"));
        assert_eq!(catalog.find(4).unwrap().primary_image(), None);
    }

    #[test]
    fn test_bare_array() {
        let catalog = Catalog::from_json(r#"[{"id": 1, "name": "Lamp", "price": 12}]"#).unwrap();
        assert_eq!(catalog.products().len(), 1);
        assert_eq!(catalog.find(1).unwrap().price.cents(), 1200);
    }

    #[test]
    fn test_unknown_product() {
        let catalog = Catalog::from_json("[]").unwrap();
        assert_eq!(catalog.find(9).unwrap_err().code, ErrorCode::NotFound);
    }

    #[test]
    fn test_garbage_is_a_catalog_error() {
        let err = Catalog::from_json(r#"{"items": []}"#).unwrap_err();
        assert_eq!(err.code, ErrorCode::CatalogError);
    }
}
