//! Product catalog mapping COBI set numbers to product pages
//!
//! The catalog is an explicit immutable value rather than global state, so
//! tests and alternate runs can inject their own product tables.

use serde::{Deserialize, Serialize};

/// One set-number to product-page mapping
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductSource {
    #[serde(rename = "setNumber")]
    pub set_number: String,
    #[serde(rename = "productUrl")]
    pub product_url: String,
}

impl ProductSource {
    pub fn new(set_number: impl Into<String>, product_url: impl Into<String>) -> Self {
        Self {
            set_number: set_number.into(),
            product_url: product_url.into(),
        }
    }
}

/// Ordered, immutable collection of product sources.
///
/// Entries are processed in insertion order, one at a time.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductCatalog {
    entries: Vec<ProductSource>,
}

/// Curated set-number -> product-URL table
const BUILTIN_TABLE: &[(&str, &str)] = &[
    ("4833", "https://cobibricks.com/product/uss-enterprise-cv-6,3322"),
    ("4836", "https://cobibricks.com/product/battleship-bismarck,13624"), // Actually 4841
    ("4837", "https://cobibricks.com/product/battleship-missouri-bb-63,9694"),
    ("2559", "https://cobibricks.com/product/panzerkampfwagen-vi-tiger-ausf-e,3315"),
    ("2587", "https://cobibricks.com/product/panzerkampfwagen-vi-tiger-i-ausf-e,14040"),
    ("2572", "https://cobibricks.com/product/t-3485,3313"),
    ("5749", "https://cobibricks.com/product/b-17g-flying-fortress,14022"),
    ("5741", "https://cobibricks.com/product/messerschmitt-bf-109-f-2,3318"),
    ("5728", "https://cobibricks.com/product/supermarine-spitfire-mk-ix,3319"),
    ("2295", "https://cobibricks.com/product/willys-mb-trailer,3324"),
];

impl ProductCatalog {
    /// Create a catalog from explicit entries, preserving their order.
    pub fn new(entries: Vec<ProductSource>) -> Self {
        Self { entries }
    }

    /// The curated COBI product table.
    pub fn builtin() -> Self {
        Self::new(
            BUILTIN_TABLE
                .iter()
                .map(|(set_number, product_url)| ProductSource::new(*set_number, *product_url))
                .collect(),
        )
    }

    pub fn entries(&self) -> &[ProductSource] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &ProductSource> {
        self.entries.iter()
    }

    /// Set numbers in catalog order.
    pub fn set_numbers(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|source| source.set_number.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_has_all_curated_sets() {
        let catalog = ProductCatalog::builtin();
        assert_eq!(catalog.len(), 10);

        let set_numbers: Vec<&str> = catalog.set_numbers().collect();
        assert_eq!(
            set_numbers,
            vec!["4833", "4836", "4837", "2559", "2587", "2572", "5749", "5741", "5728", "2295"]
        );
    }

    #[test]
    fn builtin_catalog_keeps_known_mismatched_mapping() {
        // 4836 intentionally points at the Bismarck page; the table is
        // carried as given, not corrected
        let catalog = ProductCatalog::builtin();
        let source = catalog
            .iter()
            .find(|source| source.set_number == "4836")
            .unwrap();
        assert_eq!(
            source.product_url,
            "https://cobibricks.com/product/battleship-bismarck,13624"
        );
    }

    #[test]
    fn custom_catalog_preserves_insertion_order() {
        let catalog = ProductCatalog::new(vec![
            ProductSource::new("9001", "https://example.com/a"),
            ProductSource::new("1000", "https://example.com/b"),
            ProductSource::new("5555", "https://example.com/c"),
        ]);

        let set_numbers: Vec<&str> = catalog.set_numbers().collect();
        assert_eq!(set_numbers, vec!["9001", "1000", "5555"]);
    }

    #[test]
    fn empty_catalog() {
        let catalog = ProductCatalog::default();
        assert!(catalog.is_empty());
        assert_eq!(catalog.iter().count(), 0);
    }
}
