use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::domain::ProductType;

/// Pricing bounds for one credit product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreditProduct {
    pub product_type: ProductType,
    pub min_amount: f64,
    pub max_amount: f64,
    pub max_installments: u32,
    /// Monthly rate as a fraction (0.035 = 3.5% a.m.).
    pub base_interest_rate: f64,
}

/// Static product table the limit search explores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductCatalog {
    products: Vec<CreditProduct>,
}

impl ProductCatalog {
    pub fn new(products: Vec<CreditProduct>) -> Self {
        Self { products }
    }

    /// The table shipped with the engine, covering the four standard products.
    pub fn standard() -> Self {
        Self::new(vec![
            CreditProduct {
                product_type: ProductType::PersonalLoan,
                min_amount: 1_000.0,
                max_amount: 50_000.0,
                max_installments: 48,
                base_interest_rate: 0.035,
            },
            CreditProduct {
                product_type: ProductType::CreditCard,
                min_amount: 500.0,
                max_amount: 25_000.0,
                max_installments: 24,
                base_interest_rate: 0.099,
            },
            CreditProduct {
                product_type: ProductType::AutoLoan,
                min_amount: 10_000.0,
                max_amount: 150_000.0,
                max_installments: 60,
                base_interest_rate: 0.018,
            },
            CreditProduct {
                product_type: ProductType::HomeLoan,
                min_amount: 50_000.0,
                max_amount: 800_000.0,
                max_installments: 120,
                base_interest_rate: 0.009,
            },
        ])
    }

    /// Load a catalog from a CSV export.
    ///
    /// Expected header: `product_type,min_amount,max_amount,max_installments,base_interest_rate`.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, CatalogImportError> {
        let file = File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, CatalogImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut products = Vec::new();
        for record in csv_reader.deserialize::<CatalogRow>() {
            let row = record?;
            products.push(row.into_product()?);
        }

        Ok(Self::new(products))
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn find(&self, product_type: ProductType) -> Option<&CreditProduct> {
        self.products
            .iter()
            .find(|product| product.product_type == product_type)
    }

    /// Catalog entries other than `product_type`, in table order.
    pub fn alternatives(
        &self,
        product_type: ProductType,
    ) -> impl Iterator<Item = &CreditProduct> {
        self.products
            .iter()
            .filter(move |product| product.product_type != product_type)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CreditProduct> {
        self.products.iter()
    }
}

#[derive(Debug, Deserialize)]
struct CatalogRow {
    product_type: ProductType,
    min_amount: f64,
    max_amount: f64,
    max_installments: u32,
    base_interest_rate: f64,
}

impl CatalogRow {
    fn into_product(self) -> Result<CreditProduct, CatalogImportError> {
        if self.min_amount < 0.0 || self.max_amount < self.min_amount {
            return Err(CatalogImportError::InvalidBounds {
                product: self.product_type.label(),
            });
        }
        if self.max_installments == 0 {
            return Err(CatalogImportError::InvalidBounds {
                product: self.product_type.label(),
            });
        }
        if !self.base_interest_rate.is_finite() || self.base_interest_rate < 0.0 {
            return Err(CatalogImportError::InvalidRate {
                product: self.product_type.label(),
                rate: self.base_interest_rate,
            });
        }

        Ok(CreditProduct {
            product_type: self.product_type,
            min_amount: self.min_amount,
            max_amount: self.max_amount,
            max_installments: self.max_installments,
            base_interest_rate: self.base_interest_rate,
        })
    }
}

#[derive(Debug)]
pub enum CatalogImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    InvalidBounds { product: &'static str },
    InvalidRate { product: &'static str, rate: f64 },
}

impl std::fmt::Display for CatalogImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogImportError::Io(err) => write!(f, "failed to read catalog export: {}", err),
            CatalogImportError::Csv(err) => write!(f, "invalid catalog CSV data: {}", err),
            CatalogImportError::InvalidBounds { product } => {
                write!(f, "catalog row for {} has inconsistent amount bounds", product)
            }
            CatalogImportError::InvalidRate { product, rate } => {
                write!(f, "catalog row for {} has invalid interest rate {}", product, rate)
            }
        }
    }
}

impl std::error::Error for CatalogImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CatalogImportError::Io(err) => Some(err),
            CatalogImportError::Csv(err) => Some(err),
            CatalogImportError::InvalidBounds { .. } | CatalogImportError::InvalidRate { .. } => {
                None
            }
        }
    }
}

impl From<std::io::Error> for CatalogImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for CatalogImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}
