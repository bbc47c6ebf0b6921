use std::collections::{BTreeMap, BTreeSet};

use crate::cartera::stats::model::{ColumnMap, Row};

/// Distinct products seen per client. A row with a tax ID but no product
/// contributes `None` to that client's set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrossSellTally {
    products: BTreeMap<String, BTreeSet<Option<String>>>,
}

impl CrossSellTally {
    /// Groups rows by client tax ID. Rows without a tax ID are skipped.
    pub fn from_rows<'a>(rows: impl IntoIterator<Item = &'a Row>, columns: &ColumnMap) -> Self {
        let mut tally = Self::default();
        for row in rows {
            let view = columns.view(row);
            if let Some(tax_id) = view.tax_id() {
                tally.record(tax_id, view.product());
            }
        }
        tally
    }

    pub fn record(&mut self, tax_id: impl Into<String>, product: Option<String>) {
        self.products.entry(tax_id.into()).or_default().insert(product);
    }

    /// Products recorded for `tax_id`.
    pub fn products_of(&self, tax_id: &str) -> Option<&BTreeSet<Option<String>>> {
        self.products.get(tax_id)
    }

    pub fn client_count(&self) -> usize {
        self.products.len()
    }

    /// Classifies every client as single- or multi-product.
    pub fn summary(&self) -> CrossSellSummary {
        let mut summary = CrossSellSummary::default();
        for products in self.products.values() {
            match products.len() {
                0 => {}
                1 => summary.single_product += 1,
                _ => summary.multi_product += 1,
            }
        }
        summary
    }
}

/// Client counts derived from a [`CrossSellTally`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CrossSellSummary {
    pub single_product: u64,
    pub multi_product: u64,
}

impl CrossSellSummary {
    pub fn total_clients(&self) -> u64 {
        self.single_product + self.multi_product
    }

    /// Share of multi-product clients, or `None` when there are no clients.
    pub fn ratio(&self) -> Option<f64> {
        match self.total_clients() {
            0 => None,
            total => Some(self.multi_product as f64 / total as f64),
        }
    }

    /// [`ratio`](Self::ratio) expressed as a percentage.
    pub fn percentage(&self) -> Option<f64> {
        self.ratio().map(|ratio| ratio * 100.0)
    }
}
