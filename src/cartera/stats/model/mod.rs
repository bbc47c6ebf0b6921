use std::fmt;

/// Header of the cancellation-reason column in the policy listing.
pub const REASON_HEADER: &str = "Mot.Anulación";
/// Header of the client tax identifier column.
pub const TAX_ID_HEADER: &str = "NIF";
/// Header of the product name column.
pub const PRODUCT_HEADER: &str = "Producto";

/// Value held by a single spreadsheet cell.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// Plain text cell.
    Text(String),
    /// Numeric cell. Integers and dates are stored as numbers too.
    Number(f64),
    /// Boolean cell.
    Boolean(bool),
    /// Blank cell.
    Empty,
}

impl CellValue {
    /// Returns `true` for blank cells and empty strings.
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(value) => value.is_empty(),
            CellValue::Number(_) | CellValue::Boolean(_) => false,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(value) => f.write_str(value),
            CellValue::Number(value) => write!(f, "{value}"),
            CellValue::Boolean(value) => write!(f, "{value}"),
            CellValue::Empty => Ok(()),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

/// One record of the policy listing: header → cell, in sheet column order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    fields: Vec<(String, CellValue)>,
}

impl Row {
    /// Creates an empty row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces the value stored under `header`.
    pub fn insert(&mut self, header: impl Into<String>, value: impl Into<CellValue>) {
        let header = header.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(key, _)| *key == header) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((header, value)),
        }
    }

    /// Looks a cell up by exact header match.
    pub fn get(&self, header: &str) -> Option<&CellValue> {
        self.fields
            .iter()
            .find(|(key, _)| key == header)
            .map(|(_, value)| value)
    }

    /// Iterates over the fields in column order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &CellValue)> {
        self.fields.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Row
where
    K: Into<String>,
    V: Into<CellValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut row = Row::new();
        for (header, value) in iter {
            row.insert(header, value);
        }
        row
    }
}

/// Header names of the fields the analyses care about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMap {
    pub reason: String,
    pub tax_id: String,
    pub product: String,
}

impl Default for ColumnMap {
    fn default() -> Self {
        Self {
            reason: REASON_HEADER.to_string(),
            tax_id: TAX_ID_HEADER.to_string(),
            product: PRODUCT_HEADER.to_string(),
        }
    }
}

impl ColumnMap {
    /// Wraps `row` in a typed view using these header names.
    pub fn view<'a>(&'a self, row: &'a Row) -> PolicyRow<'a> {
        PolicyRow { row, columns: self }
    }
}

/// Typed accessors over a [`Row`] of the policy listing.
///
/// A field is reported only when its column exists and the cell is not blank.
#[derive(Debug, Clone, Copy)]
pub struct PolicyRow<'a> {
    row: &'a Row,
    columns: &'a ColumnMap,
}

impl PolicyRow<'_> {
    /// The `Mot.Anulación` value, rendered as text.
    pub fn cancellation_reason(&self) -> Option<String> {
        self.field(&self.columns.reason)
    }

    /// The client tax identifier (NIF/CIF).
    pub fn tax_id(&self) -> Option<String> {
        self.field(&self.columns.tax_id)
    }

    pub fn product(&self) -> Option<String> {
        self.field(&self.columns.product)
    }

    fn field(&self, header: &str) -> Option<String> {
        self.row
            .get(header)
            .filter(|value| !value.is_blank())
            .map(ToString::to_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_replaces_existing_header() {
        let mut row = Row::new();
        row.insert("NIF", "A1");
        row.insert("Producto", "Auto");
        row.insert("NIF", "B2");

        assert_eq!(row.len(), 2);
        assert_eq!(row.get("NIF"), Some(&CellValue::from("B2")));
        let headers: Vec<&str> = row.iter().map(|(key, _)| key).collect();
        assert_eq!(headers, ["NIF", "Producto"]);
    }

    #[test]
    fn accessors_match_accented_headers_exactly() {
        let columns = ColumnMap::default();
        let row: Row = [("Mot.Anulación", "Impago"), ("Mot.Anulacion", "Otro")]
            .into_iter()
            .collect();

        assert_eq!(
            columns.view(&row).cancellation_reason().as_deref(),
            Some("Impago")
        );
    }

    #[test]
    fn blank_cells_are_reported_as_absent() {
        let columns = ColumnMap::default();
        let mut row = Row::new();
        row.insert("NIF", "");
        row.insert("Producto", CellValue::Empty);

        let view = columns.view(&row);
        assert_eq!(view.tax_id(), None);
        assert_eq!(view.product(), None);
        assert_eq!(view.cancellation_reason(), None);
    }

    #[test]
    fn numeric_cells_render_without_trailing_zero() {
        let columns = ColumnMap::default();
        let row: Row = [("NIF", CellValue::Number(12345678.0))].into_iter().collect();

        assert_eq!(columns.view(&row).tax_id().as_deref(), Some("12345678"));
    }
}
