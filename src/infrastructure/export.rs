use crate::domain::ShoppingItem;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Writes the shopping list out as CSV for sharing or printing.
pub struct CsvExporter;

impl CsvExporter {
    pub const HEADER: [&'static str; 3] = ["name", "quantity", "purchased"];

    /// Writes `items` to `filename`, one row per item in list order.
    ///
    /// Returns the filename on success so the caller can report it.
    pub fn export_to_csv(items: &[ShoppingItem], filename: &str) -> Result<String, ExportError> {
        let mut writer = csv::Writer::from_path(Path::new(filename))?;
        writer.write_record(Self::HEADER)?;
        for item in items {
            let quantity = item.quantity.to_string();
            let purchased = if item.purchased { "yes" } else { "no" };
            writer.write_record([item.name.as_str(), quantity.as_str(), purchased])?;
        }
        writer.flush()?;
        tracing::info!(count = items.len(), filename, "exported shopping list");
        Ok(filename.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_export_writes_header_and_rows() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("list.csv");
        let filename = path.to_str().unwrap();

        let mut bread = ShoppingItem::with_id("b", "Bread, sliced", 1);
        bread.purchased = true;
        let items = vec![ShoppingItem::with_id("a", "Milk", 2), bread];

        let written = CsvExporter::export_to_csv(&items, filename).unwrap();
        assert_eq!(written, filename);

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            content,
            "name,quantity,purchased\nMilk,2,no\n\"Bread, sliced\",1,yes\n"
        );
    }

    #[test]
    fn test_export_empty_list() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("empty.csv");
        CsvExporter::export_to_csv(&[], path.to_str().unwrap()).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "name,quantity,purchased\n");
    }

    #[test]
    fn test_export_to_missing_directory_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("list.csv");
        assert!(CsvExporter::export_to_csv(&[], path.to_str().unwrap()).is_err());
    }
}
