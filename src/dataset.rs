//! Загрузка табличных данных обследования

use std::fs::File;
use std::path::Path;

use ndarray::{Array2, ArrayView1, Axis};

use crate::error::{AnalysisError, Result};

/// Таблица наблюдений: имена колонок + числовая матрица (NaN = пропуск)
#[derive(Debug, Clone)]
pub struct Table {
    columns: Vec<String>,
    data: Array2<f64>,
}

impl Table {
    pub fn new(columns: Vec<String>, data: Array2<f64>) -> Result<Self> {
        if columns.len() != data.ncols() {
            return Err(AnalysisError::SchemaMismatch(format!(
                "{} column names for {} data columns",
                columns.len(),
                data.ncols()
            )));
        }
        Ok(Self { columns, data })
    }

    /// Чтение CSV с заголовком; пустые ячейки и "NA" считаются пропусками
    pub fn from_csv<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| AnalysisError::MissingFile {
            path: path.to_path_buf(),
            source,
        })?;
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(file);

        let columns: Vec<String> = reader
            .headers()
            .map_err(|e| AnalysisError::SchemaMismatch(format!("invalid header row: {e}")))?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();
        if columns.is_empty() {
            return Err(AnalysisError::SchemaMismatch(
                "input has no columns".to_string(),
            ));
        }

        let mut cells: Vec<f64> = Vec::new();
        let mut n_rows = 0usize;
        for (row_idx, record) in reader.records().enumerate() {
            let record = record
                .map_err(|e| AnalysisError::SchemaMismatch(format!("row {}: {e}", row_idx + 1)))?;
            if record.len() != columns.len() {
                return Err(AnalysisError::SchemaMismatch(format!(
                    "row {}: expected {} fields, got {}",
                    row_idx + 1,
                    columns.len(),
                    record.len()
                )));
            }
            for (col_idx, raw) in record.iter().enumerate() {
                cells.push(parse_cell(raw, row_idx, &columns[col_idx])?);
            }
            n_rows += 1;
        }

        let data = Array2::from_shape_vec((n_rows, columns.len()), cells)
            .map_err(|e| AnalysisError::SchemaMismatch(e.to_string()))?;
        Ok(Self { columns, data })
    }

    pub fn n_rows(&self) -> usize {
        self.data.nrows()
    }

    pub fn n_cols(&self) -> usize {
        self.data.ncols()
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn data(&self) -> &Array2<f64> {
        &self.data
    }

    pub fn column_index(&self, name: &str) -> Result<usize> {
        self.columns
            .iter()
            .position(|c| c == name)
            .ok_or_else(|| AnalysisError::ColumnNotFound(name.to_string()))
    }

    pub fn column(&self, name: &str) -> Result<ArrayView1<'_, f64>> {
        let idx = self.column_index(name)?;
        Ok(self.data.column(idx))
    }

    /// Строки, для которых маска истинна
    pub fn retain_rows(&self, mask: &[bool]) -> Table {
        let indices: Vec<usize> = mask
            .iter()
            .enumerate()
            .filter(|(_, keep)| **keep)
            .map(|(i, _)| i)
            .collect();
        self.select_rows(&indices)
    }

    pub fn select_rows(&self, indices: &[usize]) -> Table {
        Table {
            columns: self.columns.clone(),
            data: self.data.select(Axis(0), indices),
        }
    }

    pub fn select_columns(&self, indices: &[usize]) -> Table {
        Table {
            columns: indices.iter().map(|&j| self.columns[j].clone()).collect(),
            data: self.data.select(Axis(1), indices),
        }
    }
}

fn parse_cell(raw: &str, row: usize, column: &str) -> Result<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty()
        || trimmed.eq_ignore_ascii_case("na")
        || trimmed.eq_ignore_ascii_case("nan")
    {
        return Ok(f64::NAN);
    }
    trimmed.parse::<f64>().map_err(|_| {
        AnalysisError::SchemaMismatch(format!(
            "row {}, column '{}': non-numeric value '{}'",
            row + 1,
            column,
            trimmed
        ))
    })
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    fn write_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn loads_numeric_table_with_missing_values() {
        let file = write_csv("Age,BPSysAve\n30,120\nNA,130\n41,\n");
        let table = Table::from_csv(file.path()).unwrap();

        assert_eq!(table.n_rows(), 3);
        assert_eq!(table.columns(), &["Age".to_string(), "BPSysAve".to_string()]);
        assert_eq!(table.data()[[0, 0]], 30.0);
        assert!(table.data()[[1, 0]].is_nan());
        assert!(table.data()[[2, 1]].is_nan());
    }

    #[test]
    fn missing_file_is_reported() {
        let err = Table::from_csv("/definitely/not/here.csv").unwrap_err();
        assert!(matches!(err, AnalysisError::MissingFile { .. }));
    }

    #[test]
    fn non_numeric_cell_is_a_schema_error() {
        let file = write_csv("Age,BPSysAve\n30,abc\n");
        let err = Table::from_csv(file.path()).unwrap_err();
        assert!(matches!(err, AnalysisError::SchemaMismatch(_)));
    }

    #[test]
    fn column_lookup() {
        let file = write_csv("Age,BPSysAve\n30,120\n");
        let table = Table::from_csv(file.path()).unwrap();

        assert_eq!(table.column_index("BPSysAve").unwrap(), 1);
        let err = table.column_index("Pulse").unwrap_err();
        assert!(matches!(err, AnalysisError::ColumnNotFound(name) if name == "Pulse"));
    }

    #[test]
    fn row_and_column_selection() {
        let file = write_csv("A,B,C\n1,2,3\n4,5,6\n7,8,9\n");
        let table = Table::from_csv(file.path()).unwrap();

        let rows = table.select_rows(&[0, 2]);
        assert_eq!(rows.n_rows(), 2);
        assert_eq!(rows.data()[[1, 0]], 7.0);

        let cols = table.select_columns(&[0, 2]);
        assert_eq!(cols.columns(), &["A".to_string(), "C".to_string()]);
        assert_eq!(cols.data()[[1, 1]], 6.0);
    }
}
