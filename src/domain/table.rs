//! Table editing on [`DocumentContent`].
//!
//! Tables are row-major; the first row is the header. Every row of a table
//! keeps the same width.

use crate::domain::entities::{DocumentContent, Table, TableCell, TableRow};
use crate::domain::error::{DomainError, DomainResult};

impl TableRow {
    /// Row of `width` empty cells.
    pub fn empty(width: usize) -> Self {
        Self {
            cells: vec![TableCell::default(); width],
        }
    }
}

impl Table {
    /// Header row `Header 1..=columns` followed by one empty row.
    pub fn with_header(columns: usize) -> Self {
        let header = TableRow {
            cells: (1..=columns)
                .map(|i| TableCell::new(format!("Header {i}")))
                .collect(),
        };
        Self {
            rows: vec![header, TableRow::empty(columns)],
        }
    }

    pub fn width(&self) -> usize {
        self.rows.first().map(|r| r.cells.len()).unwrap_or(0)
    }

    pub fn header(&self) -> Option<&TableRow> {
        self.rows.first()
    }

    /// Rows below the header.
    pub fn body(&self) -> &[TableRow] {
        self.rows.get(1..).unwrap_or(&[])
    }
}

impl DocumentContent {
    pub fn add_table(&mut self, columns: usize) -> usize {
        self.tables.push(Table::with_header(columns.max(1)));
        self.tables.len() - 1
    }

    pub fn remove_table(&mut self, table: usize) -> DomainResult<Table> {
        self.table(table)?;
        Ok(self.tables.remove(table))
    }

    pub fn add_row(&mut self, table: usize) -> DomainResult<()> {
        let t = self.table_mut(table)?;
        let width = t.width();
        t.rows.push(TableRow::empty(width));
        Ok(())
    }

    pub fn add_column(&mut self, table: usize) -> DomainResult<()> {
        let t = self.table_mut(table)?;
        for row in &mut t.rows {
            row.cells.push(TableCell::default());
        }
        Ok(())
    }

    pub fn remove_row(&mut self, table: usize, row: usize) -> DomainResult<()> {
        let t = self.table_mut(table)?;
        if row >= t.rows.len() {
            return Err(DomainError::RowIndexOutOfRange { table, row });
        }
        if t.rows.len() <= 1 {
            return Err(DomainError::LastRow(table));
        }
        t.rows.remove(row);
        Ok(())
    }

    pub fn remove_column(&mut self, table: usize, column: usize) -> DomainResult<()> {
        let t = self.table_mut(table)?;
        let width = t.width();
        if column >= width {
            return Err(DomainError::ColumnIndexOutOfRange { table, column });
        }
        if width <= 1 {
            return Err(DomainError::LastColumn(table));
        }
        for r in &mut t.rows {
            if column < r.cells.len() {
                r.cells.remove(column);
            }
        }
        Ok(())
    }

    pub fn update_cell(
        &mut self,
        table: usize,
        row: usize,
        column: usize,
        value: impl Into<String>,
    ) -> DomainResult<()> {
        let t = self.table_mut(table)?;
        let r = t
            .rows
            .get_mut(row)
            .ok_or(DomainError::RowIndexOutOfRange { table, row })?;
        let cell = r
            .cells
            .get_mut(column)
            .ok_or(DomainError::ColumnIndexOutOfRange { table, column })?;
        cell.content = value.into();
        Ok(())
    }

    pub fn table(&self, table: usize) -> DomainResult<&Table> {
        self.tables
            .get(table)
            .ok_or(DomainError::TableIndexOutOfRange(table))
    }

    fn table_mut(&mut self, table: usize) -> DomainResult<&mut Table> {
        self.tables
            .get_mut(table)
            .ok_or(DomainError::TableIndexOutOfRange(table))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_new_table_when_added_then_has_header_and_empty_row() {
        let mut content = DocumentContent::default();
        let idx = content.add_table(3);
        let table = content.table(idx).unwrap();

        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.header().unwrap().cells[2].content, "Header 3");
        assert!(table.body()[0].cells.iter().all(|c| c.content.is_empty()));
    }

    #[test]
    fn given_zero_columns_when_adding_table_then_keeps_one_column() {
        let mut content = DocumentContent::default();
        let idx = content.add_table(0);
        assert_eq!(content.table(idx).unwrap().width(), 1);
    }

    #[test]
    fn given_missing_table_when_editing_then_reports_index() {
        let mut content = DocumentContent::default();
        assert_eq!(
            content.add_row(4),
            Err(DomainError::TableIndexOutOfRange(4))
        );
    }
}
