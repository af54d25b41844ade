use colored::Colorize;
use prettytable::{Cell, Row, Table, format};

pub struct TableBuilder {
    table: Table,
}

impl Default for TableBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TableBuilder {
    pub fn new() -> Self {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_CLEAN);
        Self { table }
    }

    pub fn add_header(&mut self, headers: &[&str]) -> &mut Self {
        let row = Row::new(
            headers
                .iter()
                .map(|h| Cell::new(&h.bold().to_string()))
                .collect(),
        );
        self.table.set_titles(row);
        self
    }

    pub fn add_row(&mut self, cells: &[&str]) -> &mut Self {
        let row = Row::new(cells.iter().map(|c| Cell::new(c)).collect());
        self.table.add_row(row);
        self
    }

    pub fn print(&self) {
        let mut buf = Vec::new();
        if self.table.print(&mut buf).is_ok() {
            if let Ok(output) = String::from_utf8(buf) {
                println!("\n{}", output);
            }
        }
    }
}
