// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Tabular report assembly.
//!
//! The schema is data: seven metadata columns followed by one column per
//! catalog entry. Rows are built against the schema, so the number of
//! cells in every row always matches the header.
//!
//! Format:
//! ```text
//! App,TestClass,TestFilePath,ProductionFilePath,RelativeTestFilePath,RelativeProductionFilePath,NumberOfMethods,<smell>...
//! myApp,CalcTest,/abs/CalcTest.java,/abs/Calc.java,src/test/.../CalcTest.java,src/main/.../Calc.java,3,2,0
//! ```

use std::io::Write;

use crate::detector::{SmellCatalog, SmellResult};
use crate::unit::SourceUnit;

/// How cells are written when they contain the separator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Quoting {
    /// Join cells with commas as-is. Cells containing commas break the row.
    None,
    /// Quote cells containing `,`, `"`, CR or LF (RFC 4180).
    #[default]
    Minimal,
}

impl Quoting {
    /// Parse a config value.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "none" => Some(Quoting::None),
            "minimal" => Some(Quoting::Minimal),
            _ => None,
        }
    }

    fn write_cell(self, line: &mut String, cell: &str) {
        let needs_quotes = self == Quoting::Minimal
            && cell.contains([',', '"', '\r', '\n']);
        if needs_quotes {
            line.push('"');
            line.push_str(&cell.replace('"', "\"\""));
            line.push('"');
        } else {
            line.push_str(cell);
        }
    }
}

/// One report column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Column {
    App,
    TestClass,
    TestFilePath,
    ProductionFilePath,
    RelativeTestFilePath,
    RelativeProductionFilePath,
    NumberOfMethods,
    /// Catalog entry at `index`.
    Smell { index: usize, name: String },
}

impl Column {
    /// Metadata columns in report order.
    pub const METADATA: [Column; 7] = [
        Column::App,
        Column::TestClass,
        Column::TestFilePath,
        Column::ProductionFilePath,
        Column::RelativeTestFilePath,
        Column::RelativeProductionFilePath,
        Column::NumberOfMethods,
    ];

    /// Header text.
    pub fn title(&self) -> &str {
        match self {
            Column::App => "App",
            Column::TestClass => "TestClass",
            Column::TestFilePath => "TestFilePath",
            Column::ProductionFilePath => "ProductionFilePath",
            Column::RelativeTestFilePath => "RelativeTestFilePath",
            Column::RelativeProductionFilePath => "RelativeProductionFilePath",
            Column::NumberOfMethods => "NumberOfMethods",
            Column::Smell { name, .. } => name,
        }
    }

    /// Cell text for `unit`. Missing or unavailable smell results are empty.
    fn cell(&self, unit: &SourceUnit, results: &[SmellResult]) -> String {
        let path_cell = |p: Option<&std::path::Path>| {
            p.map(|p| p.display().to_string()).unwrap_or_default()
        };

        match self {
            Column::App => unit.app().to_string(),
            Column::TestClass => unit.test_name().to_string(),
            Column::TestFilePath => unit.test_path().display().to_string(),
            Column::ProductionFilePath => path_cell(unit.production_path()),
            Column::RelativeTestFilePath => unit.relative_test_path().display().to_string(),
            Column::RelativeProductionFilePath => path_cell(unit.relative_production_path()),
            Column::NumberOfMethods => unit.test_methods().to_string(),
            Column::Smell { index, .. } => results
                .get(*index)
                .copied()
                .flatten()
                .map(|count| count.to_string())
                .unwrap_or_default(),
        }
    }
}

/// A rendered row of cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
    cells: Vec<String>,
}

impl ReportRow {
    pub fn cells(&self) -> &[String] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Render as one line (no trailing newline).
    pub fn render(&self, quoting: Quoting) -> String {
        let mut line = String::new();
        for (i, cell) in self.cells.iter().enumerate() {
            if i > 0 {
                line.push(',');
            }
            quoting.write_cell(&mut line, cell);
        }
        line
    }
}

/// Ordered report columns for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportSchema {
    columns: Vec<Column>,
}

impl ReportSchema {
    /// Metadata columns followed by the catalog, in catalog order.
    pub fn new(catalog: &SmellCatalog) -> Self {
        let smells = catalog
            .names()
            .iter()
            .enumerate()
            .map(|(index, name)| Column::Smell {
                index,
                name: name.clone(),
            });

        Self {
            columns: Column::METADATA.into_iter().chain(smells).collect(),
        }
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Number of cells in every row.
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn header(&self) -> ReportRow {
        ReportRow {
            cells: self.columns.iter().map(|c| c.title().to_string()).collect(),
        }
    }

    /// Row for `unit`; `results` is aligned with the catalog and may be short.
    pub fn row(&self, unit: &SourceUnit, results: &[SmellResult]) -> ReportRow {
        ReportRow {
            cells: self.columns.iter().map(|c| c.cell(unit, results)).collect(),
        }
    }
}

/// Streaming CSV writer. Each row is written whole and flushed.
pub struct CsvWriter<W: Write> {
    out: W,
    quoting: Quoting,
}

impl<W: Write> CsvWriter<W> {
    pub fn new(out: W, quoting: Quoting) -> Self {
        Self { out, quoting }
    }

    /// Write one row as a single line.
    pub fn write_row(&mut self, row: &ReportRow) -> std::io::Result<()> {
        let mut line = row.render(self.quoting);
        line.push('\n');
        self.out.write_all(line.as_bytes())?;
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;
