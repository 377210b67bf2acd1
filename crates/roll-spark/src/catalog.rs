//! The in-memory spark catalog: sheets of named two-column tables.
//!
//! Sheets and tables keep the order in which the source file introduced them.
//! Listing and every selector pass iterate in that order, so the catalog is
//! stored as ordered vectors rather than hash maps.

use std::fmt;
use std::marker::PhantomData;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A two-column table of row pairs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SparkTable {
    /// Labels of the two columns.
    pub columns: (String, String),
    /// Row pairs in source order; row `n` (1-based) is selected by a roll of `n`.
    pub rows: Vec<(String, String)>,
}

impl SparkTable {
    /// Create a table with the given column labels and no rows.
    pub fn new(first: impl Into<String>, second: impl Into<String>) -> Self {
        Self {
            columns: (first.into(), second.into()),
            rows: Vec::new(),
        }
    }

    /// Append a row pair.
    pub fn with_row(mut self, first: impl Into<String>, second: impl Into<String>) -> Self {
        self.rows.push((first.into(), second.into()));
        self
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// A table together with its name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedTable {
    /// The table name as written in the source.
    pub name: String,
    /// The table contents.
    pub table: SparkTable,
}

/// A named group of tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sheet {
    /// The sheet name as written in the source.
    pub name: String,
    /// Tables in source order.
    pub tables: Vec<NamedTable>,
}

impl Sheet {
    /// Create an empty sheet.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tables: Vec::new(),
        }
    }

    /// Insert a table. A table with the same name is replaced in place.
    pub fn insert_table(&mut self, name: impl Into<String>, table: SparkTable) {
        let name = name.into();
        match self.tables.iter_mut().find(|t| t.name == name) {
            Some(existing) => existing.table = table,
            None => self.tables.push(NamedTable { name, table }),
        }
    }

    /// Look up a table by its exact name.
    pub fn table(&self, name: &str) -> Option<&SparkTable> {
        self.tables.iter().find(|t| t.name == name).map(|t| &t.table)
    }

    /// Table names in source order.
    pub fn table_names(&self) -> impl Iterator<Item = &str> {
        self.tables.iter().map(|t| t.name.as_str())
    }
}

/// All sheets loaded from one spark data file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SparkCatalog {
    sheets: Vec<Sheet>,
}

impl SparkCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the sheet with this exact name, creating it at the end if absent.
    pub fn sheet_entry(&mut self, name: &str) -> &mut Sheet {
        let idx = match self.sheets.iter().position(|s| s.name == name) {
            Some(idx) => idx,
            None => {
                self.sheets.push(Sheet::new(name));
                self.sheets.len() - 1
            }
        };
        &mut self.sheets[idx]
    }

    /// Insert a table under a sheet, creating the sheet if needed.
    pub fn insert_table(&mut self, sheet: &str, name: impl Into<String>, table: SparkTable) {
        self.sheet_entry(sheet).insert_table(name, table);
    }

    /// Sheets in source order.
    pub fn sheets(&self) -> &[Sheet] {
        &self.sheets
    }

    /// Look up a sheet by its exact name.
    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|s| s.name == name)
    }

    /// Look up a table by exact sheet and table name.
    pub fn table(&self, sheet: &str, table: &str) -> Option<&SparkTable> {
        self.sheet(sheet)?.table(table)
    }

    /// Number of sheets.
    pub fn len(&self) -> usize {
        self.sheets.len()
    }

    /// Returns true if the catalog has no sheets.
    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }

    /// Total number of tables across all sheets.
    pub fn table_count(&self) -> usize {
        self.sheets.iter().map(|s| s.tables.len()).sum()
    }
}

impl Serialize for Sheet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.tables.iter().map(|t| (&t.name, &t.table)))
    }
}

impl Serialize for SparkCatalog {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.sheets.iter().map(|s| (&s.name, s)))
    }
}

/// A map decoded into a vector of entries, keeping document order.
struct Ordered<V>(Vec<(String, V)>);

impl<'de, V: Deserialize<'de>> Deserialize<'de> for Ordered<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct OrderedVisitor<V>(PhantomData<V>);

        impl<'de, V: Deserialize<'de>> Visitor<'de> for OrderedVisitor<V> {
            type Value = Ordered<V>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map keyed by name")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(entry) = map.next_entry()? {
                    entries.push(entry);
                }
                Ok(Ordered(entries))
            }
        }

        deserializer.deserialize_map(OrderedVisitor(PhantomData))
    }
}

impl<'de> Deserialize<'de> for SparkCatalog {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let Ordered(sheets) = Ordered::<Ordered<SparkTable>>::deserialize(deserializer)?;
        let mut catalog = SparkCatalog::new();
        for (sheet_name, Ordered(tables)) in sheets {
            // A repeated sheet key keeps its first position but only its last value.
            let sheet = catalog.sheet_entry(&sheet_name);
            sheet.tables.clear();
            for (table_name, table) in tables {
                sheet.insert_table(table_name, table);
            }
        }
        Ok(catalog)
    }
}
