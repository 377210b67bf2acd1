//! Resolving a loosely typed name to a concrete spark table.
//!
//! Matching runs through four tiers in order: exact sheet, exact table,
//! substring of a sheet name, substring of a table name. Each tier scans the
//! whole catalog in source order before the next tier is tried, so an exact
//! table match anywhere beats a substring match on an earlier sheet. A sheet
//! hit picks one of its tables at random.

use roll_dice::RandomSource;
use strsim::jaro_winkler;

use crate::catalog::{NamedTable, Sheet, SparkCatalog, SparkTable};
use crate::error::{SparkError, SparkResult};
use crate::normalize::normalize_name;

/// Minimum similarity for a name to be offered as a suggestion.
const SUGGESTION_THRESHOLD: f64 = 0.75;

/// Maximum number of suggestions attached to a failed lookup.
const MAX_SUGGESTIONS: usize = 3;

/// Which tier of the matcher list produced a hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchTier {
    /// The query equals a sheet name.
    ExactSheet,
    /// The query equals a table name.
    ExactTable,
    /// The query is contained in a sheet name.
    FuzzySheet,
    /// The query is contained in a table name.
    FuzzyTable,
}

impl std::fmt::Display for MatchTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ExactSheet => write!(f, "exact sheet"),
            Self::ExactTable => write!(f, "exact table"),
            Self::FuzzySheet => write!(f, "fuzzy sheet"),
            Self::FuzzyTable => write!(f, "fuzzy table"),
        }
    }
}

/// What a matcher found.
#[derive(Debug, Clone, Copy)]
pub enum Hit<'a> {
    /// A whole sheet; a table still has to be picked from it.
    Sheet(&'a Sheet),
    /// A specific table and the sheet that owns it.
    Table(&'a Sheet, &'a NamedTable),
}

/// A resolved table.
#[derive(Debug, Clone, Copy)]
pub struct Selection<'a> {
    /// Name of the owning sheet.
    pub sheet: &'a str,
    /// Name of the table.
    pub table: &'a str,
    /// The table contents.
    pub data: &'a SparkTable,
}

type MatchFn = for<'a> fn(&'a SparkCatalog, &str) -> Option<Hit<'a>>;

/// The matcher tiers, in precedence order.
const MATCHERS: [(MatchTier, MatchFn); 4] = [
    (MatchTier::ExactSheet, exact_sheet),
    (MatchTier::ExactTable, exact_table),
    (MatchTier::FuzzySheet, fuzzy_sheet),
    (MatchTier::FuzzyTable, fuzzy_table),
];

/// Run the matcher tiers against an already normalized key.
pub fn find_match<'a>(catalog: &'a SparkCatalog, key: &str) -> Option<(MatchTier, Hit<'a>)> {
    MATCHERS
        .iter()
        .find_map(|(tier, matcher)| matcher(catalog, key).map(|hit| (*tier, hit)))
}

/// Resolve `name` to a table, picking at random when it names a sheet.
pub fn select_table<'a>(
    catalog: &'a SparkCatalog,
    name: &str,
    rng: &mut impl RandomSource,
) -> SparkResult<Selection<'a>> {
    let key = normalize_name(name);
    let Some((tier, hit)) = find_match(catalog, &key) else {
        return Err(SparkError::NoMatch {
            name: name.to_string(),
            suggestions: suggest(catalog, &key),
        });
    };

    let (sheet, table) = match hit {
        Hit::Table(sheet, table) => (sheet, table),
        Hit::Sheet(sheet) => {
            let Some(last) = sheet.tables.len().checked_sub(1) else {
                return Err(SparkError::EmptySheet(sheet.name.clone()));
            };
            let last = u32::try_from(last).unwrap_or(u32::MAX);
            let idx = rng.range(0, last) as usize;
            (sheet, &sheet.tables[idx.min(sheet.tables.len() - 1)])
        }
    };

    tracing::debug!(
        query = name,
        %tier,
        sheet = %sheet.name,
        table = %table.name,
        "resolved spark table"
    );
    Ok(Selection {
        sheet: &sheet.name,
        table: &table.name,
        data: &table.table,
    })
}

fn exact_sheet<'a>(catalog: &'a SparkCatalog, key: &str) -> Option<Hit<'a>> {
    catalog
        .sheets()
        .iter()
        .find(|sheet| normalize_name(&sheet.name) == key)
        .map(Hit::Sheet)
}

fn exact_table<'a>(catalog: &'a SparkCatalog, key: &str) -> Option<Hit<'a>> {
    find_table(catalog, |name| name == key)
}

fn fuzzy_sheet<'a>(catalog: &'a SparkCatalog, key: &str) -> Option<Hit<'a>> {
    catalog
        .sheets()
        .iter()
        .find(|sheet| normalize_name(&sheet.name).contains(key))
        .map(Hit::Sheet)
}

fn fuzzy_table<'a>(catalog: &'a SparkCatalog, key: &str) -> Option<Hit<'a>> {
    find_table(catalog, |name| name.contains(key))
}

/// First table, sheet by sheet, whose normalized name satisfies `accept`.
fn find_table<'a>(catalog: &'a SparkCatalog, accept: impl Fn(&str) -> bool) -> Option<Hit<'a>> {
    catalog.sheets().iter().find_map(|sheet| {
        sheet
            .tables
            .iter()
            .find(|table| accept(&normalize_name(&table.name)))
            .map(|table| Hit::Table(sheet, table))
    })
}

/// Catalog names closest to the key, best first.
fn suggest(catalog: &SparkCatalog, key: &str) -> Vec<String> {
    if key.is_empty() {
        return Vec::new();
    }
    let names = catalog
        .sheets()
        .iter()
        .flat_map(|sheet| std::iter::once(&sheet.name).chain(sheet.tables.iter().map(|t| &t.name)));

    let mut scored: Vec<(&String, f64)> = Vec::new();
    for name in names {
        let score = jaro_winkler(key, &normalize_name(name));
        if score >= SUGGESTION_THRESHOLD && !scored.iter().any(|(seen, _)| *seen == name) {
            scored.push((name, score));
        }
    }
    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    scored
        .into_iter()
        .take(MAX_SUGGESTIONS)
        .map(|(name, _)| name.clone())
        .collect()
}
