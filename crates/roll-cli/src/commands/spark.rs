use std::path::Path;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use roll_dice::RandomSource;
use roll_spark::SPARK_DIE;

/// Print every sheet with its tables, in file order.
pub fn list(path: &Path) -> Result<(), String> {
    let catalog = super::load_catalog(path)?;

    println!("📚 Spark sheets & tables:");
    if catalog.is_empty() {
        println!("  No spark tables found in {}.", path.display());
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Sheet", "Tables"]);

    for sheet in catalog.sheets() {
        let names: Vec<String> = sheet
            .tables
            .iter()
            .map(|t| {
                if t.table.len() < SPARK_DIE as usize {
                    format!("{} ({} rows)", t.name, t.table.len())
                } else {
                    t.name.clone()
                }
            })
            .collect();
        let names = if names.is_empty() {
            "—".to_string()
        } else {
            names.join(", ")
        };
        table.add_row(vec![sheet.name.clone(), names]);
    }

    println!("{table}");
    println!();
    println!(
        "  {} sheets, {} tables",
        catalog.len(),
        catalog.table_count()
    );
    Ok(())
}

/// Resolve `name` to a table and roll 2d12 on it.
pub fn roll(path: &Path, name: &str, rng: &mut impl RandomSource) -> Result<(), String> {
    let catalog = super::load_catalog(path)?;
    let selection =
        roll_spark::select_table(&catalog, name, &mut *rng).map_err(|e| e.to_string())?;
    let result = roll_spark::roll_spark(selection.data, rng).map_err(|e| {
        format!(
            "cannot roll '{}' in sheet '{}': {e}",
            selection.table, selection.sheet
        )
    })?;

    println!(
        "🗺️  Spark → Sheet: {} | Table: {}",
        selection.sheet.bold(),
        selection.table.bold()
    );
    let [r1, r2] = result.indices();
    println!("✨ Spark 2d{SPARK_DIE} → [{r1}, {r2}]");
    println!("   {result}");
    Ok(())
}
