pub mod dice;
pub mod narrative;
pub mod oracle;
pub mod spark;

use std::path::Path;

use roll_spark::SparkCatalog;

/// Load the spark catalog, turning load failures into CLI messages.
fn load_catalog(path: &Path) -> Result<SparkCatalog, String> {
    roll_spark::load_catalog(path).map_err(|e| e.to_string())
}
