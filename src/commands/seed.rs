//! Seed command - Default roles, superadmin and the CSV member import.

use std::sync::Arc;

use crate::cli::args::SeedArgs;
use crate::config::{Config, SUPERADMIN_EMAIL};
use crate::errors::AppResult;
use crate::infra::{Database, Persistence};
use crate::seeds::{CsvImporter, ImportReport};
use crate::services::{RoleManager, RoleService};

/// Execute the seed command
pub async fn execute(args: SeedArgs, config: Config) -> AppResult<()> {
    let db = Database::connect(&config).await?;
    let uow = Arc::new(Persistence::new(db.get_connection()));

    let created = RoleManager::new(uow.clone()).ensure_default_roles().await?;
    tracing::info!("Default roles ready ({} created)", created);

    let importer = CsvImporter::new(uow);
    if importer.create_superadmin().await? {
        println!("Superadmin creado: {}", SUPERADMIN_EMAIL);
    } else {
        println!("Superadmin ya existe: {}", SUPERADMIN_EMAIL);
    }

    tracing::info!("Importing members from {}", args.csv_path);
    let report = importer.import_from_csv(&args.csv_path).await?;
    print!("{}", summary(&report));

    Ok(())
}

/// Human-readable import summary
pub fn summary(report: &ImportReport) -> String {
    let mut out = format!(
        "Importados: {}\nSaltados: {}\nErrores: {}\n",
        report.imported, report.skipped, report.errors
    );
    for detail in &report.error_details {
        out.push_str(&format!(
            "  Fila {} ({}): {}\n",
            detail.row, detail.email, detail.error
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seeds::ImportError;

    #[test]
    fn test_summary_lists_failed_rows() {
        let report = ImportReport {
            imported: 3,
            skipped: 1,
            errors: 1,
            error_details: vec![ImportError {
                row: 5,
                email: "N/A".into(),
                error: "El formato del email no es válido".into(),
            }],
        };

        assert_eq!(
            summary(&report),
            "Importados: 3\nSaltados: 1\nErrores: 1\n  Fila 5 (N/A): El formato del email no es válido\n"
        );
    }
}
