//! Database seeding: built-in roles, the superadmin account and the bulk
//! member import from the registration spreadsheet.

mod csv_row;
mod email_resolver;
mod importer;
pub mod parsing;

pub use csv_row::{CsvRow, RequiredFields, REQUIRED_COLUMNS};
pub use email_resolver::resolve_email;
pub use importer::{CsvImporter, ImportError, ImportReport};
