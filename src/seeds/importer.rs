//! Bulk member import from the spreadsheet export, and superadmin seeding.
//!
//! Rows are processed strictly in order. Each valid row becomes a user, a
//! profile, a `user` role assignment and up to two guardians; those records
//! are buffered and flushed in one transaction every `IMPORT_BATCH_SIZE`
//! users. A bad row never aborts the run; a missing `user` role or an
//! unreadable file does.

use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use csv::{ReaderBuilder, Trim};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use uuid::Uuid;

use super::csv_row::{CsvRow, RequiredFields, REQUIRED_COLUMNS};
use super::email_resolver::resolve_email;
use super::parsing;
use crate::config::{
    IMPORT_BATCH_SIZE, MIN_IMPORT_EMAIL_LENGTH, SUPERADMIN_EMAIL, SUPERADMIN_FIRST_NAME,
    SUPERADMIN_LAST_NAME, SUPERADMIN_TEMP_PASSWORD,
};
use crate::errors::{AppError, AppResult};
use crate::infra::{InsertBatch, UnitOfWork};
use crate::services::find_or_create_role;
use domain::{
    DomainResult, Guardian, GuardianData, RoleName, User, UserData, UserProfile,
    UserProfileData, UserRoleAssignment, CONTACT_TYPE_PRIMARY, CONTACT_TYPE_SECONDARY,
};

/// A row that could not be imported
#[derive(Debug, Clone, PartialEq)]
pub struct ImportError {
    pub row: usize,
    pub email: String,
    pub error: String,
}

/// Outcome of one import run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportReport {
    pub imported: usize,
    pub skipped: usize,
    pub errors: usize,
    pub error_details: Vec<ImportError>,
}

impl ImportReport {
    fn record_error(&mut self, row: usize, email: String, error: String) {
        tracing::error!(row, email = %email, "Row failed: {}", error);
        self.errors += 1;
        self.error_details.push(ImportError { row, email, error });
    }
}

/// Everything one spreadsheet row turns into
struct Member {
    user: User,
    profile: UserProfile,
    assignment: UserRoleAssignment,
    guardians: Vec<Guardian>,
}

/// Rows waiting in the current batch, for bookkeeping on flush
struct PendingRow {
    row: usize,
    email: String,
}

pub struct CsvImporter<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork + 'static> CsvImporter<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    pub async fn import_from_csv(&self, path: impl AsRef<Path>) -> AppResult<ImportReport> {
        let mut rng = StdRng::from_entropy();
        self.import_with_rng(path, &mut rng).await
    }

    /// Same as [`import_from_csv`](Self::import_from_csv) with a caller-chosen
    /// source for the collision suffixes.
    pub async fn import_with_rng<R: Rng + Send>(
        &self,
        path: impl AsRef<Path>,
        rng: &mut R,
    ) -> AppResult<ImportReport> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            AppError::Import(format!(
                "No se pudo leer el archivo CSV {}: {}",
                path.display(),
                e
            ))
        })?;
        let content = content.strip_prefix('\u{feff}').unwrap_or(&content);

        let mut reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .from_reader(content.as_bytes());

        let headers = reader
            .headers()
            .map_err(|e| AppError::Import(format!("Encabezado CSV inválido: {}", e)))?;
        if let Some(missing) = REQUIRED_COLUMNS
            .iter()
            .find(|column| !headers.iter().any(|h| h == **column))
        {
            return Err(AppError::Import(format!(
                "Encabezado CSV inválido: falta la columna \"{}\"",
                missing
            )));
        }

        let user_role = self
            .uow
            .roles()
            .find_by_name(RoleName::User)
            .await?
            .ok_or_else(|| {
                AppError::Import(
                    "Rol \"user\" no encontrado. Ejecuta las migraciones primero.".to_string(),
                )
            })?;

        let rows: Vec<Result<CsvRow, csv::Error>> = reader.deserialize().collect();
        tracing::info!("Procesando {} registros del CSV...", rows.len());

        let mut report = ImportReport::default();
        let mut claimed: HashSet<String> = HashSet::new();
        let mut batch = InsertBatch::default();
        let mut pending: Vec<PendingRow> = Vec::new();

        for (index, record) in rows.into_iter().enumerate() {
            // Header is row 1
            let row_number = index + 2;

            let row = match record {
                Ok(row) => row,
                Err(e) => {
                    report.record_error(row_number, "N/A".to_string(), e.to_string());
                    continue;
                }
            };

            let Some(required) = row.required_fields(MIN_IMPORT_EMAIL_LENGTH) else {
                tracing::warn!("Fila {}: Datos incompletos, saltando...", row_number);
                report.skipped += 1;
                continue;
            };

            let email = resolve_email(&required.email, &claimed, rng);
            let raw_email = row.email_or_placeholder();
            let role_id = user_role.id();
            let build_email = email.clone();

            let built = tokio::task::spawn_blocking(move || {
                build_member(&row, required, build_email, role_id)
            })
            .await
            .map_err(|e| AppError::internal(format!("Row task failed: {}", e)))?;

            match built {
                Ok(member) => {
                    claimed.insert(email.clone());
                    batch.users.push(member.user);
                    batch.profiles.push(member.profile);
                    batch.assignments.push(member.assignment);
                    batch.guardians.extend(member.guardians);
                    pending.push(PendingRow {
                        row: row_number,
                        email,
                    });
                }
                Err(e) => report.record_error(row_number, raw_email, e.to_string()),
            }

            if batch.users.len() >= IMPORT_BATCH_SIZE {
                self.flush(&mut batch, &mut pending, &mut report).await;
            }
        }

        self.flush(&mut batch, &mut pending, &mut report).await;

        tracing::info!(
            "Importación completada. Importados: {}, Saltados: {}, Errores: {}",
            report.imported,
            report.skipped,
            report.errors
        );
        Ok(report)
    }

    /// Write the buffered records; on failure every buffered row counts as errored.
    async fn flush(
        &self,
        batch: &mut InsertBatch,
        pending: &mut Vec<PendingRow>,
        report: &mut ImportReport,
    ) {
        if batch.is_empty() {
            return;
        }

        match self.uow.insert_batch(batch).await {
            Ok(()) => {
                tracing::info!("Lote de {} usuarios guardado", pending.len());
                report.imported += pending.len();
            }
            Err(e) => {
                let message = e.to_string();
                for row in pending.iter() {
                    report.record_error(row.row, row.email.clone(), message.clone());
                }
            }
        }

        batch.clear();
        pending.clear();
    }

    /// Create the superadmin account unless it already exists.
    ///
    /// Returns `true` when a user was created.
    pub async fn create_superadmin(&self) -> AppResult<bool> {
        if self
            .uow
            .users()
            .find_by_email(SUPERADMIN_EMAIL)
            .await?
            .is_some()
        {
            tracing::info!("Superadmin ya existe, saltando...");
            return Ok(false);
        }

        let (role, _) = find_or_create_role(self.uow.as_ref(), RoleName::Superadmin).await?;

        let superadmin = tokio::task::spawn_blocking(|| {
            User::create(UserData {
                first_name: SUPERADMIN_FIRST_NAME.to_string(),
                last_name: SUPERADMIN_LAST_NAME.to_string(),
                email: SUPERADMIN_EMAIL.to_string(),
                password: SUPERADMIN_TEMP_PASSWORD.to_string(),
                national_id: None,
                is_google_account: false,
            })
        })
        .await
        .map_err(|e| AppError::internal(format!("Password hashing task failed: {}", e)))??;

        let batch = InsertBatch {
            assignments: vec![UserRoleAssignment::new(superadmin.id(), role.id())],
            users: vec![superadmin],
            ..Default::default()
        };
        self.uow.insert_batch(&batch).await?;

        tracing::info!("Superadmin creado: {}", SUPERADMIN_EMAIL);
        Ok(true)
    }
}

/// Build every record of one row. The national ID doubles as the initial password.
fn build_member(
    row: &CsvRow,
    required: RequiredFields,
    email: String,
    role_id: Uuid,
) -> DomainResult<Member> {
    let user = User::create(UserData {
        first_name: required.first_names.clone(),
        last_name: required.last_names.clone(),
        email,
        password: required.national_id.clone(),
        national_id: Some(required.national_id.clone()),
        is_google_account: false,
    })?;

    let profile = UserProfile::make(user.id(), profile_data(row, &required))?;
    let assignment = UserRoleAssignment::new(user.id(), role_id);
    let guardians = guardians(row, user.id())?;

    Ok(Member {
        user,
        profile,
        assignment,
        guardians,
    })
}

fn profile_data(row: &CsvRow, required: &RequiredFields) -> UserProfileData {
    UserProfileData {
        registration_date: parsing::parse_timestamp(row.timestamp.as_deref()),
        last_names: Some(required.last_names.clone()),
        first_names: Some(required.first_names.clone()),
        gender: parsing::normalize_gender(row.gender.as_deref()),
        age: parsing::parse_integer(row.age.as_deref()),
        birth_date: parsing::parse_date(row.birth_date.as_deref()),
        status: parsing::normalize_status(row.status.as_deref()),
        alias: parsing::text(row.alias.as_deref()),
        has_uniform: parsing::parse_bool(row.has_uniform.as_deref()),
        shirt_size: parsing::text(row.shirt_size.as_deref()),
        pants_size: parsing::text(row.pants_size.as_deref()),
        shoe_size: parsing::text(row.shoe_size.as_deref()),
        height_meters: parsing::parse_decimal(row.height_meters.as_deref()),
        weight_kg: parsing::parse_decimal(row.weight_kg.as_deref()),
        health_insurance: parsing::text(row.health_insurance.as_deref()),
        blood_type: parsing::text(row.blood_type.as_deref()),
        allergies: parsing::text(row.allergies.as_deref()),
        disability_or_disorder: parsing::text(row.disability_or_disorder.as_deref()),
        enrollment_date: parsing::parse_date(row.enrollment_date.as_deref()),
        current_residence: parsing::text(row.current_residence.as_deref()),
        professional_goal: parsing::text(row.professional_goal.as_deref()),
        favorite_hero: parsing::text(row.favorite_hero.as_deref()),
    }
}

/// Zero, one or two contacts, depending on which name cells are filled.
fn guardians(row: &CsvRow, user_id: Uuid) -> DomainResult<Vec<Guardian>> {
    let mut guardians = Vec::with_capacity(2);

    if let Some(full_name) = parsing::text(row.guardian_name.as_deref()) {
        guardians.push(Guardian::make(GuardianData {
            user_id,
            full_name,
            phone: parsing::text(row.guardian_phone.as_deref()),
            email: parsing::text(row.guardian_email.as_deref()),
            contact_type: Some(CONTACT_TYPE_PRIMARY.to_string()),
        })?);
    }

    if let Some(full_name) = parsing::text(row.secondary_contact_name.as_deref()) {
        guardians.push(Guardian::make(GuardianData {
            user_id,
            full_name,
            phone: parsing::text(row.secondary_contact_phone.as_deref()),
            email: None,
            contact_type: Some(CONTACT_TYPE_SECONDARY.to_string()),
        })?);
    }

    Ok(guardians)
}
