//! Directory seeding.
//!
//! DESIGN
//! ======
//! Each roster entry is upserted on its own, keyed on `id`, so one bad
//! record is logged and skipped without aborting the batch. After the batch
//! the whole table is re-read in id order and returned for display. Only a
//! failed re-read is fatal.

use backend::records::{LAWYERS_TABLE, Lawyer};
use backend::{Backend, BackendError, Select, select_as, to_row};
use tracing::{info, warn};

#[derive(Debug)]
pub enum RecordOutcome {
    Upserted,
    Failed(BackendError),
}

#[derive(Debug)]
pub struct SeedRecord {
    pub id: i64,
    pub name: String,
    pub outcome: RecordOutcome,
}

#[derive(Debug)]
pub struct SeedReport {
    pub records: Vec<SeedRecord>,
    pub table: Vec<Lawyer>,
}

impl SeedReport {
    #[must_use]
    pub fn failed(&self) -> usize {
        self.records.iter().filter(|r| matches!(r.outcome, RecordOutcome::Failed(_))).count()
    }

    #[must_use]
    pub fn succeeded(&self) -> usize {
        self.records.len() - self.failed()
    }

    #[must_use]
    pub fn render(&self) -> Vec<String> {
        let mut lines = Vec::with_capacity(self.records.len() + self.table.len() + 3);
        for record in &self.records {
            match &record.outcome {
                RecordOutcome::Upserted => lines.push(format!("  ok    {:>4}  {}", record.id, record.name)),
                RecordOutcome::Failed(e) => {
                    lines.push(format!("  FAIL  {:>4}  {}: {e}", record.id, record.name));
                }
            }
        }
        lines.push(format!("{} upserted, {} failed", self.succeeded(), self.failed()));
        lines.push(format!("{LAWYERS_TABLE} now holds {} row(s):", self.table.len()));
        for lawyer in &self.table {
            lines.push(format!(
                "  {:>4}  {:<24} {:<10} {}",
                lawyer.id,
                lawyer.name,
                lawyer.status.as_str(),
                lawyer.referral_code
            ));
        }
        lines
    }
}

async fn upsert_lawyer(backend: &dyn Backend, lawyer: &Lawyer) -> Result<(), BackendError> {
    backend.upsert(LAWYERS_TABLE, vec![to_row(lawyer)?], "id").await?;
    Ok(())
}

/// Upsert every roster entry, then read back the full table.
///
/// # Errors
///
/// Returns the backend error only when the final table read fails.
pub async fn seed_directory(backend: &dyn Backend, roster: &[Lawyer]) -> Result<SeedReport, BackendError> {
    let mut records = Vec::with_capacity(roster.len());
    for lawyer in roster {
        let outcome = match upsert_lawyer(backend, lawyer).await {
            Ok(()) => {
                info!(id = lawyer.id, name = %lawyer.name, "lawyer upserted");
                RecordOutcome::Upserted
            }
            Err(e) => {
                warn!(id = lawyer.id, name = %lawyer.name, kind = e.kind.as_str(), code = ?e.code, error = %e, "lawyer upsert failed");
                RecordOutcome::Failed(e)
            }
        };
        records.push(SeedRecord { id: lawyer.id, name: lawyer.name.clone(), outcome });
    }

    let table = select_as::<Lawyer>(backend, &Select::from(LAWYERS_TABLE).order_by("id", true)).await?;
    Ok(SeedReport { records, table })
}

#[cfg(test)]
#[path = "seed_test.rs"]
mod tests;
