//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. It
//! holds the hosted-backend client behind the `Backend` trait so handlers
//! run unchanged against the REST client or the in-memory backend.

use std::sync::Arc;

use backend::Backend;

/// Shared application state, injected into Axum handlers via State extractor.
/// Clone is required by Axum; the backend is Arc-wrapped.
#[derive(Clone)]
pub struct AppState {
    pub backend: Arc<dyn Backend>,
}

impl AppState {
    #[must_use]
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self { backend }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================

#[cfg(test)]
pub mod test_helpers {
    use super::*;
    use backend::records::{LAWYERS_TABLE, Lawyer, LawyerStatus};
    use backend::{MemoryBackend, to_row};

    /// Create a test `AppState` over an empty in-memory site schema.
    /// The backend handle is returned for seeding and inspection.
    #[must_use]
    pub fn test_app_state() -> (AppState, Arc<MemoryBackend>) {
        let memory = Arc::new(MemoryBackend::with_site_schema());
        (AppState::new(memory.clone()), memory)
    }

    /// Create a dummy `Lawyer` for testing.
    #[must_use]
    pub fn dummy_lawyer(id: i64, status: LawyerStatus) -> Lawyer {
        Lawyer {
            id,
            name: format!("Lawyer {id}"),
            email: format!("lawyer{id}@example.com"),
            phone: "+1 555 0100".into(),
            title: "Associate".into(),
            practice_areas: vec!["Corporate Law".into()],
            bio: "Test biography.".into(),
            years_experience: 5,
            status,
            image_url: None,
            referral_code: format!("REF{id:03}"),
        }
    }

    /// Insert lawyers straight into the memory backend.
    pub async fn seed_lawyers(memory: &MemoryBackend, lawyers: &[Lawyer]) {
        let rows = lawyers.iter().map(|l| to_row(l).unwrap()).collect();
        memory.insert(LAWYERS_TABLE, rows).await.unwrap();
    }
}
