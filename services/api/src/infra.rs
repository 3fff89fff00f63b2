use creator_match::billing::{BillingId, BillingRecord, BillingRepository, BillingRepositoryError};
use creator_match::matching::{CreatorProfile, CreatorRepository, CreatorRoster, RepositoryError};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::io::Cursor;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, RwLock};
use tracing::info;

use creator_match::error::AppError;

const DEMO_ROSTER: &str = include_str!("../data/demo_creators.json");

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Roster held in process memory; reads hand out a snapshot.
#[derive(Default, Clone)]
pub(crate) struct InMemoryCreatorRepository {
    creators: Arc<RwLock<Vec<CreatorProfile>>>,
}

impl InMemoryCreatorRepository {
    pub(crate) fn new(creators: Vec<CreatorProfile>) -> Self {
        Self {
            creators: Arc::new(RwLock::new(creators)),
        }
    }
}

impl CreatorRepository for InMemoryCreatorRepository {
    fn all(&self) -> Result<Vec<CreatorProfile>, RepositoryError> {
        let guard = self
            .creators
            .read()
            .map_err(|_| RepositoryError::Unavailable("roster lock poisoned".to_string()))?;
        Ok(guard.clone())
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryBillingRepository {
    records: Arc<Mutex<HashMap<BillingId, BillingRecord>>>,
}

impl BillingRepository for InMemoryBillingRepository {
    fn insert(&self, record: BillingRecord) -> Result<BillingRecord, BillingRepositoryError> {
        let mut guard = self.records.lock().map_err(|_| poisoned())?;
        if guard.contains_key(&record.id) {
            return Err(BillingRepositoryError::Conflict(record.id));
        }
        guard.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    fn update(&self, record: BillingRecord) -> Result<(), BillingRepositoryError> {
        let mut guard = self.records.lock().map_err(|_| poisoned())?;
        if guard.contains_key(&record.id) {
            guard.insert(record.id.clone(), record);
            Ok(())
        } else {
            Err(BillingRepositoryError::NotFound(record.id))
        }
    }

    fn fetch(&self, id: &BillingId) -> Result<Option<BillingRecord>, BillingRepositoryError> {
        let guard = self.records.lock().map_err(|_| poisoned())?;
        Ok(guard.get(id).cloned())
    }

    fn all(&self) -> Result<Vec<BillingRecord>, BillingRepositoryError> {
        let guard = self.records.lock().map_err(|_| poisoned())?;
        Ok(guard.values().cloned().collect())
    }
}

fn poisoned() -> BillingRepositoryError {
    BillingRepositoryError::Unavailable("billing store lock poisoned".to_string())
}

/// Built-in roster used when no seed file is configured.
pub(crate) fn demo_roster() -> Result<Vec<CreatorProfile>, AppError> {
    Ok(CreatorRoster::from_reader(Cursor::new(DEMO_ROSTER))?)
}

pub(crate) fn load_roster(path: Option<&Path>) -> Result<Vec<CreatorProfile>, AppError> {
    match path {
        Some(path) => {
            let creators = CreatorRoster::from_path(path)?;
            info!(path = %path.display(), creators = creators.len(), "loaded creator roster");
            Ok(creators)
        }
        None => {
            let creators = demo_roster()?;
            info!(creators = creators.len(), "using built-in demo roster");
            Ok(creators)
        }
    }
}
