//! Application state with repository-based storage.
//!
//! This module defines the shared application state that is passed to all
//! request handlers. It holds one repository trait object per entity kind
//! and supports different storage backends via feature flags.

use std::sync::Arc;

use gremio_core::curriculum::{
    AcademicDegree, Institution, Profession, Study, StudyType, WorkExperience,
};
use gremio_core::table::{TableEntity, TableRepository};

use crate::config::Config;

/// Shared application state.
///
/// This is cloned for each request handler and contains one repository
/// trait object per entity kind.
#[derive(Clone)]
pub struct AppState {
    pub studies: Arc<dyn TableRepository<Study>>,
    pub institutions: Arc<dyn TableRepository<Institution>>,
    pub professions: Arc<dyn TableRepository<Profession>>,
    pub degrees: Arc<dyn TableRepository<AcademicDegree>>,
    pub study_types: Arc<dyn TableRepository<StudyType>>,
    pub experiences: Arc<dyn TableRepository<WorkExperience>>,
}

/// Selects the repository for one entity kind out of [`AppState`].
///
/// Generic handlers bound on `AppState: HasTable<E>` resolve their storage
/// through this trait instead of naming a field.
pub trait HasTable<E: TableEntity> {
    fn table(&self) -> &Arc<dyn TableRepository<E>>;
}

macro_rules! has_table {
    ($entity:ty, $field:ident) => {
        impl HasTable<$entity> for AppState {
            fn table(&self) -> &Arc<dyn TableRepository<$entity>> {
                &self.$field
            }
        }
    };
}

has_table!(Study, studies);
has_table!(Institution, institutions);
has_table!(Profession, professions);
has_table!(AcademicDegree, degrees);
has_table!(StudyType, study_types);
has_table!(WorkExperience, experiences);

#[cfg(any(feature = "inmemory", test))]
impl AppState {
    /// Creates state backed by empty in-memory tables.
    pub fn in_memory() -> Self {
        use crate::storage::memory::MemoryTable;

        Self {
            studies: Arc::new(MemoryTable::new()),
            institutions: Arc::new(MemoryTable::new()),
            professions: Arc::new(MemoryTable::new()),
            degrees: Arc::new(MemoryTable::new()),
            study_types: Arc::new(MemoryTable::new()),
            experiences: Arc::new(MemoryTable::new()),
        }
    }
}

#[cfg(feature = "inmemory")]
impl AppState {
    /// Creates a new AppState with the in-memory storage backend.
    pub async fn new(_config: &Config) -> anyhow::Result<Self> {
        tracing::info!("Using in-memory storage backend");
        Ok(Self::in_memory())
    }
}

#[cfg(feature = "dynamodb")]
impl AppState {
    /// Creates a new AppState with the DynamoDB storage backend.
    ///
    /// Credentials and region come from the usual AWS environment; all six
    /// entity kinds share one table.
    pub async fn new(config: &Config) -> anyhow::Result<Self> {
        use aws_config::BehaviorVersion;
        use aws_sdk_dynamodb::Client;

        use crate::storage::dynamodb::DynamoTable;

        let aws_config = aws_config::load_defaults(BehaviorVersion::latest()).await;
        let client = Client::new(&aws_config);

        tracing::info!(table = %config.table_name, "Using DynamoDB storage backend");

        macro_rules! table {
            () => {
                Arc::new(
                    DynamoTable::new(client.clone(), &config.table_name)
                        .with_scan_page_size(config.scan_page_size),
                )
            };
        }

        Ok(Self {
            studies: table!(),
            institutions: table!(),
            professions: table!(),
            degrees: table!(),
            study_types: table!(),
            experiences: table!(),
        })
    }
}

#[cfg(test)]
impl Default for AppState {
    fn default() -> Self {
        Self::in_memory()
    }
}
