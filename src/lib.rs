pub mod auth;
pub mod collection;
pub mod config;
pub mod document;
pub mod errors;
pub mod http;
pub mod logger;
pub mod model;
pub mod query;
pub mod repo;
pub mod response;
pub mod service;
pub mod store;
pub mod types;

use crate::collection::Collection;
use crate::repo::{AcademicSessionRepository, StudentRepository};
use crate::service::{StudentMutationService, StudentQueryService};
use crate::store::Store;
use std::sync::Arc;

pub const STUDENTS: &str = "students";
pub const ACADEMIC_SESSIONS: &str = "academic_sessions";

/// The assembled record store: one `Store` with the two well-known
/// collections created up front, and typed accessors over them.
pub struct Registry {
    store: Arc<Store>,
    students: Arc<Collection>,
    academic_sessions: Arc<Collection>,
}

impl Registry {
    pub fn new() -> Self {
        let store = Arc::new(Store::new());
        let students = store.create_collection(STUDENTS);
        let academic_sessions = store.create_collection(ACADEMIC_SESSIONS);
        Registry { store, students, academic_sessions }
    }

    pub fn store(&self) -> &Arc<Store> {
        &self.store
    }

    pub fn students(&self) -> StudentRepository {
        StudentRepository::new(self.students.clone())
    }

    pub fn academic_sessions(&self) -> AcademicSessionRepository {
        AcademicSessionRepository::new(self.academic_sessions.clone())
    }

    pub fn query_service(&self) -> StudentQueryService {
        StudentQueryService::new(self.students())
    }

    pub fn mutation_service(&self) -> StudentMutationService {
        StudentMutationService::new(self.students(), self.academic_sessions())
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

/// Initializes the logging system.
///
/// This function should be called before any other operations.
pub fn init() -> Result<(), Box<dyn std::error::Error>> {
    logger::init()?;
    Ok(())
}
