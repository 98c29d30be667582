use crate::collection::Collection;
use crate::document::Document;
use crate::errors::ApiError;
use crate::model::{AcademicSession, CreateStudent, Student};
use crate::query::{self, Filter, FindOptions};
use crate::types::DocumentId;
use bson::Bson;
use std::sync::Arc;

fn level_filter(level: Option<i32>) -> Filter {
    match level {
        Some(level) => Filter::Eq { path: "level".into(), value: Bson::Int32(level) },
        None => Filter::True,
    }
}

/// Typed access to the students collection.
#[derive(Clone)]
pub struct StudentRepository {
    collection: Arc<Collection>,
}

impl StudentRepository {
    pub fn new(collection: Arc<Collection>) -> Self {
        Self { collection }
    }

    pub fn get_total_student_count(&self) -> usize {
        query::count_docs(&self.collection, &Filter::True)
    }

    pub fn get_total_student_count_by_level(&self, level: i32) -> usize {
        query::count_docs(&self.collection, &level_filter(Some(level)))
    }

    /// The page slice `[offset, offset+limit)` of students matching the
    /// optional level filter, in the store's natural order.
    pub fn get_all_students(
        &self,
        offset: usize,
        limit: usize,
        level: Option<i32>,
    ) -> Result<Vec<Student>, ApiError> {
        let opts = FindOptions { skip: Some(offset), limit: Some(limit) };
        query::find_docs(&self.collection, &level_filter(level), &opts)
            .map(|doc| Student::from_document(&doc))
            .collect()
    }

    pub fn get_student_by_id(&self, id: &DocumentId) -> Result<Option<Student>, ApiError> {
        self.collection.find_document(id).map(|doc| Student::from_document(&doc)).transpose()
    }

    /// Matriculation numbers are unique, so at most one document matches;
    /// the first in natural order is taken.
    pub fn get_student_by_matric_no(&self, matric_no: i64) -> Result<Option<Student>, ApiError> {
        let filter = Filter::Eq { path: "matric_no".into(), value: Bson::Int64(matric_no) };
        let opts = FindOptions { skip: None, limit: Some(1) };
        query::find_docs(&self.collection, &filter, &opts)
            .next()
            .map(|doc| Student::from_document(&doc))
            .transpose()
    }

    /// Persists a new student as given and reads it back in full.
    pub fn create_student(&self, input: &CreateStudent) -> Result<Student, ApiError> {
        let id = self.collection.insert_document(Document::new(input.to_data()));
        self.get_student_by_id(&id)?
            .ok_or_else(|| ApiError::Store("created student missing on read-back".into()))
    }

    /// Writes back an already-applied update. The caller owns the partial
    /// merge; this layer only replaces the payload.
    pub fn update_student(&self, updated: &Student) -> Result<Student, ApiError> {
        let mut doc = self
            .collection
            .find_document(&updated.id)
            .ok_or_else(|| ApiError::NotFound("student does not exist".into()))?;
        doc.update(updated.to_data());
        if !self.collection.update_document(&updated.id, doc) {
            return Err(ApiError::NotFound("student does not exist".into()));
        }
        Ok(updated.clone())
    }
}

/// Typed access to the academic-sessions collection.
#[derive(Clone)]
pub struct AcademicSessionRepository {
    collection: Arc<Collection>,
}

impl AcademicSessionRepository {
    pub fn new(collection: Arc<Collection>) -> Self {
        Self { collection }
    }

    pub fn create_academic_session(&self, name: &str) -> Result<AcademicSession, ApiError> {
        let session = AcademicSession { id: DocumentId::new(), name: name.to_string() };
        let mut doc = Document::new(session.to_data());
        doc.id = session.id.clone();
        self.collection.insert_document(doc);
        Ok(session)
    }

    pub fn get_academic_session_by_id(
        &self,
        id: &DocumentId,
    ) -> Result<Option<AcademicSession>, ApiError> {
        self.collection
            .find_document(id)
            .map(|doc| AcademicSession::from_document(&doc))
            .transpose()
    }
}
