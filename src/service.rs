use crate::errors::ApiError;
use crate::model::{CreateStudent, SessionRef, Student, UpdateStudent};
use crate::repo::{AcademicSessionRepository, StudentRepository};
use crate::types::DocumentId;
use serde::Serialize;

/// Pagination envelope derived from the filtered total; never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub page_number: u64,
    pub per_pages: u64,
    pub total_pages: u64,
}

impl Pagination {
    /// `total_pages = ceil(total / per_page)`; zero matches mean zero pages.
    pub fn compute(page: u64, per_page: u64, total: usize) -> Self {
        let total = total as u64;
        let total_pages = if per_page == 0 { 0 } else { total.div_ceil(per_page) };
        Pagination { page_number: page, per_pages: per_page, total_pages }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StudentPage {
    pub students: Vec<Student>,
    pub pagination: Pagination,
}

/// Read path: listing with pagination, and single-record lookups.
#[derive(Clone)]
pub struct StudentQueryService {
    students: StudentRepository,
}

impl StudentQueryService {
    pub fn new(students: StudentRepository) -> Self {
        Self { students }
    }

    /// Issues the total-count query and the page query as two independent
    /// tasks and waits for both. The pair is a join, not a race: neither
    /// result is used until both complete, and both use the same filter.
    pub async fn list_students(
        &self,
        page: u64,
        per_page: u64,
        level: Option<i32>,
    ) -> Result<StudentPage, ApiError> {
        let offset = usize::try_from(page.saturating_sub(1).saturating_mul(per_page))
            .unwrap_or(usize::MAX);
        let limit = usize::try_from(per_page).unwrap_or(usize::MAX);

        let count_repo = self.students.clone();
        let count_task = tokio::task::spawn_blocking(move || match level {
            Some(level) => count_repo.get_total_student_count_by_level(level),
            None => count_repo.get_total_student_count(),
        });
        let page_repo = self.students.clone();
        let page_task =
            tokio::task::spawn_blocking(move || page_repo.get_all_students(offset, limit, level));

        let (total, students) = tokio::try_join!(count_task, page_task)
            .map_err(|e| ApiError::Store(format!("listing task failed: {e}")))?;
        let students = students?;

        log::debug!(
            "listed students page={page} per_page={per_page} level={level:?} total={total}"
        );
        Ok(StudentPage { students, pagination: Pagination::compute(page, per_page, total) })
    }

    pub async fn get_student_by_id(&self, id: &DocumentId) -> Result<Student, ApiError> {
        self.students
            .get_student_by_id(id)?
            .ok_or_else(|| ApiError::NotFound("student does not exist".into()))
    }

    pub async fn get_student_by_matric_no(&self, matric_no: i64) -> Result<Student, ApiError> {
        self.students
            .get_student_by_matric_no(matric_no)?
            .ok_or_else(|| ApiError::NotFound("student does not exist".into()))
    }
}

/// Write path: create, and the resolve-then-apply partial update pipeline.
#[derive(Clone)]
pub struct StudentMutationService {
    students: StudentRepository,
    sessions: AcademicSessionRepository,
}

impl StudentMutationService {
    pub fn new(students: StudentRepository, sessions: AcademicSessionRepository) -> Self {
        Self { students, sessions }
    }

    /// Persists the student as given. The academic-session reference is NOT
    /// resolved here; only the update path validates it. Matric-number
    /// uniqueness is the store's invariant, not pre-checked.
    pub async fn create_student(&self, input: CreateStudent) -> Result<Student, ApiError> {
        let student = self.students.create_student(&input)?;
        log::info!("created student matric_no={}", student.matric_no);
        Ok(student)
    }

    /// Fetch, resolve the session reference if one was supplied (failing
    /// closed without touching the student), then apply the sparse patch.
    pub async fn update_student(
        &self,
        id: &DocumentId,
        patch: UpdateStudent,
    ) -> Result<Student, ApiError> {
        let existing = self
            .students
            .get_student_by_id(id)?
            .ok_or_else(|| ApiError::NotFound("student does not exist".into()))?;

        let session = match &patch.academic_session {
            Some(session_id) => {
                let session = self
                    .sessions
                    .get_academic_session_by_id(session_id)?
                    .ok_or_else(|| {
                        ApiError::BadRequest("academic session does not exist".into())
                    })?;
                Some(SessionRef::Session(session))
            }
            None => None,
        };

        let updated = existing.apply_update(&patch, session);
        let student = self.students.update_student(&updated)?;
        log::info!("updated student id={id}");
        Ok(student)
    }
}
