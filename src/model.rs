use crate::document::Document;
use crate::errors::ApiError;
use crate::types::DocumentId;
use bson::{doc, Bson, Document as BsonDocument};
use serde::{Deserialize, Serialize};

/// An academic session a student can be enrolled under.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AcademicSession {
    pub id: DocumentId,
    pub name: String,
}

impl AcademicSession {
    pub fn to_data(&self) -> BsonDocument {
        doc! { "name": self.name.clone() }
    }

    pub fn from_document(doc: &Document) -> Result<Self, ApiError> {
        Ok(Self { id: doc.id.clone(), name: req_str(&doc.data, "name")? })
    }

    fn to_embedded(&self) -> BsonDocument {
        doc! { "id": self.id.to_string(), "name": self.name.clone() }
    }

    fn from_embedded(data: &BsonDocument) -> Result<Self, ApiError> {
        Ok(Self { id: req_id(data, "id")?, name: req_str(data, "name")? })
    }
}

/// A student's academic-session field, in the two forms it is written in:
/// a bare reference id (as persisted by create) or the resolved session
/// entity (as persisted by the update path's resolution step). Serialized
/// untagged so the JSON surface is a plain id string or a session object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SessionRef {
    Session(AcademicSession),
    Id(DocumentId),
}

impl SessionRef {
    pub fn to_bson(&self) -> Bson {
        match self {
            Self::Id(id) => Bson::String(id.to_string()),
            Self::Session(session) => Bson::Document(session.to_embedded()),
        }
    }

    pub fn from_bson(value: &Bson) -> Result<Self, ApiError> {
        match value {
            Bson::String(s) => Ok(Self::Id(parse_id(s)?)),
            Bson::Document(d) => Ok(Self::Session(AcademicSession::from_embedded(d)?)),
            _ => Err(ApiError::Decode(
                "academic_session is neither a reference id nor a session".into(),
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    pub id: DocumentId,
    pub firstname: String,
    pub othername: Option<String>,
    pub lastname: String,
    pub matric_no: i64,
    pub level: i32,
    pub department: i32,
    pub academic_session: SessionRef,
    pub chapel_seat_number: i32,
    pub chapel_group_number: i32,
}

impl Student {
    /// The stored payload. The opaque id lives on the enclosing `Document`,
    /// not in the payload.
    pub fn to_data(&self) -> BsonDocument {
        let mut data = doc! {
            "firstname": self.firstname.clone(),
            "lastname": self.lastname.clone(),
            "matric_no": self.matric_no,
            "level": self.level,
            "department": self.department,
            "academic_session": self.academic_session.to_bson(),
            "chapel_seat_number": self.chapel_seat_number,
            "chapel_group_number": self.chapel_group_number,
        };
        if let Some(other) = &self.othername {
            data.insert("othername", other.clone());
        }
        data
    }

    pub fn from_document(doc: &Document) -> Result<Self, ApiError> {
        let data = &doc.data;
        let session = data
            .get("academic_session")
            .ok_or_else(|| ApiError::Decode("missing field `academic_session`".into()))?;
        Ok(Self {
            id: doc.id.clone(),
            firstname: req_str(data, "firstname")?,
            othername: opt_str(data, "othername"),
            lastname: req_str(data, "lastname")?,
            matric_no: req_i64(data, "matric_no")?,
            level: req_i32(data, "level")?,
            department: req_i32(data, "department")?,
            academic_session: SessionRef::from_bson(session)?,
            chapel_seat_number: req_i32(data, "chapel_seat_number")?,
            chapel_group_number: req_i32(data, "chapel_group_number")?,
        })
    }

    /// Applies a sparse update: fields absent from the patch keep their
    /// current value. The academic-session replacement, when one was
    /// resolved, is passed in separately; `None` leaves it untouched.
    pub fn apply_update(&self, patch: &UpdateStudent, session: Option<SessionRef>) -> Student {
        Student {
            id: self.id.clone(),
            firstname: patch.firstname.clone().unwrap_or_else(|| self.firstname.clone()),
            othername: patch.othername.clone().or_else(|| self.othername.clone()),
            lastname: patch.lastname.clone().unwrap_or_else(|| self.lastname.clone()),
            matric_no: patch.matric_no.unwrap_or(self.matric_no),
            level: patch.level.unwrap_or(self.level),
            department: patch.department.unwrap_or(self.department),
            academic_session: session.unwrap_or_else(|| self.academic_session.clone()),
            chapel_seat_number: patch.chapel_seat_number.unwrap_or(self.chapel_seat_number),
            chapel_group_number: patch.chapel_group_number.unwrap_or(self.chapel_group_number),
        }
    }
}

/// Creation payload. Everything is required except `othername`. The
/// academic-session reference is persisted as given, without resolution.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateStudent {
    pub firstname: String,
    #[serde(default)]
    pub othername: Option<String>,
    pub lastname: String,
    pub matric_no: i64,
    pub level: i32,
    pub department: i32,
    pub academic_session: DocumentId,
    pub chapel_seat_number: i32,
    pub chapel_group_number: i32,
}

impl CreateStudent {
    pub fn to_data(&self) -> BsonDocument {
        let mut data = doc! {
            "firstname": self.firstname.clone(),
            "lastname": self.lastname.clone(),
            "matric_no": self.matric_no,
            "level": self.level,
            "department": self.department,
            "academic_session": SessionRef::Id(self.academic_session.clone()).to_bson(),
            "chapel_seat_number": self.chapel_seat_number,
            "chapel_group_number": self.chapel_group_number,
        };
        if let Some(other) = &self.othername {
            data.insert("othername", other.clone());
        }
        data
    }
}

/// Sparse update payload. `academic_session` carries a reference id that the
/// mutation service resolves before it is applied; it is never an embedded
/// session here.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateStudent {
    #[serde(default)]
    pub firstname: Option<String>,
    #[serde(default)]
    pub othername: Option<String>,
    #[serde(default)]
    pub lastname: Option<String>,
    #[serde(default)]
    pub matric_no: Option<i64>,
    #[serde(default)]
    pub level: Option<i32>,
    #[serde(default)]
    pub department: Option<i32>,
    #[serde(default)]
    pub academic_session: Option<DocumentId>,
    #[serde(default)]
    pub chapel_seat_number: Option<i32>,
    #[serde(default)]
    pub chapel_group_number: Option<i32>,
}

fn parse_id(s: &str) -> Result<DocumentId, ApiError> {
    s.parse::<DocumentId>()
        .map_err(|_| ApiError::Decode(format!("`{s}` is not a valid document id")))
}

fn req_id(data: &BsonDocument, key: &str) -> Result<DocumentId, ApiError> {
    parse_id(&req_str(data, key)?)
}

fn req_str(data: &BsonDocument, key: &str) -> Result<String, ApiError> {
    match data.get(key) {
        Some(Bson::String(s)) => Ok(s.clone()),
        _ => Err(ApiError::Decode(format!("missing or non-string field `{key}`"))),
    }
}

fn opt_str(data: &BsonDocument, key: &str) -> Option<String> {
    match data.get(key) {
        Some(Bson::String(s)) => Some(s.clone()),
        _ => None,
    }
}

fn req_i64(data: &BsonDocument, key: &str) -> Result<i64, ApiError> {
    match data.get(key) {
        Some(Bson::Int64(v)) => Ok(*v),
        Some(Bson::Int32(v)) => Ok(i64::from(*v)),
        _ => Err(ApiError::Decode(format!("missing or non-integer field `{key}`"))),
    }
}

fn req_i32(data: &BsonDocument, key: &str) -> Result<i32, ApiError> {
    match data.get(key) {
        Some(Bson::Int32(v)) => Ok(*v),
        Some(Bson::Int64(v)) => i32::try_from(*v)
            .map_err(|_| ApiError::Decode(format!("field `{key}` out of range"))),
        _ => Err(ApiError::Decode(format!("missing or non-integer field `{key}`"))),
    }
}
