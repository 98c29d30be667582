use crate::collection::Collection;
use crate::document::Document;
use crate::types::DocumentId;
use bson::{Bson, Document as BsonDocument};
use std::sync::Arc;

// Safety limits to prevent resource abuse
const MAX_PATH_DEPTH: usize = 32;
pub const MAX_LIMIT: usize = 10_000;

/// Filter predicate over a document's fields. The read path only ever needs
/// match-all and field equality; equality is numerically lenient across
/// integer widths the way BSON comparisons are expected to behave.
#[derive(Debug, Clone)]
pub enum Filter {
    True,
    Eq { path: String, value: Bson },
}

/// Options for `find_docs`.
///
/// Semantics:
/// - Results are returned in the collection's natural (insertion) order.
/// - Results are sliced by `skip`/`limit` with an internal maximum of `MAX_LIMIT`.
#[derive(Debug, Clone, Default)]
pub struct FindOptions {
    pub skip: Option<usize>,
    pub limit: Option<usize>,
}

/// A forward-only cursor over query results. Holds the matching ids and
/// fetches documents from the collection as it advances.
#[derive(Clone)]
pub struct Cursor {
    collection: Arc<Collection>,
    ids: Vec<DocumentId>,
    pos: usize,
}

impl Cursor {
    pub fn advance(&mut self) -> Option<Document> {
        if self.pos >= self.ids.len() {
            return None;
        }
        let id = self.ids[self.pos].clone();
        self.pos += 1;
        self.collection.find_document(&id)
    }

    #[must_use]
    pub fn to_vec(mut self) -> Vec<Document> {
        let mut out = Vec::with_capacity(self.ids.len());
        while let Some(d) = self.advance() {
            out.push(d);
        }
        out
    }
}

impl Iterator for Cursor {
    type Item = Document;
    fn next(&mut self) -> Option<Self::Item> {
        self.advance()
    }
}

/// Selects the slice `[skip, skip+limit)` of the filtered set in natural order.
/// A skip beyond the match count yields an empty cursor, not an error.
pub fn find_docs(col: &Arc<Collection>, filter: &Filter, opts: &FindOptions) -> Cursor {
    let mut ids: Vec<DocumentId> = col.list_ids();
    ids.retain(|id| col.find_document(id).is_some_and(|d| eval_filter(&d.data, filter)));
    let skip = opts.skip.unwrap_or(0);
    let limit = opts.limit.unwrap_or(usize::MAX).min(MAX_LIMIT);
    let end = skip.saturating_add(limit).min(ids.len());
    let sliced: Vec<_> = if skip >= ids.len() { Vec::new() } else { ids[skip..end].to_vec() };
    Cursor { collection: col.clone(), ids: sliced, pos: 0 }
}

pub fn count_docs(col: &Arc<Collection>, filter: &Filter) -> usize {
    col.list_ids()
        .into_iter()
        .filter_map(|id| col.find_document(&id))
        .filter(|d| eval_filter(&d.data, filter))
        .count()
}

#[must_use]
pub fn eval_filter(doc: &BsonDocument, f: &Filter) -> bool {
    match f {
        Filter::True => true,
        Filter::Eq { path, value } => {
            get_path(doc, path).is_some_and(|v| bson_equal(v, value))
        }
    }
}

fn get_path<'a>(doc: &'a BsonDocument, path: &str) -> Option<&'a Bson> {
    let mut iter = path.split('.');
    let first = iter.next()?;
    let mut depth = 1usize;
    let mut cur: Option<&Bson> = doc.get(first);
    for part in iter {
        depth += 1;
        if depth > MAX_PATH_DEPTH {
            return None;
        }
        match cur {
            Some(Bson::Document(d)) => {
                cur = d.get(part);
            }
            _ => return None,
        }
    }
    cur
}

#[allow(clippy::float_cmp, clippy::cast_precision_loss)]
fn bson_equal(a: &Bson, b: &Bson) -> bool {
    match (a, b) {
        (Bson::Int32(x), Bson::Int64(y)) => i64::from(*x) == *y,
        (Bson::Int64(x), Bson::Int32(y)) => *x == i64::from(*y),
        (Bson::Int32(x), Bson::Double(y)) => f64::from(*x) == *y,
        (Bson::Double(x), Bson::Int32(y)) => *x == f64::from(*y),
        (Bson::Int64(x), Bson::Double(y)) => (*x as f64) == *y,
        (Bson::Double(x), Bson::Int64(y)) => *x == (*y as f64),
        _ => a == b,
    }
}
