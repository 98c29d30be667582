use crate::document::Document;
use crate::types::DocumentId;
use parking_lot::RwLock;
use std::collections::HashMap;

struct Inner {
    docs: HashMap<DocumentId, Document>,
    // Insertion order. Listing slices depend on this being stable across updates.
    order: Vec<DocumentId>,
}

/// A named set of documents. Interior-locked; callers never synchronize around it.
pub struct Collection {
    name: String,
    inner: RwLock<Inner>,
}

impl Collection {
    pub fn new(name: String) -> Self {
        Collection {
            name,
            inner: RwLock::new(Inner { docs: HashMap::new(), order: Vec::new() }),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn insert_document(&self, document: Document) -> DocumentId {
        let doc_id = document.id.clone();
        let mut inner = self.inner.write();
        if inner.docs.insert(doc_id.clone(), document).is_none() {
            inner.order.push(doc_id.clone());
        }
        doc_id
    }

    pub fn find_document(&self, id: &DocumentId) -> Option<Document> {
        self.inner.read().docs.get(id).cloned()
    }

    /// Replaces an existing document in place; its position in the natural
    /// order is unchanged. Returns false when the id is absent.
    pub fn update_document(&self, id: &DocumentId, new_document: Document) -> bool {
        let mut inner = self.inner.write();
        if inner.docs.contains_key(id) {
            inner.docs.insert(id.clone(), new_document);
            true
        } else {
            false
        }
    }

    /// All document ids in insertion order.
    pub fn list_ids(&self) -> Vec<DocumentId> {
        self.inner.read().order.clone()
    }

    pub fn len(&self) -> usize {
        self.inner.read().docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
