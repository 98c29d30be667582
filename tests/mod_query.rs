use bson::{doc, Bson};
use rollbook::collection::Collection;
use rollbook::document::Document;
use rollbook::query::{count_docs, eval_filter, find_docs, Filter, FindOptions};
use std::sync::Arc;

fn seeded(n: i64) -> Arc<Collection> {
    let col = Arc::new(Collection::new("qtest".into()));
    for i in 0..n {
        let level = if i % 2 == 0 { 200 } else { 300 };
        col.insert_document(Document::new(doc! {"seq": i, "level": level}));
    }
    col
}

fn seq_of(doc: &Document) -> i64 {
    match doc.data.get("seq") {
        Some(Bson::Int64(v)) => *v,
        other => panic!("unexpected seq {other:?}"),
    }
}

#[test]
fn filter_eq_and_leniency() {
    let d = Document::new(doc! {"level": 200_i32, "matric_no": 41_i64});
    assert!(eval_filter(&d.data, &Filter::Eq { path: "level".into(), value: Bson::Int64(200) }));
    assert!(eval_filter(&d.data, &Filter::Eq { path: "matric_no".into(), value: Bson::Int32(41) }));
    assert!(!eval_filter(&d.data, &Filter::Eq { path: "level".into(), value: Bson::Int32(300) }));
    assert!(!eval_filter(&d.data, &Filter::Eq { path: "missing".into(), value: Bson::Int32(1) }));
    assert!(eval_filter(&d.data, &Filter::True));
}

#[test]
fn natural_order_slice() {
    let col = seeded(10);
    let opts = FindOptions { skip: Some(3), limit: Some(4) };
    let docs = find_docs(&col, &Filter::True, &opts).to_vec();
    let seqs: Vec<i64> = docs.iter().map(seq_of).collect();
    assert_eq!(seqs, vec![3, 4, 5, 6]);
}

#[test]
fn skip_past_end_is_empty() {
    let col = seeded(5);
    let opts = FindOptions { skip: Some(50), limit: Some(10) };
    assert!(find_docs(&col, &Filter::True, &opts).to_vec().is_empty());
}

#[test]
fn filtered_count_and_page_agree() {
    let col = seeded(9);
    let filter = Filter::Eq { path: "level".into(), value: Bson::Int32(200) };
    let total = count_docs(&col, &filter);
    assert_eq!(total, 5);

    let opts = FindOptions { skip: Some(0), limit: Some(100) };
    let docs = find_docs(&col, &filter, &opts).to_vec();
    assert_eq!(docs.len(), total);
    for d in &docs {
        assert!(eval_filter(&d.data, &filter));
    }
}

#[test]
fn update_keeps_natural_order_position() {
    let col = seeded(3);
    let ids = col.list_ids();
    let mut doc = col.find_document(&ids[1]).unwrap();
    doc.update(doc! {"seq": 1_i64, "level": 999});
    assert!(col.update_document(&ids[1], doc));
    assert_eq!(col.list_ids(), ids);
    assert_eq!(col.len(), 3);
    assert!(!col.is_empty());
}
