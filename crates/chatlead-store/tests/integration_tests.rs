//! Integration tests for chatlead-store
//!
//! These tests drive the accumulator with the real extractor and verify
//! persistence across store reopen.

use chatlead_domain::traits::RecordStore;
use chatlead_domain::{ConversationId, Field, InboundMessage, RecordEdit};
use chatlead_extractor::{Extractor, ExtractorConfig};
use chatlead_store::{Accumulator, IngestOutcome, SharedStore, SqliteRecordStore};
use std::sync::Arc;

fn extractor() -> Extractor {
    Extractor::new(ExtractorConfig::default()).unwrap()
}

fn id(s: &str) -> ConversationId {
    ConversationId::new(s).unwrap()
}

fn open(path: &std::path::Path) -> SharedStore {
    Arc::new(SqliteRecordStore::new(path).unwrap())
}

#[test]
fn test_store_initialization() {
    let store = SqliteRecordStore::new(":memory:");
    assert!(store.is_ok(), "Store should initialize successfully");
}

#[test]
fn test_conversation_end_to_end() {
    let acc = Accumulator::new(extractor());
    let conv = id("573001234567@s.whatsapp.net");

    for text in [
        "Hola",
        "Me llamo Carlos Ruiz",
        "mi cédula es 1020304050",
        "quiero una Dominar 400",
    ] {
        acc.ingest(&InboundMessage::live(conv.clone(), text)).unwrap();
    }

    let record = acc.record(&conv).unwrap().unwrap();
    assert_eq!(record.get(Field::Name), Some("Carlos Ruiz"));
    assert_eq!(record.get(Field::DocumentId), Some("1020304050"));
    assert_eq!(record.get(Field::ProductModel), Some("Dominar 400"));
    assert!(acc.has_any_data(&conv).unwrap());
}

#[test]
fn test_greeting_only_conversation_has_no_data() {
    let acc = Accumulator::new(extractor());
    let conv = id("c1");
    let outcome = acc.ingest(&InboundMessage::live(conv.clone(), "Hola")).unwrap();
    assert_eq!(outcome, IngestOutcome::NoData);
    assert!(!acc.has_any_data(&conv).unwrap());
}

#[test]
fn test_history_then_live() {
    let acc = Accumulator::new(extractor());
    let conv = id("c1");
    let history = vec![
        InboundMessage::historical(conv.clone(), "soy Pedro").with_message_id("h1"),
        InboundMessage::historical(conv.clone(), "en realidad soy Juan").with_message_id("h2"),
    ];

    let record = acc.rebuild(&conv, &history).unwrap();
    assert_eq!(record.get(Field::Name), Some("Pedro"));

    // Redelivery of a history message is dropped
    let outcome = acc.ingest(&history[1]).unwrap();
    assert_eq!(outcome, IngestOutcome::Duplicate);

    acc.ingest(&InboundMessage::live(conv.clone(), "pedro@correo.com")).unwrap();
    let record = acc.record(&conv).unwrap().unwrap();
    assert_eq!(record.get(Field::Name), Some("Pedro"));
    assert_eq!(record.get(Field::Email), Some("pedro@correo.com"));
}

#[test]
fn test_records_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("chatlead.db");
    let conv = id("c1");

    {
        let acc = Accumulator::new(extractor()).with_store(open(&path));
        acc.ingest(&InboundMessage::live(conv.clone(), "Me llamo Ana Díaz").with_message_id("m1"))
            .unwrap();
        acc.apply_edit(&conv, &RecordEdit::new().set(Field::Campaign, "SALA"))
            .unwrap();
    }

    let acc = Accumulator::new(extractor()).with_store(open(&path));
    assert_eq!(acc.hydrate().unwrap(), 1);

    let record = acc.record(&conv).unwrap().unwrap();
    assert_eq!(record.get(Field::Name), Some("Ana Díaz"));
    assert_eq!(record.get(Field::Campaign), Some("SALA"));

    // Message ids are remembered across restarts
    let again = InboundMessage::live(conv.clone(), "Me llamo Ana Díaz").with_message_id("m1");
    assert_eq!(acc.ingest(&again).unwrap(), IngestOutcome::Duplicate);
}

#[test]
fn test_lazy_load_without_hydrate() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("chatlead.db");
    let conv = id("c1");

    let store = open(&path);
    store
        .save(&conv, &chatlead_domain::ExtractedRecord::new().with(Field::Name, "Ana"))
        .unwrap();

    let acc = Accumulator::new(extractor()).with_store(store);
    assert!(acc.is_empty());
    assert!(acc.has_any_data(&conv).unwrap());

    // First touch seeds the entry from the store, so fold keeps the stored name
    acc.ingest(&InboundMessage::live(conv.clone(), "soy Eva")).unwrap();
    assert_eq!(acc.record(&conv).unwrap().unwrap().get(Field::Name), Some("Ana"));
}

#[test]
fn test_edit_clear_is_persisted() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("chatlead.db");
    let conv = id("c1");

    let acc = Accumulator::new(extractor()).with_store(open(&path));
    acc.ingest(&InboundMessage::live(conv.clone(), "correo ana@example.com")).unwrap();
    acc.apply_edit(&conv, &RecordEdit::new().clear(Field::Email)).unwrap();

    let reopened = SqliteRecordStore::new(&path).unwrap();
    let stored = reopened.load(&conv).unwrap().unwrap();
    assert!(stored.get(Field::Email).is_none());
    assert!(!stored.has_any_data());
}

#[test]
fn test_concurrent_updates_same_conversation() {
    let acc = Arc::new(Accumulator::new(extractor()));
    let conv = id("shared");

    // One thread streams messages while another edits; every field ends up
    // with exactly one of the values that raced for it.
    std::thread::scope(|s| {
        let ingest = {
            let acc = Arc::clone(&acc);
            let conv = conv.clone();
            s.spawn(move || {
                for i in 0..200 {
                    let text = format!("mi correo es user{}@example.com", i);
                    acc.ingest(&InboundMessage::live(conv.clone(), text)).unwrap();
                }
            })
        };
        let edit = {
            let acc = Arc::clone(&acc);
            let conv = conv.clone();
            s.spawn(move || {
                for i in 0..200 {
                    let edit = RecordEdit::new().set(Field::Brand, format!("brand{}", i));
                    acc.apply_edit(&conv, &edit).unwrap();
                }
            })
        };
        ingest.join().unwrap();
        edit.join().unwrap();
    });

    let record = acc.record(&conv).unwrap().unwrap();
    assert_eq!(record.get(Field::Email), Some("user0@example.com"));
    assert_eq!(record.get(Field::Brand), Some("brand199"));
}

#[test]
fn test_conversations_update_in_parallel() {
    let acc = Arc::new(Accumulator::new(extractor()));

    std::thread::scope(|s| {
        for n in 0..8 {
            let acc = Arc::clone(&acc);
            s.spawn(move || {
                let conv = id(&format!("conv-{}", n));
                acc.ingest(&InboundMessage::live(conv.clone(), format!("soy cliente{}", n)))
                    .unwrap();
                acc.ingest(&InboundMessage::live(conv, "3001234567")).unwrap();
            });
        }
    });

    let ids = acc.conversation_ids().unwrap();
    assert_eq!(ids.len(), 8);
    for conv in ids {
        let record = acc.record(&conv).unwrap().unwrap();
        assert!(record.get(Field::Name).is_some());
        assert_eq!(record.get(Field::Phone), Some("3001234567"));
    }
}
