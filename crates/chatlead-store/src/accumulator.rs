//! Per-conversation record accumulation
//!
//! Every conversation owns one lock. A "read current record, merge, write
//! back" sequence runs entirely under that lock, including the write-through
//! to the backing store, so two updates to the same conversation never
//! interleave. The registry lock is only held to look up or insert an entry.

use crate::StoreError;
use chatlead_domain::merge::{changed_fields, fold, override_with};
use chatlead_domain::traits::{RecordExtractor, RecordStore};
use chatlead_domain::{ConversationId, ExtractedRecord, Field, InboundMessage, RecordEdit};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, PoisonError, RwLock};
use tracing::{debug, info, warn};

/// Backing store shared by every conversation
pub type SharedStore = Arc<dyn RecordStore<Error = StoreError> + Send + Sync>;

/// What happened to an ingested message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IngestOutcome {
    /// The message id was already processed for this conversation
    Duplicate,
    /// The message carried no text or no extractable field
    NoData,
    /// Extracted data was folded in; lists the fields that gained a value
    Merged(Vec<Field>),
}

impl IngestOutcome {
    /// Fields that changed, if any
    pub fn changed(&self) -> &[Field] {
        match self {
            IngestOutcome::Merged(fields) => fields,
            _ => &[],
        }
    }
}

#[derive(Debug, Default)]
struct ConversationState {
    record: ExtractedRecord,
    seen: HashSet<String>,
}

type Entry = Arc<Mutex<ConversationState>>;

fn poisoned<T>(e: PoisonError<T>) -> StoreError {
    StoreError::LockPoisoned(e.to_string())
}

/// Keeps one authoritative record per conversation
///
/// Message text is merged with [`fold`] (first value wins); operator edits
/// with [`override_with`] (edit always wins). The accumulator is `Sync` when
/// its extractor is, so it can be shared across threads behind an `Arc`.
pub struct Accumulator<E> {
    extractor: E,
    conversations: RwLock<HashMap<ConversationId, Entry>>,
    store: Option<SharedStore>,
}

impl<E: RecordExtractor> Accumulator<E> {
    /// Create an in-memory accumulator
    pub fn new(extractor: E) -> Self {
        Self {
            extractor,
            conversations: RwLock::new(HashMap::new()),
            store: None,
        }
    }

    /// Persist every update to a backing store
    pub fn with_store(mut self, store: SharedStore) -> Self {
        self.store = Some(store);
        self
    }

    /// The extractor used for incoming messages
    pub fn extractor(&self) -> &E {
        &self.extractor
    }

    /// Load every stored record into memory
    ///
    /// Conversations already held in memory are left untouched. Returns the
    /// number of conversations loaded.
    pub fn hydrate(&self) -> Result<usize, StoreError> {
        let Some(store) = &self.store else {
            return Ok(0);
        };

        let stored = store.load_all()?;
        let mut conversations = self.conversations.write().map_err(poisoned)?;
        let mut loaded = 0;
        for (id, record) in stored {
            conversations.entry(id).or_insert_with(|| {
                loaded += 1;
                Arc::new(Mutex::new(ConversationState {
                    record,
                    seen: HashSet::new(),
                }))
            });
        }

        info!("Hydrated {} conversation(s) from store", loaded);
        Ok(loaded)
    }

    /// Extract from one message and fold the result into its conversation
    pub fn ingest(&self, message: &InboundMessage) -> Result<IngestOutcome, StoreError> {
        let id = &message.conversation_id;
        let entry = self.entry(id)?;
        let mut state = entry.lock().map_err(poisoned)?;

        if let Some(message_id) = &message.message_id {
            if state.seen.contains(message_id) || !self.mark_seen(id, message_id)? {
                debug!("Dropping duplicate message {} for {}", message_id, id);
                state.seen.insert(message_id.clone());
                return Ok(IngestOutcome::Duplicate);
            }
            state.seen.insert(message_id.clone());
        }

        let Some(partial) = message.text.as_deref().and_then(|t| self.extractor.extract(t))
        else {
            debug!("No data in message for {}", id);
            return Ok(IngestOutcome::NoData);
        };

        let merged = fold(&state.record, &partial);
        let changed = changed_fields(&state.record, &merged);
        if !changed.is_empty() {
            self.persist(id, &merged)?;
            state.record = merged;
        }

        info!(
            "Ingested {} message for {}: changed {:?}",
            if message.historical { "historical" } else { "live" },
            id,
            changed
        );
        Ok(IngestOutcome::Merged(changed))
    }

    /// Fold a fetched history, oldest first, on top of the current record
    ///
    /// Messages addressed to another conversation are skipped.
    pub fn rebuild(
        &self,
        id: &ConversationId,
        history: &[InboundMessage],
    ) -> Result<ExtractedRecord, StoreError> {
        let entry = self.entry(id)?;
        let mut state = entry.lock().map_err(poisoned)?;

        let mut merged = state.record.clone();
        for message in history {
            if &message.conversation_id != id {
                warn!(
                    "Skipping history message for {} while rebuilding {}",
                    message.conversation_id, id
                );
                continue;
            }
            if let Some(message_id) = &message.message_id {
                if state.seen.insert(message_id.clone()) {
                    self.mark_seen(id, message_id)?;
                }
            }
            if let Some(partial) = message.text.as_deref().and_then(|t| self.extractor.extract(t)) {
                merged = fold(&merged, &partial);
            }
        }

        let changed = changed_fields(&state.record, &merged);
        if !changed.is_empty() {
            self.persist(id, &merged)?;
            state.record = merged;
        }

        info!(
            "Rebuilt {} from {} message(s): changed {:?}",
            id,
            history.len(),
            changed
        );
        Ok(state.record.clone())
    }

    /// Apply an operator edit; edited fields always take the new value
    pub fn apply_edit(
        &self,
        id: &ConversationId,
        edit: &RecordEdit,
    ) -> Result<ExtractedRecord, StoreError> {
        let entry = self.entry(id)?;
        let mut state = entry.lock().map_err(poisoned)?;

        let merged = override_with(&state.record, edit);
        if merged != state.record {
            self.persist(id, &merged)?;
            state.record = merged;
        }

        info!("Applied edit to {}: {:?}", id, edit.fields());
        Ok(state.record.clone())
    }

    /// Current record of a conversation
    pub fn record(&self, id: &ConversationId) -> Result<Option<ExtractedRecord>, StoreError> {
        if let Some(entry) = self.lookup(id)? {
            let state = entry.lock().map_err(poisoned)?;
            return Ok(Some(state.record.clone()));
        }
        match &self.store {
            Some(store) => store.load(id),
            None => Ok(None),
        }
    }

    /// Whether a conversation's record holds at least one value
    pub fn has_any_data(&self, id: &ConversationId) -> Result<bool, StoreError> {
        Ok(self
            .record(id)?
            .is_some_and(|record| record.has_any_data()))
    }

    /// Conversations held in memory, sorted
    pub fn conversation_ids(&self) -> Result<Vec<ConversationId>, StoreError> {
        let conversations = self.conversations.read().map_err(poisoned)?;
        let mut ids: Vec<_> = conversations.keys().cloned().collect();
        ids.sort();
        Ok(ids)
    }

    /// Number of conversations held in memory
    pub fn len(&self) -> usize {
        self.conversations.read().map(|c| c.len()).unwrap_or(0)
    }

    /// Whether no conversation is held in memory
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lookup(&self, id: &ConversationId) -> Result<Option<Entry>, StoreError> {
        let conversations = self.conversations.read().map_err(poisoned)?;
        Ok(conversations.get(id).cloned())
    }

    /// Get or create a conversation entry, seeding new ones from the store
    fn entry(&self, id: &ConversationId) -> Result<Entry, StoreError> {
        if let Some(entry) = self.lookup(id)? {
            return Ok(entry);
        }

        let record = match &self.store {
            Some(store) => store.load(id)?.unwrap_or_default(),
            None => ExtractedRecord::default(),
        };

        let mut conversations = self.conversations.write().map_err(poisoned)?;
        let entry = conversations.entry(id.clone()).or_insert_with(|| {
            debug!("Tracking new conversation {}", id);
            Arc::new(Mutex::new(ConversationState {
                record,
                seen: HashSet::new(),
            }))
        });
        Ok(Arc::clone(entry))
    }

    fn persist(&self, id: &ConversationId, record: &ExtractedRecord) -> Result<(), StoreError> {
        match &self.store {
            Some(store) => store.save(id, record),
            None => Ok(()),
        }
    }

    fn mark_seen(&self, id: &ConversationId, message_id: &str) -> Result<bool, StoreError> {
        match &self.store {
            Some(store) => store.mark_seen(id, message_id),
            None => Ok(true),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Extracts `key=value` pairs; keeps tests independent of the pattern set
    struct PairExtractor;

    impl RecordExtractor for PairExtractor {
        fn extract(&self, text: &str) -> Option<ExtractedRecord> {
            let mut record = ExtractedRecord::new();
            for pair in text.split_whitespace() {
                if let Some((key, value)) = pair.split_once('=') {
                    if let Some(field) = Field::parse(key) {
                        record.set(field, Some(value.to_string()));
                    }
                }
            }
            record.has_any_data().then_some(record)
        }
    }

    fn id(s: &str) -> ConversationId {
        ConversationId::new(s).unwrap()
    }

    #[test]
    fn test_ingest_folds_first_value() {
        let acc = Accumulator::new(PairExtractor);
        let conv = id("c1");

        let outcome = acc.ingest(&InboundMessage::live(conv.clone(), "name=Ana")).unwrap();
        assert_eq!(outcome, IngestOutcome::Merged(vec![Field::Name]));

        let outcome = acc
            .ingest(&InboundMessage::live(conv.clone(), "name=Eva phone=3001234567"))
            .unwrap();
        assert_eq!(outcome.changed(), &[Field::Phone]);

        let record = acc.record(&conv).unwrap().unwrap();
        assert_eq!(record.get(Field::Name), Some("Ana"));
        assert_eq!(record.get(Field::Phone), Some("3001234567"));
    }

    #[test]
    fn test_ingest_without_text() {
        let acc = Accumulator::new(PairExtractor);
        let message = InboundMessage {
            conversation_id: id("c1"),
            message_id: None,
            text: None,
            historical: false,
        };
        assert_eq!(acc.ingest(&message).unwrap(), IngestOutcome::NoData);
        assert!(!acc.has_any_data(&id("c1")).unwrap());
    }

    #[test]
    fn test_duplicate_message_id() {
        let acc = Accumulator::new(PairExtractor);
        let message = InboundMessage::live(id("c1"), "email=a@b.co").with_message_id("m1");
        assert!(matches!(acc.ingest(&message).unwrap(), IngestOutcome::Merged(_)));
        assert_eq!(acc.ingest(&message).unwrap(), IngestOutcome::Duplicate);
    }

    #[test]
    fn test_edit_overrides_and_clears() {
        let acc = Accumulator::new(PairExtractor);
        let conv = id("c1");
        acc.ingest(&InboundMessage::live(conv.clone(), "name=Ana profession=chef"))
            .unwrap();

        let edit = RecordEdit::new().set(Field::Name, "Ana María").clear(Field::Profession);
        let record = acc.apply_edit(&conv, &edit).unwrap();
        assert_eq!(record.get(Field::Name), Some("Ana María"));
        assert!(record.get(Field::Profession).is_none());

        // A later message cannot refill over an edited value
        acc.ingest(&InboundMessage::live(conv.clone(), "name=Eva")).unwrap();
        assert_eq!(acc.record(&conv).unwrap().unwrap().get(Field::Name), Some("Ana María"));
    }

    #[test]
    fn test_rebuild_skips_other_conversations() {
        let acc = Accumulator::new(PairExtractor);
        let conv = id("c1");
        let history = vec![
            InboundMessage::historical(conv.clone(), "name=Ana"),
            InboundMessage::historical(id("c2"), "phone=3001234567"),
            InboundMessage::historical(conv.clone(), "name=Eva email=a@b.co"),
        ];

        let record = acc.rebuild(&conv, &history).unwrap();
        assert_eq!(record.get(Field::Name), Some("Ana"));
        assert_eq!(record.get(Field::Email), Some("a@b.co"));
        assert!(record.get(Field::Phone).is_none());
        assert_eq!(acc.conversation_ids().unwrap(), vec![conv]);
    }

    #[test]
    fn test_unknown_conversation() {
        let acc = Accumulator::new(PairExtractor);
        assert!(acc.record(&id("ghost")).unwrap().is_none());
        assert!(!acc.has_any_data(&id("ghost")).unwrap());
        assert!(acc.is_empty());
    }
}
