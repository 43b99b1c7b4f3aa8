//! Merge laws for accumulating lead data
//!
//! Two operators with different precedence, kept as separate functions:
//!
//! - [`fold`]: first non-empty value wins. Used for message text, live or
//!   historical. A field freezes at the first message that supplies it.
//! - [`override_with`]: the edit always wins, including clearing a field.
//!   Used for explicit operator edits and the only way to erase a value.

use crate::{ExtractedRecord, Field, RecordEdit};

/// Fill empty fields of `existing` from `incoming`
///
/// For every field `f`: `existing[f]` if non-empty, otherwise `incoming[f]`.
///
/// # Examples
///
/// ```
/// use chatlead_domain::{merge, ExtractedRecord, Field};
///
/// let existing = ExtractedRecord::new().with(Field::Name, "Pedro");
/// let incoming = ExtractedRecord::new()
///     .with(Field::Name, "Juan")
///     .with(Field::Phone, "3001234567");
///
/// let merged = merge::fold(&existing, &incoming);
/// assert_eq!(merged.get(Field::Name), Some("Pedro"));
/// assert_eq!(merged.get(Field::Phone), Some("3001234567"));
/// ```
pub fn fold(existing: &ExtractedRecord, incoming: &ExtractedRecord) -> ExtractedRecord {
    let mut merged = existing.clone();
    for field in Field::ALL {
        if merged.is_filled(field) {
            continue;
        }
        if let Some(value) = incoming.get(field) {
            merged.set(field, Some(value.to_string()));
        }
    }
    merged
}

/// Fold a sequence of partial records, oldest first
///
/// Absent entries (messages that yielded no data) are skipped.
pub fn fold_all<'a, I>(start: &ExtractedRecord, partials: I) -> ExtractedRecord
where
    I: IntoIterator<Item = Option<&'a ExtractedRecord>>,
{
    partials
        .into_iter()
        .flatten()
        .fold(start.clone(), |acc, partial| fold(&acc, partial))
}

/// Apply operator edits unconditionally
///
/// Every field named in `edits` takes the edited value regardless of what
/// `existing` held. A blank edit value leaves the field absent.
///
/// # Examples
///
/// ```
/// use chatlead_domain::{merge, ExtractedRecord, Field, RecordEdit};
///
/// let existing = ExtractedRecord::new().with(Field::Name, "Ana");
/// let merged = merge::override_with(&existing, &RecordEdit::new().clear(Field::Name));
/// assert_eq!(merged.get(Field::Name), None);
/// ```
pub fn override_with(existing: &ExtractedRecord, edits: &RecordEdit) -> ExtractedRecord {
    let mut merged = existing.clone();
    for (field, value) in edits.iter() {
        if value.trim().is_empty() {
            merged.set(field, None);
        } else {
            merged.set(field, Some(value.to_string()));
        }
    }
    merged
}

/// Whether at least one field of the record is non-empty
pub fn has_any_data(record: &ExtractedRecord) -> bool {
    record.has_any_data()
}

/// Fields whose filled value differs between two records
pub fn changed_fields(before: &ExtractedRecord, after: &ExtractedRecord) -> Vec<Field> {
    Field::ALL
        .iter()
        .copied()
        .filter(|f| before.get(*f) != after.get(*f))
        .collect()
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn arb_value() -> impl Strategy<Value = Option<String>> {
        prop_oneof![
            Just(None),
            Just(Some(String::new())),
            "[a-z0-9 ]{1,12}".prop_map(Some),
        ]
    }

    fn arb_record() -> impl Strategy<Value = ExtractedRecord> {
        proptest::collection::vec(arb_value(), Field::ALL.len()).prop_map(|values| {
            let mut record = ExtractedRecord::new();
            for (field, value) in Field::ALL.iter().zip(values) {
                record.set(*field, value);
            }
            record
        })
    }

    proptest! {
        /// Property: fold never erases or changes a filled field
        #[test]
        fn test_fold_monotonic(existing in arb_record(), incoming in arb_record()) {
            let merged = fold(&existing, &incoming);
            for field in Field::ALL {
                if let Some(value) = existing.get(field) {
                    prop_assert_eq!(merged.get(field), Some(value));
                }
            }
        }

        /// Property: fold adopts incoming values for empty fields
        #[test]
        fn test_fold_fills_every_gap(existing in arb_record(), incoming in arb_record()) {
            let merged = fold(&existing, &incoming);
            for field in Field::ALL {
                if existing.get(field).is_none() {
                    prop_assert_eq!(merged.get(field), incoming.get(field));
                }
            }
        }

        /// Property: folding the same partial twice changes nothing
        #[test]
        fn test_fold_idempotent(existing in arb_record(), incoming in arb_record()) {
            let once = fold(&existing, &incoming);
            let twice = fold(&once, &incoming);
            prop_assert_eq!(once, twice);
        }

        /// Property: override leaves untouched fields alone and sets edited ones
        #[test]
        fn test_override_exact(existing in arb_record(), value in "[a-z]{0,8}") {
            let edit = RecordEdit::new().set(Field::Profession, value.clone());
            let merged = override_with(&existing, &edit);

            let expected = if value.trim().is_empty() { None } else { Some(value.as_str()) };
            prop_assert_eq!(merged.get(Field::Profession), expected);
            for field in Field::ALL.iter().filter(|f| **f != Field::Profession) {
                prop_assert_eq!(merged.get(*field), existing.get(*field));
            }
        }
    }
}
