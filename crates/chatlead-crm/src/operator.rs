//! Operator actions: validated edits and opportunity submission

use crate::error::CrmError;
use crate::options::FormOptions;
use crate::types::{FollowUpStatus, OpportunityReceipt, OpportunityRequest, OpportunitySink};
use chatlead_domain::traits::RecordExtractor;
use chatlead_domain::{ConversationId, ExtractedRecord, RecordEdit};
use chatlead_store::Accumulator;
use tracing::{info, warn};

const DEFAULT_FOLLOW_UP_NOTE: &str = "Oportunidad creada desde chat - inicio de proceso";

/// Validate an operator edit against the form options and apply it
///
/// Nothing is applied when any value is outside its option list.
pub fn apply_operator_edit<E: RecordExtractor>(
    accumulator: &Accumulator<E>,
    options: &FormOptions,
    id: &ConversationId,
    edit: &RecordEdit,
) -> Result<ExtractedRecord, CrmError> {
    let checked = options.check_edit(edit)?;
    Ok(accumulator.apply_edit(id, &checked)?)
}

/// Submit a conversation's lead to the CRM
///
/// Refused with [`CrmError::NoData`] when the record holds no value. After
/// the opportunity is created an in-process follow-up is recorded; a failure
/// there is logged and reported in the receipt, since the opportunity
/// already exists.
pub fn submit_opportunity<E, S>(
    accumulator: &Accumulator<E>,
    sink: &S,
    options: &FormOptions,
    id: &ConversationId,
    notes: &str,
) -> Result<OpportunityReceipt, CrmError>
where
    E: RecordExtractor,
    S: OpportunitySink,
{
    let record = accumulator
        .record(id)?
        .ok_or_else(|| CrmError::UnknownConversation(id.clone()))?;
    if !record.has_any_data() {
        return Err(CrmError::NoData(id.clone()));
    }

    let request = OpportunityRequest {
        contact_id: id.contact().to_string(),
        conversation_id: id.clone(),
        record: options.with_defaults(&record),
        notes: notes.to_string(),
    };

    let opportunity_id = sink
        .create_opportunity(&request)
        .map_err(|e| CrmError::Rejected(e.to_string()))?;
    info!("Opportunity {} created for {}", opportunity_id, id);

    let note = if notes.trim().is_empty() {
        DEFAULT_FOLLOW_UP_NOTE
    } else {
        notes
    };
    let follow_up_recorded =
        match sink.record_follow_up(&opportunity_id, FollowUpStatus::InProcess, note) {
            Ok(()) => true,
            Err(e) => {
                warn!(
                    "Failed to record follow-up for opportunity {}: {}",
                    opportunity_id, e
                );
                false
            }
        };

    Ok(OpportunityReceipt {
        opportunity_id,
        follow_up_recorded,
    })
}
