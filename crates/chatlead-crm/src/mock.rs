//! In-memory sink for tests and dry runs

use crate::error::CrmError;
use crate::types::{FollowUpStatus, OpportunityRequest, OpportunitySink};
use std::sync::{Arc, Mutex};

/// Records every request instead of sending it anywhere
///
/// Clones share the same recordings, so a test can keep one handle and pass
/// another to the code under test.
///
/// # Examples
///
/// ```
/// use chatlead_crm::{FollowUpStatus, OpportunitySink, RecordingSink};
///
/// let sink = RecordingSink::new();
/// sink.record_follow_up("7", FollowUpStatus::Quote, "sent").unwrap();
/// assert_eq!(sink.follow_ups()[0].1, FollowUpStatus::Quote);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    requests: Arc<Mutex<Vec<OpportunityRequest>>>,
    follow_ups: Arc<Mutex<Vec<(String, FollowUpStatus, String)>>>,
    reject_with: Option<String>,
    reject_follow_ups: bool,
}

impl RecordingSink {
    /// Create a sink that accepts everything
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a sink that rejects every opportunity with the given message
    pub fn rejecting(message: impl Into<String>) -> Self {
        Self {
            reject_with: Some(message.into()),
            ..Self::default()
        }
    }

    /// Make follow-up recording fail
    pub fn with_failing_follow_ups(mut self) -> Self {
        self.reject_follow_ups = true;
        self
    }

    /// Requests received so far
    pub fn requests(&self) -> Vec<OpportunityRequest> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }

    /// Follow-ups received so far, as (opportunity id, status, notes)
    pub fn follow_ups(&self) -> Vec<(String, FollowUpStatus, String)> {
        self.follow_ups.lock().map(|f| f.clone()).unwrap_or_default()
    }
}

impl OpportunitySink for RecordingSink {
    type Error = CrmError;

    fn create_opportunity(&self, request: &OpportunityRequest) -> Result<String, Self::Error> {
        if let Some(message) = &self.reject_with {
            return Err(CrmError::Rejected(message.clone()));
        }
        let mut requests = self
            .requests
            .lock()
            .map_err(|e| CrmError::Rejected(e.to_string()))?;
        requests.push(request.clone());
        Ok(requests.len().to_string())
    }

    fn record_follow_up(
        &self,
        opportunity_id: &str,
        status: FollowUpStatus,
        notes: &str,
    ) -> Result<(), Self::Error> {
        if self.reject_follow_ups {
            return Err(CrmError::Rejected("follow-up refused".to_string()));
        }
        self.follow_ups
            .lock()
            .map_err(|e| CrmError::Rejected(e.to_string()))?
            .push((opportunity_id.to_string(), status, notes.to_string()));
        Ok(())
    }
}
