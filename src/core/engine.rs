use std::collections::HashSet;

use crate::core::filters::matches_filter;
use crate::models::{CandidateProfile, SavedFilter};

/// Identity of a notification: (recruiter, filter, candidate)
pub type NotificationKey = (i64, i64, i64);

/// A filter match that should become a notification
#[derive(Debug, Clone, PartialEq)]
pub struct MatchOutcome {
    pub recruiter_id: i64,
    pub filter_id: i64,
    pub candidate_id: i64,
    pub message: String,
}

impl MatchOutcome {
    pub fn key(&self) -> NotificationKey {
        (self.recruiter_id, self.filter_id, self.candidate_id)
    }
}

/// Evaluate a committed candidate profile against recruiters' filters
///
/// Pure: callers pass the notify-enabled filters and get back one outcome
/// per matching filter, with the human-readable message attached.
pub fn evaluate_filters(filters: &[SavedFilter], profile: &CandidateProfile) -> Vec<MatchOutcome> {
    filters
        .iter()
        .filter(|filter| matches_filter(filter, profile))
        .map(|filter| MatchOutcome {
            recruiter_id: filter.recruiter_id,
            filter_id: filter.id,
            candidate_id: profile.user_id,
            message: format!("New candidate matches your filter: {}", profile.username),
        })
        .collect()
}

/// Evaluate and drop outcomes that already have a notification
///
/// Applying the result twice against the same `existing` set plus the first
/// round's keys yields nothing, which keeps repeated profile saves from
/// duplicating notifications.
pub fn fresh_outcomes(
    filters: &[SavedFilter],
    profile: &CandidateProfile,
    existing: &HashSet<NotificationKey>,
) -> Vec<MatchOutcome> {
    evaluate_filters(filters, profile)
        .into_iter()
        .filter(|outcome| !existing.contains(&outcome.key()))
        .collect()
}
