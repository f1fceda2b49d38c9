use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionStatus {
    Submitted,
    UnderReview,
    Approved,
    Rejected,
}

impl SubmissionStatus {
    // submitted -> under_review -> approved | rejected
    // Only `Submitted` is produced locally, review happens on the backend
    pub fn can_transition_to(self, next: SubmissionStatus) -> bool {
        matches!(
            (self, next),
            (SubmissionStatus::Submitted, SubmissionStatus::UnderReview)
                | (SubmissionStatus::UnderReview, SubmissionStatus::Approved)
                | (SubmissionStatus::UnderReview, SubmissionStatus::Rejected)
        )
    }
}

// Acknowledged outcome of a submission.
// Only the submission client builds these, so id and timestamp never change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionResult {
    // UUID v4 assigned by the client
    id: String,
    status: SubmissionStatus,
    // RFC 3339, UTC
    submitted_at: String,
    message: String,
}

impl SubmissionResult {
    pub(crate) fn new(id: String, status: SubmissionStatus, submitted_at: String, message: String) -> Self {
        Self { id, status, submitted_at, message }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn status(&self) -> SubmissionStatus {
        self.status
    }

    pub fn submitted_at(&self) -> &str {
        &self.submitted_at
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_follows_review_flow() {
        use SubmissionStatus::*;
        assert!(Submitted.can_transition_to(UnderReview));
        assert!(UnderReview.can_transition_to(Approved));
        assert!(UnderReview.can_transition_to(Rejected));
        assert!(!Submitted.can_transition_to(Approved));
        assert!(!Approved.can_transition_to(Rejected));
        assert!(!Rejected.can_transition_to(UnderReview));
    }

    #[test]
    fn wire_shape_matches_api() {
        let result = SubmissionResult::new(
            "7c9e6679-7425-40de-944b-e07fc1f90ae7".to_string(),
            SubmissionStatus::UnderReview,
            "2026-10-16T08:30:00.000Z".to_string(),
            "ok".to_string(),
        );
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["status"], "under_review");
        assert_eq!(json["submittedAt"], "2026-10-16T08:30:00.000Z");
    }
}
