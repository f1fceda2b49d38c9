use crate::modules::{
    error::WorkflowError,
    record::{Consent, WizardRecord},
};

pub const CONSENT_REQUIRED: &str = "Terms and conditions must be accepted to proceed.";

// Required fields of `step` that are still empty, in form order.
// Optional fields never show up here. The final step also reports
// unchecked consent flags under their wire names.
pub fn missing_fields<R: WizardRecord>(record: &R, step: usize) -> Vec<&'static str> {
    let mut missing: Vec<&'static str> = record
        .fields(step)
        .into_iter()
        .filter(|field| field.required && !field.filled)
        .map(|field| field.name)
        .collect();

    if step + 1 == R::step_count() {
        let consent = record.consent();
        if !consent.terms_accepted {
            missing.push("termsAccepted");
        }
        if !consent.data_processing_consent {
            missing.push("dataProcessingConsent");
        }
    }

    missing
}

pub fn can_advance<R: WizardRecord>(record: &R, step: usize) -> bool {
    missing_fields(record, step).is_empty()
}

pub fn check_consent(consent: &Consent) -> Result<(), WorkflowError> {
    if consent.is_complete() {
        Ok(())
    } else {
        Err(WorkflowError::ValidationError(CONSENT_REQUIRED.to_string()))
    }
}
