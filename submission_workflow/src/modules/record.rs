use serde::{de::DeserializeOwned, Deserialize, Serialize};

pub mod buyer;
pub mod project;

// Both consent flags travel at the top level of every record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Consent {
    pub terms_accepted: bool,
    pub data_processing_consent: bool,
}

impl Consent {
    pub fn accepted() -> Self {
        Self { terms_accepted: true, data_processing_consent: true }
    }

    // A record may only be submitted once both flags are set
    pub fn is_complete(&self) -> bool {
        self.terms_accepted && self.data_processing_consent
    }

    pub fn apply(&mut self, update: ConsentField) {
        match update {
            ConsentField::TermsAccepted(value) => self.terms_accepted = value,
            ConsentField::DataProcessingConsent(value) => self.data_processing_consent = value,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsentField {
    TermsAccepted(bool),
    DataProcessingConsent(bool),
}

// One field as shown on a wizard step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldCheck {
    pub name: &'static str,
    pub required: bool,
    pub filled: bool,
}

impl FieldCheck {
    pub fn required(name: &'static str, filled: bool) -> Self {
        Self { name, required: true, filled }
    }

    pub fn optional(name: &'static str, filled: bool) -> Self {
        Self { name, required: false, filled }
    }
}

// Helpers for deciding whether a form input counts as filled
pub fn text_filled(value: &str) -> bool {
    !value.trim().is_empty()
}

pub fn option_filled<T>(value: &Option<T>) -> bool {
    value.is_some()
}

/// A record built up across the steps of a wizard.
///
/// Implementors describe their steps and the fields on each one; the
/// validator and the wizard are generic over this trait so every form
/// shares the same step gating and submission flow.
pub trait WizardRecord: Default + Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Ordered, human-readable step names. The last one is the final step.
    const STEPS: &'static [&'static str];

    /// Message attached to a successful submission of this record.
    const SUBMITTED_MESSAGE: &'static str;

    /// Typed single-field update.
    type Update: Send;

    fn apply(&mut self, update: Self::Update);

    /// Every field on `step`, required or optional. Unknown steps have none.
    fn fields(&self, step: usize) -> Vec<FieldCheck>;

    fn consent(&self) -> &Consent;

    fn step_count() -> usize {
        Self::STEPS.len()
    }

    fn step_name(step: usize) -> Option<&'static str> {
        Self::STEPS.get(step).copied()
    }
}
