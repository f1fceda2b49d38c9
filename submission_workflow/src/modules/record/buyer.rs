use serde::{Deserialize, Serialize};
use crate::modules::record::{
    option_filled, project::ProjectType, text_filled, Consent, ConsentField, FieldCheck, WizardRecord,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Industry {
    Technology,
    Manufacturing,
    Energy,
    Finance,
    Retail,
    Aviation,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompanySize {
    #[serde(rename = "1-50")]
    Small,
    #[serde(rename = "51-500")]
    Medium,
    #[serde(rename = "501-5000")]
    Large,
    #[serde(rename = "5000+")]
    Enterprise,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BudgetRange {
    #[serde(rename = "under_10k")]
    Under10k,
    #[serde(rename = "10k_100k")]
    From10kTo100k,
    #[serde(rename = "100k_1m")]
    From100kTo1m,
    #[serde(rename = "over_1m")]
    Over1m,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactInfo {
    pub first_name: String,
    pub last_name: String,
    pub business_email: String,
    pub phone: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompanyProfile {
    pub company_name: String,
    pub company_website: String,
    pub industry: Option<Industry>,
    pub company_size: Option<CompanySize>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PurchaseInterest {
    // Tonnes of CO2e per year
    pub annual_volume: Option<u32>,
    pub preferred_project_types: Vec<ProjectType>,
    pub budget_range: Option<BudgetRange>,
    pub timeline: String,
}

// Credit buyer onboarding; the last step only collects consent
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BuyerOnboarding {
    pub contact_info: ContactInfo,
    pub company_profile: CompanyProfile,
    pub purchase_interest: PurchaseInterest,
    #[serde(flatten)]
    pub consent: Consent,
}

#[derive(Debug, Clone, PartialEq)]
pub enum BuyerUpdate {
    FirstName(String),
    LastName(String),
    BusinessEmail(String),
    Phone(String),
    CompanyName(String),
    CompanyWebsite(String),
    Industry(Industry),
    CompanySize(CompanySize),
    AnnualVolume(u32),
    // Checkbox style: toggles membership in the preferred list
    ToggleProjectType(ProjectType),
    BudgetRange(BudgetRange),
    Timeline(String),
    Consent(ConsentField),
}

impl WizardRecord for BuyerOnboarding {
    const STEPS: &'static [&'static str] = &[
        "Contact info",
        "Company profile",
        "Purchase interest",
        "Review & consent",
    ];

    const SUBMITTED_MESSAGE: &'static str =
        "Thanks for your interest. A member of our team will reach out within 2 business days.";

    type Update = BuyerUpdate;

    fn apply(&mut self, update: BuyerUpdate) {
        match update {
            BuyerUpdate::FirstName(v) => self.contact_info.first_name = v,
            BuyerUpdate::LastName(v) => self.contact_info.last_name = v,
            BuyerUpdate::BusinessEmail(v) => self.contact_info.business_email = v,
            BuyerUpdate::Phone(v) => self.contact_info.phone = v,
            BuyerUpdate::CompanyName(v) => self.company_profile.company_name = v,
            BuyerUpdate::CompanyWebsite(v) => self.company_profile.company_website = v,
            BuyerUpdate::Industry(v) => self.company_profile.industry = Some(v),
            BuyerUpdate::CompanySize(v) => self.company_profile.company_size = Some(v),
            BuyerUpdate::AnnualVolume(v) => self.purchase_interest.annual_volume = Some(v),
            BuyerUpdate::ToggleProjectType(kind) => {
                let types = &mut self.purchase_interest.preferred_project_types;
                if let Some(pos) = types.iter().position(|t| *t == kind) {
                    types.remove(pos);
                } else {
                    types.push(kind);
                }
            }
            BuyerUpdate::BudgetRange(v) => self.purchase_interest.budget_range = Some(v),
            BuyerUpdate::Timeline(v) => self.purchase_interest.timeline = v,
            BuyerUpdate::Consent(field) => self.consent.apply(field),
        }
    }

    fn fields(&self, step: usize) -> Vec<FieldCheck> {
        match step {
            0 => {
                let c = &self.contact_info;
                vec![
                    FieldCheck::required("firstName", text_filled(&c.first_name)),
                    FieldCheck::required("lastName", text_filled(&c.last_name)),
                    FieldCheck::required("businessEmail", text_filled(&c.business_email)),
                    FieldCheck::optional("phone", text_filled(&c.phone)),
                ]
            }
            1 => {
                let c = &self.company_profile;
                vec![
                    FieldCheck::required("companyName", text_filled(&c.company_name)),
                    FieldCheck::optional("companyWebsite", text_filled(&c.company_website)),
                    FieldCheck::required("industry", option_filled(&c.industry)),
                    FieldCheck::required("companySize", option_filled(&c.company_size)),
                ]
            }
            2 => {
                let p = &self.purchase_interest;
                vec![
                    FieldCheck::required("annualVolume", p.annual_volume.map_or(false, |v| v > 0)),
                    FieldCheck::required("preferredProjectTypes", !p.preferred_project_types.is_empty()),
                    FieldCheck::required("budgetRange", option_filled(&p.budget_range)),
                    FieldCheck::optional("timeline", text_filled(&p.timeline)),
                ]
            }
            _ => Vec::new(),
        }
    }

    fn consent(&self) -> &Consent {
        &self.consent
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggling_a_project_type_twice_removes_it() {
        let mut buyer = BuyerOnboarding::default();
        buyer.apply(BuyerUpdate::ToggleProjectType(ProjectType::BlueCarbon));
        buyer.apply(BuyerUpdate::ToggleProjectType(ProjectType::SoilCarbon));
        assert_eq!(
            buyer.purchase_interest.preferred_project_types,
            vec![ProjectType::BlueCarbon, ProjectType::SoilCarbon]
        );

        buyer.apply(BuyerUpdate::ToggleProjectType(ProjectType::BlueCarbon));
        assert_eq!(buyer.purchase_interest.preferred_project_types, vec![ProjectType::SoilCarbon]);
    }

    #[test]
    fn review_step_has_no_fields() {
        assert!(BuyerOnboarding::default().fields(3).is_empty());
    }

    #[test]
    fn enumerations_use_form_values() {
        let mut buyer = BuyerOnboarding::default();
        buyer.apply(BuyerUpdate::CompanySize(CompanySize::Medium));
        buyer.apply(BuyerUpdate::BudgetRange(BudgetRange::From10kTo100k));

        let json = serde_json::to_value(&buyer).unwrap();
        assert_eq!(json["companyProfile"]["companySize"], "51-500");
        assert_eq!(json["purchaseInterest"]["budgetRange"], "10k_100k");
    }
}
