use serde::{Deserialize, Serialize};
use crate::modules::record::{
    option_filled, text_filled, Consent, ConsentField, FieldCheck, WizardRecord,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectType {
    Agroforestry,
    Reforestation,
    SoilCarbon,
    RegenerativeAgriculture,
    BlueCarbon,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LandOwnership {
    Owned,
    Leased,
    Community,
    Government,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationStandard {
    Verra,
    GoldStandard,
    PlanVivo,
    Puro,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportingFrequency {
    Quarterly,
    Biannual,
    Annual,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectBasics {
    pub project_name: String,
    pub project_type: Option<ProjectType>,
    // Region or nearest town
    pub location: String,
    pub country: String,
    pub description: String,
    pub website: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LandUse {
    // Hectares under the project
    pub total_area: Option<f64>,
    pub land_ownership: Option<LandOwnership>,
    pub current_land_use: String,
    pub soil_type: String,
    pub previous_certifications: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductionPlan {
    pub primary_crops: String,
    pub farming_practices: String,
    // Tonnes of CO2e per year
    pub expected_annual_credits: Option<u32>,
    // ISO-8601 date as typed into the form
    pub start_date: String,
    pub duration_years: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MonitoringPlan {
    pub verification_standard: Option<VerificationStandard>,
    pub monitoring_approach: String,
    pub reporting_frequency: Option<ReportingFrequency>,
    pub third_party_verifier: String,
}

// Carbon project application, four steps with consent on the last one
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectApplication {
    pub project_basics: ProjectBasics,
    pub land_use: LandUse,
    pub production_plan: ProductionPlan,
    pub monitoring_plan: MonitoringPlan,
    #[serde(flatten)]
    pub consent: Consent,
}

#[derive(Debug, Clone, PartialEq)]
pub enum BasicsField {
    ProjectName(String),
    ProjectType(ProjectType),
    Location(String),
    Country(String),
    Description(String),
    Website(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum LandUseField {
    TotalArea(f64),
    LandOwnership(LandOwnership),
    CurrentLandUse(String),
    SoilType(String),
    PreviousCertifications(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ProductionField {
    PrimaryCrops(String),
    FarmingPractices(String),
    ExpectedAnnualCredits(u32),
    StartDate(String),
    DurationYears(u32),
}

#[derive(Debug, Clone, PartialEq)]
pub enum MonitoringField {
    VerificationStandard(VerificationStandard),
    MonitoringApproach(String),
    ReportingFrequency(ReportingFrequency),
    ThirdPartyVerifier(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ProjectUpdate {
    Basics(BasicsField),
    LandUse(LandUseField),
    Production(ProductionField),
    Monitoring(MonitoringField),
    Consent(ConsentField),
}

impl WizardRecord for ProjectApplication {
    const STEPS: &'static [&'static str] = &[
        "Project basics",
        "Land use",
        "Production plan",
        "Monitoring & verification",
    ];

    const SUBMITTED_MESSAGE: &'static str =
        "Your project application has been submitted successfully. Our team will review it within 5-7 business days.";

    type Update = ProjectUpdate;

    fn apply(&mut self, update: ProjectUpdate) {
        match update {
            ProjectUpdate::Basics(field) => {
                let basics = &mut self.project_basics;
                match field {
                    BasicsField::ProjectName(v) => basics.project_name = v,
                    BasicsField::ProjectType(v) => basics.project_type = Some(v),
                    BasicsField::Location(v) => basics.location = v,
                    BasicsField::Country(v) => basics.country = v,
                    BasicsField::Description(v) => basics.description = v,
                    BasicsField::Website(v) => basics.website = v,
                }
            }
            ProjectUpdate::LandUse(field) => {
                let land = &mut self.land_use;
                match field {
                    LandUseField::TotalArea(v) => land.total_area = Some(v),
                    LandUseField::LandOwnership(v) => land.land_ownership = Some(v),
                    LandUseField::CurrentLandUse(v) => land.current_land_use = v,
                    LandUseField::SoilType(v) => land.soil_type = v,
                    LandUseField::PreviousCertifications(v) => land.previous_certifications = v,
                }
            }
            ProjectUpdate::Production(field) => {
                let plan = &mut self.production_plan;
                match field {
                    ProductionField::PrimaryCrops(v) => plan.primary_crops = v,
                    ProductionField::FarmingPractices(v) => plan.farming_practices = v,
                    ProductionField::ExpectedAnnualCredits(v) => plan.expected_annual_credits = Some(v),
                    ProductionField::StartDate(v) => plan.start_date = v,
                    ProductionField::DurationYears(v) => plan.duration_years = Some(v),
                }
            }
            ProjectUpdate::Monitoring(field) => {
                let plan = &mut self.monitoring_plan;
                match field {
                    MonitoringField::VerificationStandard(v) => plan.verification_standard = Some(v),
                    MonitoringField::MonitoringApproach(v) => plan.monitoring_approach = v,
                    MonitoringField::ReportingFrequency(v) => plan.reporting_frequency = Some(v),
                    MonitoringField::ThirdPartyVerifier(v) => plan.third_party_verifier = v,
                }
            }
            ProjectUpdate::Consent(field) => self.consent.apply(field),
        }
    }

    fn fields(&self, step: usize) -> Vec<FieldCheck> {
        match step {
            0 => {
                let b = &self.project_basics;
                vec![
                    FieldCheck::required("projectName", text_filled(&b.project_name)),
                    FieldCheck::required("projectType", option_filled(&b.project_type)),
                    FieldCheck::required("location", text_filled(&b.location)),
                    FieldCheck::required("country", text_filled(&b.country)),
                    FieldCheck::required("description", text_filled(&b.description)),
                    FieldCheck::optional("website", text_filled(&b.website)),
                ]
            }
            1 => {
                let l = &self.land_use;
                vec![
                    FieldCheck::required("totalArea", l.total_area.map_or(false, |a| a.is_finite() && a > 0.0)),
                    FieldCheck::required("landOwnership", option_filled(&l.land_ownership)),
                    FieldCheck::required("currentLandUse", text_filled(&l.current_land_use)),
                    FieldCheck::optional("soilType", text_filled(&l.soil_type)),
                    FieldCheck::optional("previousCertifications", text_filled(&l.previous_certifications)),
                ]
            }
            2 => {
                let p = &self.production_plan;
                vec![
                    FieldCheck::required("primaryCrops", text_filled(&p.primary_crops)),
                    FieldCheck::required("farmingPractices", text_filled(&p.farming_practices)),
                    FieldCheck::required("expectedAnnualCredits", option_filled(&p.expected_annual_credits)),
                    FieldCheck::required("startDate", text_filled(&p.start_date)),
                    FieldCheck::optional("durationYears", option_filled(&p.duration_years)),
                ]
            }
            3 => {
                let m = &self.monitoring_plan;
                vec![
                    FieldCheck::required("verificationStandard", option_filled(&m.verification_standard)),
                    FieldCheck::required("monitoringApproach", text_filled(&m.monitoring_approach)),
                    FieldCheck::required("reportingFrequency", option_filled(&m.reporting_frequency)),
                    FieldCheck::optional("thirdPartyVerifier", text_filled(&m.third_party_verifier)),
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
pub(crate) mod fixtures {
    use super::*;

    // A project application with every required field of every step filled
    pub fn complete_application() -> ProjectApplication {
        let mut app = ProjectApplication::default();
        for update in [
            ProjectUpdate::Basics(BasicsField::ProjectName("Waipi'o Valley Agroforest".to_string())),
            ProjectUpdate::Basics(BasicsField::ProjectType(ProjectType::Agroforestry)),
            ProjectUpdate::Basics(BasicsField::Location("Hamakua Coast".to_string())),
            ProjectUpdate::Basics(BasicsField::Country("United States".to_string())),
            ProjectUpdate::Basics(BasicsField::Description("Breadfruit and cacao canopy on former pasture".to_string())),
            ProjectUpdate::LandUse(LandUseField::TotalArea(42.5)),
            ProjectUpdate::LandUse(LandUseField::LandOwnership(LandOwnership::Leased)),
            ProjectUpdate::LandUse(LandUseField::CurrentLandUse("Cattle pasture".to_string())),
            ProjectUpdate::Production(ProductionField::PrimaryCrops("Breadfruit, cacao".to_string())),
            ProjectUpdate::Production(ProductionField::FarmingPractices("Multi-strata agroforestry".to_string())),
            ProjectUpdate::Production(ProductionField::ExpectedAnnualCredits(800)),
            ProjectUpdate::Production(ProductionField::StartDate("2026-01-15".to_string())),
            ProjectUpdate::Monitoring(MonitoringField::VerificationStandard(VerificationStandard::Verra)),
            ProjectUpdate::Monitoring(MonitoringField::MonitoringApproach("Annual biomass plots plus remote sensing".to_string())),
            ProjectUpdate::Monitoring(MonitoringField::ReportingFrequency(ReportingFrequency::Annual)),
            ProjectUpdate::Consent(ConsentField::TermsAccepted(true)),
            ProjectUpdate::Consent(ConsentField::DataProcessingConsent(true)),
        ] {
            app.apply(update);
        }
        app
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::fixtures::complete_application;

    #[test]
    fn updates_land_in_their_section() {
        let mut app = ProjectApplication::default();
        app.apply(ProjectUpdate::Basics(BasicsField::Country("Kenya".to_string())));
        app.apply(ProjectUpdate::LandUse(LandUseField::TotalArea(12.0)));
        app.apply(ProjectUpdate::Monitoring(MonitoringField::ReportingFrequency(ReportingFrequency::Quarterly)));

        assert_eq!(app.project_basics.country, "Kenya");
        assert_eq!(app.land_use.total_area, Some(12.0));
        assert_eq!(app.monitoring_plan.reporting_frequency, Some(ReportingFrequency::Quarterly));
        assert_eq!(app.production_plan, ProductionPlan::default());
    }

    #[test]
    fn zero_area_is_not_filled() {
        let mut app = complete_application();
        app.apply(ProjectUpdate::LandUse(LandUseField::TotalArea(0.0)));
        let area = app.fields(1).into_iter().find(|f| f.name == "totalArea").unwrap();
        assert!(area.required);
        assert!(!area.filled);
    }

    #[test]
    fn non_finite_area_is_not_filled() {
        // JSON has no infinity or NaN, they would be stored as null
        for area in [f64::INFINITY, f64::NEG_INFINITY, f64::NAN] {
            let mut app = complete_application();
            app.apply(ProjectUpdate::LandUse(LandUseField::TotalArea(area)));
            let field = app.fields(1).into_iter().find(|f| f.name == "totalArea").unwrap();
            assert!(!field.filled, "{} accepted", area);
        }
    }

    #[test]
    fn serializes_in_form_shape() {
        let json = serde_json::to_value(complete_application()).unwrap();
        assert_eq!(json["projectBasics"]["projectType"], "agroforestry");
        assert_eq!(json["landUse"]["landOwnership"], "leased");
        assert_eq!(json["monitoringPlan"]["verificationStandard"], "verra");
        assert_eq!(json["termsAccepted"], true);
        assert_eq!(json["dataProcessingConsent"], true);
    }

    #[test]
    fn partial_draft_deserializes_with_defaults() {
        let draft = r#"{ "projectBasics": { "projectName": "Mauka Ridge" }, "termsAccepted": true }"#;
        let app: ProjectApplication = serde_json::from_str(draft).unwrap();
        assert_eq!(app.project_basics.project_name, "Mauka Ridge");
        assert_eq!(app.project_basics.project_type, None);
        assert!(app.consent.terms_accepted);
        assert!(!app.consent.data_processing_consent);
    }

    #[test]
    fn has_four_steps() {
        assert_eq!(ProjectApplication::step_count(), 4);
        assert_eq!(ProjectApplication::step_name(3), Some("Monitoring & verification"));
        assert_eq!(ProjectApplication::step_name(4), None);
        assert!(complete_application().fields(4).is_empty());
    }
}
