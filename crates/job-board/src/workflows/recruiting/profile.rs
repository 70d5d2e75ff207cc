use serde::{Deserialize, Serialize};

use super::validation::ValidationErrors;

pub const EARLIEST_FOUNDED_YEAR: i32 = 1800;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompanySize {
    #[serde(rename = "1-10")]
    Micro,
    #[serde(rename = "11-50")]
    Small,
    #[serde(rename = "51-200")]
    Medium,
    #[serde(rename = "201-1000")]
    Large,
    #[serde(rename = "1000+")]
    Enterprise,
}

/// Employer profile completed by recruiters before posting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployerProfile {
    pub company_name: String,
    pub industry: String,
    #[serde(default)]
    pub company_size: Option<CompanySize>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub founded_year: Option<i32>,
    pub location: String,
    pub description: String,
}

impl EmployerProfile {
    pub fn validate(&self, current_year: i32) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require_text("companyName", &self.company_name, "Company name");
        errors.require_text("industry", &self.industry, "Industry");
        errors.require_text("location", &self.location, "Location");
        errors.require_text("description", &self.description, "Company description");

        if self.company_size.is_none() {
            errors.add("companySize", "Company size is required");
        }

        if let Some(website) = self.website.as_deref().map(str::trim) {
            if !website.is_empty()
                && !(website.starts_with("http://") || website.starts_with("https://"))
            {
                errors.add("website", "Website must start with http:// or https://");
            }
        }

        if let Some(year) = self.founded_year {
            if !(EARLIEST_FOUNDED_YEAR..=current_year).contains(&year) {
                errors.add(
                    "foundedYear",
                    format!(
                        "Founded year must be between {EARLIEST_FOUNDED_YEAR} and {current_year}"
                    ),
                );
            }
        }

        errors.into_result()
    }

    /// Share of optional and required fields filled in, 0-100.
    pub fn completion_percent(&self) -> u8 {
        let filled = [
            !self.company_name.trim().is_empty(),
            !self.industry.trim().is_empty(),
            self.company_size.is_some(),
            self.website
                .as_deref()
                .is_some_and(|website| !website.trim().is_empty()),
            self.founded_year.is_some(),
            !self.location.trim().is_empty(),
            !self.description.trim().is_empty(),
        ];
        let done = filled.iter().filter(|flag| **flag).count();
        ((done * 100) / filled.len()) as u8
    }
}
