use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::util::errors::WorkflowError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Availability {
    #[default]
    FullTime,
    PartTime,
    Weekends,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Proficiency {
    Basic,
    Intermediate,
    Advanced,
    Native,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageSkill {
    pub language: String,
    pub proficiency: Proficiency,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileData {
    pub job_title: String,
    pub specialization: String,
    pub introduction: String,
    pub skills: BTreeSet<String>,
    pub hourly_rate: f64,
    pub availability: Availability,
    pub languages: Vec<LanguageSkill>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfilePatch {
    pub job_title: Option<String>,
    pub specialization: Option<String>,
    pub introduction: Option<String>,
    pub skills: Option<BTreeSet<String>>,
    pub hourly_rate: Option<f64>,
    pub availability: Option<Availability>,
    pub languages: Option<Vec<LanguageSkill>>,
}

impl ProfilePatch {
    /// Zero is a valid rate; negative and non-finite rates are not.
    pub(crate) fn check(&self) -> Result<(), WorkflowError> {
        match self.hourly_rate {
            Some(rate) if !rate.is_finite() || rate < 0.0 => Err(WorkflowError::InvalidField {
                field: "hourlyRate",
                reason: format!("{rate} is not a valid hourly rate"),
            }),
            _ => Ok(()),
        }
    }

    pub(crate) fn merge_into(self, data: &mut ProfileData) -> Result<(), WorkflowError> {
        self.check()?;

        if let Some(job_title) = self.job_title {
            data.job_title = job_title;
        }
        if let Some(specialization) = self.specialization {
            data.specialization = specialization;
        }
        if let Some(introduction) = self.introduction {
            data.introduction = introduction;
        }
        if let Some(skills) = self.skills {
            data.skills = skills;
        }
        if let Some(rate) = self.hourly_rate {
            data.hourly_rate = rate;
        }
        if let Some(availability) = self.availability {
            data.availability = availability;
        }
        if let Some(languages) = self.languages {
            data.languages = languages;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_are_replaced_not_appended() {
        let mut data = ProfileData {
            skills: BTreeSet::from(["Go".to_string(), "Rust".to_string()]),
            ..ProfileData::default()
        };

        ProfilePatch {
            skills: Some(BTreeSet::from(["Figma".to_string()])),
            ..ProfilePatch::default()
        }
        .merge_into(&mut data)
        .unwrap();

        assert_eq!(data.skills.len(), 1);
        assert!(data.skills.contains("Figma"));
    }

    #[test]
    fn negative_rate_leaves_profile_untouched() {
        let mut data = ProfileData::default();
        let err = ProfilePatch {
            job_title: Some("Translator".to_string()),
            hourly_rate: Some(-5.0),
            ..ProfilePatch::default()
        }
        .merge_into(&mut data)
        .unwrap_err();

        assert!(matches!(err, WorkflowError::InvalidField { field: "hourlyRate", .. }));
        assert!(data.job_title.is_empty());
    }

    #[test]
    fn zero_rate_is_accepted() {
        let mut data = ProfileData::default();
        ProfilePatch {
            hourly_rate: Some(0.0),
            ..ProfilePatch::default()
        }
        .merge_into(&mut data)
        .unwrap();
        assert_eq!(data.hourly_rate, 0.0);
    }
}
