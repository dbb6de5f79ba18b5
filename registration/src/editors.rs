//! Section editors for the provider registration wizard.
//!
//! Each editor keeps a draft of one section, seeded from the controller's
//! state, and emits the whole draft as a patch. Lists always go out in full,
//! which is what the controller's replace-on-merge contract expects.

use std::collections::BTreeSet;

use crate::admission::{AdmissionAnswers, ChoiceId, QuestionBank, QuestionId};
use crate::flows::ProviderPatch;
use crate::sections::{
    AccountData, AccountPatch, AccountType, Availability, BinaryRef, GalleryData, GalleryPatch,
    LanguageSkill, PortfolioItem, Proficiency, ProfileData, ProfilePatch, Testimonial,
};
use crate::util::errors::WorkflowError;

pub struct AccountEditor {
    draft: AccountData,
}

impl AccountEditor {
    pub fn new(current: &AccountData) -> Self {
        Self {
            draft: current.clone(),
        }
    }

    pub fn draft(&self) -> &AccountData {
        &self.draft
    }

    pub fn set_full_name(&mut self, name: impl Into<String>) -> &mut Self {
        self.draft.full_name = name.into();
        self
    }

    pub fn set_username(&mut self, username: impl Into<String>) -> &mut Self {
        self.draft.username = username.into();
        self
    }

    pub fn set_account_type(&mut self, account_type: AccountType) -> &mut Self {
        self.draft.account_type = Some(account_type);
        self
    }

    pub fn accept_terms(&mut self, accepted: bool) -> &mut Self {
        self.draft.terms_accepted = accepted;
        self
    }

    pub fn accept_privacy(&mut self, accepted: bool) -> &mut Self {
        self.draft.privacy_accepted = accepted;
        self
    }

    pub fn patch(&self) -> ProviderPatch {
        let d = self.draft.clone();
        ProviderPatch::Account(AccountPatch {
            full_name: Some(d.full_name),
            username: Some(d.username),
            account_type: d.account_type,
            terms_accepted: Some(d.terms_accepted),
            privacy_accepted: Some(d.privacy_accepted),
        })
    }
}

pub struct ProfileEditor {
    draft: ProfileData,
}

impl ProfileEditor {
    pub fn new(current: &ProfileData) -> Self {
        Self {
            draft: current.clone(),
        }
    }

    pub fn draft(&self) -> &ProfileData {
        &self.draft
    }

    pub fn set_job_title(&mut self, title: impl Into<String>) -> &mut Self {
        self.draft.job_title = title.into();
        self
    }

    pub fn set_specialization(&mut self, specialization: impl Into<String>) -> &mut Self {
        self.draft.specialization = specialization.into();
        self
    }

    pub fn set_introduction(&mut self, introduction: impl Into<String>) -> &mut Self {
        self.draft.introduction = introduction.into();
        self
    }

    /// Trimmed; blank or already present skills are ignored.
    pub fn add_skill(&mut self, skill: &str) -> bool {
        let skill = skill.trim();
        !skill.is_empty() && self.draft.skills.insert(skill.to_string())
    }

    pub fn remove_skill(&mut self, skill: &str) -> bool {
        self.draft.skills.remove(skill)
    }

    pub fn set_hourly_rate(&mut self, rate: f64) -> Result<&mut Self, WorkflowError> {
        ProfilePatch {
            hourly_rate: Some(rate),
            ..ProfilePatch::default()
        }
        .check()?;
        self.draft.hourly_rate = rate;
        Ok(self)
    }

    pub fn set_availability(&mut self, availability: Availability) -> &mut Self {
        self.draft.availability = availability;
        self
    }

    /// Adding a language that is already listed updates its proficiency in
    /// place.
    pub fn add_language(&mut self, language: &str, proficiency: Proficiency) {
        let language = language.trim();
        if language.is_empty() {
            return;
        }
        match self
            .draft
            .languages
            .iter_mut()
            .find(|l| l.language.eq_ignore_ascii_case(language))
        {
            Some(existing) => existing.proficiency = proficiency,
            None => self.draft.languages.push(LanguageSkill {
                language: language.to_string(),
                proficiency,
            }),
        }
    }

    pub fn remove_language(&mut self, language: &str) {
        self.draft
            .languages
            .retain(|l| !l.language.eq_ignore_ascii_case(language));
    }

    pub fn patch(&self) -> ProviderPatch {
        let d = self.draft.clone();
        ProviderPatch::Profile(ProfilePatch {
            job_title: Some(d.job_title),
            specialization: Some(d.specialization),
            introduction: Some(d.introduction),
            skills: Some(d.skills),
            hourly_rate: Some(d.hourly_rate),
            availability: Some(d.availability),
            languages: Some(d.languages),
        })
    }
}

pub struct GalleryEditor {
    draft: GalleryData,
}

impl GalleryEditor {
    pub fn new(current: &GalleryData) -> Self {
        Self {
            draft: current.clone(),
        }
    }

    pub fn draft(&self) -> &GalleryData {
        &self.draft
    }

    /// Edit the portfolio item in `slot` (zero-based).
    pub fn edit_item(
        &mut self,
        slot: usize,
        edit: impl FnOnce(&mut PortfolioItem),
    ) -> Result<&mut Self, WorkflowError> {
        let item = self
            .draft
            .portfolio_items
            .get_mut(slot)
            .ok_or_else(|| WorkflowError::InvalidField {
                field: "portfolioItems",
                reason: format!("there is no portfolio slot {}", slot + 1),
            })?;
        edit(item);
        Ok(self)
    }

    pub fn set_item_skills(&mut self, slot: usize, skills: &[&str]) -> Result<&mut Self, WorkflowError> {
        let skills: BTreeSet<String> = skills
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
        self.edit_item(slot, |item| item.skills = skills)
    }

    pub fn add_certificate(&mut self, certificate: BinaryRef) {
        self.draft.certificates.push(certificate);
    }

    pub fn remove_certificate(&mut self, file_name: &str) {
        self.draft.certificates.retain(|c| c.file_name != file_name);
    }

    pub fn add_testimonial(&mut self, testimonial: Testimonial) {
        self.draft.testimonials.push(testimonial);
    }

    pub fn remove_testimonial(&mut self, index: usize) -> Option<Testimonial> {
        (index < self.draft.testimonials.len()).then(|| self.draft.testimonials.remove(index))
    }

    pub fn patch(&self) -> ProviderPatch {
        let d = self.draft.clone();
        ProviderPatch::Gallery(GalleryPatch {
            portfolio_items: Some(d.portfolio_items),
            certificates: Some(d.certificates),
            testimonials: Some(d.testimonials),
        })
    }
}

/// Collects answers against a fixed question bank.
pub struct AdmissionTestEditor<'a> {
    bank: &'a QuestionBank,
    answers: AdmissionAnswers,
}

impl<'a> AdmissionTestEditor<'a> {
    pub fn new(bank: &'a QuestionBank) -> Self {
        Self {
            bank,
            answers: AdmissionAnswers::default(),
        }
    }

    pub fn answer(&mut self, question: QuestionId, choice: ChoiceId) -> Result<(), WorkflowError> {
        self.bank.record(&mut self.answers, question, choice)
    }

    pub fn answers(&self) -> &AdmissionAnswers {
        &self.answers
    }

    pub fn unanswered(&self) -> usize {
        self.bank.unanswered(&self.answers)
    }

    /// Grade the answers; fails while any question is unanswered.
    pub fn finish(&self) -> Result<ProviderPatch, WorkflowError> {
        let result = self.bank.grade(self.answers.clone())?;
        tracing::info!(
            score = result.score(),
            passed = self.bank.passed(&result),
            "admission test finished"
        );
        Ok(ProviderPatch::AdmissionTest(result))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::admission::tests::sample_bank;
    use crate::flows::{ProviderRegistration, ProviderSections};
    use crate::flow::Flow;
    use crate::sections::Rating;

    #[test]
    fn account_editor_emits_full_section() {
        let mut sections = ProviderSections::default();
        let mut editor = AccountEditor::new(&sections.account);
        editor
            .set_username("mona")
            .accept_terms(true)
            .accept_privacy(true);

        ProviderRegistration::apply_patch(&mut sections, editor.patch()).unwrap();
        assert!(ProviderRegistration::validate_step(&sections, 1));
    }

    #[test]
    fn profile_editor_skills_and_languages() {
        let mut editor = ProfileEditor::new(&ProfileData::default());
        assert!(editor.add_skill("  Rust "));
        assert!(!editor.add_skill("Rust"));
        assert!(!editor.add_skill("   "));
        assert!(editor.draft().skills.contains("Rust"));

        editor.add_language("Arabic", Proficiency::Native);
        editor.add_language("english", Proficiency::Intermediate);
        editor.add_language("English", Proficiency::Advanced);
        assert_eq!(editor.draft().languages.len(), 2);
        assert_eq!(editor.draft().languages[1].proficiency, Proficiency::Advanced);

        editor.remove_language("ARABIC");
        assert_eq!(editor.draft().languages.len(), 1);

        assert!(editor.set_hourly_rate(f64::NAN).is_err());
        assert!(editor.set_hourly_rate(35.0).is_ok());
    }

    #[test]
    fn removed_skills_stay_removed_after_merge() {
        let mut sections = ProviderSections::default();
        let mut editor = ProfileEditor::new(&sections.profile);
        editor.add_skill("Go");
        editor.add_skill("SQL");
        ProviderRegistration::apply_patch(&mut sections, editor.patch()).unwrap();

        editor.remove_skill("Go");
        ProviderRegistration::apply_patch(&mut sections, editor.patch()).unwrap();
        assert_eq!(
            sections.profile.skills,
            BTreeSet::from(["SQL".to_string()])
        );
    }

    #[test]
    fn gallery_editor_slots() {
        let mut editor = GalleryEditor::new(&GalleryData::default());
        assert!(editor.edit_item(3, |item| item.title = "x".into()).is_err());

        editor
            .edit_item(0, |item| {
                item.title = "Brand identity".into();
                item.description = "Logo and colour system".into();
                item.thumbnail = Some(BinaryRef::new("logo.png", "image/png", 4096));
            })
            .unwrap()
            .set_item_skills(0, &["Illustrator", " ", "Branding"])
            .unwrap();
        assert_eq!(editor.draft().portfolio_items[0].skills.len(), 2);

        editor.add_testimonial(Testimonial {
            client_name: "Layla".into(),
            client_company: None,
            rating: Rating::try_from(5).unwrap(),
            comment: "Fast and precise".into(),
            project_title: "Rebrand".into(),
        });
        assert!(editor.remove_testimonial(4).is_none());
        assert!(editor.remove_testimonial(0).is_some());

        let mut sections = ProviderSections::default();
        ProviderRegistration::apply_patch(&mut sections, editor.patch()).unwrap();
        assert!(ProviderRegistration::validate_step(&sections, 3));
    }

    #[test]
    fn admission_editor_finishes_only_when_complete() {
        let bank = sample_bank();
        let mut editor = AdmissionTestEditor::new(&bank);
        editor.answer(QuestionId(1), ChoiceId(1)).unwrap();
        assert_eq!(editor.unanswered(), 1);
        assert_eq!(editor.finish(), Err(WorkflowError::UnansweredQuestions(1)));

        editor.answer(QuestionId(2), ChoiceId(0)).unwrap();
        let mut sections = ProviderSections::default();
        ProviderRegistration::apply_patch(&mut sections, editor.finish().unwrap()).unwrap();
        assert!(sections.admission_test.completed());
        assert_eq!(sections.admission_test.score(), 100);
    }
}
