//! Four-step provider registration: account, profile, business gallery and
//! admission test.

use serde::Serialize;
use std::fmt;

use crate::admission::AdmissionTestData;
use crate::flow::{unknown_step, Flow};
use crate::navigation::Page;
use crate::sections::{AccountData, AccountPatch, GalleryData, GalleryPatch, ProfileData, ProfilePatch};
use crate::session::User;
use crate::util::errors::WorkflowError;
use crate::validate::{self, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionKey {
    Account,
    Profile,
    Gallery,
    AdmissionTest,
}

impl SectionKey {
    pub const ALL: [SectionKey; 4] = [
        SectionKey::Account,
        SectionKey::Profile,
        SectionKey::Gallery,
        SectionKey::AdmissionTest,
    ];

    /// Key used on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            SectionKey::Account => "account",
            SectionKey::Profile => "profile",
            SectionKey::Gallery => "gallery",
            SectionKey::AdmissionTest => "admissionTest",
        }
    }

    pub fn step(self) -> u8 {
        match self {
            SectionKey::Account => 1,
            SectionKey::Profile => 2,
            SectionKey::Gallery => 3,
            SectionKey::AdmissionTest => 4,
        }
    }
}

impl fmt::Display for SectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderSections {
    pub account: AccountData,
    pub profile: ProfileData,
    pub gallery: GalleryData,
    pub admission_test: AdmissionTestData,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ProviderPatch {
    Account(AccountPatch),
    Profile(ProfilePatch),
    Gallery(GalleryPatch),
    /// Produced by grading against the question bank.
    AdmissionTest(AdmissionTestData),
}

impl ProviderPatch {
    pub fn key(&self) -> SectionKey {
        match self {
            ProviderPatch::Account(_) => SectionKey::Account,
            ProviderPatch::Profile(_) => SectionKey::Profile,
            ProviderPatch::Gallery(_) => SectionKey::Gallery,
            ProviderPatch::AdmissionTest(_) => SectionKey::AdmissionTest,
        }
    }
}

pub struct ProviderRegistration;

impl Flow for ProviderRegistration {
    type Sections = ProviderSections;
    type Patch = ProviderPatch;

    const NAME: &'static str = "provider-registration";
    const PAGE: Page = Page::ProviderRegistration;
    const STEP_TITLES: &'static [&'static str] =
        &["Account data", "Profile", "Business Gallery", "Admission test"];

    fn initial_sections(user: &User) -> ProviderSections {
        ProviderSections {
            account: AccountData {
                full_name: user.name.clone(),
                ..AccountData::default()
            },
            ..ProviderSections::default()
        }
    }

    fn step_errors(sections: &ProviderSections, step: u8) -> Vec<ValidationError> {
        match SectionKey::ALL.into_iter().find(|key| key.step() == step) {
            Some(SectionKey::Account) => validate::account_errors(&sections.account),
            Some(SectionKey::Profile) => validate::profile_errors(&sections.profile),
            Some(SectionKey::Gallery) => validate::gallery_errors(&sections.gallery),
            Some(SectionKey::AdmissionTest) => validate::admission_errors(&sections.admission_test),
            None => unknown_step(),
        }
    }

    fn patch_section(patch: &ProviderPatch) -> &'static str {
        patch.key().as_str()
    }

    fn apply_patch(sections: &mut ProviderSections, patch: ProviderPatch) -> Result<(), WorkflowError> {
        match patch {
            ProviderPatch::Account(patch) => {
                patch.merge_into(&mut sections.account);
                Ok(())
            }
            ProviderPatch::Profile(patch) => patch.merge_into(&mut sections.profile),
            ProviderPatch::Gallery(patch) => patch.merge_into(&mut sections.gallery),
            ProviderPatch::AdmissionTest(result) => {
                sections.admission_test = result;
                Ok(())
            }
        }
    }
}
