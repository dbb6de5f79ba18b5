//! Four-step freelancer verification: government ID, selfie with ID, phone
//! number and payout method.

use serde::Serialize;

use crate::flow::{unknown_step, Flow};
use crate::navigation::Page;
use crate::sections::{
    BinaryRef, IdentityDocumentData, PaymentData, PaymentMethod, PaymentPatch, PhoneData, PhonePatch,
    SelfieData,
};
use crate::session::User;
use crate::util::errors::WorkflowError;
use crate::validate::{self, ValidationError};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationSections {
    pub identity_document: IdentityDocumentData,
    pub selfie: SelfieData,
    pub phone: PhoneData,
    pub payment: PaymentData,
}

#[derive(Debug, Clone, PartialEq)]
pub enum VerificationPatch {
    IdentityDocument(BinaryRef),
    Selfie(BinaryRef),
    Phone(PhonePatch),
    Payment(PaymentPatch),
}

impl VerificationPatch {
    pub fn phone_number(number: impl Into<String>) -> Self {
        VerificationPatch::Phone(PhonePatch {
            number: Some(number.into().trim().to_string()),
            verified: None,
        })
    }

    /// Confirms the number currently on file.
    pub fn mark_phone_verified() -> Self {
        VerificationPatch::Phone(PhonePatch {
            number: None,
            verified: Some(true),
        })
    }

    pub fn payment_method(method: PaymentMethod) -> Self {
        VerificationPatch::Payment(PaymentPatch {
            method: Some(method),
            bank_account: None,
        })
    }

    pub fn bank_account(account: impl Into<String>) -> Self {
        VerificationPatch::Payment(PaymentPatch {
            method: None,
            bank_account: Some(account.into().trim().to_string()),
        })
    }
}

pub struct FreelancerVerification;

impl Flow for FreelancerVerification {
    type Sections = VerificationSections;
    type Patch = VerificationPatch;

    const NAME: &'static str = "freelancer-verification";
    const PAGE: Page = Page::FreelancerVerification;
    const STEP_TITLES: &'static [&'static str] = &[
        "Identity Verification",
        "Photo Verification",
        "Phone Verification",
        "Payment Setup",
    ];

    fn initial_sections(_user: &User) -> VerificationSections {
        VerificationSections::default()
    }

    fn step_errors(sections: &VerificationSections, step: u8) -> Vec<ValidationError> {
        match step {
            1 => validate::identity_errors(&sections.identity_document),
            2 => validate::selfie_errors(&sections.selfie),
            3 => validate::phone_errors(&sections.phone),
            4 => validate::payment_errors(&sections.payment),
            _ => unknown_step(),
        }
    }

    fn patch_section(patch: &VerificationPatch) -> &'static str {
        match patch {
            VerificationPatch::IdentityDocument(_) => "identityDocument",
            VerificationPatch::Selfie(_) => "selfie",
            VerificationPatch::Phone(_) => "phone",
            VerificationPatch::Payment(_) => "payment",
        }
    }

    fn apply_patch(
        sections: &mut VerificationSections,
        patch: VerificationPatch,
    ) -> Result<(), WorkflowError> {
        match patch {
            VerificationPatch::IdentityDocument(document) => {
                sections.identity_document.document = Some(document);
            }
            VerificationPatch::Selfie(photo) => sections.selfie.photo = Some(photo),
            VerificationPatch::Phone(patch) => patch.merge_into(&mut sections.phone),
            VerificationPatch::Payment(patch) => patch.merge_into(&mut sections.payment),
        }
        Ok(())
    }
}
