//! Step validators: pure checks over section data.
//!
//! Each step reports the field errors that keep it from being complete; the
//! step predicate holds exactly when that list is empty. Nothing here
//! panics on default or missing data.

use serde::Serialize;
use std::fmt;

use crate::admission::AdmissionTestData;
use crate::sections::{
    AccountData, GalleryData, IdentityDocumentData, PaymentData, PaymentMethod, PhoneData,
    ProfileData, SelfieData,
};

/// A field that blocks its step, with the message shown next to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    pub field: &'static str,
    pub message: &'static str,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

fn require(errors: &mut Vec<ValidationError>, ok: bool, field: &'static str, message: &'static str) {
    if !ok {
        errors.push(ValidationError { field, message });
    }
}

pub fn account_errors(account: &AccountData) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    require(&mut errors, !account.username.is_empty(), "username", "choose a username");
    require(&mut errors, account.account_type.is_some(), "accountType", "choose an account type");
    require(&mut errors, account.terms_accepted, "termsAccepted", "accept the terms of service");
    require(&mut errors, account.privacy_accepted, "privacyAccepted", "accept the privacy policy");
    errors
}

pub fn profile_errors(profile: &ProfileData) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    require(&mut errors, !profile.job_title.is_empty(), "jobTitle", "enter a job title");
    require(&mut errors, !profile.specialization.is_empty(), "specialization", "enter a specialization");
    require(&mut errors, !profile.introduction.is_empty(), "introduction", "introduce yourself");
    require(&mut errors, !profile.skills.is_empty(), "skills", "add at least one skill");
    errors
}

pub fn gallery_errors(gallery: &GalleryData) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    require(
        &mut errors,
        gallery.portfolio_items.iter().any(|item| item.is_showcase_ready()),
        "portfolioItems",
        "complete one portfolio item with a title, description and thumbnail",
    );
    errors
}

pub fn admission_errors(test: &AdmissionTestData) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    require(&mut errors, test.completed(), "admissionTest", "complete the admission test");
    errors
}

pub fn identity_errors(identity: &IdentityDocumentData) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    require(&mut errors, identity.document.is_some(), "identityDocument", "upload a government ID");
    errors
}

pub fn selfie_errors(selfie: &SelfieData) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    require(&mut errors, selfie.photo.is_some(), "selfieWithId", "upload a selfie holding your ID");
    errors
}

pub fn phone_errors(phone: &PhoneData) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    require(&mut errors, !phone.number.is_empty(), "phoneNumber", "enter a phone number");
    require(&mut errors, phone.verified, "phoneVerified", "verify your phone number");
    errors
}

/// A bank account number is only required when paying out to a bank.
pub fn payment_errors(payment: &PaymentData) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    require(&mut errors, payment.method.is_some(), "paymentMethod", "select a payment method");
    require(
        &mut errors,
        payment.method != Some(PaymentMethod::BankAccount) || !payment.bank_account.is_empty(),
        "bankAccount",
        "enter your bank account number",
    );
    errors
}

pub fn account_complete(account: &AccountData) -> bool {
    account_errors(account).is_empty()
}

pub fn profile_complete(profile: &ProfileData) -> bool {
    profile_errors(profile).is_empty()
}

pub fn gallery_complete(gallery: &GalleryData) -> bool {
    gallery_errors(gallery).is_empty()
}

pub fn admission_complete(test: &AdmissionTestData) -> bool {
    admission_errors(test).is_empty()
}
