//! Per-step section data for both wizards, plus the partial updates
//! (patches) the controller merges into them.
//!
//! Merging is shallow: every `Some` field of a patch replaces the stored
//! value, list-valued fields included. Editors always send their full list.

pub mod account;
pub mod gallery;
pub mod profile;
pub mod verification;

pub use account::{AccountData, AccountPatch, AccountType};
pub use gallery::{
    GalleryData, GalleryPatch, PortfolioItem, Rating, Testimonial, MAX_PORTFOLIO_ITEMS,
};
pub use profile::{Availability, LanguageSkill, Proficiency, ProfileData, ProfilePatch};
pub use verification::{
    IdentityDocumentData, PaymentData, PaymentMethod, PaymentPatch, PhoneData, PhonePatch,
    SelfieData,
};

use serde::{Deserialize, Serialize};

/// Handle to an uploaded attachment. Where the bytes live is up to the
/// persistence collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BinaryRef {
    pub file_name: String,
    pub content_type: String,
    pub size_bytes: u64,
}

impl BinaryRef {
    pub fn new(file_name: impl Into<String>, content_type: impl Into<String>, size_bytes: u64) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            size_bytes,
        }
    }
}
