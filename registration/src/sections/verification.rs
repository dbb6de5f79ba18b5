use serde::{Deserialize, Serialize};

use super::BinaryRef;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityDocumentData {
    pub document: Option<BinaryRef>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelfieData {
    pub photo: Option<BinaryRef>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PhoneData {
    pub number: String,
    pub verified: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PhonePatch {
    pub number: Option<String>,
    pub verified: Option<bool>,
}

impl PhonePatch {
    /// A changed number invalidates an earlier verification.
    pub(crate) fn merge_into(self, data: &mut PhoneData) {
        if let Some(number) = self.number {
            if number != data.number {
                data.number = number;
                data.verified = false;
            }
        }
        if let Some(verified) = self.verified {
            data.verified = verified;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    BankAccount,
    Paypal,
    Stripe,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentData {
    pub method: Option<PaymentMethod>,
    pub bank_account: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaymentPatch {
    pub method: Option<PaymentMethod>,
    pub bank_account: Option<String>,
}

impl PaymentPatch {
    pub(crate) fn merge_into(self, data: &mut PaymentData) {
        if let Some(method) = self.method {
            data.method = Some(method);
        }
        if let Some(bank_account) = self.bank_account {
            data.bank_account = bank_account;
        }
    }
}
