use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountType {
    Freelancer,
    Client,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountData {
    pub full_name: String,
    pub username: String,
    pub account_type: Option<AccountType>,
    pub terms_accepted: bool,
    pub privacy_accepted: bool,
}

impl Default for AccountData {
    fn default() -> Self {
        Self {
            full_name: String::new(),
            username: String::new(),
            account_type: Some(AccountType::Freelancer),
            terms_accepted: false,
            privacy_accepted: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AccountPatch {
    pub full_name: Option<String>,
    pub username: Option<String>,
    pub account_type: Option<AccountType>,
    pub terms_accepted: Option<bool>,
    pub privacy_accepted: Option<bool>,
}

impl AccountPatch {
    pub(crate) fn merge_into(self, data: &mut AccountData) {
        if let Some(full_name) = self.full_name {
            data.full_name = full_name;
        }
        if let Some(username) = self.username {
            data.username = username;
        }
        if let Some(account_type) = self.account_type {
            data.account_type = Some(account_type);
        }
        if let Some(terms) = self.terms_accepted {
            data.terms_accepted = terms;
        }
        if let Some(privacy) = self.privacy_accepted {
            data.privacy_accepted = privacy;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_only_touches_supplied_fields() {
        let mut data = AccountData {
            full_name: "Mona Saeed".to_string(),
            ..AccountData::default()
        };

        AccountPatch {
            username: Some("mona".to_string()),
            terms_accepted: Some(true),
            ..AccountPatch::default()
        }
        .merge_into(&mut data);

        assert_eq!(data.full_name, "Mona Saeed");
        assert_eq!(data.username, "mona");
        assert!(data.terms_accepted);
        assert!(!data.privacy_accepted);
        assert_eq!(data.account_type, Some(AccountType::Freelancer));
    }
}
