// Recipient contact value object
// A transfer recipient is identified by phone or email, not necessarily a
// registered account.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipientContact {
    pub phone: Option<String>,
    pub email: Option<String>,
}

impl RecipientContact {
    /// Trims both fields and drops empty ones; returns None when neither
    /// phone nor email survives.
    pub fn normalized(phone: Option<String>, email: Option<String>) -> Option<Self> {
        let phone = normalize_optional_text(phone);
        let email = normalize_optional_text(email);
        if phone.is_none() && email.is_none() {
            return None;
        }
        Some(Self { phone, email })
    }
}

fn normalize_optional_text(value: Option<String>) -> Option<String> {
    value.and_then(|raw| {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}
