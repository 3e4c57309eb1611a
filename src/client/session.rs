//! Sessions and quota tiers
//!
//! A tier is never stored: it is recomputed from the current session.

use serde::{Deserialize, Serialize};

/// Role tag that unlocks the premium tier
pub const PREMIUM_ROLE: &str = "premium";

/// Authenticated identity handed over by the identity provider
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user_id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub roles: Vec<String>,
}

impl Session {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            ..Default::default()
        }
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.roles.push(role.into());
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }
}

/// User object as the hosted identity widget delivers it
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IdentityUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub app_metadata: AppMetadata,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppMetadata {
    #[serde(default)]
    pub roles: Vec<String>,
}

impl From<IdentityUser> for Session {
    fn from(user: IdentityUser) -> Self {
        Self {
            user_id: user.id,
            email: user.email,
            roles: user.app_metadata.roles,
        }
    }
}

/// Word ceiling applied to a submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuotaTier {
    Anonymous,
    Authenticated,
    Premium,
}

impl QuotaTier {
    pub const ALL: [QuotaTier; 3] = [QuotaTier::Anonymous, QuotaTier::Authenticated, QuotaTier::Premium];

    /// Tier for the current session
    pub fn for_session(session: Option<&Session>) -> Self {
        match session {
            None => QuotaTier::Anonymous,
            Some(s) if s.has_role(PREMIUM_ROLE) => QuotaTier::Premium,
            Some(_) => QuotaTier::Authenticated,
        }
    }

    pub const fn word_limit(self) -> usize {
        match self {
            QuotaTier::Anonymous => 300,
            QuotaTier::Authenticated => 500,
            QuotaTier::Premium => 2000,
        }
    }

    /// Label shown next to the word counter
    pub fn badge(self) -> Option<&'static str> {
        match self {
            QuotaTier::Anonymous => None,
            QuotaTier::Authenticated => Some("Logged In"),
            QuotaTier::Premium => Some("Premium"),
        }
    }

    /// Whether `words` may be submitted under this tier
    pub fn admits(self, words: usize) -> bool {
        (1..=self.word_limit()).contains(&words)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_for_session() {
        assert_eq!(QuotaTier::for_session(None), QuotaTier::Anonymous);
        assert_eq!(QuotaTier::for_session(Some(&Session::new("u1"))), QuotaTier::Authenticated);
        assert_eq!(
            QuotaTier::for_session(Some(&Session::new("u1").with_role("editor"))),
            QuotaTier::Authenticated
        );
        assert_eq!(
            QuotaTier::for_session(Some(&Session::new("u1").with_role("editor").with_role("premium"))),
            QuotaTier::Premium
        );
    }

    #[test]
    fn test_limits_non_decreasing() {
        assert_eq!(QuotaTier::Anonymous.word_limit(), 300);
        assert_eq!(QuotaTier::Authenticated.word_limit(), 500);
        assert_eq!(QuotaTier::Premium.word_limit(), 2000);
        for pair in QuotaTier::ALL.windows(2) {
            assert!(pair[0] < pair[1]);
            assert!(pair[0].word_limit() <= pair[1].word_limit());
        }
    }

    #[test]
    fn test_admits_bounds() {
        let tier = QuotaTier::Anonymous;
        assert!(!tier.admits(0));
        assert!(tier.admits(1));
        assert!(tier.admits(300));
        assert!(!tier.admits(301));
    }

    #[test]
    fn test_identity_user_conversion() {
        let user: IdentityUser = serde_json::from_value(serde_json::json!({
            "id": "abc",
            "email": "a@example.com",
            "app_metadata": {"provider": "email", "roles": ["premium"]}
        }))
        .unwrap();
        let session = Session::from(user);
        assert_eq!(session.user_id, "abc");
        assert_eq!(QuotaTier::for_session(Some(&session)), QuotaTier::Premium);

        let bare: IdentityUser = serde_json::from_value(serde_json::json!({"id": "x"})).unwrap();
        assert!(Session::from(bare).roles.is_empty());
    }
}
