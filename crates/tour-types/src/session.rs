use serde::{Deserialize, Serialize};

/// Role string granting access to the admin dashboard.
pub const ADMIN_ROLE: &str = "admin";

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: String,
    pub user_id: String,
    #[serde(default)]
    pub expires_at: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

/// Body of a successful `get-session` call.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SessionEnvelope {
    pub session: Session,
    pub user: User,
}

impl User {
    /// Case-insensitive role check. A user without a role has none.
    pub fn has_role(&self, role: &str) -> bool {
        self.role
            .as_deref()
            .is_some_and(|own| own.trim().to_lowercase() == role.to_lowercase())
    }

    pub fn is_admin(&self) -> bool {
        self.has_role(ADMIN_ROLE)
    }

    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            &self.email
        } else {
            &self.name
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: Option<&str>) -> User {
        User {
            id: "u1".into(),
            name: String::new(),
            email: "ana@example.com".into(),
            role: role.map(Into::into),
            image: None,
        }
    }

    #[test]
    fn role_comparison_is_case_folded() {
        assert!(user(Some("ADMIN")).is_admin());
        assert!(user(Some("Admin")).is_admin());
        assert!(!user(Some("user")).is_admin());
        assert!(!user(Some("administrator")).is_admin());
        assert!(!user(None).is_admin());
    }

    #[test]
    fn null_session_decodes_to_none() {
        let envelope: Option<SessionEnvelope> = serde_json::from_str("null").unwrap();
        assert!(envelope.is_none());
    }

    #[test]
    fn envelope_decodes_backend_payload() {
        let envelope: SessionEnvelope = serde_json::from_str(
            r#"{
                "session": {"id": "s1", "userId": "u1", "expiresAt": "2030-01-01T00:00:00Z", "token": "ignored"},
                "user": {"id": "u1", "name": "Ana", "email": "ana@example.com", "role": "admin"}
            }"#,
        )
        .unwrap();
        assert_eq!(envelope.session.user_id, "u1");
        assert!(envelope.user.is_admin());
        assert_eq!(envelope.user.display_name(), "Ana");
    }

    #[test]
    fn display_name_falls_back_to_email() {
        assert_eq!(user(None).display_name(), "ana@example.com");
    }
}
