use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Role assigned to a user account, in decreasing order of privilege.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Editor,
    Author,
    Viewer,
}

impl Role {
    /// Return the wire representation of the role.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Editor => "editor",
            Self::Author => "author",
            Self::Viewer => "viewer",
        }
    }

    /// Whether this role is allowed to perform the named content operation.
    ///
    /// Mirrors the server's role table: admins additionally manage users,
    /// editors have full content CRUD, authors cannot delete, viewers only
    /// read. The server enforces this authoritatively; the client uses it
    /// to decide which controls to offer.
    #[must_use]
    pub fn permits(self, operation: &str) -> bool {
        let allowed: &[&str] = match self {
            Self::Admin => &["create", "read", "update", "delete", "manage_users"],
            Self::Editor => &["create", "read", "update", "delete"],
            Self::Author => &["create", "read", "update"],
            Self::Viewer => &["read"],
        };
        allowed.contains(&operation)
    }
}

impl Default for Role {
    fn default() -> Self {
        Self::Viewer
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A user account as returned by the server.
///
/// The client holds a read-only cached copy; every field is
/// server-authoritative. All fields beyond the identity triple are
/// defaulted so the minimal record written after a login response that
/// omits the user object still deserializes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(default)]
    pub id: i64,

    pub username: String,

    #[serde(default)]
    pub email: String,

    #[serde(default)]
    pub first_name: String,

    #[serde(default)]
    pub last_name: String,

    #[serde(default)]
    pub role: Role,

    #[serde(default)]
    pub bio: Option<String>,

    /// URL of the profile image, if one was uploaded.
    #[serde(default)]
    pub profile_image: Option<String>,

    #[serde(default = "default_true")]
    pub is_active_user: bool,

    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

fn default_true() -> bool {
    true
}

impl User {
    /// Build the minimal cached record for a login response that carried a
    /// token but no user object. Only the submitted username is known.
    #[must_use]
    pub fn minimal(username: impl Into<String>) -> Self {
        Self {
            id: 0,
            username: username.into(),
            email: String::new(),
            first_name: String::new(),
            last_name: String::new(),
            role: Role::default(),
            bio: None,
            profile_image: None,
            is_active_user: true,
            created_at: None,
            updated_at: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_round_trips_through_wire_form() {
        for role in [Role::Admin, Role::Editor, Role::Author, Role::Viewer] {
            let json = serde_json::to_string(&role).unwrap();
            assert_eq!(json, format!("\"{}\"", role.as_str()));
            let back: Role = serde_json::from_str(&json).unwrap();
            assert_eq!(back, role);
        }
    }

    #[test]
    fn role_permission_table() {
        assert!(Role::Admin.permits("manage_users"));
        assert!(Role::Editor.permits("delete"));
        assert!(!Role::Editor.permits("manage_users"));
        assert!(Role::Author.permits("update"));
        assert!(!Role::Author.permits("delete"));
        assert!(Role::Viewer.permits("read"));
        assert!(!Role::Viewer.permits("create"));
    }

    #[test]
    fn minimal_user_deserializes_from_bare_username() {
        let user: User = serde_json::from_str(r#"{"username": "alice"}"#).unwrap();
        assert_eq!(user.username, "alice");
        assert_eq!(user.id, 0);
        assert_eq!(user.role, Role::Viewer);
        assert!(user.is_active_user);
    }

    #[test]
    fn full_user_deserializes() {
        let user: User = serde_json::from_str(
            r#"{
                "id": 7,
                "username": "alice",
                "email": "alice@example.com",
                "first_name": "Alice",
                "last_name": "Author",
                "role": "author",
                "bio": "writes things",
                "profile_image": null,
                "is_active_user": true,
                "created_at": "2025-01-01T00:00:00Z",
                "updated_at": "2025-06-01T00:00:00Z"
            }"#,
        )
        .unwrap();
        assert_eq!(user.id, 7);
        assert_eq!(user.role, Role::Author);
        assert_eq!(user.bio.as_deref(), Some("writes things"));
        assert!(user.created_at.is_some());
    }
}
