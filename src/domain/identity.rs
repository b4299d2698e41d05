//! Per-request identity of the visitor.
//!
//! The identity is resolved once per request by the `set_current_user`
//! middleware and stored in the request extensions as a [`CurrentUser`].
//! Guards and handlers only ever read that value.

use std::collections::HashSet;

use crate::domain::entities::{Role, User};

/// A visitor with a valid session.
///
/// `role` is the *effective* role after the configured [`AdminPolicy`] was
/// applied, which may differ from the role stored on the account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: Role,
}

impl AuthenticatedUser {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Identity of the visitor for the lifetime of one request.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CurrentUser {
    /// No session, or a session that could not be resolved.
    #[default]
    Anonymous,
    User(AuthenticatedUser),
}

impl CurrentUser {
    pub fn user(&self) -> Option<&AuthenticatedUser> {
        match self {
            CurrentUser::Anonymous => None,
            CurrentUser::User(user) => Some(user),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, CurrentUser::User(_))
    }

    pub fn is_admin(&self) -> bool {
        self.user().is_some_and(AuthenticatedUser::is_admin)
    }
}

/// Rule deciding which accounts are treated as administrators.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AdminPolicy {
    /// Admin when the stored role is [`Role::Admin`].
    #[default]
    RoleFlag,
    /// Admin when the (lower-cased) email is in the set, whatever the stored role.
    Emails(HashSet<String>),
}

impl AdminPolicy {
    /// Builds an allowlist policy, normalising the addresses.
    pub fn emails<I, S>(emails: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        AdminPolicy::Emails(
            emails
                .into_iter()
                .map(|e| e.as_ref().trim().to_lowercase())
                .filter(|e| !e.is_empty())
                .collect(),
        )
    }

    /// Effective role of `user` under this policy.
    pub fn role_for(&self, user: &User) -> Role {
        match self {
            AdminPolicy::RoleFlag => user.role,
            AdminPolicy::Emails(allowed) => {
                if allowed.contains(&user.email.to_lowercase()) {
                    Role::Admin
                } else {
                    Role::Member
                }
            }
        }
    }

    /// Resolves the request identity for `user`.
    pub fn identify(&self, user: &User) -> AuthenticatedUser {
        AuthenticatedUser {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            role: self.role_for(user),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn user(email: &str, role: Role) -> User {
        User {
            id: 9,
            name: "Linus".to_string(),
            email: email.to_string(),
            password_hash: "hash".to_string(),
            role,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_anonymous_is_default() {
        let current = CurrentUser::default();
        assert!(!current.is_authenticated());
        assert!(!current.is_admin());
        assert!(current.user().is_none());
    }

    #[test]
    fn test_role_flag_policy_uses_stored_role() {
        let policy = AdminPolicy::RoleFlag;
        assert_eq!(policy.role_for(&user("a@b.io", Role::Admin)), Role::Admin);
        assert_eq!(policy.role_for(&user("a@b.io", Role::Member)), Role::Member);
    }

    #[test]
    fn test_email_policy_ignores_stored_role() {
        let policy = AdminPolicy::emails([" Boss@Example.com ", ""]);

        assert_eq!(
            policy.role_for(&user("boss@example.com", Role::Member)),
            Role::Admin
        );
        assert_eq!(
            policy.role_for(&user("other@example.com", Role::Admin)),
            Role::Member
        );
    }

    #[test]
    fn test_identify_carries_effective_role() {
        let identity = AdminPolicy::RoleFlag.identify(&user("x@y.z", Role::Admin));
        assert_eq!(identity.id, 9);
        assert_eq!(identity.email, "x@y.z");
        assert!(identity.is_admin());

        let current = CurrentUser::User(identity);
        assert!(current.is_authenticated());
        assert!(current.is_admin());
    }
}
