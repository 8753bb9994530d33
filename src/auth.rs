//! Login and authorization rules.
//!
//! Each deployment variant authenticates differently (domain suffix, shared
//! password, per-user password). Credentials are compared and stored in
//! clear text with no lockout or rate limiting; that weakness is inherited
//! from the original deployments and documented rather than fixed.
//!
//! Authorization for mutations is centralized in [`authorize`] so every
//! operation asks the same question the same way instead of scattering role
//! checks per feature.

use crate::config::AuthConfig;
use crate::error::{Error, Result};
use crate::model::{Role, Session};
use crate::store::UserStore;
use crate::variant::{LoginMethod, Variant, EVERYONE};

/// Validate a login attempt and mint the per-session identity
pub fn login(
    config: &AuthConfig,
    users: &UserStore,
    email: &str,
    password: Option<&str>,
) -> Result<Session> {
    let email = email.trim();
    match config.variant.login_method() {
        LoginMethod::DomainSuffix => {
            // Variant A: any string containing the company suffix gets in.
            if !email.contains(&config.domain) {
                return Err(Error::DomainMismatch(config.domain.clone()));
            }
            let role = if email.eq_ignore_ascii_case(&config.admin_email) {
                Role::Admin
            } else {
                Role::User
            };
            Ok(Session {
                email: email.to_string(),
                role,
            })
        }
        LoginMethod::SharedPassword => {
            let user = users
                .find(email)?
                .ok_or_else(|| Error::UnauthorizedEmail(email.to_string()))?;
            if password != Some(config.shared_password.as_str()) {
                return Err(Error::InvalidPassword(email.to_string()));
            }
            Ok(Session {
                email: user.email,
                role: user.role,
            })
        }
        LoginMethod::PerUserPassword => {
            let user = users
                .find(email)?
                .ok_or_else(|| Error::UnauthorizedEmail(email.to_string()))?;
            let expected = user
                .password
                .clone()
                .unwrap_or_else(|| config.shared_password.clone());
            if password != Some(expected.as_str()) {
                return Err(Error::InvalidPassword(email.to_string()));
            }
            Ok(Session {
                email: user.email,
                role: user.role,
            })
        }
    }
}

/// Self-service password change, variant C only
pub fn change_password(
    config: &AuthConfig,
    users: &UserStore,
    session: &Session,
    new_password: &str,
) -> Result<()> {
    if !config.variant.supports_password_change() {
        return Err(Error::Forbidden {
            role: session.role.as_str().to_string(),
            action: "change passwords on this deployment".to_string(),
        });
    }
    users.set_password(&session.email, new_password)
}

/// A mutation someone is asking to perform
#[derive(Debug, Clone)]
pub enum Action<'a> {
    /// Update status/completion remarks of the task assigned to `assignee`
    UpdateStatus { assignee: &'a str },
    Reassign,
    SetReminder,
    BulkEdit,
}

impl Action<'_> {
    fn describe(&self) -> &'static str {
        match self {
            Action::UpdateStatus { .. } => "update this task's status",
            Action::Reassign => "reassign tasks",
            Action::SetReminder => "set reminders",
            Action::BulkEdit => "bulk-edit the task grid",
        }
    }
}

/// The single authorization gate every mutation goes through
pub fn authorize(variant: Variant, session: &Session, action: &Action) -> Result<()> {
    let allowed = match action {
        Action::UpdateStatus { assignee } => {
            if session.is_admin() {
                // Variant C bars admins from status edits entirely.
                variant.admin_may_update_status()
            } else {
                assignee.eq_ignore_ascii_case(&session.email) || *assignee == EVERYONE
            }
        }
        Action::Reassign | Action::SetReminder => session.is_admin(),
        Action::BulkEdit => session.is_admin() && variant.supports_bulk_edit(),
    };

    if allowed {
        Ok(())
    } else {
        Err(Error::Forbidden {
            role: session.role.as_str().to_string(),
            action: action.describe().to_string(),
        })
    }
}
