//! The authorization guard.

use serde::{Deserialize, Serialize};

use super::error::AccessError;

/// Kinds of owned records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    /// A budget sheet.
    Sheet,
    /// An expense line.
    AccountPayable,
    /// An income line.
    AccountReceivable,
    /// A user account.
    User,
}

impl ResourceKind {
    /// Name of the id field in error messages (`sheetId`, ...).
    #[must_use]
    pub const fn id_label(self) -> &'static str {
        match self {
            Self::Sheet => "sheetId",
            Self::AccountPayable => "accountPayableId",
            Self::AccountReceivable => "accountReceivableId",
            Self::User => "userId",
        }
    }

    /// Human-readable noun.
    #[must_use]
    pub const fn noun(self) -> &'static str {
        match self {
            Self::Sheet => "sheet",
            Self::AccountPayable => "account payable",
            Self::AccountReceivable => "account receivable",
            Self::User => "user",
        }
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.noun())
    }
}

/// What the actor is trying to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Read.
    Access,
    /// Update.
    Modify,
    /// Remove.
    Delete,
    /// Copy into a new record.
    Duplicate,
}

impl Action {
    /// Verb used in permission messages.
    #[must_use]
    pub const fn verb(self) -> &'static str {
        match self {
            Self::Access => "access",
            Self::Modify => "modify",
            Self::Delete => "delete",
            Self::Duplicate => "duplicate",
        }
    }
}

/// A record with a single owning user.
pub trait Owned {
    /// Kind used in error messages.
    const KIND: ResourceKind;

    /// Id of the owning user.
    fn owner_id(&self) -> i32;
}

/// Checks that `resource` exists and belongs to `actor_id`.
///
/// `id` is the id that was looked up, reported when `resource` is `None`.
/// Returns the resource unchanged on success.
///
/// # Errors
///
/// Returns `AccessError::NotFound` if the resource is missing, or
/// `AccessError::Forbidden` if someone else owns it.
pub fn authorize<R: Owned>(
    actor_id: i32,
    action: Action,
    id: i32,
    resource: Option<R>,
) -> Result<R, AccessError> {
    let resource = resource.ok_or(AccessError::NotFound { kind: R::KIND, id })?;

    if resource.owner_id() != actor_id {
        return Err(AccessError::Forbidden {
            kind: R::KIND,
            action,
        });
    }

    Ok(resource)
}

/// Unwraps the actor resolved from a token subject.
///
/// # Errors
///
/// Returns `AccessError::InvalidActor` if the subject no longer exists.
pub fn require_actor<U>(actor: Option<U>) -> Result<U, AccessError> {
    actor.ok_or(AccessError::InvalidActor)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Sheet {
        id: i32,
        creator_user_id: i32,
    }

    impl Owned for Sheet {
        const KIND: ResourceKind = ResourceKind::Sheet;

        fn owner_id(&self) -> i32 {
            self.creator_user_id
        }
    }

    #[test]
    fn test_owner_passes_through() {
        let sheet = Sheet {
            id: 1,
            creator_user_id: 7,
        };

        let result = authorize(7, Action::Access, 1, Some(sheet));

        assert_eq!(
            result.unwrap(),
            Sheet {
                id: 1,
                creator_user_id: 7
            }
        );
    }

    #[test]
    fn test_missing_resource_reports_id() {
        let result = authorize::<Sheet>(7, Action::Delete, 999_999, None);

        assert_eq!(
            result.unwrap_err(),
            AccessError::NotFound {
                kind: ResourceKind::Sheet,
                id: 999_999
            }
        );
    }

    #[test]
    fn test_other_owner_is_forbidden() {
        let sheet = Sheet {
            id: 1,
            creator_user_id: 7,
        };

        let result = authorize(8, Action::Modify, 1, Some(sheet));

        assert_eq!(
            result.unwrap_err(),
            AccessError::Forbidden {
                kind: ResourceKind::Sheet,
                action: Action::Modify
            }
        );
    }

    #[test]
    fn test_require_actor() {
        assert_eq!(require_actor(Some(3)).unwrap(), 3);
        assert_eq!(
            require_actor::<i32>(None).unwrap_err(),
            AccessError::InvalidActor
        );
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(ResourceKind::AccountPayable.to_string(), "account payable");
    }
}
