use helpdesk_core::ServiceError;

use super::{Claims, Role};

/// How an admin proved who they are.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Credential {
    /// `Authorization: Bearer <jwt>` issued by admin login.
    Token,
    /// `X-Admin-Password` header. Accepted on ticket operations only.
    PasswordHeader,
}

/// The authenticated capability of a request, resolved once by the
/// middleware and handed to the ticket engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Caller {
    Admin { via: Credential },
    Store { store_id: String },
}

impl Caller {
    /// Map verified token claims to a caller.
    ///
    /// Store tokens without a store id are rejected.
    pub fn from_claims(claims: Claims) -> Result<Self, ServiceError> {
        match claims.role {
            Role::Admin => Ok(Caller::Admin {
                via: Credential::Token,
            }),
            Role::Store => match claims.store_id {
                Some(store_id) if !store_id.is_empty() => Ok(Caller::Store { store_id }),
                _ => Err(ServiceError::Unauthorized("invalid token".into())),
            },
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Caller::Admin { .. })
    }

    pub fn role(&self) -> Role {
        match self {
            Caller::Admin { .. } => Role::Admin,
            Caller::Store { .. } => Role::Store,
        }
    }

    /// The caller's own store, if it is a store.
    pub fn store_id(&self) -> Option<&str> {
        match self {
            Caller::Store { store_id } => Some(store_id),
            Caller::Admin { .. } => None,
        }
    }

    /// Admins see every store; a store sees only itself.
    pub fn can_access_store(&self, store_id: &str) -> bool {
        match self {
            Caller::Admin { .. } => true,
            Caller::Store { store_id: own } => own == store_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims(role: Role, store_id: Option<&str>) -> Claims {
        Claims {
            sub: "x".into(),
            role,
            store_id: store_id.map(String::from),
            store_code: None,
            iat: 0,
            exp: 0,
        }
    }

    #[test]
    fn admin_claims_map_to_token_admin() {
        let caller = Caller::from_claims(claims(Role::Admin, None)).unwrap();
        assert_eq!(caller, Caller::Admin { via: Credential::Token });
        assert!(caller.is_admin());
        assert_eq!(caller.store_id(), None);
    }

    #[test]
    fn store_claims_need_store_id() {
        let caller = Caller::from_claims(claims(Role::Store, Some("s1"))).unwrap();
        assert_eq!(caller.store_id(), Some("s1"));

        let err = Caller::from_claims(claims(Role::Store, None)).unwrap_err();
        assert!(matches!(err, ServiceError::Unauthorized(_)));
        assert!(Caller::from_claims(claims(Role::Store, Some(""))).is_err());
    }

    #[test]
    fn store_access_is_scoped() {
        let store = Caller::Store { store_id: "a".into() };
        assert!(store.can_access_store("a"));
        assert!(!store.can_access_store("b"));

        let admin = Caller::Admin { via: Credential::PasswordHeader };
        assert!(admin.can_access_store("b"));
    }
}
