use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};

use helpdesk_core::ServiceError;

use crate::model::{Claims, Role};
use crate::service::AuthService;

impl AuthService {
    /// Issue an admin token. Admin tokens carry no store identity.
    pub fn issue_admin_token(&self) -> Result<String, ServiceError> {
        self.sign("admin".to_string(), Role::Admin, None, None)
    }

    /// Issue a token scoped to one store.
    pub fn issue_store_token(&self, store_id: &str, store_code: &str) -> Result<String, ServiceError> {
        self.sign(
            store_id.to_string(),
            Role::Store,
            Some(store_id.to_string()),
            Some(store_code.to_string()),
        )
    }

    /// Verify and decode a token. Expired or tampered tokens are `Unauthorized`.
    pub fn verify_token(&self, token: &str) -> Result<Claims, ServiceError> {
        let mut validation = Validation::default();
        validation.validate_exp = true;

        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.config.jwt_secret.as_bytes()),
            &validation,
        )
        .map_err(|e| ServiceError::Unauthorized(format!("invalid or expired token: {}", e)))?;

        Ok(token_data.claims)
    }

    fn sign(
        &self,
        sub: String,
        role: Role,
        store_id: Option<String>,
        store_code: Option<String>,
    ) -> Result<String, ServiceError> {
        let now = chrono::Utc::now();
        let exp = now + chrono::Duration::seconds(self.config.token_ttl);

        let claims = Claims {
            sub,
            role,
            store_id,
            store_code,
            iat: now.timestamp(),
            exp: exp.timestamp(),
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.config.jwt_secret.as_bytes()),
        )
        .map_err(|e| ServiceError::Internal(format!("JWT encode failed: {}", e)))
    }
}
