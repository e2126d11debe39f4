//! argon2id hashing for store PINs and the admin password.

use argon2::Argon2;
use helpdesk_core::ServiceError;
use password_hash::rand_core::OsRng;
use password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};

/// Hash a plain secret with argon2id and a fresh random salt.
pub fn hash_password(password: &str) -> Result<String, ServiceError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| ServiceError::Internal(format!("failed to hash secret: {e}")))
}

/// Verify a secret against an argon2id hash. Malformed hashes never verify.
pub fn verify_password(password: &str, hash: &str) -> bool {
    match PasswordHash::new(hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify() {
        let hash = hash_password("1234").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("1234", &hash));
        assert!(!verify_password("4321", &hash));
    }

    #[test]
    fn salts_differ() {
        assert_ne!(hash_password("same").unwrap(), hash_password("same").unwrap());
    }

    #[test]
    fn plaintext_is_not_a_hash() {
        assert!(!verify_password("1234", "1234"));
        assert!(!verify_password("test", "not-a-hash"));
    }
}
