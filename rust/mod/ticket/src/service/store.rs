use rand::Rng;
use tracing::{info, warn};

use helpdesk_auth::{hash_password, verify_password, Caller};
use helpdesk_core::{new_id, now_rfc3339, ServiceError};
use helpdesk_sql::{Row, SQLExecutor, Value};

use super::{require, storage, text, HelpdeskService};
use crate::model::{CreateStore, PinReset, Store, UpdateStore};

const STORE_COLUMNS: &str = "id, name, code, is_active, created_at";

const PIN_LEN: std::ops::RangeInclusive<usize> = 4..=12;

impl HelpdeskService {
    /// All stores, newest first.
    pub fn list_stores(&self) -> Result<Vec<Store>, ServiceError> {
        self.in_tx(|tx| {
            let rows = tx
                .query(
                    &format!("SELECT {STORE_COLUMNS} FROM stores ORDER BY created_at DESC, rowid DESC"),
                    &[],
                )
                .map_err(storage)?;
            rows.iter().map(row_to_store).collect()
        })
    }

    pub fn get_store(&self, id: &str) -> Result<Store, ServiceError> {
        self.in_tx(|tx| load_store(tx, id))
    }

    /// Register a new store. The PIN is hashed before it is written.
    pub fn create_store(&self, input: CreateStore) -> Result<Store, ServiceError> {
        require("name", &input.name)?;
        require("code", &input.code)?;
        check_pin(&input.pin)?;
        let pin_hash = hash_password(&input.pin)?;

        let store = self.in_tx(|tx| {
            let existing = tx
                .query(
                    "SELECT id FROM stores WHERE code = ?1",
                    &[Value::Text(input.code.clone())],
                )
                .map_err(storage)?;
            if !existing.is_empty() {
                return Err(ServiceError::Conflict(format!(
                    "store code '{}' already exists",
                    input.code
                )));
            }

            let store = Store {
                id: new_id(),
                name: input.name,
                code: input.code,
                is_active: input.is_active,
                created_at: now_rfc3339(),
            };
            tx.exec(
                "INSERT INTO stores (id, name, code, pin_hash, is_active, created_at) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                &[
                    Value::Text(store.id.clone()),
                    Value::Text(store.name.clone()),
                    Value::Text(store.code.clone()),
                    Value::Text(pin_hash),
                    Value::Integer(store.is_active as i64),
                    Value::Text(store.created_at.clone()),
                ],
            )
            .map_err(storage)?;
            Ok(store)
        })?;

        info!(store_id = %store.id, code = %store.code, "store created");
        Ok(store)
    }

    /// Rename and/or (de)activate a store.
    pub fn update_store(&self, id: &str, patch: UpdateStore) -> Result<Store, ServiceError> {
        if let Some(name) = &patch.name {
            require("name", name)?;
        }
        self.in_tx(|tx| {
            let mut store = load_store(tx, id)?;
            if let Some(name) = patch.name {
                store.name = name;
            }
            if let Some(active) = patch.is_active {
                store.is_active = active;
            }
            tx.exec(
                "UPDATE stores SET name = ?1, is_active = ?2 WHERE id = ?3",
                &[
                    Value::Text(store.name.clone()),
                    Value::Integer(store.is_active as i64),
                    Value::Text(store.id.clone()),
                ],
            )
            .map_err(storage)?;
            Ok(store)
        })
    }

    /// Replace a store's PIN with a random six-digit one and return it.
    pub fn reset_pin(&self, id: &str) -> Result<PinReset, ServiceError> {
        let pin = rand::thread_rng().gen_range(100000..=999998).to_string();
        let pin_hash = hash_password(&pin)?;

        self.in_tx(|tx| {
            let affected = tx
                .exec(
                    "UPDATE stores SET pin_hash = ?1 WHERE id = ?2",
                    &[Value::Text(pin_hash), Value::Text(id.to_string())],
                )
                .map_err(storage)?;
            if affected == 0 {
                return Err(ServiceError::NotFound(format!("store '{id}' not found")));
            }
            Ok(())
        })?;

        info!(store_id = %id, "store PIN reset");
        Ok(PinReset { pin })
    }

    /// Check a store login. Unknown code, inactive store and wrong PIN all
    /// fail with the same message.
    pub fn authenticate_store(&self, code: &str, pin: &str) -> Result<Store, ServiceError> {
        let found = self.in_tx(|tx| {
            let rows = tx
                .query(
                    &format!("SELECT {STORE_COLUMNS}, pin_hash FROM stores WHERE code = ?1"),
                    &[Value::Text(code.to_string())],
                )
                .map_err(storage)?;
            match rows.first() {
                Some(row) => Ok(Some((row_to_store(row)?, text(row, "pin_hash")?))),
                None => Ok(None),
            }
        })?;

        match found {
            Some((store, hash)) if store.is_active && verify_password(pin, &hash) => {
                info!(store_id = %store.id, "store login");
                Ok(store)
            }
            _ => {
                warn!(code = %code, "store login rejected");
                Err(ServiceError::Unauthorized("invalid store code or PIN".into()))
            }
        }
    }

    /// The calling store's own record. A store that has been deactivated or
    /// removed since its token was issued is refused.
    pub fn store_profile(&self, store_id: &str) -> Result<Store, ServiceError> {
        self.in_tx(|tx| active_store(tx, store_id))
    }
}

/// The store behind a store token, refused once deactivated or removed.
fn active_store(tx: &dyn SQLExecutor, store_id: &str) -> Result<Store, ServiceError> {
    match load_store(tx, store_id) {
        Ok(store) if store.is_active => Ok(store),
        Ok(_) | Err(ServiceError::NotFound(_)) => {
            Err(ServiceError::PermissionDenied("store is not active".into()))
        }
        Err(e) => Err(e),
    }
}

/// Gate for every ticket operation: a store token only works while its
/// store is active. Admins always pass.
pub(super) fn ensure_active_caller(tx: &dyn SQLExecutor, caller: &Caller) -> Result<(), ServiceError> {
    match caller.store_id() {
        Some(store_id) => active_store(tx, store_id).map(|_| ()),
        None => Ok(()),
    }
}

fn check_pin(pin: &str) -> Result<(), ServiceError> {
    if !PIN_LEN.contains(&pin.chars().count()) {
        return Err(ServiceError::Validation(
            "pin must be 4 to 12 characters".into(),
        ));
    }
    Ok(())
}

pub(super) fn load_store(tx: &dyn SQLExecutor, id: &str) -> Result<Store, ServiceError> {
    let rows = tx
        .query(
            &format!("SELECT {STORE_COLUMNS} FROM stores WHERE id = ?1"),
            &[Value::Text(id.to_string())],
        )
        .map_err(storage)?;
    let row = rows
        .first()
        .ok_or_else(|| ServiceError::NotFound(format!("store '{id}' not found")))?;
    row_to_store(row)
}

fn row_to_store(row: &Row) -> Result<Store, ServiceError> {
    Ok(Store {
        id: text(row, "id")?,
        name: text(row, "name")?,
        code: text(row, "code")?,
        is_active: row.get_i64("is_active").unwrap_or(0) != 0,
        created_at: text(row, "created_at")?,
    })
}
