use tracing::info;

use helpdesk_core::{new_id, now_rfc3339, ServiceError};
use helpdesk_sql::{Row, SQLExecutor, Value};

use super::store::load_store;
use super::{opt_text, require, storage, text, HelpdeskService};
use crate::model::{CreateDevice, Device, UpdateDevice};

const DEVICE_COLUMNS: &str = "id, store_id, label, type, serial, created_at";

impl HelpdeskService {
    /// Devices of one store, newest first. Unknown store is `NotFound`.
    pub fn list_devices(&self, store_id: &str) -> Result<Vec<Device>, ServiceError> {
        self.in_tx(|tx| {
            load_store(tx, store_id)?;
            let rows = tx
                .query(
                    &format!(
                        "SELECT {DEVICE_COLUMNS} FROM devices WHERE store_id = ?1 \
                         ORDER BY created_at DESC, rowid DESC"
                    ),
                    &[Value::Text(store_id.to_string())],
                )
                .map_err(storage)?;
            rows.iter().map(row_to_device).collect()
        })
    }

    pub fn create_device(&self, store_id: &str, input: CreateDevice) -> Result<Device, ServiceError> {
        require("label", &input.label)?;
        require("type", &input.device_type)?;

        let device = self.in_tx(|tx| {
            load_store(tx, store_id)?;
            let device = Device {
                id: new_id(),
                store_id: store_id.to_string(),
                label: input.label,
                device_type: input.device_type,
                serial: input.serial,
                created_at: now_rfc3339(),
            };
            tx.exec(
                "INSERT INTO devices (id, store_id, label, type, serial, created_at) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                &[
                    Value::Text(device.id.clone()),
                    Value::Text(device.store_id.clone()),
                    Value::Text(device.label.clone()),
                    Value::Text(device.device_type.clone()),
                    Value::opt_text(device.serial.as_deref()),
                    Value::Text(device.created_at.clone()),
                ],
            )
            .map_err(storage)?;
            Ok(device)
        })?;

        info!(device_id = %device.id, store_id = %device.store_id, "device created");
        Ok(device)
    }

    pub fn update_device(&self, id: &str, patch: UpdateDevice) -> Result<Device, ServiceError> {
        self.in_tx(|tx| {
            let mut device = load_device(tx, id)?;
            if let Some(label) = patch.label {
                device.label = label;
            }
            if let Some(kind) = patch.device_type {
                device.device_type = kind;
            }
            if let Some(serial) = patch.serial {
                device.serial = Some(serial);
            }
            tx.exec(
                "UPDATE devices SET label = ?1, type = ?2, serial = ?3 WHERE id = ?4",
                &[
                    Value::Text(device.label.clone()),
                    Value::Text(device.device_type.clone()),
                    Value::opt_text(device.serial.as_deref()),
                    Value::Text(device.id.clone()),
                ],
            )
            .map_err(storage)?;
            Ok(device)
        })
    }

    /// Remove a device. Tickets that referenced it keep existing with no device.
    pub fn delete_device(&self, id: &str) -> Result<(), ServiceError> {
        self.in_tx(|tx| {
            let affected = tx
                .exec("DELETE FROM devices WHERE id = ?1", &[Value::Text(id.to_string())])
                .map_err(storage)?;
            if affected == 0 {
                return Err(ServiceError::NotFound(format!("device '{id}' not found")));
            }
            Ok(())
        })?;
        info!(device_id = %id, "device deleted");
        Ok(())
    }
}

pub(super) fn find_device(tx: &dyn SQLExecutor, id: &str) -> Result<Option<Device>, ServiceError> {
    let rows = tx
        .query(
            &format!("SELECT {DEVICE_COLUMNS} FROM devices WHERE id = ?1"),
            &[Value::Text(id.to_string())],
        )
        .map_err(storage)?;
    rows.first().map(row_to_device).transpose()
}

fn load_device(tx: &dyn SQLExecutor, id: &str) -> Result<Device, ServiceError> {
    find_device(tx, id)?.ok_or_else(|| ServiceError::NotFound(format!("device '{id}' not found")))
}

fn row_to_device(row: &Row) -> Result<Device, ServiceError> {
    Ok(Device {
        id: text(row, "id")?,
        store_id: text(row, "store_id")?,
        label: text(row, "label")?,
        device_type: text(row, "type")?,
        serial: opt_text(row, "serial"),
        created_at: text(row, "created_at")?,
    })
}
