use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::StoreError;

/// The slice of a vehicle the engine needs: who owns it and how many seats
/// it has. Vehicle CRUD lives outside the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub seats_total: u8,
}

/// Lookup into the externally owned vehicle registry, used to validate
/// ride creation and updates.
#[async_trait]
pub trait VehicleDirectory: Send + Sync {
    async fn get_vehicle(&self, id: Uuid) -> Result<Option<Vehicle>, StoreError>;
}
