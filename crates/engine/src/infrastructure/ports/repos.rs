//! Durable storage ports.

use async_trait::async_trait;
use richup_domain::{Room, RoomId};

use super::RepoError;

/// Room snapshots keyed by room id.
///
/// `save` replaces the whole document; there is no partial update.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RoomRepo: Send + Sync {
    async fn get(&self, room_id: &RoomId) -> Result<Option<Room>, RepoError>;
    async fn save(&self, room: &Room) -> Result<(), RepoError>;
}
