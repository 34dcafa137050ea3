//! SQLite-backed room snapshots.

use async_trait::async_trait;
use sqlx::{Row, SqlitePool};
use std::sync::Arc;

use richup_domain::{Room, RoomId};

use crate::infrastructure::ports::{ClockPort, RepoError, RoomRepo};

/// One row per room holding the whole room as JSON.
pub struct SqliteRoomRepo {
    pool: SqlitePool,
    clock: Arc<dyn ClockPort>,
}

impl SqliteRoomRepo {
    pub async fn new(db_path: &str, clock: Arc<dyn ClockPort>) -> Result<Self, RepoError> {
        let pool = SqlitePool::connect(&format!("sqlite:{}?mode=rwc", db_path))
            .await
            .map_err(|e| RepoError::database("rooms.connect", e))?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS rooms (
                room_id TEXT PRIMARY KEY NOT NULL,
                room_json TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&pool)
        .await
        .map_err(|e| RepoError::database("rooms.migrate", e))?;

        Ok(Self { pool, clock })
    }
}

#[async_trait]
impl RoomRepo for SqliteRoomRepo {
    async fn get(&self, room_id: &RoomId) -> Result<Option<Room>, RepoError> {
        let row = sqlx::query("SELECT room_json FROM rooms WHERE room_id = ?")
            .bind(room_id.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepoError::database("rooms.get", e))?;

        match row {
            Some(row) => {
                let json: String = row.get("room_json");
                let room = serde_json::from_str(&json).map_err(RepoError::serialization)?;
                Ok(Some(room))
            }
            None => Ok(None),
        }
    }

    async fn save(&self, room: &Room) -> Result<(), RepoError> {
        let json = serde_json::to_string(room).map_err(RepoError::serialization)?;
        let now = self.clock.now().to_rfc3339();

        sqlx::query(
            r#"
            INSERT INTO rooms (room_id, room_json, updated_at)
            VALUES (?, ?, ?)
            ON CONFLICT(room_id) DO UPDATE SET
                room_json = excluded.room_json,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(room.room_id().as_str())
        .bind(json)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::database("rooms.save", e))?;

        Ok(())
    }
}
