use std::path::Path;

use crate::database::Database;
use crate::timestamp::{self, Timestamp};

pub type Id = super::Id;

/// Same shape as a promotion, plus a server-assigned creation time.
#[derive(Debug, sqlx::FromRow)]
pub struct ScheduleItem {
	pub id: Id,
	pub title: String,
	pub description: String,
	pub image: String,
	pub created_at: Timestamp,
}

impl ScheduleItem {
	pub async fn all(database: &Database) -> sqlx::Result<Vec<Self>> {
		sqlx::query_as::<_, Self>(
			"SELECT id, title, description, image, created_at FROM schedule_items",
		)
		.fetch_all(database)
		.await
	}

	pub async fn create(
		database: &Database,
		title: &str,
		description: &str,
		image: &str,
	) -> sqlx::Result<Id> {
		sqlx::query_scalar::<_, Id>(
			"INSERT INTO schedule_items (title, description, image, created_at) VALUES ($1, $2, $3, $4) RETURNING id",
		)
		.bind(title)
		.bind(description)
		.bind(image)
		.bind(timestamp::now())
		.fetch_one(database)
		.await
	}

	/// Deletes the row, then removes its backing image from `upload_dir`.
	/// Returns `None` without touching anything if no row has that id.
	pub async fn delete(database: &Database, upload_dir: &Path, id: Id) -> sqlx::Result<Option<()>> {
		let image = sqlx::query_scalar::<_, String>(
			"DELETE FROM schedule_items WHERE id = $1 RETURNING image",
		)
		.bind(id)
		.fetch_optional(database)
		.await?;
		let image = match image {
			Some(image) => image,
			None => return Ok(None),
		};
		super::remove_image(upload_dir, &image).await;
		Ok(Some(()))
	}
}
