use std::path::Path;

use crate::database::Database;

pub type Id = super::Id;

#[derive(Debug, sqlx::FromRow)]
pub struct Promotion {
	pub id: Id,
	pub title: String,
	pub description: String,
	/// File name of the backing image, relative to the configured upload
	/// directory. Written by the upload handler at creation time and owned
	/// exclusively by this row.
	pub image: String,
}

impl Promotion {
	pub async fn all(database: &Database) -> sqlx::Result<Vec<Self>> {
		sqlx::query_as::<_, Self>("SELECT id, title, description, image FROM promotions")
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
			"INSERT INTO promotions (title, description, image) VALUES ($1, $2, $3) RETURNING id",
		)
		.bind(title)
		.bind(description)
		.bind(image)
		.fetch_one(database)
		.await
	}

	/// Deletes the row, then removes its backing image from `upload_dir`.
	/// Returns `None` without touching anything if no row has that id.
	pub async fn delete(database: &Database, upload_dir: &Path, id: Id) -> sqlx::Result<Option<()>> {
		let image =
			sqlx::query_scalar::<_, String>("DELETE FROM promotions WHERE id = $1 RETURNING image")
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

#[cfg(test)]
mod test {
	use super::Promotion;
	use crate::database;

	#[tokio::test]
	async fn delete_removes_row_and_backing_file() {
		let dir = tempfile::tempdir().unwrap();
		let database = database::connect_test(dir.path()).await;
		let image_path = dir.path().join("20240101000000_banner.png");
		std::fs::write(&image_path, b"png bytes").unwrap();

		let id = Promotion::create(
			&database,
			"Summer sale",
			"Half off",
			"20240101000000_banner.png",
		)
		.await
		.unwrap();

		let deleted = Promotion::delete(&database, dir.path(), id).await.unwrap();
		assert_eq!(deleted, Some(()));
		assert!(!image_path.exists());
		assert!(Promotion::all(&database).await.unwrap().is_empty());
	}

	#[tokio::test]
	async fn delete_of_unknown_id_changes_nothing() {
		let dir = tempfile::tempdir().unwrap();
		let database = database::connect_test(dir.path()).await;
		let image_path = dir.path().join("a.png");
		std::fs::write(&image_path, b"x").unwrap();
		Promotion::create(&database, "t", "d", "a.png").await.unwrap();

		let deleted = Promotion::delete(&database, dir.path(), 999).await.unwrap();
		assert_eq!(deleted, None);
		assert!(image_path.exists());
		assert_eq!(Promotion::all(&database).await.unwrap().len(), 1);
	}

	#[tokio::test]
	async fn delete_tolerates_already_missing_file() {
		let dir = tempfile::tempdir().unwrap();
		let database = database::connect_test(dir.path()).await;
		let id = Promotion::create(&database, "t", "d", "gone.png").await.unwrap();

		let deleted = Promotion::delete(&database, dir.path(), id).await.unwrap();
		assert_eq!(deleted, Some(()));
		assert!(Promotion::all(&database).await.unwrap().is_empty());
	}
}
