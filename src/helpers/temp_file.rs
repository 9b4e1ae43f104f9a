use std::path::PathBuf;
use std::time::SystemTime;

use tokio::fs::File;

/// A file written next to its final path and renamed into place on success.
/// Dropping it without calling `move_into_place` removes the partial write.
pub struct TempFile {
	final_path: PathBuf,
	temp_path: Option<PathBuf>,
	file: File,
}

impl TempFile {
	/// The path must have a valid UTF-8 filename.
	pub async fn create(final_path: PathBuf) -> Result<TempFile, std::io::Error> {
		let temp_timestamp = SystemTime::now()
			.duration_since(SystemTime::UNIX_EPOCH)
			.unwrap()
			.as_nanos();
		let temp_path = final_path.with_file_name(format!(
			"{}.temp.{}",
			final_path.file_name().unwrap().to_str().unwrap(),
			temp_timestamp
		));
		let file = File::create(&temp_path).await?;
		Ok(Self {
			final_path,
			temp_path: Some(temp_path),
			file,
		})
	}

	pub async fn move_into_place(mut self) -> Result<(), std::io::Error> {
		let temp_path = self.temp_path.take().unwrap();
		tokio::fs::rename(&temp_path, &self.final_path).await
	}
}

impl AsRef<File> for TempFile {
	fn as_ref(&self) -> &File {
		&self.file
	}
}

impl AsMut<File> for TempFile {
	fn as_mut(&mut self) -> &mut File {
		&mut self.file
	}
}

impl Drop for TempFile {
	fn drop(&mut self) {
		if let Some(ref temp_path) = self.temp_path {
			let _ = std::fs::remove_file(temp_path);
		}
	}
}

#[cfg(test)]
mod test {
	use tokio::io::AsyncWriteExt as _;

	use super::TempFile;

	#[tokio::test]
	async fn writes_then_renames() {
		let dir = tempfile::tempdir().unwrap();
		let final_path = dir.path().join("out.bin");

		let mut temp_file = TempFile::create(final_path.clone()).await.unwrap();
		temp_file.as_mut().write_all(b"contents").await.unwrap();
		assert!(!final_path.exists());
		temp_file.move_into_place().await.unwrap();

		assert_eq!(std::fs::read(&final_path).unwrap(), b"contents");
		assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
	}

	#[tokio::test]
	async fn drop_cleans_up_partial_write() {
		let dir = tempfile::tempdir().unwrap();

		let mut temp_file = TempFile::create(dir.path().join("out.bin")).await.unwrap();
		temp_file.as_mut().write_all(b"partial").await.unwrap();
		drop(temp_file);

		assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
	}
}
