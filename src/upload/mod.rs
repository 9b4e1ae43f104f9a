use std::path::Path;

use axum::extract::multipart::{Field, MultipartError};

use crate::helpers::TempFile;
use crate::timestamp::{self, Timestamp};

pub const ALLOWED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("the uploaded file has no file name")]
	MissingFileName,
	#[error("file extension {0:?} is not an allowed image type")]
	DisallowedExtension(String),
	#[error("reading uploaded file: {0}")]
	Multipart(#[from] MultipartError),
	#[error("storing uploaded file: {0}")]
	Io(#[from] std::io::Error),
}

impl Error {
	/// Message for re-rendering the submission form. `None` for failures the
	/// client did not cause.
	pub fn validation_message(&self) -> Option<String> {
		match self {
			Self::MissingFileName => Some("please choose an image to upload".to_owned()),
			Self::DisallowedExtension(extension) => Some(format!(
				"{extension:?} is not an allowed image type (use jpg, jpeg, or png)"
			)),
			Self::Multipart(..) | Self::Io(..) => None,
		}
	}
}

impl From<Error> for axum::response::ErrorResponse {
	fn from(error: Error) -> Self {
		match error {
			Error::Multipart(inner) => crate::error::Multipart(inner).into(),
			Error::Io(inner) => crate::error::Io("storing uploaded image", inner).into(),
			error @ (Error::MissingFileName | Error::DisallowedExtension(..)) => {
				crate::error::BadRequest(error.to_string().into()).into()
			}
		}
	}
}

/// Strips everything from a client-supplied file name that could escape the
/// upload directory: path components, separators, and characters outside
/// `[A-Za-z0-9._-]`. Runs of dots are collapsed and leading dots trimmed, so
/// sanitized names never contain `..`.
pub fn sanitize_file_name(name: &str) -> String {
	let name = name
		.rsplit(|ch| ch == '/' || ch == '\\')
		.next()
		.unwrap_or(name);
	let mut sanitized = String::with_capacity(name.len());
	for ch in name.chars() {
		let ch = if ch.is_ascii_alphanumeric() || matches!(ch, '.' | '-' | '_') {
			ch
		} else {
			'_'
		};
		if ch == '.' && sanitized.ends_with('.') {
			continue;
		}
		sanitized.push(ch);
	}
	sanitized.trim_start_matches('.').to_owned()
}

/// `{second-precision timestamp}_{sanitized original name}`. Two uploads of
/// the same name within the same second collide; accepted for this workload.
pub fn storage_name(original: &str, when: Timestamp) -> String {
	format!(
		"{}_{}",
		when.format("%Y%m%d%H%M%S"),
		sanitize_file_name(original)
	)
}

fn extension_allowed(name: &str) -> bool {
	Path::new(name)
		.extension()
		.and_then(|extension| extension.to_str())
		.map_or(false, |extension| {
			ALLOWED_EXTENSIONS
				.iter()
				.any(|allowed| extension.eq_ignore_ascii_case(allowed))
		})
}

/// Streams the multipart file field into the upload directory and returns the
/// stored file name. Nothing is left behind on failure.
pub async fn store(mut field: Field<'_>, upload_dir: &Path) -> Result<String, Error> {
	use futures::TryStreamExt as _;
	use tokio::io::AsyncWriteExt as _;

	let original = match field.file_name() {
		Some(name) if !name.is_empty() => name.to_owned(),
		_ => return Err(Error::MissingFileName),
	};
	let name = storage_name(&original, timestamp::now());
	if !extension_allowed(&name) {
		let extension = Path::new(&name)
			.extension()
			.and_then(|extension| extension.to_str())
			.unwrap_or("")
			.to_owned();
		return Err(Error::DisallowedExtension(extension));
	}

	let mut temp_file = TempFile::create(upload_dir.join(&name)).await?;
	while let Some(chunk) = field.try_next().await? {
		temp_file.as_mut().write_all(&chunk).await?;
	}
	temp_file.move_into_place().await?;
	Ok(name)
}

#[cfg(test)]
mod test {
	use chrono::TimeZone as _;

	use super::{extension_allowed, sanitize_file_name, storage_name};

	#[test]
	fn sanitize_strips_paths_and_unsafe_characters() {
		assert_eq!(sanitize_file_name("photo.png"), "photo.png");
		assert_eq!(sanitize_file_name("../../etc/passwd.png"), "passwd.png");
		assert_eq!(sanitize_file_name("C:\\pics\\me.jpg"), "me.jpg");
		assert_eq!(sanitize_file_name("weird name!.jpg"), "weird_name_.jpg");
		assert_eq!(sanitize_file_name(".hidden.png"), "hidden.png");
		assert_eq!(sanitize_file_name("a..b.png"), "a.b.png");
		assert_eq!(sanitize_file_name(".."), "");
	}

	#[test]
	fn storage_name_prefixes_second_precision_timestamp() {
		let when = chrono::Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 15).unwrap();
		assert_eq!(storage_name("pic.jpg", when), "20240501123015_pic.jpg");
	}

	#[test]
	fn extension_allow_list_is_case_insensitive() {
		assert!(extension_allowed("a.jpg"));
		assert!(extension_allowed("a.JPEG"));
		assert!(extension_allowed("a.PnG"));
		assert!(!extension_allowed("a.gif"));
		assert!(!extension_allowed("a.png.exe"));
		assert!(!extension_allowed("no_extension"));
	}
}
