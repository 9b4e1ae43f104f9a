use std::path::Path;

pub mod employee;
pub mod promotion;
pub mod schedule_item;

pub use employee::{Employee, Id as EmployeeId};
pub use promotion::{Id as PromotionId, Promotion};
pub use schedule_item::{Id as ScheduleItemId, ScheduleItem};

type Id = i64;

/// Best-effort removal of a row's backing image. The row owning the image is
/// already gone at this point, so a failure here only leaves an orphaned file.
pub(crate) async fn remove_image(upload_dir: &Path, file_name: &str) {
	let path = upload_dir.join(file_name);
	match tokio::fs::remove_file(&path).await {
		Ok(()) => {}
		Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
		Err(err) => tracing::warn!("failed to remove image {}: {err}", path.display()),
	}
}
