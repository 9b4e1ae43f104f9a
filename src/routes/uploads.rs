use std::sync::Arc;

use axum::response::{ErrorResponse, Response};
use axum::{extract, Router};

use crate::config::Config;
use crate::error;

/// Serves a stored image by name. Both route prefixes resolve to the single
/// configured upload directory.
async fn get_handler(
	extract::Path((file_name,)): extract::Path<(String,)>,
	extract::Extension(config): extract::Extension<Arc<Config>>,
	req_parts: http::request::Parts,
) -> Result<Response, ErrorResponse> {
	use tower::Service as _;

	// stored names never contain separators; anything that does is a
	// traversal attempt
	if file_name.contains(|ch| ch == '/' || ch == '\\') || file_name.contains("..") {
		return Err(error::BadRequest("invalid file name".into()).into());
	}

	let fs_path = config.upload_dir.join(&file_name);
	let mut service = tower_http::services::ServeFile::new(fs_path);
	let request = http::Request::from_parts(req_parts, ());
	let response = service.call(request).await;
	let response = response.map_err(|err| error::Io("serving uploaded image", err))?;
	Ok(response.map(|body| {
		use http_body::Body as _;
		body.map_err(axum::Error::new).boxed_unsync()
	}))
}

pub fn configure() -> Router {
	Router::new()
		.route(
			"/uploads/promotions/:file_name",
			axum::routing::get(get_handler),
		)
		.route(
			"/uploads/schedule/:file_name",
			axum::routing::get(get_handler),
		)
}
