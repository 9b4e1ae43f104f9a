use std::sync::Arc;

use axum::response::{ErrorResponse, IntoResponse, Redirect, Response};
use axum::{extract, Router};

use crate::config::Config;
use crate::database::{models, Database};
use crate::error;
use crate::helpers::multipart;
use crate::upload;

#[derive(askama::Template)]
#[template(path = "schedule.html")]
struct Template {
	created: bool,
	error: Option<String>,
	schedule_items: Vec<models::ScheduleItem>,
}
crate::helpers::impl_into_response!(Template);

#[derive(serde::Deserialize)]
pub struct Query {
	created: Option<String>,
}

async fn get_handler(
	extract::Query(Query { created }): extract::Query<Query>,
	extract::Extension(database): extract::Extension<Arc<Database>>,
) -> Result<impl IntoResponse, ErrorResponse> {
	let schedule_items = models::ScheduleItem::all(&database)
		.await
		.map_err(error::Sqlx)?;
	Ok(Template {
		created: created.is_some(),
		error: None,
		schedule_items,
	})
}

async fn render_with_error(database: &Database, message: String) -> Result<Response, ErrorResponse> {
	let schedule_items = models::ScheduleItem::all(database)
		.await
		.map_err(error::Sqlx)?;
	Ok(
		(
			http::StatusCode::BAD_REQUEST,
			Template {
				created: false,
				error: Some(message),
				schedule_items,
			},
		)
			.into_response(),
	)
}

async fn post_handler(
	extract::Extension(database): extract::Extension<Arc<Database>>,
	extract::Extension(config): extract::Extension<Arc<Config>>,
	mut multipart: extract::Multipart,
) -> Result<Response, ErrorResponse> {
	let database = &*database;

	let title = multipart::get_one_text(&mut multipart, "title").await?;
	let description = multipart::get_one_text(&mut multipart, "description").await?;
	if title.trim().is_empty() || description.trim().is_empty() {
		return render_with_error(database, "title and description are required".to_owned()).await;
	}

	let image_field = multipart::get_one(&mut multipart, "image").await?;
	let image = match upload::store(image_field, &config.upload_dir).await {
		Ok(name) => name,
		Err(err) => {
			return match err.validation_message() {
				Some(message) => render_with_error(database, message).await,
				None => Err(err.into()),
			}
		}
	};

	models::ScheduleItem::create(database, &title, &description, &image)
		.await
		.map_err(error::Sqlx)?;
	Ok(Redirect::to("/schedule?created").into_response())
}

async fn delete_handler(
	extract::Path((item_id,)): extract::Path<(models::ScheduleItemId,)>,
	extract::Extension(database): extract::Extension<Arc<Database>>,
	extract::Extension(config): extract::Extension<Arc<Config>>,
) -> Result<impl IntoResponse, ErrorResponse> {
	models::ScheduleItem::delete(&database, &config.upload_dir, item_id)
		.await
		.map_err(error::Sqlx)?
		.ok_or(error::EntityNotFound("schedule item"))?;
	Ok(Redirect::to("/schedule"))
}

pub fn configure() -> Router {
	Router::new()
		.route(
			"/schedule",
			axum::routing::get(get_handler).post(post_handler),
		)
		.route(
			"/delete_schedule_item/:id",
			axum::routing::post(delete_handler),
		)
}
