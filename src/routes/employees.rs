use std::sync::Arc;
use std::time::Duration;

use axum::response::{ErrorResponse, IntoResponse, Redirect, Response};
use axum::{extract, Router};

use crate::database::models::employee::{self, NewEmployee};
use crate::database::{models, Database};
use crate::error;

/// UX pacing: the submitting browser sits on the POST for a moment before
/// being redirected to the listing.
const CREATION_PACING: Duration = Duration::from_secs(2);

#[derive(askama::Template)]
#[template(path = "employees.html")]
struct Template {
	created: bool,
	error: Option<String>,
	employees: Vec<models::Employee>,
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
	let employees = models::Employee::all(&database).await.map_err(error::Sqlx)?;
	Ok(Template {
		created: created.is_some(),
		error: None,
		employees,
	})
}

async fn post_handler(
	extract::Extension(database): extract::Extension<Arc<Database>>,
	extract::Form(request): extract::Form<NewEmployee>,
) -> Result<Response, ErrorResponse> {
	let database = &*database;

	match models::Employee::create(database, &request).await {
		Ok(_id) => {}
		Err(err) if employee::is_unique_violation(&err) => {
			let employees = models::Employee::all(database).await.map_err(error::Sqlx)?;
			return Ok(
				(
					http::StatusCode::BAD_REQUEST,
					Template {
						created: false,
						error: Some(format!(
							"an employee with Telegram ID {:?} already exists",
							request.telegram_id
						)),
						employees,
					},
				)
					.into_response(),
			);
		}
		Err(err) => return Err(error::Sqlx(err).into()),
	}

	tokio::time::sleep(CREATION_PACING).await;
	Ok(Redirect::to("/employees?created").into_response())
}

#[derive(serde::Serialize)]
struct DeleteResponse {
	status: &'static str,
	deleted_telegram_id: String,
}

async fn delete_handler(
	extract::Path((employee_id,)): extract::Path<(models::EmployeeId,)>,
	extract::Extension(database): extract::Extension<Arc<Database>>,
) -> Result<impl IntoResponse, ErrorResponse> {
	let deleted_telegram_id = models::Employee::delete(&database, employee_id)
		.await
		.map_err(error::Sqlx)?
		.ok_or(error::EntityNotFound("employee"))?;
	Ok(axum::Json(DeleteResponse {
		status: "success",
		deleted_telegram_id,
	}))
}

pub fn configure() -> Router {
	Router::new()
		.route(
			"/employees",
			axum::routing::get(get_handler).post(post_handler),
		)
		.route("/delete_employee/:id", axum::routing::post(delete_handler))
}
