use axum::response::IntoResponse;
use axum::Router;

#[derive(askama::Template)]
#[template(path = "index.html")]
struct Template;
crate::helpers::impl_into_response!(Template);

async fn get_handler() -> impl IntoResponse {
	Template
}

pub fn configure() -> Router {
	Router::new().route("/", axum::routing::get(get_handler))
}
