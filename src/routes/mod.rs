use axum::Router;

mod employees;
mod promotions;
mod root;
mod schedule;
mod uploads;


macro_rules! merge {
	($app:ident, $name:ident) => {
		$app = $app.merge($name::configure());
	};
	($app:ident; $($name:ident),+) => {
		$(merge!($app, $name));+
	};
}

pub fn configure() -> Router {
	let mut app = Router::new();

	merge!(app; root, employees, promotions, schedule, uploads);

	app = app.fallback(axum::handler::Handler::into_service(
		crate::error::default_handler,
	));

	app
}
