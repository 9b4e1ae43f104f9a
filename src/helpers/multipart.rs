use axum::extract::multipart::{Field, Multipart};
use axum::response::ErrorResponse;

use crate::error;

/// Reads the next multipart field, requiring it to be named `name`. Field
/// order is fixed by the submitting form.
pub async fn get_one<'a>(
	multipart: &'a mut Multipart,
	name: &'static str,
) -> Result<Field<'a>, ErrorResponse> {
	let field = multipart
		.next_field()
		.await
		.map_err(error::Multipart)?
		.ok_or(error::ExpectedField(name))?;
	if field.name() != Some(name) {
		return Err(error::WrongFieldOrder(name).into());
	}
	Ok(field)
}

pub async fn get_one_text<'a>(
	multipart: &'a mut Multipart,
	name: &'static str,
) -> Result<String, ErrorResponse> {
	Ok(
		get_one(multipart, name)
			.await?
			.text()
			.await
			.map_err(error::Multipart)?,
	)
}
