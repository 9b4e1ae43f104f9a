use crate::database::Database;
use crate::timestamp;

pub type Id = super::Id;

#[derive(Debug, sqlx::FromRow)]
pub struct Employee {
	pub id: Id,
	/// Identifier of the employee on the external chat platform. Unique
	/// across all employees, enforced by the schema.
	pub telegram_id: String,
	pub full_name: String,
	pub birth_date: timestamp::Date,
	pub position: String,
	pub phone_number: String,
}

/// Typed form boundary for employee creation.
#[derive(Debug, serde::Deserialize)]
pub struct NewEmployee {
	pub telegram_id: String,
	pub full_name: String,
	#[serde(with = "crate::timestamp::html_date")]
	pub birth_date: timestamp::Date,
	pub position: String,
	pub phone_number: String,
}

impl Employee {
	pub async fn all(database: &Database) -> sqlx::Result<Vec<Self>> {
		sqlx::query_as::<_, Self>(
			"SELECT id, telegram_id, full_name, birth_date, position, phone_number FROM employees",
		)
		.fetch_all(database)
		.await
	}

	pub async fn create(database: &Database, new: &NewEmployee) -> sqlx::Result<Id> {
		sqlx::query_scalar::<_, Id>(
			"INSERT INTO employees (telegram_id, full_name, birth_date, position, phone_number) VALUES ($1, $2, $3, $4, $5) RETURNING id",
		)
		.bind(&new.telegram_id)
		.bind(&new.full_name)
		.bind(new.birth_date)
		.bind(&new.position)
		.bind(&new.phone_number)
		.fetch_one(database)
		.await
	}

	/// Returns the Telegram ID of the deleted employee, or `None` if no row
	/// had that id.
	pub async fn delete(database: &Database, id: Id) -> sqlx::Result<Option<String>> {
		sqlx::query_scalar::<_, String>("DELETE FROM employees WHERE id = $1 RETURNING telegram_id")
			.bind(id)
			.fetch_optional(database)
			.await
	}
}

/// SQLite reports a violated UNIQUE constraint as a bare database error;
/// extended result code 2067 is SQLITE_CONSTRAINT_UNIQUE.
pub fn is_unique_violation(error: &sqlx::Error) -> bool {
	error.as_database_error().map_or(false, |db_error| {
		db_error.code().as_deref() == Some("2067")
			|| db_error.message().contains("UNIQUE constraint failed")
	})
}

#[cfg(test)]
mod test {
	use super::{is_unique_violation, Employee, NewEmployee};
	use crate::database;
	use crate::timestamp::Date;

	fn sample(telegram_id: &str) -> NewEmployee {
		NewEmployee {
			telegram_id: telegram_id.to_owned(),
			full_name: "A B".to_owned(),
			birth_date: Date::from_ymd_opt(2000, 1, 1).unwrap(),
			position: "Clerk".to_owned(),
			phone_number: "+10000000000".to_owned(),
		}
	}

	#[tokio::test]
	async fn telegram_id_is_unique() {
		let dir = tempfile::tempdir().unwrap();
		let database = database::connect_test(dir.path()).await;

		Employee::create(&database, &sample("42")).await.unwrap();
		let err = Employee::create(&database, &sample("42"))
			.await
			.unwrap_err();
		assert!(is_unique_violation(&err));
		assert_eq!(Employee::all(&database).await.unwrap().len(), 1);
	}

	#[tokio::test]
	async fn delete_returns_telegram_id() {
		let dir = tempfile::tempdir().unwrap();
		let database = database::connect_test(dir.path()).await;

		let id = Employee::create(&database, &sample("7")).await.unwrap();
		let deleted = Employee::delete(&database, id).await.unwrap();
		assert_eq!(deleted.as_deref(), Some("7"));
		assert!(Employee::all(&database).await.unwrap().is_empty());
	}

	#[tokio::test]
	async fn delete_of_unknown_id_changes_nothing() {
		let dir = tempfile::tempdir().unwrap();
		let database = database::connect_test(dir.path()).await;

		Employee::create(&database, &sample("9")).await.unwrap();
		assert_eq!(Employee::delete(&database, 999).await.unwrap(), None);
		assert_eq!(Employee::all(&database).await.unwrap().len(), 1);
	}

	#[tokio::test]
	async fn round_trips_fields() {
		let dir = tempfile::tempdir().unwrap();
		let database = database::connect_test(dir.path()).await;

		Employee::create(&database, &sample("42")).await.unwrap();
		let employees = Employee::all(&database).await.unwrap();
		let employee = &employees[0];
		assert_eq!(employee.telegram_id, "42");
		assert_eq!(employee.full_name, "A B");
		assert_eq!(employee.birth_date, Date::from_ymd_opt(2000, 1, 1).unwrap());
		assert_eq!(employee.position, "Clerk");
		assert_eq!(employee.phone_number, "+10000000000");
	}
}
