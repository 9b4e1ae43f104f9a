use chrono::Utc;

pub type Timestamp = chrono::DateTime<Utc>;
pub type Date = chrono::NaiveDate;

pub fn now() -> Timestamp {
	Utc::now()
}

/// for `#[serde(with)]` on fields fed by HTML `<input type="date">`
pub mod html_date {
	use serde::de::{self, Deserialize, Deserializer};

	use super::Date;

	pub static FORMAT: &str = "%Y-%m-%d";

	pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Date, D::Error>
	where
		D::Error: de::Error,
	{
		let raw = <std::borrow::Cow<'_, str>>::deserialize(deserializer)?;
		Date::parse_from_str(&raw, FORMAT).map_err(de::Error::custom)
	}
}

#[cfg(test)]
mod test {
	use serde::de::value::{Error, StrDeserializer};
	use serde::de::IntoDeserializer as _;

	use super::{html_date, Date};

	#[test]
	fn html_date_round_trip() {
		let deserializer: StrDeserializer<'_, Error> = "2000-01-01".into_deserializer();
		let date = html_date::deserialize(deserializer).unwrap();
		assert_eq!(date, Date::from_ymd_opt(2000, 1, 1).unwrap());
	}

	#[test]
	fn html_date_rejects_other_formats() {
		for raw in ["01/01/2000", "2000-13-01", "yesterday", ""] {
			let deserializer: StrDeserializer<'_, Error> = raw.into_deserializer();
			assert!(html_date::deserialize(deserializer).is_err(), "{raw:?}");
		}
	}
}
