use std::fmt::{self, Display, Formatter};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

/// An address the server can listen on: `tcp://host:port` or `unix://path`.
/// A bare `host:port` is treated as TCP.
#[derive(Debug)]
pub enum BindableAddr {
	Unix(PathBuf),
	Tcp(SocketAddr),
}

#[derive(Debug)]
pub enum FromStrError {
	UnknownProtocol(String),
	SocketAddr(<SocketAddr as FromStr>::Err),
}

impl Display for FromStrError {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		match self {
			Self::UnknownProtocol(unknown) => write!(f, "unknown protocol {unknown:?}"),
			Self::SocketAddr(inner) => write!(f, "could not parse socket address: {inner}"),
		}
	}
}

impl FromStr for BindableAddr {
	type Err = FromStrError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let (protocol, inner) = s.split_once("://").unwrap_or(("tcp", s));
		match protocol {
			"unix" => Ok(Self::Unix(PathBuf::from(inner))),
			"tcp" => SocketAddr::from_str(inner)
				.map_err(Self::Err::SocketAddr)
				.map(Self::Tcp),
			unknown => Err(Self::Err::UnknownProtocol(unknown.to_owned())),
		}
	}
}

impl Display for BindableAddr {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		match self {
			Self::Tcp(inner) => write!(f, "tcp://{inner}"),
			Self::Unix(inner) => write!(f, "unix://{}", inner.display()),
		}
	}
}

impl<'de> serde::Deserialize<'de> for BindableAddr {
	fn deserialize<D: serde::Deserializer<'de>>(d: D) -> Result<Self, D::Error>
	where
		D::Error: serde::de::Error,
	{
		use serde::Deserialize as _;
		String::deserialize(d)?
			.parse()
			.map_err(serde::de::Error::custom)
	}
}
