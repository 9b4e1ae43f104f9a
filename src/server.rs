use std::pin::Pin;
use std::task::{Context, Poll};

use axum::extract::connect_info::Connected;
use axum::Router;
use futures::ready;
use hyper::server::accept::Accept;
use tokio::net::{UnixListener, UnixStream};

use crate::config::BindableAddr;

use super::Error;

struct UnixAccept(UnixListener);

impl UnixAccept {
	#[inline]
	fn bind(path: &std::path::Path) -> std::io::Result<Self> {
		UnixListener::bind(path).map(Self)
	}
}

impl Accept for UnixAccept {
	type Conn = UnixStream;
	type Error = std::io::Error;

	fn poll_accept(
		self: Pin<&mut Self>,
		cx: &mut Context<'_>,
	) -> Poll<Option<Result<Self::Conn, Self::Error>>> {
		let (stream, _addr) = ready!(self.0.poll_accept(cx))?;
		Poll::Ready(Some(Ok(stream)))
	}
}

#[derive(Clone, Debug)]
struct UnixConnectInfo;

impl Connected<&UnixStream> for UnixConnectInfo {
	fn connect_info(_target: &UnixStream) -> Self {
		Self
	}
}

pub async fn run(app: Router, addr: &BindableAddr) -> Result<(), Error> {
	match addr {
		BindableAddr::Tcp(socket_addr) => {
			axum::Server::bind(socket_addr)
				.serve(app.into_make_service())
				.await
		}
		BindableAddr::Unix(path) => {
			let incoming = UnixAccept::bind(path).map_err(|err| Error::BindUnix(err, path.clone()))?;
			axum::Server::builder(incoming)
				.serve(app.into_make_service_with_connect_info::<UnixConnectInfo>())
				.await
		}
	}
	.map_err(Error::RunServer)
}
