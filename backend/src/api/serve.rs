use axum::body::Body;
use axum::extract::Request;
use axum::response::Response;
use futures::FutureExt;
use hyper::body::Incoming;
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto::Builder;
use hyper_util::service::TowerToHyperService;
use log::{debug, error, trace};
use socket2::{SockRef, TcpKeepalive};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::pin::pin;
use std::time::Duration;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tower::{Service, ServiceExt};

const KEEP_ALIVE_FIRST_PROBE_SECS: u64 = 10;
const KEEP_ALIVE_INTERVAL_SECS: u64 = 5;
#[cfg(not(target_os = "windows"))]
const KEEP_ALIVE_RETRIES: u32 = 3;

#[derive(Debug)]
struct IncomingStream
{
    remote_addr: SocketAddr,
}

impl IncomingStream {
    /// Returns the remote address that this stream is bound to.
    pub fn remote_addr(&self) -> &SocketAddr {
        &self.remote_addr
    }
}

impl axum::extract::connect_info::Connected<IncomingStream> for SocketAddr {
    fn connect_info(target: IncomingStream) -> SocketAddr {
        *target.remote_addr()
    }
}

/// Accept loop of the http server, runs until the token is cancelled.
///
/// Open connections are shut down gracefully when the loop ends.
pub async fn serve(listener: tokio::net::TcpListener,
                   router: axum::Router<()>,
                   cancel_token: Option<CancellationToken>) {
    let (signal_tx, _signal_rx) = watch::channel(());
    let mut make_service = router.into_make_service_with_connect_info::<SocketAddr>();
    let cancel_token = cancel_token.unwrap_or_default();

    loop {
        tokio::select! {
            () = cancel_token.cancelled() => {
                debug!("Server accept loop stopped");
                break;
            }
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((socket, remote_addr)) => {
                        handle_connection(&mut make_service, &signal_tx, socket, remote_addr).await;
                    }
                    Err(err) => trace!("Failed to accept connection: {err}"),
                }
            }
        }
    }
}

fn set_keepalive(tcp_stream: &std::net::TcpStream, remote_addr: SocketAddr) {
    let sock_ref = SockRef::from(tcp_stream);

    let mut keepalive = TcpKeepalive::new()
        .with_time(Duration::from_secs(KEEP_ALIVE_FIRST_PROBE_SECS)) // idle time until the first probe
        .with_interval(Duration::from_secs(KEEP_ALIVE_INTERVAL_SECS));
    #[cfg(not(target_os = "windows"))]
    {
        keepalive = keepalive.with_retries(KEEP_ALIVE_RETRIES);
    }

    if let Err(e) = sock_ref.set_tcp_keepalive(&keepalive) {
        error!("Failed to set keepalive for {remote_addr}: {e}");
    }
}

async fn handle_connection<M, S>(
    make_service: &mut M,
    signal_tx: &watch::Sender<()>,
    socket: tokio::net::TcpStream,
    remote_addr: SocketAddr,
)
where
    M: for<'a> Service<IncomingStream, Error=Infallible, Response=S> + Send + 'static,
    for<'a> <M as Service<IncomingStream>>::Future: Send,
    S: Service<Request, Response=Response, Error=Infallible> + Clone + Send + 'static,
    S::Future: Send,
{
    let Ok(tcp_stream_std) = socket.into_std() else { return; };
    set_keepalive(&tcp_stream_std, remote_addr);
    let Ok(socket) = tokio::net::TcpStream::from_std(tcp_stream_std) else { return; };

    let io = TokioIo::new(socket);
    trace!("connection {remote_addr:?} accepted");

    make_service
        .ready()
        .await
        .unwrap_or_else(|err| match err {});

    let tower_service = make_service
        .call(IncomingStream {
            remote_addr,
        })
        .await
        .unwrap_or_else(|err| match err {})
        .map_request(|req: Request<Incoming>| req.map(Body::new));

    let hyper_service = TowerToHyperService::new(tower_service);
    let signal_tx = signal_tx.clone();

    tokio::spawn(async move {
        let builder = Builder::new(TokioExecutor::new());
        let mut conn = pin!(builder.serve_connection_with_upgrades(io, hyper_service));
        let mut signal_closed = pin!(signal_tx.closed().fuse());

        loop {
            tokio::select! {
                result = conn.as_mut() => {
                    if let Err(err) = result {
                        trace!("failed to serve connection: {err:#}");
                    }
                    trace!("Connection closed: {remote_addr}");
                    break;
                }
                () = &mut signal_closed => {
                    debug!("Connection gracefully closed: {remote_addr}");
                    conn.as_mut().graceful_shutdown();
                }
            }
        }
    });
}
