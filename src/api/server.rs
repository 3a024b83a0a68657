/*!
 * Simulator Server
 * Newline-delimited JSON over TCP: one request per line, one envelope per reply line
 */

use super::handlers::{dispatch_line, rejected, Reply};
use super::service::SimulatorService;
use crate::core::errors::KernelError;
use crate::core::limits::MAX_REQUEST_LINE;
use crate::core::types::KernelResult;
use crate::monitoring::request_span;
use std::future::Future;
use std::io;
use std::net::SocketAddr;
use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tracing::{debug, error, info, info_span, warn, Instrument};

/// Bind to the configured address and serve until Ctrl-C
pub async fn start_server(service: SimulatorService) -> KernelResult<()> {
    let listener = TcpListener::bind(service.config().listen_addr.as_str()).await?;
    info!(addr = %listener.local_addr()?, "Simulator server listening");

    serve(listener, service, shutdown_signal()).await?;

    info!("Simulator server stopped");
    Ok(())
}

/// Accept connections on `listener` until `shutdown` completes
pub async fn serve<F>(
    listener: TcpListener,
    service: SimulatorService,
    shutdown: F,
) -> io::Result<()>
where
    F: Future<Output = ()>,
{
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            accepted = listener.accept() => {
                let (stream, peer) = match accepted {
                    Ok(conn) => conn,
                    Err(e) => {
                        warn!(error = %e, "Failed to accept connection");
                        continue;
                    }
                };

                let service = service.clone();
                tokio::spawn(
                    async move {
                        debug!("Connection opened");
                        if let Err(e) = handle_connection(stream, peer, service).await {
                            warn!(error = %e, "Connection closed with error");
                        } else {
                            debug!("Connection closed");
                        }
                    }
                    .instrument(info_span!("connection", %peer)),
                );
            }
            _ = &mut shutdown => {
                info!("Shutdown signal received");
                break;
            }
        }
    }

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
}

async fn handle_connection(
    stream: TcpStream,
    peer: SocketAddr,
    service: SimulatorService,
) -> io::Result<()> {
    let (read_half, mut writer) = stream.into_split();
    let mut reader = BufReader::new(read_half);
    let mut buf = Vec::new();

    loop {
        buf.clear();
        let read = (&mut reader)
            .take(MAX_REQUEST_LINE as u64 + 1)
            .read_until(b'\n', &mut buf)
            .await?;
        if read == 0 {
            return Ok(());
        }

        if buf.len() > MAX_REQUEST_LINE && buf.last() != Some(&b'\n') {
            write_reply(&mut writer, &oversized()).await?;
            warn!(limit = MAX_REQUEST_LINE, "Request line too long");
            return Ok(());
        }

        let reply = match std::str::from_utf8(&buf) {
            Ok(line) if line.trim().is_empty() => continue,
            Ok(line) => {
                let span = request_span(peer);
                span.in_scope(|| dispatch_line(&service, line.trim()))
            }
            Err(e) => rejected(
                "Invalid request parameters",
                KernelError::InvalidRequest(e.to_string()),
            ),
        };

        write_reply(&mut writer, &reply).await?;
    }
}

fn oversized() -> Reply {
    rejected(
        "Invalid request parameters",
        KernelError::InvalidRequest(format!("request line exceeds {} bytes", MAX_REQUEST_LINE)),
    )
}

async fn write_reply<W>(writer: &mut W, reply: &Reply) -> io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    let mut line = serde_json::to_vec(reply)?;
    line.push(b'\n');
    writer.write_all(&line).await?;
    writer.flush().await
}
