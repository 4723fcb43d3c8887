//! A TCP connector whose sockets a [`CancelToken`] can shut down.
//!
//! ureq owns the socket of an in-flight request, so a caller that gives up
//! waiting cannot close it. Agents of cancellable clients connect through
//! [`CancellableConnector`] instead of the default one; it registers every
//! stream with the token, and [`CancelToken::cancel`] shuts the stream, which
//! fails any blocked read or write inside ureq right away.

use std::fmt;
use std::io::{self, Read, Write};
use std::net::{SocketAddr, TcpStream};
use std::sync::Arc;
use std::time::Duration;

use ureq::unversioned::transport::{
    Buffers, ConnectionDetails, Connector, LazyBuffers, NextTimeout, Transport,
};
use ureq::{Error, Timeout};

use super::cancel::CancelToken;

/// Opens plain TCP connections and registers them with a token.
///
/// TLS is layered on top by chaining ureq's `RustlsConnector`.
#[derive(Debug)]
pub(crate) struct CancellableConnector {
    token: CancelToken,
}

impl CancellableConnector {
    pub(crate) fn new(token: CancelToken) -> Self {
        Self { token }
    }
}

impl Connector<()> for CancellableConnector {
    type Out = CancellableTransport;

    fn connect(
        &self,
        details: &ConnectionDetails,
        _chained: Option<()>,
    ) -> Result<Option<Self::Out>, Error> {
        if self.token.is_cancelled() {
            return Err(Error::Io(io::Error::new(
                io::ErrorKind::Interrupted,
                "request cancelled before connecting",
            )));
        }

        let config = details.config;
        let per_addr = details.timeout.not_zero().map(|t| *t);

        let mut last_err = None;
        let mut connected = None;
        for addr in &details.addrs {
            match connect_one(addr, per_addr) {
                Ok(stream) => {
                    connected = Some(stream);
                    break;
                }
                Err(Error::Timeout(_)) => {
                    last_err = Some(Error::Timeout(details.timeout.reason));
                }
                Err(err) => last_err = Some(err),
            }
        }

        let stream = match connected {
            Some(stream) => stream,
            None => {
                return Err(last_err.unwrap_or_else(|| {
                    Error::Io(io::Error::new(
                        io::ErrorKind::ConnectionRefused,
                        "no address to connect to",
                    ))
                }))
            }
        };

        if config.no_delay() {
            stream.set_nodelay(true)?;
        }

        let stream = Arc::new(stream);
        self.token.register(&stream);
        log::trace!("connected to {:?}", stream.peer_addr().ok());

        Ok(Some(CancellableTransport {
            stream,
            token: self.token.clone(),
            buffers: LazyBuffers::new(config.input_buffer_size(), config.output_buffer_size()),
        }))
    }
}

fn connect_one(addr: &SocketAddr, timeout: Option<Duration>) -> Result<TcpStream, Error> {
    let result = match timeout {
        Some(timeout) => TcpStream::connect_timeout(addr, timeout),
        None => TcpStream::connect(addr),
    };
    result.map_err(|err| match err.kind() {
        io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock => Error::Timeout(Timeout::Connect),
        _ => Error::Io(err),
    })
}

/// Maps a socket timeout to ureq's timeout error for the current phase.
fn io_to_ureq(err: io::Error, timeout: NextTimeout) -> Error {
    match err.kind() {
        io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock => Error::Timeout(timeout.reason),
        _ => Error::Io(err),
    }
}

pub(crate) struct CancellableTransport {
    stream: Arc<TcpStream>,
    token: CancelToken,
    buffers: LazyBuffers,
}

impl Transport for CancellableTransport {
    fn buffers(&mut self) -> &mut dyn Buffers {
        &mut self.buffers
    }

    fn transmit_output(&mut self, amount: usize, timeout: NextTimeout) -> Result<(), Error> {
        self.stream
            .set_write_timeout(timeout.not_zero().map(|t| *t))?;

        let output = &self.buffers.output()[..amount];
        let mut stream: &TcpStream = &self.stream;
        stream
            .write_all(output)
            .map_err(|err| io_to_ureq(err, timeout))
    }

    fn await_input(&mut self, timeout: NextTimeout) -> Result<bool, Error> {
        self.stream
            .set_read_timeout(timeout.not_zero().map(|t| *t))?;

        let input = self.buffers.input_append_buf();
        let mut stream: &TcpStream = &self.stream;
        let amount = stream
            .read(input)
            .map_err(|err| io_to_ureq(err, timeout))?;
        self.buffers.input_appended(amount);

        Ok(amount > 0)
    }

    fn is_open(&mut self) -> bool {
        if self.token.is_cancelled() {
            return false;
        }
        peek_open(&self.stream).unwrap_or(false)
    }
}

/// A pooled connection is reusable only while nothing is waiting to be read.
fn peek_open(stream: &TcpStream) -> io::Result<bool> {
    stream.set_nonblocking(true)?;
    let mut buf = [0u8; 1];
    let mut reader = stream;
    let open = match reader.read(&mut buf) {
        Err(err) if err.kind() == io::ErrorKind::WouldBlock => true,
        _ => false,
    };
    stream.set_nonblocking(false)?;
    Ok(open)
}

impl fmt::Debug for CancellableTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CancellableTransport")
            .field("peer", &self.stream.peer_addr().ok())
            .field("cancelled", &self.token.is_cancelled())
            .finish()
    }
}
