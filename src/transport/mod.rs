//! Resilient line transport over plain TCP or TLS.
//!
//! A [`TransportChannel`] owns one outbound connection to a chat server:
//! it resolves the host, walks the candidate addresses in order, optionally
//! wraps the socket in a TLS session, and then moves whole `\r\n`-terminated
//! messages in both directions. Sends tolerate partial writes and transient
//! not-ready conditions; receives reassemble messages across arbitrarily
//! fragmented reads via [`LineFramer`].
//!
//! The channel is synchronous and single-caller by construction: the
//! orchestrator polls the underlying descriptor for readability (see
//! [`TransportChannel::raw_fd`]) and calls in when ready. There is no
//! internal threading and no timeout machinery; pacing and reconnection
//! policy belong to the caller.

mod framer;

pub use framer::{INBOUND_CAPACITY, LineFramer, TERMINATOR};

use std::fmt;
use std::io::{self, Read, Write};
use std::net::{Shutdown, SocketAddr, TcpStream, ToSocketAddrs};
#[cfg(unix)]
use std::os::unix::io::{AsRawFd, RawFd};
use std::sync::Arc;

use rustls::pki_types::ServerName;
use rustls::{ClientConfig, ClientConnection, RootCertStore, StreamOwned};

use crate::error::{Error, Result};
use crate::event::{LogLevel, emit_event, emit_log};

/// Transport flavor, fixed at connect time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    /// Raw TCP.
    Plain,
    /// TLS-secured TCP.
    Tls,
}

/// Lifecycle state of a channel.
///
/// `Closed` is terminal; a new channel must be constructed to reconnect.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChannelState {
    Disconnected,
    Resolving,
    Connecting,
    TlsHandshaking,
    Connected,
    Closed,
}

/// Outcome of one [`TransportChannel::receive`] call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Received {
    /// Zero or more complete messages, terminator-stripped, in order.
    /// Empty when data arrived without completing a message, or when the
    /// read reported a transient not-ready condition.
    Messages(Vec<Vec<u8>>),
    /// The peer closed the connection; diagnostic text attached. The
    /// channel is closed and unusable after this.
    Disconnected(String),
}

/// The two backing stream variants behind one send/receive/close surface.
enum Stream {
    Plain(TcpStream),
    Tls(Box<StreamOwned<ClientConnection, TcpStream>>),
}

impl Read for Stream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            Self::Plain(s) => s.read(buf),
            Self::Tls(s) => s.read(buf),
        }
    }
}

impl Write for Stream {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Self::Plain(s) => s.write(buf),
            Self::Tls(s) => s.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Self::Plain(s) => s.flush(),
            Self::Tls(s) => s.flush(),
        }
    }
}

/// One outbound connection with buffered sends and delimited receives.
pub struct TransportChannel {
    mode: Mode,
    state: ChannelState,
    stream: Option<Stream>,
    framer: LineFramer,
    peer_addr: Option<SocketAddr>,
}

impl fmt::Debug for TransportChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransportChannel")
            .field("mode", &self.mode)
            .field("state", &self.state)
            .field("connected", &self.stream.is_some())
            .field("framer", &self.framer)
            .field("peer_addr", &self.peer_addr)
            .finish()
    }
}

impl TransportChannel {
    /// Establish a connection to `host:port`, optionally TLS-secured.
    ///
    /// Resolution considers both address families; candidates are tried in
    /// resolver order until one accepts. With `secure`, the TLS handshake
    /// is driven to completion against `host` as the verification name
    /// before the channel is handed back; a handshake failure releases the
    /// raw socket.
    ///
    /// Blocks for the duration of resolution and handshakes.
    ///
    /// # Errors
    ///
    /// [`Error::Resolution`] when no candidate addresses exist,
    /// [`Error::Connection`] when every candidate fails, and
    /// [`Error::Tls`] for configuration or handshake failures.
    pub fn connect(host: &str, port: u16, secure: bool) -> Result<Self> {
        let mode = if secure { Mode::Tls } else { Mode::Plain };
        let mut channel = Self {
            mode,
            state: ChannelState::Disconnected,
            stream: None,
            framer: LineFramer::new(),
            peer_addr: None,
        };

        channel.state = ChannelState::Resolving;
        let addrs: Vec<SocketAddr> = (host, port)
            .to_socket_addrs()
            .map_err(|e| Error::Resolution {
                host: host.to_owned(),
                source: e,
            })?
            .collect();
        if addrs.is_empty() {
            return Err(Error::Resolution {
                host: host.to_owned(),
                source: io::Error::new(io::ErrorKind::NotFound, "resolver returned no addresses"),
            });
        }

        channel.state = ChannelState::Connecting;
        let mut last_err: Option<io::Error> = None;
        let mut connected: Option<(TcpStream, SocketAddr)> = None;
        for addr in addrs {
            match TcpStream::connect(addr) {
                Ok(sock) => {
                    connected = Some((sock, addr));
                    break;
                }
                Err(e) => last_err = Some(e),
            }
        }
        let (tcp, addr) = connected.ok_or_else(|| {
            Error::Connection(last_err.unwrap_or_else(|| {
                io::Error::new(io::ErrorKind::AddrNotAvailable, "no candidate connected")
            }))
        })?;

        channel.stream = Some(if secure {
            channel.state = ChannelState::TlsHandshaking;
            Stream::Tls(Box::new(tls_handshake(tcp, host)?))
        } else {
            Stream::Plain(tcp)
        });

        channel.state = ChannelState::Connected;
        channel.peer_addr = Some(addr);
        emit_log(LogLevel::Info, &format!("connected to {addr}"));
        emit_event("connected", &addr.to_string());
        Ok(channel)
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> ChannelState {
        self.state
    }

    /// Transport flavor chosen at connect time.
    #[must_use]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Address of the connected peer.
    #[must_use]
    pub fn peer_addr(&self) -> Option<SocketAddr> {
        self.peer_addr
    }

    /// Check if the channel is usable for send/receive.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.state == ChannelState::Connected
    }

    /// Raw descriptor of the underlying socket, for the orchestrator's
    /// readiness poll.
    #[cfg(unix)]
    #[must_use]
    pub fn raw_fd(&self) -> Option<RawFd> {
        match self.stream.as_ref()? {
            Stream::Plain(s) => Some(s.as_raw_fd()),
            Stream::Tls(s) => Some(s.sock.as_raw_fd()),
        }
    }

    /// Send one logical line.
    ///
    /// The `\r\n` terminator is appended here; callers pass unterminated
    /// messages. Loops until every byte is accepted, advancing over
    /// partial writes and retrying transient not-ready conditions with
    /// identical arguments.
    ///
    /// # Errors
    ///
    /// [`Error::ChannelClosed`] when not connected; [`Error::Send`] with
    /// the transport's description on fatal write failure.
    pub fn send(&mut self, message: &str) -> Result<()> {
        if self.state != ChannelState::Connected {
            return Err(Error::ChannelClosed);
        }
        let stream = self.stream.as_mut().ok_or(Error::ChannelClosed)?;

        let mut wire = Vec::with_capacity(message.len() + TERMINATOR.len());
        wire.extend_from_slice(message.as_bytes());
        wire.extend_from_slice(TERMINATOR);

        write_fully(stream, &wire).map_err(|e| Error::Send(e.to_string()))
    }

    /// Perform one read and return any completed messages.
    ///
    /// Must only be called when the orchestrator's readiness check says
    /// data may be available; otherwise it may block. A transient
    /// not-ready condition yields an empty message list, not an error.
    /// A zero-byte read means the peer disconnected: the channel closes
    /// itself and reports [`Received::Disconnected`].
    ///
    /// # Errors
    ///
    /// [`Error::ChannelClosed`] when not connected;
    /// [`Error::InboundOverflow`] when the bounded buffer is full (the
    /// caller failed to drain between reads); [`Error::Receive`] on fatal
    /// read failure.
    pub fn receive(&mut self) -> Result<Received> {
        if self.state != ChannelState::Connected {
            return Err(Error::ChannelClosed);
        }
        let stream = self.stream.as_mut().ok_or(Error::ChannelClosed)?;

        let received = read_step(stream, &mut self.framer)?;
        if let Received::Disconnected(reason) = &received {
            emit_log(LogLevel::Info, &format!("peer disconnected: {reason}"));
            emit_event("disconnected", reason);
            self.close();
        }
        Ok(received)
    }

    /// Release the connection. Idempotent: safe to call from any cleanup
    /// path in any order, including on an already-closed channel.
    ///
    /// The TLS variant sends its close notification before the socket is
    /// shut down; the plain variant shuts the socket down directly.
    pub fn close(&mut self) {
        if let Some(stream) = self.stream.take() {
            match stream {
                Stream::Plain(sock) => {
                    let _ = sock.shutdown(Shutdown::Both);
                }
                Stream::Tls(mut tls) => {
                    tls.conn.send_close_notify();
                    let _ = tls.flush();
                    let _ = tls.sock.shutdown(Shutdown::Both);
                }
            }
            emit_log(LogLevel::Debug, "channel closed");
        }
        self.state = ChannelState::Closed;
    }
}

impl Drop for TransportChannel {
    fn drop(&mut self) {
        self.close();
    }
}

/// Build the TLS client session and drive the handshake to completion.
///
/// Uses the bundled webpki roots and the library's default protocol suite
/// (TLS 1.3 with TLS 1.2 enabled) for broad server compatibility. `tcp` is
/// dropped, and with it the socket released, on any failure.
fn tls_handshake(mut tcp: TcpStream, host: &str) -> Result<StreamOwned<ClientConnection, TcpStream>> {
    let mut roots = RootCertStore::empty();
    roots.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());

    let config = ClientConfig::builder()
        .with_root_certificates(roots)
        .with_no_client_auth();

    let name = ServerName::try_from(host.to_owned())
        .map_err(|e| Error::Tls(format!("invalid server name {host:?}: {e}")))?;
    let mut conn = ClientConnection::new(Arc::new(config), name)
        .map_err(|e| Error::Tls(e.to_string()))?;

    while conn.is_handshaking() {
        conn.complete_io(&mut tcp)
            .map_err(|e| Error::Tls(format!("handshake with {host} failed: {e}")))?;
    }

    Ok(StreamOwned::new(conn, tcp))
}

/// Write `buf` in full, advancing over partial writes.
///
/// `WouldBlock` (the not-ready condition surfaced by a TLS session over a
/// readiness-driven socket) and `Interrupted` retry the identical write
/// without advancing. Everything else is fatal to the send.
fn write_fully<W: Write>(writer: &mut W, mut buf: &[u8]) -> io::Result<()> {
    while !buf.is_empty() {
        match writer.write(buf) {
            Ok(0) => {
                return Err(io::Error::new(
                    io::ErrorKind::WriteZero,
                    "write accepted zero bytes",
                ));
            }
            Ok(n) => buf = &buf[n..],
            Err(e) if matches!(e.kind(), io::ErrorKind::WouldBlock | io::ErrorKind::Interrupted) => {}
            Err(e) => return Err(e),
        }
    }
    Ok(())
}

/// One bounded read into the framer, classified per the receive contract.
fn read_step<R: Read>(reader: &mut R, framer: &mut LineFramer) -> Result<Received> {
    if framer.is_full() {
        return Err(Error::InboundOverflow {
            capacity: framer.capacity(),
        });
    }
    match reader.read(framer.free_space()) {
        Ok(0) => Ok(Received::Disconnected("connection closed by peer".into())),
        Ok(n) => {
            framer.commit(n);
            Ok(Received::Messages(framer.drain_messages()))
        }
        Err(e) if matches!(e.kind(), io::ErrorKind::WouldBlock | io::ErrorKind::Interrupted) => {
            Ok(Received::Messages(Vec::new()))
        }
        Err(e) => Err(Error::Receive(e)),
    }
}
