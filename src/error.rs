//! Error types for tuirc.

use std::fmt;
use std::io;

/// Result type alias for tuirc operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for tuirc operations.
///
/// Connection-establishment failures are split by phase (`Resolution`,
/// `Connection`, `Tls`) so the caller can report them distinctly; none of
/// them trigger automatic retries inside the crate.
#[derive(Debug)]
pub enum Error {
    /// Hostname resolution produced no usable candidates.
    Resolution { host: String, source: io::Error },
    /// Every resolved candidate address refused the connection.
    Connection(io::Error),
    /// TLS configuration, context creation, or handshake failure, carrying
    /// the underlying library's diagnostic string.
    Tls(String),
    /// A send failed fatally; carries the transport-specific description.
    Send(String),
    /// A receive failed fatally.
    Receive(io::Error),
    /// Send or receive on a channel that is not connected.
    ChannelClosed,
    /// A receive was issued while the inbound buffer had no free space;
    /// the orchestrator must drain messages between reads.
    InboundOverflow { capacity: usize },
    /// Row index outside the grid.
    OutOfBounds { line: u32, height: u32 },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Resolution { host, source } => {
                write!(f, "cannot resolve hostname {host}: {source}")
            }
            Self::Connection(e) => write!(f, "cannot connect: {e}"),
            Self::Tls(msg) => write!(f, "tls: {msg}"),
            Self::Send(msg) => write!(f, "cannot send: {msg}"),
            Self::Receive(e) => write!(f, "cannot receive: {e}"),
            Self::ChannelClosed => write!(f, "channel is not connected"),
            Self::InboundOverflow { capacity } => {
                write!(f, "inbound buffer full ({capacity} bytes, no messages drained)")
            }
            Self::OutOfBounds { line, height } => {
                write!(f, "line {line} out of bounds for grid of height {height}")
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Resolution { source, .. } => Some(source),
            Self::Connection(e) | Self::Receive(e) => Some(e),
            _ => None,
        }
    }
}
