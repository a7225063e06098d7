//! `tuirc` - terminal chat client core
//!
//! The two load-bearing subsystems of a terminal IRC-style client, exposed
//! as a library for an external orchestration layer (event loop, scripting
//! runtime, readline input) to drive:
//!
//! - **Inline styling renderer**: [`Renderer`] parses text mixing literal
//!   UTF-8 with embedded mIRC-style control codes and rasterizes it into a
//!   row of styled [`Cell`]s in a [`Grid`], carrying color and attribute
//!   state across rows so multi-line messages keep their formatting.
//! - **Resilient line transport**: [`TransportChannel`] connects to a chat
//!   server over plain TCP or TLS, performs whole-message sends tolerant of
//!   partial writes and not-ready conditions, and reassembles inbound bytes
//!   into discrete `\r\n`-terminated messages across fragmented reads.
//!
//! Both are synchronous and single-threaded by design; the orchestrator
//! owns the readiness loop and calls in when descriptors are ready.

// Crate-level lint configuration
#![warn(unsafe_code)]
#![allow(clippy::cast_possible_truncation)] // Intentional coordinate casts
#![allow(clippy::missing_errors_doc)] // Error conditions documented ad hoc
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod ansi;
pub mod cell;
pub mod error;
pub mod event;
pub mod grid;
pub mod palette;
pub mod render;
pub mod style;
pub mod transport;
pub mod unicode;

// Re-export core types at crate root
pub use ansi::AnsiPresenter;
pub use cell::{Cell, CellContent};
pub use error::{Error, Result};
pub use event::{LogLevel, emit_event, emit_log, set_event_callback, set_log_callback};
pub use grid::Grid;
pub use palette::{Color, Palette};
pub use render::{ControlCode, Renderer, StyledChar, StyledChars};
pub use style::{StyleState, TextAttributes};
pub use transport::{
    ChannelState, INBOUND_CAPACITY, LineFramer, Mode, Received, TransportChannel,
};
pub use unicode::{char_width, display_width, insert_at_char};
