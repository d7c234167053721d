// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! EOF injection for pseudo-terminal masters, plus a close-on-exec helper.
//!
//! The main operation is [`send_eof`]: given the master side of a pty, make
//! the reader on the slave side observe a normal end-of-file, exactly as if
//! the user had typed the terminal's EOF key at an empty line. That takes
//! three steps: force the line discipline into canonical, non-echoing mode
//! (if it is not there already), write a newline followed by the discipline's
//! configured `VEOF` byte, and drain the output queue.
//!
//! The crate never owns a descriptor. [`send_eof`] borrows one,
//! [`send_eof_with`] resolves one out of an opaque host handle, and nothing
//! is retained past the call. If the discipline had to be reconfigured it is
//! left that way; use [`send_eof_preserving`] or [`SavedAttrs`] when the
//! caller needs the old attributes back.
//!
//! Everything here is synchronous and blocking, and concurrent calls on the
//! same descriptor are the caller's problem to serialize.

mod attrs;
mod cloexec;
mod eof;

pub use attrs::SavedAttrs;
pub use cloexec::set_cloexec;
pub use eof::{send_eof, send_eof_preserving, send_eof_with, Discipline, SendEofError};
