// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! EOF injection into a pty master.

use std::io;
use std::os::fd::{BorrowedFd, RawFd};

use nix::errno::Errno;
use nix::sys::termios::{
    tcdrain, tcgetattr, tcsetattr, LocalFlags, SetArg, SpecialCharacterIndices,
};
use thiserror::Error;

use crate::attrs::SavedAttrs;

/// Errors from [`send_eof`] and its variants, one per failed step.
#[derive(Debug, Error)]
pub enum SendEofError {
    #[error("Failed to resolve handle to a file descriptor: {0}")]
    Resolve(#[source] io::Error),

    #[error("Failed to read terminal attributes: {0}")]
    GetAttr(#[source] Errno),

    #[error("Failed to switch terminal to canonical mode: {0}")]
    SetAttr(#[source] Errno),

    #[error("Failed to write EOF sequence: {0}")]
    Write(#[source] Errno),

    #[error("Short write of EOF sequence: {written} of 2 bytes accepted")]
    ShortWrite { written: usize },

    #[error("Failed to drain terminal output: {0}")]
    Drain(#[source] Errno),
}

/// What [`send_eof`] did to the line discipline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Discipline {
    /// The flags already had `ICANON` set and both echo bits clear; no
    /// `tcsetattr` was issued.
    Untouched,
    /// The flags were rewritten and applied with the drain variant.
    Reconfigured,
}

/// `ICANON` set, `ECHO` and `ECHONL` clear.
fn flags_acceptable(flags: LocalFlags) -> bool {
    flags.contains(LocalFlags::ICANON)
        && !flags.intersects(LocalFlags::ECHO | LocalFlags::ECHONL)
}

/// Make the reader on the slave side of `fd`'s pty observe EOF.
///
/// Ensures the discipline is canonical and non-echoing, writes `\n` followed
/// by the discipline's `VEOF` byte in a single `write`, then drains. The
/// newline puts the EOF byte at a line boundary regardless of what the slave
/// reader has already consumed; mid-line, `VEOF` would only flush the partial
/// line instead of signalling end-of-file. Echo is cleared so the injected
/// newline does not bounce back to the master as spurious output.
///
/// On success the discipline is left canonical with echo off; this function
/// does not restore prior attributes (see [`send_eof_preserving`]). On
/// failure the terminal keeps whatever state the last successful step
/// produced.
///
/// The discipline modification is applied with `TCSADRAIN` so in-flight
/// output reaches the slave before the switch. If `VEOF` is disabled in the
/// control-character table, its sentinel value is written as-is.
pub fn send_eof(fd: BorrowedFd<'_>) -> Result<Discipline, SendEofError> {
    let mut term = tcgetattr(fd).map_err(SendEofError::GetAttr)?;
    // The modification below never touches the control-character table, so
    // this snapshot stays valid either way.
    let veof = term.control_chars[SpecialCharacterIndices::VEOF as usize];

    let discipline = if flags_acceptable(term.local_flags) {
        Discipline::Untouched
    } else {
        term.local_flags.insert(LocalFlags::ICANON);
        term.local_flags
            .remove(LocalFlags::ECHO | LocalFlags::ECHONL);
        tcsetattr(fd, SetArg::TCSADRAIN, &term).map_err(SendEofError::SetAttr)?;
        Discipline::Reconfigured
    };

    let seq = [b'\n', veof];
    let written = nix::unistd::write(fd, &seq).map_err(SendEofError::Write)?;
    if written != seq.len() {
        // No retry: a short write on a blocking terminal fd is a real error.
        return Err(SendEofError::ShortWrite { written });
    }

    tcdrain(fd).map_err(SendEofError::Drain)?;
    Ok(discipline)
}

/// [`send_eof`] on an opaque host handle.
///
/// `resolve` extracts the kernel fd backing `handle`; it is called exactly
/// once, and if it fails the error is returned before any terminal syscall
/// is issued. A resolver that reports success but yields a negative fd is
/// treated the same as a resolver failure. The resolved fd is borrowed for
/// the call and never closed.
pub fn send_eof_with<H, R>(handle: &H, resolve: R) -> Result<Discipline, SendEofError>
where
    R: FnOnce(&H) -> io::Result<RawFd>,
{
    let raw = resolve(handle).map_err(SendEofError::Resolve)?;
    if raw < 0 {
        return Err(SendEofError::Resolve(io::Error::other(format!(
            "resolver returned invalid fd {raw}"
        ))));
    }
    // SAFETY: the fd is non-negative and the resolver contract is that it is
    // open and stays open for the duration of this call; we only borrow it.
    let fd = unsafe { BorrowedFd::borrow_raw(raw) };
    send_eof(fd)
}

/// [`send_eof`] that puts the terminal attributes back afterwards.
///
/// Snapshots the attributes before sending and reapplies them on every exit
/// path, including errors. Restoration happens after the drain, so the EOF
/// sequence has already passed through the discipline by the time the old
/// flags return.
pub fn send_eof_preserving(fd: BorrowedFd<'_>) -> Result<Discipline, SendEofError> {
    let saved = SavedAttrs::save(fd).map_err(SendEofError::GetAttr)?;
    let discipline = send_eof(fd)?;
    saved.restore().map_err(SendEofError::SetAttr)?;
    Ok(discipline)
}

#[cfg(test)]
#[path = "eof_tests.rs"]
mod tests;
