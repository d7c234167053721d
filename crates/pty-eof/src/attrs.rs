// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Scoped save/restore of terminal attributes.

use std::os::fd::BorrowedFd;

use nix::errno::Errno;
use nix::sys::termios::{tcgetattr, tcsetattr, SetArg, Termios};

/// A snapshot of a terminal's attributes that reapplies them when dropped.
///
/// [`send_eof`](crate::send_eof) deliberately leaves the discipline in the
/// reconfigured state; callers that need the old attributes back can take a
/// `SavedAttrs` first. Borrows the fd, so the guard cannot outlive it.
pub struct SavedAttrs<'fd> {
    fd: BorrowedFd<'fd>,
    saved: Termios,
}

impl<'fd> SavedAttrs<'fd> {
    /// Snapshot the current attributes of `fd`.
    pub fn save(fd: BorrowedFd<'fd>) -> Result<Self, Errno> {
        let saved = tcgetattr(fd)?;
        Ok(Self { fd, saved })
    }

    /// Reapply the snapshot now, reporting failure.
    ///
    /// Applied with the drain variant so queued output reaches the slave
    /// under the attributes it was written under.
    pub fn restore(self) -> Result<(), Errno> {
        let res = tcsetattr(self.fd, SetArg::TCSADRAIN, &self.saved);
        std::mem::forget(self);
        res
    }
}

impl Drop for SavedAttrs<'_> {
    fn drop(&mut self) {
        // Best effort only; the fd may already be gone on unwind paths.
        let _ = tcsetattr(self.fd, SetArg::TCSANOW, &self.saved);
    }
}
