// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Close-on-exec flagging via the dedicated ioctl.

use nix::errno::Errno;
use std::os::fd::{AsFd, AsRawFd};

nix::ioctl_none_bad!(fioclex, libc::FIOCLEX);

/// Mark `fd` as close-on-exec.
///
/// Uses the `FIOCLEX` ioctl, which sets the flag in one syscall. The
/// `F_GETFD`/`F_SETFD` pair would leave a window where another thread or a
/// signal handler could clobber the descriptor flags between the two calls.
///
/// Works for any open fd, not just terminals, and is idempotent.
pub fn set_cloexec<F: AsFd>(fd: &F) -> Result<(), Errno> {
    // SAFETY: FIOCLEX carries no argument; the fd is only borrowed for the
    // duration of the call.
    unsafe { fioclex(fd.as_fd().as_raw_fd()) }.map(drop)
}

#[cfg(test)]
#[path = "cloexec_tests.rs"]
mod tests;
