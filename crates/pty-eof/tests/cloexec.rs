// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

//! Close-on-exec behavior across a real exec.

use std::os::fd::{AsRawFd, FromRawFd, OwnedFd};
use std::process::Command;

use pty_eof::set_cloexec;

/// Ask a freshly exec'd shell whether it inherited `fd`.
fn child_sees_fd(fd: i32) -> bool {
    Command::new("sh")
        .arg("-c")
        .arg(format!("test -e /proc/self/fd/{fd}"))
        .status()
        .unwrap()
        .success()
}

#[test]
fn flagged_fd_is_absent_after_exec() {
    let file = tempfile::tempfile().unwrap();

    // dup() clears close-on-exec, so the child inherits this fd until we
    // flag it.
    let raw = nix::unistd::dup(file.as_raw_fd()).unwrap();
    // SAFETY: dup returned a fresh fd that nothing else owns.
    let fd = unsafe { OwnedFd::from_raw_fd(raw) };
    assert!(child_sees_fd(fd.as_raw_fd()));

    set_cloexec(&fd).unwrap();
    assert!(!child_sees_fd(fd.as_raw_fd()));
}

#[test]
fn flag_survives_repeated_calls() {
    let file = tempfile::tempfile().unwrap();
    let raw = nix::unistd::dup(file.as_raw_fd()).unwrap();
    // SAFETY: dup returned a fresh fd that nothing else owns.
    let fd = unsafe { OwnedFd::from_raw_fd(raw) };

    set_cloexec(&fd).unwrap();
    set_cloexec(&fd).unwrap();
    assert!(!child_sees_fd(fd.as_raw_fd()));
}
