// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! One-shot browser launch at startup.

use std::io;
use std::process::{Command, Stdio};
use std::time::Duration;
use tokio::task::JoinHandle;

/// Opens `url` after `delay`. Runs once and shares nothing with the server,
/// so a failure only costs a log line.
pub fn spawn_launch(url: String, delay: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        match tokio::task::spawn_blocking(move || open_url(&url)).await {
            Ok(Ok(())) => tracing::debug!("Browser launched"),
            Ok(Err(e)) => tracing::warn!("Could not open a browser: {}", e),
            Err(e) => tracing::warn!("Browser launch task failed: {}", e),
        }
    })
}

pub fn open_url(url: &str) -> io::Result<()> {
    let mut command = opener_command(url);
    command
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null());
    // The opener returns quickly; the browser itself is not our child.
    let status = command.status()?;
    if status.success() {
        Ok(())
    } else {
        Err(io::Error::new(io::ErrorKind::Other, format!("opener exited with {}", status)))
    }
}

#[cfg(target_os = "windows")]
fn opener_command(url: &str) -> Command {
    let mut command = Command::new("cmd");
    command.args(["/C", "start", "", url]);
    command
}

#[cfg(target_os = "macos")]
fn opener_command(url: &str) -> Command {
    let mut command = Command::new("open");
    command.arg(url);
    command
}

#[cfg(not(any(target_os = "windows", target_os = "macos")))]
fn opener_command(url: &str) -> Command {
    let mut command = Command::new("xdg-open");
    command.arg(url);
    command
}
