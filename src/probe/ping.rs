//! ICMP probe via the external ping binary.
//!
//! Calling the system ping avoids needing elevated privileges for raw
//! sockets, which keeps install and usage simple. Currently only supports
//! POSIX ping command options.

use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;

use crate::probe::ProbeError;

/// Send one echo request; true on a reply within the deadline.
pub async fn ping_host(host: &str, timeout: Duration) -> Result<bool, ProbeError> {
    let deadline_secs = timeout.as_secs().max(1);

    let mut child = Command::new("ping")
        .arg("-c")
        .arg("1")
        .arg("-n")
        .arg("-W")
        .arg(deadline_secs.to_string())
        .arg(host)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .kill_on_drop(true)
        .spawn()?;

    // Slightly longer than ping's own deadline so a DNS lookup delay inside
    // the command does not hang the probe.
    let grace = timeout + timeout / 4;
    match tokio::time::timeout(grace, child.wait()).await {
        Ok(status) => Ok(status?.success()),
        Err(_) => {
            let _ = child.kill().await;
            Ok(false)
        }
    }
}
