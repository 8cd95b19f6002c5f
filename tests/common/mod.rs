//! Shared fixtures for integration tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use network_monitor::config::MonitorConfig;
use network_monitor::probe::{ProbeError, Prober};

/// One scripted tick of prober behavior.
#[derive(Debug, Clone, Copy)]
pub enum Step {
    /// Fast check succeeds; no detailed check runs.
    Ok,
    /// Fast check fails, detailed check confirms the failure.
    FailThenConfirm,
    /// Fast check fails, detailed check passes (false alarm).
    FailThenRecover,
    /// Fast check fails, detailed check errors out.
    FailThenError,
}

/// Prober that replays a fixed script. After the script runs out it either
/// stays reachable or keeps repeating the final step.
pub struct ScriptedProber {
    steps: Mutex<VecDeque<Step>>,
    current: Mutex<Option<Step>>,
    hold_last: bool,
}

impl ScriptedProber {
    /// Replay the script, then report Ok forever.
    pub fn new(script: &[Step]) -> Self {
        Self {
            steps: Mutex::new(script.iter().copied().collect()),
            current: Mutex::new(None),
            hold_last: false,
        }
    }

    /// Replay the script, then keep repeating its final step.
    pub fn holding(script: &[Step]) -> Self {
        assert!(!script.is_empty());
        Self {
            steps: Mutex::new(script.iter().copied().collect()),
            current: Mutex::new(None),
            hold_last: true,
        }
    }
}

#[async_trait]
impl Prober for ScriptedProber {
    async fn fast_check(&self) -> Result<bool, ProbeError> {
        let mut steps = self.steps.lock().unwrap();
        let step = if self.hold_last && steps.len() == 1 {
            *steps.front().unwrap()
        } else {
            steps.pop_front().unwrap_or(Step::Ok)
        };
        drop(steps);
        *self.current.lock().unwrap() = Some(step);
        Ok(matches!(step, Step::Ok))
    }

    async fn detailed_check(&self) -> Result<bool, ProbeError> {
        match self.current.lock().unwrap().take() {
            Some(Step::FailThenRecover) => Ok(true),
            Some(Step::FailThenError) => Err(ProbeError::Ping(std::io::Error::other(
                "ping binary missing",
            ))),
            _ => Ok(false),
        }
    }
}

/// Config tuned for fast tests: short ticks, no real targets needed.
pub fn test_config(interval_ms: u64, confirmation_threshold: u32) -> MonitorConfig {
    let mut config = MonitorConfig::default();
    config.probe.interval_ms = interval_ms;
    config.detector.confirmation_threshold = confirmation_threshold;
    config
}
