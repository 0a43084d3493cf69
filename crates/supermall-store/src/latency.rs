// ABOUTME: Artificial latency profile imitating network round-trips to a remote backend.
// ABOUTME: Fixed per-operation delays; a zero profile turns the simulation off for tests.

use std::time::Duration;

/// Fixed delays applied before each mock backend operation resolves. The
/// values imitate a remote call, not a cost model: they are the same
/// regardless of payload size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Latency {
    pub read: Duration,
    pub write: Duration,
    pub auth: Duration,
    pub probe: Duration,
}

impl Latency {
    /// The default simulation: queries and gets 200ms, mutations 300ms,
    /// sign-in/sign-up 500ms, auth-state probe 100ms.
    pub fn simulated() -> Self {
        Self {
            read: Duration::from_millis(200),
            write: Duration::from_millis(300),
            auth: Duration::from_millis(500),
            probe: Duration::from_millis(100),
        }
    }

    /// No delays at all. Used by tests and by callers that want the mock
    /// semantics without the waiting.
    pub fn none() -> Self {
        Self {
            read: Duration::ZERO,
            write: Duration::ZERO,
            auth: Duration::ZERO,
            probe: Duration::ZERO,
        }
    }

    pub async fn read_delay(&self) {
        Self::sleep(self.read).await;
    }

    pub async fn write_delay(&self) {
        Self::sleep(self.write).await;
    }

    pub async fn auth_delay(&self) {
        Self::sleep(self.auth).await;
    }

    pub async fn probe_delay(&self) {
        Self::sleep(self.probe).await;
    }

    async fn sleep(duration: Duration) {
        if !duration.is_zero() {
            tokio::time::sleep(duration).await;
        }
    }
}

impl Default for Latency {
    fn default() -> Self {
        Self::simulated()
    }
}
