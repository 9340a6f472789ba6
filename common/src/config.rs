use std::time::Duration;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);
pub const DEFAULT_CONCURRENCY: usize = 10;

/// Settings shared by every probe in one run.
///
/// Protocol-derived values (default payload, TLS, default port) are not
/// stored here; they are looked up from the protocol table when a run starts,
/// so only the caller's explicit choices live in this struct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeConfig {
    /// Lowercased protocol label, e.g. `http` or `ssh`.
    pub protocol: String,
    /// Forces TLS even for protocols that default to plaintext.
    pub force_tls: bool,
    /// Replaces the protocol's default payload when set. An empty string
    /// means "send nothing".
    pub payload: Option<String>,
    /// Replaces every target's port when set.
    pub port: Option<String>,
    /// Bounds connection setup, then separately bounds all I/O after it.
    pub timeout: Duration,
    /// Maximum number of probes in flight at once.
    pub concurrency: usize,
}

impl ProbeConfig {
    pub fn new(protocol: &str) -> Self {
        Self {
            protocol: protocol.trim().to_ascii_lowercase(),
            force_tls: false,
            payload: None,
            port: None,
            timeout: DEFAULT_TIMEOUT,
            concurrency: DEFAULT_CONCURRENCY,
        }
    }

    pub fn with_tls(mut self, force_tls: bool) -> Self {
        self.force_tls = force_tls;
        self
    }

    pub fn with_payload(mut self, payload: Option<String>) -> Self {
        self.payload = payload;
        self
    }

    pub fn with_port(mut self, port: Option<String>) -> Self {
        self.port = port.filter(|p| !p.is_empty());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self::new("http")
    }
}
