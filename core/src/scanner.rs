//! The bounded worker pool that turns a target list into banner results.
//!
//! At most `concurrency` grabs are in flight at once. Launches block on the
//! admission gate until a slot frees. Every task's result is joined back in
//! launch order, so `results[i]` always belongs to `targets[i]` no matter
//! which connection finishes first.
//!
//! A failure in one target is confined to its own result. [`run`] always
//! waits for every launched grab and never returns early.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use bannergrab_common::banner::BannerResult;
use bannergrab_common::config::ProbeConfig;
use bannergrab_common::info;
use bannergrab_common::network::target::Target;
use bannergrab_protocols as protocols;
use tokio::sync::Semaphore;
use tokio::task::JoinHandle;
use tracing::{error, trace};

use crate::grabber::{self, Probe};
use crate::network::tcp::TcpConnector;
use crate::network::transport::Connector;

/// Called with the number of finished grabs each time one completes.
pub type ProgressCallback = Arc<dyn Fn(usize) + Send + Sync>;

/// Probes every target over real sockets.
pub async fn run(targets: &[Target], config: &ProbeConfig) -> Vec<BannerResult> {
    run_with(Arc::new(TcpConnector), targets, config, None).await
}

/// Like [`run`], reporting progress through `on_complete`.
pub async fn run_with_progress(
    targets: &[Target],
    config: &ProbeConfig,
    on_complete: Option<ProgressCallback>,
) -> Vec<BannerResult> {
    run_with(Arc::new(TcpConnector), targets, config, on_complete).await
}

/// Probes every target through `connector`.
pub async fn run_with<C>(
    connector: Arc<C>,
    targets: &[Target],
    config: &ProbeConfig,
    on_complete: Option<ProgressCallback>,
) -> Vec<BannerResult>
where
    C: Connector + 'static,
{
    let concurrency: usize = admission_limit(config.concurrency, targets.len());
    let gate: Arc<Semaphore> = Arc::new(Semaphore::new(concurrency));
    let completed: Arc<AtomicUsize> = Arc::new(AtomicUsize::new(0));

    info!(
        "Probing {} targets over {} with up to {concurrency} in flight",
        targets.len(),
        config.protocol
    );

    let mut launched: Vec<(Probe, JoinHandle<BannerResult>)> = Vec::with_capacity(targets.len());
    for target in targets {
        let probe: Probe = build_probe(target, config);
        trace!("queueing {target} as {}:{}", probe.host, probe.port);

        // Only fails if the gate is closed, which never happens here.
        let permit = gate.clone().acquire_owned().await.ok();
        let connector = connector.clone();
        let completed = completed.clone();
        let on_complete = on_complete.clone();
        let task_probe = probe.clone();

        let handle = tokio::spawn(async move {
            let _permit = permit;
            let result = grabber::acquire(&*connector, &task_probe).await;

            let done: usize = completed.fetch_add(1, Ordering::Relaxed) + 1;
            if let Some(cb) = on_complete {
                cb(done);
            }
            result
        });
        launched.push((probe, handle));
    }

    let mut results: Vec<BannerResult> = Vec::with_capacity(launched.len());
    for (probe, handle) in launched {
        let result = match handle.await {
            Ok(result) => result,
            Err(e) => {
                error!("Grab task for {}:{} failed: {e}", probe.host, probe.port);
                BannerResult::failed(probe.host, probe.port, probe.protocol, e)
            }
        };
        results.push(result);
    }
    results
}

/// Number of grabs allowed in flight. Never zero, never more than the target
/// count, and never above what a [`Semaphore`] can hold.
pub fn admission_limit(requested: usize, targets: usize) -> usize {
    requested
        .clamp(1, Semaphore::MAX_PERMITS)
        .min(targets.max(1))
}

/// Resolves the port, payload and transport for one target.
///
/// Port: explicit override > embedded port > protocol default.
/// Payload: explicit override > protocol default (possibly empty).
pub fn build_probe(target: &Target, config: &ProbeConfig) -> Probe {
    let use_tls: bool = use_tls(config);
    let port: &str = target.resolve_port(config.port.as_deref(), protocols::default_port(use_tls));
    let payload: &str = config
        .payload
        .as_deref()
        .unwrap_or_else(|| protocols::default_payload(&config.protocol));

    Probe {
        host: target.host.clone(),
        port: port.to_string(),
        protocol: config.protocol.clone(),
        payload: payload.to_string(),
        timeout: config.timeout,
        use_tls,
    }
}

/// TLS when the protocol implies it or the caller forces it.
pub fn use_tls(config: &ProbeConfig) -> bool {
    config.force_tls || protocols::implies_tls(&config.protocol)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
