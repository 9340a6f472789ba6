use std::sync::Arc;
use std::time::{Duration, Instant};

use bannergrab_common::banner::BannerResult;
use bannergrab_common::config::ProbeConfig;
use bannergrab_common::network::target::Target;
use bannergrab_common::{success, warn};
use bannergrab_core::scanner::{self, ProgressCallback};
use bannergrab_protocols as protocols;
use tracing::debug;

use crate::commands::CommandLine;
use crate::output::{self, OutputFormat, Summary};
use crate::targets;
use crate::terminal::{print, spinner};

pub async fn scan(cli: CommandLine) -> anyhow::Result<()> {
    let raw_targets: Vec<String> = match &cli.targets_file {
        Some(path) => targets::read_target_file(path)?,
        None => cli.targets.clone(),
    };
    if raw_targets.is_empty() {
        anyhow::bail!("no targets given: pass host[:port] arguments or -f <file>");
    }
    let targets: Vec<Target> = targets::parse_targets(&raw_targets)?;

    // Fail on a bad output path before spending time on the network.
    let output_format: Option<OutputFormat> = cli
        .output
        .as_deref()
        .map(OutputFormat::from_path)
        .transpose()?;

    let config: ProbeConfig = build_config(&cli)?;
    if !protocols::is_known(&config.protocol) && config.payload.is_none() {
        warn!("Unknown protocol '{}', no payload will be sent", config.protocol);
    }
    debug!("{config:?}");

    print::header("grabbing banners", cli.quiet);
    if !cli.quiet {
        print::aligned_line("Targets", targets.len(), 8);
        print::aligned_line("Protocol", &config.protocol, 8);
        print::aligned_line("TLS", scanner::use_tls(&config), 8);
    }

    let start_time: Instant = Instant::now();
    let results: Vec<BannerResult> = grab_with_spinner(&targets, &config, cli.quiet).await;
    let total_time: Duration = start_time.elapsed();

    match (&cli.output, output_format) {
        (Some(path), Some(format)) => {
            output::write_file(path, format, &results)?;
            success!("Results written to {}", path.display());
        }
        _ => print!("{}", output::render_text(&results, cli.verbose > 0)),
    }

    print::summary(&Summary::tally(&results), total_time, cli.quiet);
    Ok(())
}

fn build_config(cli: &CommandLine) -> anyhow::Result<ProbeConfig> {
    let concurrency: usize = usize::try_from(cli.threads)?;

    Ok(ProbeConfig::new(&cli.protocol)
        .with_tls(cli.tls)
        .with_payload(cli.payload.clone())
        .with_port(cli.port.clone())
        .with_timeout(Duration::from_secs(cli.timeout))
        .with_concurrency(concurrency))
}

async fn grab_with_spinner(targets: &[Target], config: &ProbeConfig, quiet: bool) -> Vec<BannerResult> {
    if quiet {
        return scanner::run(targets, config).await;
    }

    let total: usize = targets.len();
    spinner::report_progress(0, total);
    let callback: ProgressCallback = Arc::new(move |done: usize| spinner::report_progress(done, total));

    let results = scanner::run_with_progress(targets, config, Some(callback)).await;
    spinner::finish();
    results
}
