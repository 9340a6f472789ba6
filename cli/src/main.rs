mod commands;
mod output;
mod targets;
mod terminal;

use commands::CommandLine;
use terminal::{logging, print};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CommandLine::parse_args();

    logging::init_logging(cli.verbose);
    print::banner(cli.quiet);

    commands::scan::scan(cli).await
}
