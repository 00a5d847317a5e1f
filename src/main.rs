use clap::Parser;
use omics_eventbridge::cli::{execute_command, init_tracing, Cli};
use omics_eventbridge::env::AppEnv;
use tracing::{debug, error, trace};

fn main() {
    let cli = Cli::parse();
    let env = AppEnv::real();

    init_tracing(cli.verbose, env.vars.as_ref());

    debug!("omics-eventbridge started with verbosity level: {}", cli.verbose);
    trace!("Full CLI args: {:?}", std::env::args().collect::<Vec<_>>());

    let mut stdout = std::io::stdout().lock();
    if let Err(e) = execute_command(cli.command, &env, &mut stdout) {
        error!("Fatal error: {:#}", e);
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
