mod cli;

use clap::Parser;
use log::debug;
use std::env;
use std::io;
use std::process::ExitCode;

use cli::Cli;

fn main() -> ExitCode {
    let mut args = Cli::parse();
    args.apply_time_env(env::var_os(cli::TIME_ONLY_ENV).as_deref());
    cli::init_logging(args.debug);

    let stdout = io::stdout();
    let stderr = io::stderr();
    match cli::run(&args, io::stdin().lock(), &mut stdout.lock(), &mut stderr.lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            debug!("{err:?}");
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}
