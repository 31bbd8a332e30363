use clap::Parser;
use log::warn;
use snafu::ErrorCompat;

mod args;
mod topsis;

use crate::args::Args;

fn main() {
    let args = Args::parse();

    let mut builder = env_logger::Builder::from_default_env();
    if args.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.init();

    let res = if let Some(addr) = args.serve.clone() {
        topsis::server::serve(&addr)
    } else {
        topsis::run_analysis(&args)
    };

    if let Err(e) = res {
        warn!("Error occured {:?}", e);
        eprintln!("An error occured {}", e);
        if let Some(bt) = ErrorCompat::backtrace(&e) {
            eprintln!("trace: {}", bt);
        }
        std::process::exit(1);
    }
}
