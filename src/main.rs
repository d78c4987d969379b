use std::io;
use std::process;

use clap::Parser;

use embryo::Shell;

/// Interactive interpreter for a tiny Forth-like stack language
#[derive(Parser, Debug)]
#[command(name = "embryo", version)]
struct Args {
    /// Operand stack capacity
    #[arg(short, long, value_name = "CELLS", default_value_t = embryo::DEFAULT_CAPACITY)]
    capacity: usize,

    /// Log filter for diagnostics on stderr
    #[arg(long, value_name = "FILTER", default_value = "warn")]
    log_level: String,
}

fn main() {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(&args.log_level)
        .with_writer(io::stderr)
        .init();

    tracing::info!(capacity = args.capacity, "session start");

    let mut shell = if args.capacity == embryo::DEFAULT_CAPACITY {
        Shell::new()
    } else {
        Shell::with_output(io::stdout(), args.capacity)
    };
    let stdin = io::stdin();

    match shell.run(stdin.lock()) {
        Ok(outcome) => {
            tracing::info!(?outcome, "session end");
        },

        Err(fault) => {
            println!("stdin:{}", fault);
            process::exit(1);
        },
    }
}
