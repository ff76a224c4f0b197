//! numkit binary entry point

use std::process;

use clap::Parser;
use frameworks_numkit::{init_logging, run, NumkitArgs, NumkitConfig};
use usecases_math::NumericCache;

fn main() {
    let args = NumkitArgs::parse();

    let config = match NumkitConfig::from_env().and_then(|config| config.with_args(&args)) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(2);
        }
    };

    init_logging(&config.log);

    let ctx = match config.math_context() {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(2);
        }
    };

    let cache = NumericCache::new();
    match run(&args.command, &ctx, &cache) {
        Ok(output) => println!("{}", output),
        Err(e) => {
            eprintln!("Error: {} [{}]", e, e.key());
            process::exit(1);
        }
    }
}
