//! hfd-relay - Entry Point

use env_logger::Env;
use log::error;
use std::process;

#[tokio::main]
async fn main() {
    // RUST_LOG overrides the default level
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let work_dir = match std::env::current_dir() {
        Ok(dir) => dir,
        Err(e) => {
            error!("Cannot determine the working directory: {}", e);
            process::exit(1);
        }
    };

    let args = match hfd_relay::utf8_arguments(std::env::args_os().skip(1)) {
        Ok(args) => args,
        Err(arg) => {
            error!("Argument is not valid UTF-8: {}", arg.to_string_lossy());
            process::exit(1);
        }
    };

    let code = hfd_relay::run(args, &work_dir).await;
    process::exit(code);
}
