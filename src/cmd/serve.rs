use crate::cli::ServeArgs;
use crate::config::Config;
use crate::web;

/// Start the HTTP server with command line overrides applied to `config`.
pub fn run(args: ServeArgs, config: Config) -> Result<(), i32> {
    let config = apply_overrides(args, config);
    if config.window_size == 0 {
        eprintln!("error: --window-size must be greater than 0");
        return Err(1);
    }
    web::run(config)
}

fn apply_overrides(args: ServeArgs, mut config: Config) -> Config {
    if let Some(host) = args.host {
        config.host = host;
    }
    if let Some(port) = args.port {
        config.port = port;
    }
    if let Some(root) = args.root {
        config.log_root = root;
    }
    if let Some(window_size) = args.window_size {
        config.window_size = window_size;
    }
    config
}
