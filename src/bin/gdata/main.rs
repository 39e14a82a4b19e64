use std::process::ExitCode;

mod cli;
mod commands;
mod display;
mod io;
mod util;

fn init_logging(quiet: bool) {
    let default_level = if quiet { "warn" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .format_target(false)
        .init();
}

fn main() -> ExitCode {
    let cli = cli::parse();
    init_logging(cli.quiet);

    let ctx = display::Context::new(cli.quiet);
    if ctx.interactive {
        display::print_banner();
    }

    if let Err(err) = commands::dispatch(cli.command, ctx) {
        display::print_error(&err);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
