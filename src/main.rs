use clap::Parser;
use miette::Result;
use fcore::cli::{Cli, Commands};
use fcore::core::config::Config;
use fcore::core::logging::init_logger;

fn main() -> Result<()> {
    // Reset SIGPIPE to default behavior (terminate silently) for proper Unix piping.
    // Without this, piping to `head`, `grep -q`, etc. causes a panic on broken pipe.
    #[cfg(unix)]
    {
        unsafe {
            libc::signal(libc::SIGPIPE, libc::SIG_DFL);
        }
    }
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .build(),
        )
    }))?;

    let cli = Cli::parse();
    let global = cli.global;

    init_logger(global.verbose, global.quiet);
    let config = Config::load(global.config.as_deref());
    tracing::debug!(?config, "configuration loaded");

    match cli.command {
        Commands::Depreciate(cmd) => fcore::cli::commands::depreciate::run(cmd, &global, &config),
        Commands::Storage(args) => fcore::cli::commands::storage::run(args, &global, &config),
        Commands::Fees(cmd) => fcore::cli::commands::fees::run(cmd, &global, &config),
        Commands::Report(cmd) => fcore::cli::commands::report::run(cmd, &global, &config),
        Commands::Load(cmd) => fcore::cli::commands::load::run(cmd, &global, &config),
        Commands::Workflow(cmd) => fcore::cli::commands::workflow::run(cmd, &global, &config),
    }
}
