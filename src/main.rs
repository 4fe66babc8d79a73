use clap::Parser;
use geocomm::cli::{Cli, Commands};
use miette::Result;

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

    match cli.command {
        Commands::Asset(cmd) => geocomm::cli::commands::asset::run(cmd, &global),
        Commands::Link(cmd) => geocomm::cli::commands::link::run(cmd, &global),
        Commands::Sat(args) => geocomm::cli::commands::sat::run(args, &global),
        Commands::Freq(args) => geocomm::cli::commands::freq::run(args, &global),
        Commands::Import(args) => geocomm::cli::commands::import::run(args, &global),
        Commands::Export(args) => geocomm::cli::commands::export::run(args, &global),
        Commands::Report(cmd) => geocomm::cli::commands::report::run(cmd, &global),
        Commands::Status(args) => geocomm::cli::commands::status::run(args, &global),
        Commands::Reset(args) => geocomm::cli::commands::reset::run(args, &global),
        Commands::Completions(args) => geocomm::cli::commands::completions::run(args),
    }
}
