#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::perf,
    clippy::style,
    clippy::missing_safety_doc,
    clippy::missing_const_for_fn
)]
#![allow(clippy::as_conversions, clippy::mod_module_files)]

use std::process;

mod app;
mod commands;
mod config;
mod display;
mod interact;

use app::Output;
use commands::{Commands, Options};

use clap::{Args, Parser};
use log::trace;

fn main() {
    if let Err(err) = try_main() {
        eprintln!("{err:#}");
        process::exit(2);
    }
}

fn try_main() -> eyre::Result<()> {
    let Cli {
        command,
        global_opts:
            GlobalOpts {
                interact,
                json,
                verbosity,
                quiet,
            },
    } = Cli::parse();

    setup_errlog(verbosity as usize, quiet)?;

    // `quiet` wins when used together with `interact`
    let interact = interact && !quiet;

    if interact {
        trace!("Interact mode enabled");
    }

    let output = if json { Output::Json } else { Output::Text };
    let message = command.execute(&Options { interact, output })?;

    if quiet {
        return Ok(());
    }

    // keep stdout as JSON lines only
    if json {
        eprintln!("{message}");
    } else {
        println!("{message}");
    }
    Ok(())
}

fn setup_errlog(verbosity: usize, quiet: bool) -> eyre::Result<()> {
    // if quiet then ignore verbosity but still show errors
    let verbosity = if quiet { 1 } else { verbosity + 2 };

    stderrlog::new().verbosity(verbosity).init()?;
    Ok(())
}

#[derive(Parser)]
#[clap(name = "bookroot")]
#[clap(
    about = "Search Google Books and Open Library and root the books you find into your library"
)]
#[clap(version, author)]
struct Cli {
    #[clap(subcommand)]
    command: Commands,

    #[clap(flatten)]
    global_opts: GlobalOpts,
}

#[derive(Debug, Args)]
struct GlobalOpts {
    /// Enables interactive mode, which allows for picking books from the results to add to your
    /// library.
    #[clap(short, long, global = true)]
    interact: bool,

    /// Write each book as a JSON object on its own line instead of a text card.
    #[clap(long, global = true)]
    json: bool,

    /// How chatty the program is when performing commands
    ///
    /// The number of times this flag is used will increase how chatty
    /// the program is.
    #[clap(short, long, parse(from_occurrences), global = true)]
    verbosity: u8,

    /// Prevents the program from writing messages to stdout, errors will still be printed to
    /// stderr.
    #[clap(short, long, global = true)]
    quiet: bool,
}
