use crate::{
    app::{self, Output, Results, Session, Source},
    config::Config,
};

use bookroot::{OpenLibrary, OpenLibraryQuery, SavedCollection};

use clap::Subcommand;
use eyre::{eyre, Context};
use log::{trace, warn};

const DEFAULT_MAX_RESULTS: u32 = 30;

/// Options shared by every command.
pub struct Options {
    pub interact: bool,
    pub output: Output,
}

#[derive(Subcommand)]
#[non_exhaustive]
pub enum Commands {
    /// Search the Google Books API
    ///
    /// Requires an API key in the GOOGLE_BOOKS_API_KEY environment variable or in a .env file in
    /// the current directory.
    #[clap(arg_required_else_help = true)]
    Google {
        /// Keywords to search for, e.g. a title, author or genre
        query: String,
        /// The maximum number of books returned
        #[clap(short = 'n', long, default_value_t = DEFAULT_MAX_RESULTS)]
        max_results: u32,
    },

    /// Search the Open Library API
    ///
    /// At least one of the query, `--title` or `--author` must be provided.
    #[clap(arg_required_else_help = true)]
    OpenLibrary {
        /// Keywords to search for
        query: Option<String>,
        /// Only match books with this title
        #[clap(short, long)]
        title: Option<String>,
        /// Only match books by this author
        #[clap(short, long)]
        author: Option<String>,
        /// The maximum number of books returned
        #[clap(short = 'n', long, default_value_t = DEFAULT_MAX_RESULTS)]
        limit: u32,
    },

    /// Start an interactive session to explore both APIs and sprout books into your library
    ///
    /// The library only lasts for the session and is printed when the session ends. Without a
    /// Google Books API key only Open Library can be explored.
    Session {
        /// The maximum number of books returned by each search
        #[clap(short = 'n', long, default_value_t = DEFAULT_MAX_RESULTS)]
        max_results: u32,
    },
}

impl Commands {
    pub fn execute(self, options: &Options) -> eyre::Result<String> {
        match self {
            Commands::Google { query, max_results } => {
                let google = Config::load()?.google_books()?;
                let results = google.search(&query, max_results).map(Results::Google);
                report(Source::GoogleBooks, results, options)
            }
            Commands::OpenLibrary {
                query,
                title,
                author,
                limit,
            } => {
                let mut search = OpenLibraryQuery::new().limit(limit);
                if let Some(text) = query {
                    search = search.text(text);
                }
                if let Some(title) = title {
                    search = search.title(title);
                }
                if let Some(author) = author {
                    search = search.author(author);
                }

                if search.is_empty() {
                    return Err(eyre!(
                        "Nothing to search for - provide a query, a --title or an --author"
                    ));
                }

                let results = OpenLibrary::new().search(&search).map(Results::OpenLibrary);
                report(Source::OpenLibrary, results, options)
            }
            Commands::Session { max_results } => {
                // Open Library does not need a key so the session starts without Google Books
                let google = Config::load()?
                    .google_books()
                    .map_err(|err| warn!("{err:#} - only Open Library can be explored"))
                    .ok();
                let saved =
                    Session::new(google, OpenLibrary::new(), max_results, options.output).run()?;
                Ok(app::library_listing(&saved))
            }
        }
    }
}

fn report(
    source: Source,
    results: Result<Results, bookroot::Error>,
    options: &Options,
) -> eyre::Result<String> {
    let results = results.wrap_err_with(|| format!("Search failed for {source}"))?;

    if results.is_empty() {
        return Ok(app::no_results_message(source));
    }

    trace!("{} books found in {source}", results.len());
    app::print_results(&results, options.output)?;

    if options.interact {
        let mut saved = SavedCollection::new();
        app::user_sprout(&results, &mut saved)?;
        Ok(app::library_listing(&saved))
    } else {
        Ok(format!("{} books found in {source}", results.len()))
    }
}
