use std::fmt;

use bookroot::{
    BookRecord, ErrorKind, GoogleBookRecord, GoogleBooks, OpenLibrary, OpenLibraryQuery,
    OpenLibraryRecord, SavedCollection, API_KEY_VAR,
};
use eyre::{eyre, Context, Result};
use log::{info, trace};
use serde::Serialize;

use crate::{
    display,
    interact::{user_input, user_select},
};

const DONE: &str = "Done";

/// How search results are written to stdout.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Output {
    Text,
    Json,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Source {
    GoogleBooks,
    OpenLibrary,
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GoogleBooks => f.write_str("Google Books"),
            Self::OpenLibrary => f.write_str("Open Library"),
        }
    }
}

/// The records returned by one search, shaped by the source that was searched.
#[derive(Debug)]
pub enum Results {
    Google(Vec<GoogleBookRecord>),
    OpenLibrary(Vec<OpenLibraryRecord>),
}

impl Results {
    pub fn len(&self) -> usize {
        match self {
            Self::Google(records) => records.len(),
            Self::OpenLibrary(records) => records.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn records(&self) -> Vec<&dyn BookRecord> {
        match self {
            Self::Google(records) => records.iter().map(|r| r as &dyn BookRecord).collect(),
            Self::OpenLibrary(records) => records.iter().map(|r| r as &dyn BookRecord).collect(),
        }
    }

    /// One entry per record, either a text card or a JSON object.
    pub fn render(&self, output: Output) -> Result<Vec<String>> {
        match (self, output) {
            (Self::Google(records), Output::Text) => {
                Ok(records.iter().map(display::google_card).collect())
            }
            (Self::OpenLibrary(records), Output::Text) => {
                Ok(records.iter().map(display::open_library_card).collect())
            }
            (Self::Google(records), Output::Json) => json_lines(records),
            (Self::OpenLibrary(records), Output::Json) => json_lines(records),
        }
    }
}

fn json_lines<T: Serialize>(records: &[T]) -> Result<Vec<String>> {
    records
        .iter()
        .map(|record| serde_json::to_string(record).wrap_err("Cannot write record as JSON"))
        .collect()
}

pub fn print_results(results: &Results, output: Output) -> Result<()> {
    let separator = if output == Output::Text { "\n" } else { "" };
    for entry in results.render(output)? {
        println!("{entry}{separator}");
    }
    Ok(())
}

pub fn no_results_message(source: Source) -> String {
    format!("No books found for this search in {source}")
}

/// Adds the title of `record` to `saved` and describes what happened.
pub fn sprout(saved: &mut SavedCollection, record: &dyn BookRecord) -> String {
    match record.title() {
        None => "This book has no title and cannot be added to your library".to_owned(),
        Some(title) => {
            if saved.add(title) {
                format!("'{title}' is now rooted in your library")
            } else {
                format!("'{title}' is already in your library")
            }
        }
    }
}

pub fn library_listing(saved: &SavedCollection) -> String {
    if saved.is_empty() {
        return "Your library is empty. Sprout a book to begin!".to_owned();
    }

    let mut listing = format!("Rooted in your library ({}):", saved.len());
    for title in saved {
        listing.push_str("\n  - ");
        listing.push_str(title);
    }
    listing
}

/// Lets the user pick books from `results` to add to `saved` until they choose "Done".
pub fn user_sprout(results: &Results, saved: &mut SavedCollection) -> Result<()> {
    let records = results.records();
    let mut items: Vec<String> = records.iter().map(|r| display::heading(*r)).collect();
    items.push(DONE.to_owned());

    loop {
        let selection = user_select("Sprout a book into your library", &items)?;
        match records.get(selection) {
            Some(record) => println!("{}", sprout(saved, *record)),
            None => return Ok(()),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Action {
    Explore(Source),
    ShowLibrary,
    ClearLibrary,
    Quit,
}

const ACTIONS: [Action; 5] = [
    Action::Explore(Source::GoogleBooks),
    Action::Explore(Source::OpenLibrary),
    Action::ShowLibrary,
    Action::ClearLibrary,
    Action::Quit,
];

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Explore(source) => write!(f, "Explore {source}"),
            Self::ShowLibrary => f.write_str("Show my library"),
            Self::ClearLibrary => f.write_str("Clear my library"),
            Self::Quit => f.write_str("Quit"),
        }
    }
}

/// An interactive session: search either source, sprout books and manage the saved titles.
///
/// The saved titles only live as long as the session. Without a Google Books client only Open
/// Library can be searched.
pub struct Session {
    google: Option<GoogleBooks>,
    open_library: OpenLibrary,
    max_results: u32,
    output: Output,
    saved: SavedCollection,
}

impl Session {
    pub const fn new(
        google: Option<GoogleBooks>,
        open_library: OpenLibrary,
        max_results: u32,
        output: Output,
    ) -> Self {
        Self {
            google,
            open_library,
            max_results,
            output,
            saved: SavedCollection::new(),
        }
    }

    pub fn search(&self, source: Source, text: &str) -> Result<Results, bookroot::Error> {
        match source {
            Source::GoogleBooks => match &self.google {
                Some(google) => google.search(text, self.max_results).map(Results::Google),
                None => Err(bookroot::Error::new(
                    ErrorKind::Config,
                    format!("Google Books is unavailable - set {API_KEY_VAR} to search it"),
                )),
            },
            Source::OpenLibrary => {
                let query = OpenLibraryQuery::new().text(text).limit(self.max_results);
                self.open_library.search(&query).map(Results::OpenLibrary)
            }
        }
    }

    /// Runs until the user quits, returning the titles saved during the session.
    pub fn run(mut self) -> Result<SavedCollection> {
        info!("Starting interactive session");
        loop {
            let selection = user_select("What would you like to do?", &ACTIONS)?;
            let action = ACTIONS.get(selection).copied().ok_or_else(|| {
                eyre!("Internal error: user selection should be valid and not cause an out of index error")
            })?;
            trace!("Session action: {action}");

            match action {
                Action::Explore(source) => self.explore(source)?,
                Action::ShowLibrary => println!("{}", library_listing(&self.saved)),
                Action::ClearLibrary => {
                    self.saved.clear();
                    println!("Your library has been cleared");
                }
                Action::Quit => return Ok(self.saved),
            }
        }
    }

    fn explore(&mut self, source: Source) -> Result<()> {
        let text = user_input(format!("Search {source} (title, author, or genre)"))?;

        // a failed search is reported but does not end the session
        match self.search(source, &text) {
            Err(err) => println!("Search failed: {err}"),
            Ok(results) if results.is_empty() => println!("{}", no_results_message(source)),
            Ok(results) => {
                print_results(&results, self.output)?;
                user_sprout(&results, &mut self.saved)?;
            }
        }
        Ok(())
    }
}
