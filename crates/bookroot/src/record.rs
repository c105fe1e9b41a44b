//! Flat records produced by the search clients.
//!
//! Each upstream API has its own record shape, the two are not unified into a single schema.
//! Every field is always present and is `None` when the API did not provide a value.

use serde::Serialize;

/// Fields shared by convention across the record shapes.
pub trait BookRecord {
    /// The identifier assigned by the upstream API.
    fn key(&self) -> Option<&str>;
    /// The title of the book.
    fn title(&self) -> Option<&str>;
    /// The authors of the book joined with ", ".
    fn authors(&self) -> Option<&str>;
}

/// A single volume from the Google Books API.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GoogleBookRecord {
    /// The volume id.
    pub id: Option<String>,
    /// The title of the volume.
    pub title: Option<String>,
    /// Authors joined with ", ".
    pub authors: Option<String>,
    /// The publisher.
    pub publisher: Option<String>,
    /// Publication date as given by the API, this may be a year, year-month or full date.
    pub published_date: Option<String>,
    /// Number of pages.
    pub page_count: Option<u32>,
    /// Categories joined with ", ".
    pub categories: Option<String>,
    /// The mean review rating.
    pub average_rating: Option<f64>,
    /// Retail price amount.
    pub price: Option<f64>,
    /// Currency code of the retail price.
    pub currency: Option<String>,
    /// Whether the volume is available as an ebook.
    pub is_ebook: Option<bool>,
    /// Link to download the PDF.
    pub pdf_link: Option<String>,
    /// How much of the volume can be viewed, e.g. `PARTIAL` or `NO_PAGES`.
    pub viewability: Option<String>,
}

impl BookRecord for GoogleBookRecord {
    fn key(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    fn authors(&self) -> Option<&str> {
        self.authors.as_deref()
    }
}

/// A single work from the Open Library search API.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct OpenLibraryRecord {
    /// The title of the work.
    pub title: Option<String>,
    /// Author names joined with ", ".
    pub author: Option<String>,
    /// Author keys joined with ", ".
    pub author_key: Option<String>,
    /// Year the work was first published.
    pub year: Option<i32>,
    /// Number of editions of the work.
    pub editions: u64,
    /// Average rating rounded to 2 decimal places, `None` when not rated.
    pub rating_avg: Option<f64>,
    /// Number of ratings.
    pub rating_count: u64,
    /// Readers with the work on their want to read shelf.
    pub want_to_read: u64,
    /// Readers currently reading the work.
    pub currently_reading: u64,
    /// Readers that have finished the work.
    pub already_read: u64,
    /// Total reading log entries across all shelves.
    pub readinglog_count: u64,
    /// Median page count across editions.
    pub pages: Option<u32>,
    /// Language codes joined with ", ".
    pub language: Option<String>,
    /// Publishers joined with ", ".
    pub publisher: Option<String>,
    /// Subjects joined with ", ".
    pub subjects: Option<String>,
    /// People the work is about.
    pub people: Option<String>,
    /// Places the work is set in.
    pub places: Option<String>,
    /// Time periods the work covers.
    pub times: Option<String>,
    /// The opening sentence.
    pub first_sentence: Option<String>,
    /// Large cover image, only present when the work has a cover.
    pub cover_url: Option<String>,
    /// The work key, e.g. `/works/OL27448W`.
    pub work_key: Option<String>,
    /// `rating_count + want_to_read + already_read`.
    pub popularity_score: u64,
}

impl BookRecord for OpenLibraryRecord {
    fn key(&self) -> Option<&str> {
        self.work_key.as_deref()
    }

    fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    fn authors(&self) -> Option<&str> {
        self.author.as_deref()
    }
}
