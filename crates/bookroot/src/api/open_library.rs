use log::{error, info, trace};
use serde::Deserialize;

use crate::{record::OpenLibraryRecord, Error};

use super::{
    lenient::{self, Text},
    request_url, Client,
};

const OPEN_LIBRARY_URL: &str = "https://openlibrary.org/search.json";

const DEFAULT_LIMIT: u32 = 10;

/// The fields requested for every document, keeps the response payload bounded.
const FIELDS: [&str; 22] = [
    "key",
    "title",
    "author_name",
    "author_key",
    "first_publish_year",
    "edition_count",
    "subject",
    "ratings_average",
    "ratings_count",
    "readinglog_count",
    "want_to_read_count",
    "currently_reading_count",
    "already_read_count",
    "language",
    "number_of_pages_median",
    "first_sentence",
    "cover_i",
    "publisher",
    "publish_date",
    "person",
    "place",
    "time",
];

macro_rules! cover_url {
    ($cover_id: expr) => {
        format!("https://covers.openlibrary.org/b/id/{}-L.jpg", $cover_id)
    };
}

/// Search client for the Open Library search API.
///
/// The API is unauthenticated so no configuration is required.
pub struct OpenLibrary<C = reqwest::blocking::Client> {
    client: C,
}

impl OpenLibrary {
    /// Creates a new client.
    #[must_use]
    pub fn new() -> Self {
        Self::with_client()
    }
}

impl Default for OpenLibrary {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Client> OpenLibrary<C> {
    pub(crate) fn with_client() -> Self {
        Self {
            client: C::default(),
        }
    }

    /// Search documents matching `query`.
    ///
    /// An empty `Vec` means the search succeeded without any matches.
    ///
    /// # Errors
    ///
    /// An [`ErrorKind::IO`](crate::ErrorKind::IO) error is returned when the request fails or
    /// the API responds with a non-success status.
    /// An [`ErrorKind::Deserialize`](crate::ErrorKind::Deserialize) error is returned when the
    /// response body is not a search result.
    pub fn search(&self, query: &OpenLibraryQuery) -> Result<Vec<OpenLibraryRecord>, Error> {
        info!("Searching for {query} using Open Library API");
        let url = request_url(OPEN_LIBRARY_URL, query.params())?;
        trace!("Request url: {url}");

        let SearchResult { docs } = self.client.get_json(&url)?;

        trace!("Request was successful - {} documents returned", docs.len());

        Ok(docs.into_iter().map(OpenLibraryRecord::from).collect())
    }

    /// Same as [`OpenLibrary::search`] but any error is logged and an empty `Vec` is returned in
    /// its place.
    pub fn search_or_empty(&self, query: &OpenLibraryQuery) -> Vec<OpenLibraryRecord> {
        self.search(query).unwrap_or_else(|err| {
            error!("Open Library API error: {err}");
            Vec::new()
        })
    }
}

/// The parameters of an Open Library search.
///
/// Any subset of the free text query, title and author filters can be used. Empty values are
/// not sent.
///
/// ```
/// use bookroot::OpenLibraryQuery;
///
/// let query = OpenLibraryQuery::new()
///     .title("Dune")
///     .author("Frank Herbert")
///     .limit(5);
///
/// assert_eq!(5, query.max_results());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OpenLibraryQuery {
    text: Option<String>,
    title: Option<String>,
    author: Option<String>,
    limit: u32,
}

impl Default for OpenLibraryQuery {
    fn default() -> Self {
        Self {
            text: None,
            title: None,
            author: None,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl OpenLibraryQuery {
    /// Creates a query without any search terms and the default limit of 10 documents.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the free text query.
    #[must_use]
    pub fn text<S: Into<String>>(mut self, text: S) -> Self {
        self.text = non_empty(text.into());
        self
    }

    /// Sets the title filter.
    #[must_use]
    pub fn title<S: Into<String>>(mut self, title: S) -> Self {
        self.title = non_empty(title.into());
        self
    }

    /// Sets the author filter.
    #[must_use]
    pub fn author<S: Into<String>>(mut self, author: S) -> Self {
        self.author = non_empty(author.into());
        self
    }

    /// Sets the maximum number of documents returned.
    #[must_use]
    pub const fn limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    /// The maximum number of documents returned.
    #[must_use]
    pub const fn max_results(&self) -> u32 {
        self.limit
    }

    /// Returns true when none of the free text, title or author terms are set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.text.is_none() && self.title.is_none() && self.author.is_none()
    }

    fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::with_capacity(5);
        let terms = [
            ("q", &self.text),
            ("title", &self.title),
            ("author", &self.author),
        ];

        for (name, value) in terms {
            if let Some(value) = value {
                params.push((name, value.clone()));
            }
        }

        params.push(("limit", self.limit.to_string()));
        params.push(("fields", FIELDS.join(",")));
        params
    }
}

impl std::fmt::Display for OpenLibraryQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let terms = [
            ("query", &self.text),
            ("title", &self.title),
            ("author", &self.author),
        ];
        let mut first = true;
        for (name, value) in terms {
            if let Some(value) = value {
                if !first {
                    f.write_str(", ")?;
                }
                write!(f, "{name} '{value}'")?;
                first = false;
            }
        }

        if first {
            f.write_str("no terms")?;
        }
        Ok(())
    }
}

fn non_empty(s: String) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s)
    }
}

#[derive(Deserialize)]
#[cfg_attr(test, derive(Debug))]
struct SearchResult {
    #[serde(default, deserialize_with = "lenient::list")]
    docs: Vec<Doc>,
}

/// A search document, only the requested [`FIELDS`] that are used by the record are decoded.
///
/// Every field is decoded on its own, a value of an unexpected type is treated as absent.
#[derive(Deserialize)]
#[cfg_attr(test, derive(Debug))]
struct Doc {
    #[serde(default, deserialize_with = "lenient::option")]
    key: Option<String>,
    #[serde(default, deserialize_with = "lenient::option")]
    title: Option<String>,
    #[serde(default, deserialize_with = "lenient::option")]
    author_name: Option<Text>,
    #[serde(default, deserialize_with = "lenient::option")]
    author_key: Option<Text>,
    #[serde(default, deserialize_with = "lenient::option")]
    first_publish_year: Option<i32>,
    #[serde(default, deserialize_with = "lenient::or_default")]
    edition_count: u64,
    #[serde(default, deserialize_with = "lenient::option")]
    subject: Option<Text>,
    #[serde(default, deserialize_with = "lenient::option")]
    ratings_average: Option<f64>,
    #[serde(default, deserialize_with = "lenient::or_default")]
    ratings_count: u64,
    #[serde(default, deserialize_with = "lenient::or_default")]
    readinglog_count: u64,
    #[serde(default, deserialize_with = "lenient::or_default")]
    want_to_read_count: u64,
    #[serde(default, deserialize_with = "lenient::or_default")]
    currently_reading_count: u64,
    #[serde(default, deserialize_with = "lenient::or_default")]
    already_read_count: u64,
    #[serde(default, deserialize_with = "lenient::option")]
    language: Option<Text>,
    #[serde(default, deserialize_with = "lenient::option")]
    number_of_pages_median: Option<u32>,
    #[serde(default, deserialize_with = "lenient::option")]
    first_sentence: Option<Text>,
    #[serde(default, deserialize_with = "lenient::option")]
    cover_i: Option<i64>,
    #[serde(default, deserialize_with = "lenient::option")]
    publisher: Option<Text>,
    #[serde(default, deserialize_with = "lenient::option")]
    person: Option<Text>,
    #[serde(default, deserialize_with = "lenient::option")]
    place: Option<Text>,
    #[serde(default, deserialize_with = "lenient::option")]
    time: Option<Text>,
}

/// Rounds to 2 decimal places, a zero average means the work has not been rated.
fn round_rating(average: f64) -> Option<f64> {
    if average == 0.0 {
        None
    } else {
        Some((average * 100.0).round() / 100.0)
    }
}

impl From<Doc> for OpenLibraryRecord {
    fn from(doc: Doc) -> Self {
        let Doc {
            key,
            title,
            author_name,
            author_key,
            first_publish_year,
            edition_count,
            subject,
            ratings_average,
            ratings_count,
            readinglog_count,
            want_to_read_count,
            currently_reading_count,
            already_read_count,
            language,
            number_of_pages_median,
            first_sentence,
            cover_i,
            publisher,
            person,
            place,
            time,
        } = doc;

        Self {
            title,
            author: author_name.map(Text::into_string),
            author_key: author_key.map(Text::into_string),
            year: first_publish_year,
            editions: edition_count,
            rating_avg: ratings_average.and_then(round_rating),
            rating_count: ratings_count,
            want_to_read: want_to_read_count,
            currently_reading: currently_reading_count,
            already_read: already_read_count,
            readinglog_count,
            pages: number_of_pages_median,
            language: language.map(Text::into_string),
            publisher: publisher.map(Text::into_string),
            subjects: subject.map(Text::into_string),
            people: person.map(Text::into_string),
            places: place.map(Text::into_string),
            times: time.map(Text::into_string),
            first_sentence: first_sentence.map(Text::into_string),
            cover_url: cover_i.map(|id| cover_url!(id)),
            work_key: key,
            popularity_score: ratings_count + want_to_read_count + already_read_count,
        }
    }
}
