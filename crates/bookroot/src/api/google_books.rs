use log::{error, info, trace};
use serde::Deserialize;

use crate::{record::GoogleBookRecord, Error, ErrorKind};

use super::{
    lenient::{self, Text},
    request_url, Client,
};

const GOOGLE_BOOKS_URL: &str = "https://www.googleapis.com/books/v1/volumes";

/// The environment variable holding the Google Books API key.
pub const API_KEY_VAR: &str = "GOOGLE_BOOKS_API_KEY";

/// Search client for the Google Books volumes API.
///
/// Every request is authenticated with the API key given at construction and asks for the
/// `full` projection so that sale and access details are included for each volume.
pub struct GoogleBooks<C = reqwest::blocking::Client> {
    api_key: String,
    client: C,
}

impl GoogleBooks {
    /// Creates a client authenticated with `api_key`.
    ///
    /// # Errors
    ///
    /// An [`ErrorKind::Config`] error is returned when `api_key` is empty.
    pub fn new<S: Into<String>>(api_key: S) -> Result<Self, Error> {
        Self::with_client(api_key)
    }

    /// Creates a client using the key found in the [`API_KEY_VAR`] environment variable.
    ///
    /// # Errors
    ///
    /// An [`ErrorKind::Config`] error is returned when the variable is not set or is empty.
    pub fn from_env() -> Result<Self, Error> {
        let api_key = std::env::var(API_KEY_VAR).map_err(|_| missing_key_error())?;
        Self::new(api_key)
    }
}

fn missing_key_error() -> Error {
    Error::new(
        ErrorKind::Config,
        format!("API key not found! Make sure the {API_KEY_VAR} environment variable is set"),
    )
}

impl<C: Client> GoogleBooks<C> {
    pub(crate) fn with_client<S: Into<String>>(api_key: S) -> Result<Self, Error> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(Error::new(
                ErrorKind::Config,
                format!("API key for Google Books is empty - check the value of {API_KEY_VAR}"),
            ));
        }

        Ok(Self {
            api_key,
            client: C::default(),
        })
    }

    /// Search volumes matching the free text `query`, returning at most `max_results` records.
    ///
    /// An empty `Vec` means the search succeeded without any matches.
    ///
    /// # Errors
    ///
    /// An [`ErrorKind::IO`] error is returned when the request fails or the API responds with a
    /// non-success status.
    /// An [`ErrorKind::Deserialize`] error is returned when the response body is not a volumes
    /// listing.
    pub fn search(&self, query: &str, max_results: u32) -> Result<Vec<GoogleBookRecord>, Error> {
        info!("Searching for '{query}' using Google Books API");
        // the key is part of the URL so the URL itself is never logged
        let url = request_url(
            GOOGLE_BOOKS_URL,
            [
                ("q", query.to_owned()),
                ("key", self.api_key.clone()),
                ("projection", "full".to_owned()),
                ("maxResults", max_results.to_string()),
            ],
        )?;

        let Volumes { items } = self.client.get_json(&url)?;

        trace!("Request was successful - {} volumes returned", items.len());

        Ok(items.into_iter().map(GoogleBookRecord::from).collect())
    }

    /// Same as [`GoogleBooks::search`] but any error is logged and an empty `Vec` is returned in
    /// its place.
    pub fn search_or_empty(&self, query: &str, max_results: u32) -> Vec<GoogleBookRecord> {
        self.search(query, max_results).unwrap_or_else(|err| {
            error!("Google Books API error: {err}");
            Vec::new()
        })
    }
}

#[derive(Deserialize)]
#[cfg_attr(test, derive(Debug))]
struct Volumes {
    #[serde(default, deserialize_with = "lenient::list")]
    items: Vec<Item>,
}

/// A volume, every field is decoded on its own so a value of an unexpected type is treated as
/// absent rather than failing the listing.
#[derive(Deserialize)]
#[cfg_attr(test, derive(Debug))]
#[serde(rename_all = "camelCase")]
struct Item {
    #[serde(default, deserialize_with = "lenient::option")]
    id: Option<String>,
    #[serde(default, deserialize_with = "lenient::or_default")]
    volume_info: VolumeInfo,
    #[serde(default, deserialize_with = "lenient::or_default")]
    sale_info: SaleInfo,
    #[serde(default, deserialize_with = "lenient::or_default")]
    access_info: AccessInfo,
}

/// Volume information from the Google Book API
#[derive(Default, Deserialize)]
#[cfg_attr(test, derive(Debug))]
#[serde(rename_all = "camelCase")]
struct VolumeInfo {
    #[serde(default, deserialize_with = "lenient::option")]
    title: Option<String>,
    #[serde(default, deserialize_with = "lenient::option")]
    authors: Option<Text>,
    #[serde(default, deserialize_with = "lenient::option")]
    publisher: Option<String>,
    #[serde(default, deserialize_with = "lenient::option")]
    published_date: Option<String>,
    #[serde(default, deserialize_with = "lenient::option")]
    page_count: Option<u32>,
    #[serde(default, deserialize_with = "lenient::option")]
    categories: Option<Text>,
    #[serde(default, deserialize_with = "lenient::option")]
    average_rating: Option<f64>,
}

#[derive(Default, Deserialize)]
#[cfg_attr(test, derive(Debug))]
#[serde(rename_all = "camelCase")]
struct SaleInfo {
    #[serde(default, deserialize_with = "lenient::option")]
    retail_price: Option<RetailPrice>,
    #[serde(default, deserialize_with = "lenient::option")]
    is_ebook: Option<bool>,
}

#[derive(Deserialize)]
#[cfg_attr(test, derive(Debug))]
#[serde(rename_all = "camelCase")]
struct RetailPrice {
    #[serde(default, deserialize_with = "lenient::option")]
    amount: Option<f64>,
    #[serde(default, deserialize_with = "lenient::option")]
    currency_code: Option<String>,
}

#[derive(Default, Deserialize)]
#[cfg_attr(test, derive(Debug))]
struct AccessInfo {
    #[serde(default, deserialize_with = "lenient::option")]
    pdf: Option<Pdf>,
    #[serde(default, deserialize_with = "lenient::option")]
    viewability: Option<String>,
}

#[derive(Deserialize)]
#[cfg_attr(test, derive(Debug))]
#[serde(rename_all = "camelCase")]
struct Pdf {
    #[serde(default, deserialize_with = "lenient::option")]
    download_link: Option<String>,
}

impl From<Item> for GoogleBookRecord {
    fn from(item: Item) -> Self {
        // Deconstruct item to take ownership of fields (avoids cloning).
        let Item {
            id,
            volume_info:
                VolumeInfo {
                    title,
                    authors,
                    publisher,
                    published_date,
                    page_count,
                    categories,
                    average_rating,
                },
            sale_info:
                SaleInfo {
                    retail_price,
                    is_ebook,
                },
            access_info: AccessInfo { pdf, viewability },
        } = item;

        let (price, currency) = retail_price
            .map_or((None, None), |price| (price.amount, price.currency_code));

        Self {
            id,
            title,
            authors: authors.map(Text::into_string),
            publisher,
            published_date,
            page_count,
            categories: categories.map(Text::into_string),
            average_rating,
            price,
            currency,
            is_ebook,
            pdf_link: pdf.and_then(|pdf| pdf.download_link),
            viewability,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::GoogleBooks;
    use crate::{
        api::{assert_url, impl_text_producer, MockClient, NetworkErrorProducer},
        ErrorKind,
    };

    const GOOGLE_BOOKS_JSON: &str = include_str!("../../tests/data/google_books_volumes.json");

    impl_text_producer! {
        ValidJsonProducer => Ok(GOOGLE_BOOKS_JSON.to_owned()),
        MalformedFieldsProducer => Ok(
            r#"{
                "items": [
                    {"id": "good", "volumeInfo": {"title": "Good", "authors": ["A. Writer"], "pageCount": 120}},
                    {"id": "bad", "volumeInfo": {"title": "Solo", "authors": "Solo Author", "categories": "Fiction",
                        "pageCount": "300", "averageRating": null},
                     "saleInfo": {"retailPrice": {"amount": "free", "currencyCode": "USD"}, "isEbook": "yes"},
                     "accessInfo": {"pdf": true, "viewability": "ALL_PAGES"}},
                    {"id": "empty", "volumeInfo": null, "saleInfo": [], "accessInfo": 7},
                    null
                ]
            }"#.to_owned()
        ),
        NoItemsProducer => Ok(
            r#"{
                "kind": "books#volumes",
                "totalItems": 0
            }"#.to_owned()
        ),
    }

    fn client<P: crate::api::Producer<String>>() -> GoogleBooks<MockClient<P>> {
        GoogleBooks::with_client("test-key").expect("test-key is a non-empty API key")
    }

    #[test]
    fn empty_api_key_is_a_config_error() {
        let err = GoogleBooks::<MockClient>::with_client("")
            .err()
            .expect("An empty key should fail at construction");

        assert_eq!(ErrorKind::Config, err.kind());
    }

    #[test]
    fn search_url_format_is_correct() {
        assert!(client::<ValidJsonProducer>()
            .search("atomic habits", 30)
            .is_ok());
        assert_url!(
            "https://www.googleapis.com/books/v1/volumes?q=atomic+habits&key=test-key&projection=full&maxResults=30"
        );
    }

    #[test]
    fn one_record_per_item() {
        let records = client::<ValidJsonProducer>()
            .search("test", 10)
            .expect("ValidJsonProducer always produces a valid volumes listing");

        assert_eq!(3, records.len());
    }

    #[test]
    fn nested_groups_are_flattened() {
        let records = client::<ValidJsonProducer>().search("test", 10).unwrap();
        let record = &records[0];

        assert_eq!(Some("zyTCAlFPjgYC"), record.id.as_deref());
        assert_eq!(Some("The Google Story"), record.title.as_deref());
        assert_eq!(Some("David A. Vise, Mark Malseed"), record.authors.as_deref());
        assert_eq!(Some("Random House Digital, Inc."), record.publisher.as_deref());
        assert_eq!(Some("2005-11-15"), record.published_date.as_deref());
        assert_eq!(Some(207), record.page_count);
        assert_eq!(
            Some("Business & Economics, Technology"),
            record.categories.as_deref()
        );
        assert_eq!(Some(3.5), record.average_rating);
        assert_eq!(Some(11.99), record.price);
        assert_eq!(Some("USD"), record.currency.as_deref());
        assert_eq!(Some(true), record.is_ebook);
        assert_eq!(
            Some("http://books.google.com/books/download/The_Google_Story-sample-pdf.acsm"),
            record.pdf_link.as_deref()
        );
        assert_eq!(Some("PARTIAL"), record.viewability.as_deref());
    }

    #[test]
    fn missing_fields_are_none() {
        let records = client::<ValidJsonProducer>().search("test", 10).unwrap();
        // the second volume only has an id, a title and a viewability
        let record = &records[1];

        assert_eq!(Some("Untitled Notes"), record.title.as_deref());
        assert_eq!(None, record.authors);
        assert_eq!(None, record.categories);
        assert_eq!(None, record.page_count);
        assert_eq!(None, record.average_rating);
        assert_eq!(None, record.price);
        assert_eq!(None, record.currency);
        assert_eq!(Some(false), record.is_ebook);
        assert_eq!(None, record.pdf_link);
        assert_eq!(Some("NO_PAGES"), record.viewability.as_deref());
    }

    #[test]
    fn malformed_fields_do_not_drop_the_listing() {
        let records = client::<MalformedFieldsProducer>()
            .search("test", 10)
            .expect("Fields of the wrong type are treated as absent");
        assert_eq!(3, records.len());

        let good = &records[0];
        assert_eq!(Some("A. Writer"), good.authors.as_deref());
        assert_eq!(Some(120), good.page_count);

        let solo = &records[1];
        assert_eq!(Some("Solo"), solo.title.as_deref());
        // a single author arrives as a string instead of a list
        assert_eq!(Some("Solo Author"), solo.authors.as_deref());
        assert_eq!(Some("Fiction"), solo.categories.as_deref());
        assert_eq!(None, solo.page_count);
        assert_eq!(None, solo.average_rating);
        assert_eq!(None, solo.price);
        assert_eq!(Some("USD"), solo.currency.as_deref());
        assert_eq!(None, solo.is_ebook);
        assert_eq!(None, solo.pdf_link);
        assert_eq!(Some("ALL_PAGES"), solo.viewability.as_deref());

        let empty = &records[2];
        assert_eq!(Some("empty"), empty.id.as_deref());
        assert_eq!(None, empty.title);
        assert_eq!(None, empty.viewability);
    }

    #[test]
    fn missing_key_message_names_the_variable() {
        let message = super::missing_key_error().to_string();

        assert!(message.contains("GOOGLE_BOOKS_API_KEY"));
        assert!(!message.contains(".env"));
    }

    #[test]
    fn missing_items_is_an_empty_success() {
        let records = client::<NoItemsProducer>()
            .search("nothing matches this", 10)
            .expect("A listing without items is still a valid response");

        assert!(records.is_empty());
    }

    #[test]
    fn network_error_is_returned_from_search() {
        let err = client::<NetworkErrorProducer>()
            .search("test", 10)
            .expect_err("NetworkErrorProducer always fails");

        assert_eq!(ErrorKind::IO, err.kind());
    }

    #[test]
    fn network_error_is_empty_when_fail_soft() {
        assert!(client::<NetworkErrorProducer>()
            .search_or_empty("test", 10)
            .is_empty());
    }

    #[test]
    fn invalid_body_is_a_deserialize_error() {
        let books = GoogleBooks::<MockClient>::with_client("test-key").unwrap();
        let err = books.search("test", 10).expect_err("An empty body is not JSON");

        assert_eq!(ErrorKind::Deserialize, err.kind());
        assert!(books.search_or_empty("test", 10).is_empty());
    }
}
