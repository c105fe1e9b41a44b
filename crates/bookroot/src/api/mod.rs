use serde::de::DeserializeOwned;

pub(crate) mod google_books;
mod lenient;
pub(crate) mod open_library;

/// The transport used by the search clients.
///
/// Each search client owns a single `Client` for its whole lifetime so that the underlying
/// connection can be reused between searches.
pub trait Client
where
    Self: Default,
{
    /// Performs a `GET` request to `url` and deserializes the JSON body into `T`.
    ///
    /// # Errors
    ///
    /// An [`ErrorKind::IO`] error is returned when the request fails or the response has a
    /// non-success status. An [`ErrorKind::Deserialize`] error is returned when the body does not
    /// match `T`.
    fn get_json<T>(&self, url: &str) -> Result<T, Error>
    where
        T: DeserializeOwned;
}

impl Client for reqwest::blocking::Client {
    fn get_json<T>(&self, url: &str) -> Result<T, Error>
    where
        T: DeserializeOwned,
    {
        self.get(url)
            .send()
            .and_then(reqwest::blocking::Response::error_for_status)
            .map_err(|e| Error::wrap(ErrorKind::IO, e))
            .and_then(|r| r.json().map_err(|e| Error::wrap(ErrorKind::Deserialize, e)))
    }
}

/// Builds a request URL from `base` with the query `params` percent encoded in order.
pub(crate) fn request_url<'a, I>(base: &str, params: I) -> Result<String, Error>
where
    I: IntoIterator<Item = (&'a str, String)>,
{
    reqwest::Url::parse_with_params(base, params)
        .map(String::from)
        .map_err(|e| Error::wrap(ErrorKind::Deserialize, e))
}

#[cfg(test)]
pub(crate) use test::{
    assert_url, impl_text_producer, MockClient, NetworkErrorProducer, Producer, URL_SINK,
};

use crate::{Error, ErrorKind};

#[cfg(test)]
mod test {

    use super::*;

    thread_local! {
        pub(crate) static URL_SINK: std::cell::RefCell<Option<String>> = std::cell::RefCell::new(None);
    }

    /// Asserts that the expected URL is the same as the one provided to the [`MockClient`].
    ///
    /// The [`MockClient`] will update the static thread local `URL_SINK` with the URL string that
    /// was passed to it, this allows for asserting that the search clients are building the
    /// correct URL.
    ///
    /// This macro provides a shortcut alternative to the following:
    ///
    /// ```ignore
    /// // .. test code including `MockClient`
    ///
    /// let url = crate::api::URL_SINK.with(|url| url.borrow().clone().unwrap_or_default());
    /// assert_eq!("expected url here", url);
    /// ```
    macro_rules! assert_url {
        ($expected: expr) => {
            assert_url!($expected, "");
        };
        ($expected: expr, $($arg: tt)+) => {
            let url = crate::api::URL_SINK.with(|url| url.borrow().clone().unwrap_or_default());
            assert_eq!($expected, url, $($arg)+);
        };
    }

    pub(crate) trait Producer<T>
    where
        Self: Default,
    {
        fn produce() -> Result<T, Error>;
    }

    #[derive(Default)]
    pub(crate) struct MockClient<P: Producer<String> = EmptyTextProducer> {
        _producer: std::marker::PhantomData<P>,
    }

    impl<P: Producer<String>> Client for MockClient<P> {
        fn get_json<T>(&self, url: &str) -> Result<T, Error>
        where
            T: DeserializeOwned,
        {
            URL_SINK.with(|sink| *sink.borrow_mut() = Some(url.to_owned()));
            P::produce().and_then(|json| {
                serde_json::from_str(&json).map_err(|e| Error::wrap(ErrorKind::Deserialize, e))
            })
        }
    }

    macro_rules! impl_text_producer {
        ($($producer:ident => $exp:expr,)*) => {
            $(
                #[derive(Default)]
                pub(crate) struct $producer;

                impl crate::api::Producer<String> for $producer {
                    fn produce() -> Result<String, crate::Error> {
                        $exp
                    }
                }
            )*
        };
    }
    impl_text_producer! {
        EmptyTextProducer => Ok("".to_owned()),
        NetworkErrorProducer => Err(Error::new(ErrorKind::IO, "Network error")),
    }

    pub(crate) use assert_url;
    pub(crate) use impl_text_producer;

    #[test]
    fn request_url_encodes_params_in_order() {
        let url = request_url(
            "https://example.com/search",
            [("q", "the hobbit".to_owned()), ("fields", "a,b".to_owned())],
        )
        .unwrap();

        assert_eq!("https://example.com/search?q=the+hobbit&fields=a%2Cb", url);
    }

    #[test]
    fn invalid_base_is_a_deserialize_error() {
        let err = request_url("not a url", std::iter::empty()).unwrap_err();
        assert_eq!(ErrorKind::Deserialize, err.kind());
    }
}
