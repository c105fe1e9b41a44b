#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::perf,
    clippy::style,
    clippy::missing_safety_doc,
    clippy::missing_const_for_fn
)]
#![warn(missing_docs, rust_2018_idioms)]
#![allow(clippy::module_name_repetitions)]
#![doc = include_str!("../README.md")]

mod api;
mod collection;
mod error;
pub mod record;

pub use api::{
    google_books::{GoogleBooks, API_KEY_VAR},
    open_library::{OpenLibrary, OpenLibraryQuery},
    Client,
};
pub use collection::SavedCollection;
pub use error::{Error, ErrorKind};
pub use record::{BookRecord, GoogleBookRecord, OpenLibraryRecord};
