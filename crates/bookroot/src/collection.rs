use log::trace;

use crate::record::BookRecord;

/// The titles a user has saved during a session.
///
/// Titles keep the order they were added in and a title is never stored twice. Nothing is
/// persisted, the collection lives only as long as the session that owns it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SavedCollection {
    titles: Vec<String>,
}

impl SavedCollection {
    /// Creates an empty collection.
    #[must_use]
    pub const fn new() -> Self {
        Self { titles: Vec::new() }
    }

    /// Adds `title` to the end of the collection.
    ///
    /// Returns false when the title was already saved, the collection is left unchanged.
    pub fn add<S: Into<String>>(&mut self, title: S) -> bool {
        let title = title.into();
        if self.contains(&title) {
            trace!("'{title}' is already saved");
            false
        } else {
            trace!("Saving '{title}'");
            self.titles.push(title);
            true
        }
    }

    /// Adds the title of `record`, records without a title cannot be saved.
    pub fn add_record<R: BookRecord + ?Sized>(&mut self, record: &R) -> bool {
        record.title().map_or(false, |title| self.add(title))
    }

    /// Returns true when `title` has been saved.
    #[must_use]
    pub fn contains(&self, title: &str) -> bool {
        self.titles.iter().any(|saved| saved == title)
    }

    /// Removes every saved title.
    pub fn clear(&mut self) {
        trace!("Clearing {} saved titles", self.titles.len());
        self.titles.clear();
    }

    /// The saved titles in the order they were added.
    #[must_use]
    pub fn titles(&self) -> &[String] {
        &self.titles
    }

    /// Number of saved titles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.titles.len()
    }

    /// Returns true when nothing has been saved.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }
}

impl<'a> IntoIterator for &'a SavedCollection {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.titles.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::SavedCollection;
    use crate::record::OpenLibraryRecord;

    fn record(title: Option<&str>) -> OpenLibraryRecord {
        OpenLibraryRecord {
            title: title.map(str::to_owned),
            author: None,
            author_key: None,
            year: None,
            editions: 0,
            rating_avg: None,
            rating_count: 0,
            want_to_read: 0,
            currently_reading: 0,
            already_read: 0,
            readinglog_count: 0,
            pages: None,
            language: None,
            publisher: None,
            subjects: None,
            people: None,
            places: None,
            times: None,
            first_sentence: None,
            cover_url: None,
            work_key: None,
            popularity_score: 0,
        }
    }

    #[test]
    fn new_collection_is_empty() {
        let saved = SavedCollection::new();
        assert!(saved.is_empty());
        assert_eq!(0, saved.len());
    }

    #[test]
    fn duplicate_titles_are_not_added() {
        let mut saved = SavedCollection::new();

        assert!(saved.add("Dune"));
        assert!(saved.add("Atomic Habits"));
        assert!(!saved.add("Dune"));

        assert_eq!(&["Dune", "Atomic Habits"], saved.titles());
    }

    #[test]
    fn clear_removes_every_title() {
        let mut saved = SavedCollection::new();
        saved.add("Dune");
        saved.add("Emma");

        saved.clear();

        assert!(saved.is_empty());
        assert!(!saved.contains("Dune"));
        // titles can be added again after clearing
        assert!(saved.add("Dune"));
    }

    #[test]
    fn record_without_title_is_not_saved() {
        let mut saved = SavedCollection::new();

        assert!(!saved.add_record(&record(None)));
        assert!(saved.add_record(&record(Some("Emma"))));
        assert!(!saved.add_record(&record(Some("Emma"))));

        assert_eq!(&["Emma"], saved.titles());
    }
}
