//! Verse reference parsing and Chinese book-name mapping.

use crate::tables::CHINESE_BOOKS;
use shepherd_error::{SourceError, SourceErrorKind, SourceResult};

/// A parsed reference such as `1 Corinthians 13:4-7`.
#[derive(Debug, Clone, PartialEq, Eq, derive_getters::Getters)]
pub struct VerseReference {
    /// Book key: lowercase, no spaces (`1corinthians`).
    book_key: String,
    /// English book name as written in the table (`1 Corinthians`).
    book: &'static str,
    /// Chinese book name (`哥林多前书`).
    chinese_book: &'static str,
    /// Chapter number.
    chapter: u32,
    /// Verse or verse range, e.g. `16` or `4-7`.
    verses: String,
}

impl VerseReference {
    /// Parse `Book Chapter:Verse[-Verse]`.
    ///
    /// Book names are matched case-insensitively with whitespace ignored, so
    /// `song of solomon 8:7` and `SongOfSolomon 8:7` are the same reference.
    pub fn parse(reference: &str) -> SourceResult<Self> {
        let unknown = || SourceError::new(SourceErrorKind::UnknownReference(reference.to_string()));

        let trimmed = reference.trim();
        let (book_part, location) = trimmed.rsplit_once(char::is_whitespace).ok_or_else(unknown)?;
        let (chapter, verses) = location.split_once(':').ok_or_else(unknown)?;
        let chapter = chapter.parse::<u32>().map_err(|_| unknown())?;
        if chapter == 0 || !valid_verses(verses) {
            return Err(unknown());
        }

        let book_key = book_key(book_part);
        let (book, chinese_book) = CHINESE_BOOKS
            .iter()
            .find(|(key, _, _)| *key == book_key)
            .map(|(_, book, chinese)| (*book, *chinese))
            .ok_or_else(unknown)?;

        Ok(Self {
            book_key,
            book,
            chinese_book,
            chapter,
            verses: verses.to_string(),
        })
    }

    /// English reference, e.g. `John 3:16`.
    pub fn english(&self) -> String {
        format!("{} {}:{}", self.book, self.chapter, self.verses)
    }

    /// Chinese reference, e.g. `约翰福音 3:16`.
    pub fn chinese(&self) -> String {
        format!("{} {}:{}", self.chinese_book, self.chapter, self.verses)
    }

    /// Path segment for bible-api.com, e.g. `1+corinthians+13:4-7`.
    pub fn api_path(&self) -> String {
        format!(
            "{}+{}:{}",
            self.book.to_lowercase().replace(' ', "+"),
            self.chapter,
            self.verses
        )
    }
}

impl std::fmt::Display for VerseReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.english())
    }
}

/// Lowercase book name with all whitespace removed.
pub fn book_key(book: &str) -> String {
    book.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Chinese name for a book key, if the book is known.
pub fn chinese_book_name(book: &str) -> Option<&'static str> {
    let key = book_key(book);
    CHINESE_BOOKS
        .iter()
        .find(|(k, _, _)| *k == key)
        .map(|(_, _, chinese)| *chinese)
}

fn valid_verses(verses: &str) -> bool {
    let mut parts = verses.split('-');
    let first = parts.next().and_then(|v| v.parse::<u32>().ok());
    let last = parts.next().map(|v| v.parse::<u32>().ok());
    match (first, last, parts.next()) {
        (Some(start), None, None) => start > 0,
        (Some(start), Some(Some(end)), None) => start > 0 && end >= start,
        _ => false,
    }
}
