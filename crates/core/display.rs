use bookroot::{BookRecord, GoogleBookRecord, OpenLibraryRecord};

const UNKNOWN_TITLE: &str = "Unknown title";
const UNKNOWN_AUTHOR: &str = "Unknown author";
const NOT_AVAILABLE: &str = "N/A";
const MAX_SUBJECTS_LEN: usize = 300;

/// Single line summary of a record used for selection lists.
pub fn heading(record: &dyn BookRecord) -> String {
    format!("{} by {}", title(record), authors(record))
}

pub fn google_card(record: &GoogleBookRecord) -> String {
    let mut lines = header(record);

    lines.push(match record.average_rating {
        Some(rating) => format!("  Rating: {} ({rating})", stars(rating)),
        None => "  Rating: No ratings yet".to_owned(),
    });
    lines.push(match record.page_count {
        Some(pages) => format!("  Pages: {pages}"),
        None => "  Pages: ???".to_owned(),
    });

    if let Some(date) = &record.published_date {
        lines.push(format!("  Published: {date}"));
    }
    if let Some(publisher) = &record.publisher {
        lines.push(format!("  Publisher: {publisher}"));
    }
    if let (Some(price), Some(currency)) = (record.price, &record.currency) {
        lines.push(format!("  Price: {price:.2} {currency}"));
    }
    if let Some(link) = &record.pdf_link {
        lines.push(format!("  PDF: {link}"));
    }

    lines.join("\n")
}

pub fn open_library_card(record: &OpenLibraryRecord) -> String {
    let mut lines = header(record);

    let year = record
        .year
        .map_or_else(|| NOT_AVAILABLE.to_owned(), |year| year.to_string());
    lines.push(format!(
        "  Year: {year} | Popularity: {}",
        record.popularity_score
    ));

    if let Some(rating) = record.rating_avg {
        lines.push(format!(
            "  Rating: {} ({rating} from {} ratings)",
            stars(rating),
            record.rating_count
        ));
    }

    lines.push(format!(
        "  First sentence: {}",
        record.first_sentence.as_deref().unwrap_or(NOT_AVAILABLE)
    ));
    lines.push(format!(
        "  Subjects: {}",
        record
            .subjects
            .as_deref()
            .map_or_else(|| NOT_AVAILABLE.to_owned(), |s| truncate(s, MAX_SUBJECTS_LEN))
    ));

    if let Some(url) = &record.cover_url {
        lines.push(format!("  Cover: {url}"));
    }

    lines.join("\n")
}

fn header(record: &dyn BookRecord) -> Vec<String> {
    vec![
        title(record).to_owned(),
        format!("  Author(s): {}", authors(record)),
    ]
}

fn title(record: &dyn BookRecord) -> &str {
    record.title().unwrap_or(UNKNOWN_TITLE)
}

fn authors(record: &dyn BookRecord) -> &str {
    record
        .authors()
        .filter(|authors| !authors.is_empty())
        .unwrap_or(UNKNOWN_AUTHOR)
}

// ratings are out of 5, anything after the decimal point is dropped
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn stars(rating: f64) -> String {
    "*".repeat(rating.clamp(0.0, 5.0) as usize)
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_owned()
    } else {
        let mut truncated: String = s.chars().take(max_chars).collect();
        truncated.push_str("...");
        truncated
    }
}
