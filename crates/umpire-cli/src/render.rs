use chrono::{DateTime, Utc};
use umpire_chat::Suggestion;
use umpire_types::{format_response_time, ChatMessage, Conversation, Country, DocumentStat, Role, SourceDoc};

const EXCERPT_CHARS: usize = 200;

/// Age of a timestamp in words, e.g. "5 minutes ago"
pub fn relative_age(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let minutes = (now - then).num_seconds().max(0) as f64 / 60.0;
    let rounded = minutes.round() as i64;

    let text = match minutes {
        m if m < 0.5 => return "less than a minute ago".to_string(),
        m if m < 1.5 => "1 minute".to_string(),
        m if m < 44.5 => format!("{} minutes", rounded),
        m if m < 89.5 => "about 1 hour".to_string(),
        m if m < 1439.5 => format!("about {} hours", (m / 60.0).round() as i64),
        m if m < 2519.5 => "1 day".to_string(),
        m if m < 43199.5 => format!("{} days", (m / 1440.0).round() as i64),
        m if m < 86399.5 => "about 1 month".to_string(),
        m if m < 525600.0 => format!("{} months", (m / 43200.0).round() as i64),
        m => match (m / 525600.0).floor() as i64 {
            1 => "about 1 year".to_string(),
            years => format!("about {} years", years),
        },
    };
    format!("{} ago", text)
}

/// Sidebar listing, most recent first, numbered from 1
pub fn conversation_list(conversations: &[Conversation], active_id: Option<&str>, now: DateTime<Utc>) -> String {
    if conversations.is_empty() {
        return "No conversations yet.".to_string();
    }
    conversations
        .iter()
        .enumerate()
        .map(|(i, c)| {
            let marker = if Some(c.id.as_str()) == active_id { '*' } else { ' ' };
            format!("{}{:>3}. {}  ({})", marker, i + 1, c.title, relative_age(c.updated_at, now))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Header line printed above an assistant answer
pub fn answer_header(message: &ChatMessage) -> String {
    let mut parts = vec!["Umpire".to_string()];
    if let Some(variant) = &message.variant {
        parts.push(format!("[{}]", variant));
    }
    if let Some(ms) = message.response_time_ms {
        parts.push(format_response_time(ms));
    }
    match message.source_count() {
        0 => {}
        1 => parts.push("1 source".to_string()),
        n => parts.push(format!("{} sources", n)),
    }
    parts.join(" · ")
}

/// Full rendering of a stored message
pub fn message(message: &ChatMessage) -> String {
    match message.role {
        Role::User => format!("You: {}", message.content),
        Role::Assistant if message.is_loading => "Umpire: thinking...".to_string(),
        Role::Assistant => format!("{}\n{}", answer_header(message), message.content),
    }
}

/// Numbered citations; long passages are cut unless `full` is set
pub fn sources(docs: &[SourceDoc], full: bool) -> String {
    docs.iter()
        .enumerate()
        .map(|(i, doc)| {
            let mut out = format!("[{}]", i + 1);
            if let Some(header) = doc.header() {
                out.push(' ');
                out.push_str(&header);
            }
            if let Some(page) = doc.metadata.page {
                out.push_str(&format!(" (p. {})", page));
            }
            out.push_str("\n    ");
            if full {
                out.push_str(&doc.page_content);
            } else {
                out.push_str(&doc.excerpt(EXCERPT_CHARS));
                if doc.is_expandable() {
                    out.push_str("\n    (add \"full\" to read the whole passage)");
                }
            }
            out
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn countries(countries: &[Country], selected: Option<&str>) -> String {
    if countries.is_empty() {
        return "No jurisdictions available.".to_string();
    }
    countries
        .iter()
        .map(|c| {
            let marker = if Some(c.code.as_str()) == selected { '*' } else { ' ' };
            format!("{} {}  {}", marker, c.code, c.name)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn knowledge_base(documents: &[DocumentStat]) -> String {
    if documents.is_empty() {
        return "The knowledge base is empty.".to_string();
    }
    documents
        .iter()
        .map(|d| {
            let country = if d.country.is_empty() { "international" } else { d.country.as_str() };
            format!("- {} [{}, {}] {} chunks", d.source_file, d.variant, country, d.chunk_count)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn suggestions(suggestions: &[Suggestion]) -> String {
    suggestions
        .iter()
        .enumerate()
        .map(|(i, s)| format!("{:>3}. {}: {}", i + 1, s.title, s.question))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use umpire_types::Variant;

    #[test]
    fn test_relative_age() {
        let now = Utc::now();
        assert_eq!(relative_age(now, now), "less than a minute ago");
        assert_eq!(relative_age(now - Duration::seconds(70), now), "1 minute ago");
        assert_eq!(relative_age(now - Duration::minutes(5), now), "5 minutes ago");
        assert_eq!(relative_age(now - Duration::minutes(60), now), "about 1 hour ago");
        assert_eq!(relative_age(now - Duration::hours(3), now), "about 3 hours ago");
        assert_eq!(relative_age(now - Duration::hours(30), now), "1 day ago");
        assert_eq!(relative_age(now - Duration::days(4), now), "4 days ago");
        assert_eq!(relative_age(now - Duration::days(400), now), "about 1 year ago");
    }

    #[test]
    fn test_future_timestamps_clamp() {
        let now = Utc::now();
        assert_eq!(relative_age(now + Duration::minutes(10), now), "less than a minute ago");
    }

    #[test]
    fn test_answer_header() {
        let msg = ChatMessage::assistant("a1", "Two minutes.")
            .with_variant(Variant::Indoor)
            .with_response_time(1234)
            .with_source_docs(vec![SourceDoc::new("a"), SourceDoc::new("b")]);
        let header = answer_header(&msg);
        assert!(header.contains("1.2s"));
        assert!(header.contains("2 sources"));
        assert!(header.contains(&Variant::Indoor.to_string()));
    }

    #[test]
    fn test_long_sources_are_cut_with_a_hint() {
        let long = "a".repeat(250);
        let docs = vec![SourceDoc::new("Short passage."), SourceDoc::new(long.clone())];

        let cut = sources(&docs, false);
        assert!(cut.contains("[1]\n    Short passage."));
        assert!(cut.contains(&format!("{}…", "a".repeat(200))));
        assert!(!cut.contains(&long));
        assert_eq!(cut.matches("add \"full\"").count(), 1);

        let whole = sources(&docs, true);
        assert!(whole.contains(&long));
        assert!(!whole.contains("add \"full\""));
    }

    #[test]
    fn test_conversation_list_marks_active() {
        let conv = Conversation::new(ChatMessage::user("Green card length"));
        let listing = conversation_list(std::slice::from_ref(&conv), Some(&conv.id), Utc::now());
        assert!(listing.starts_with("*  1. Green card length"));
        assert_eq!(conversation_list(&[], None, Utc::now()), "No conversations yet.");
    }
}
