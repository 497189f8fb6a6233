use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;
use witchy_catalog::{Color, Crystal, Day, EntityKind, Herb, Metal, MoonPhase};
use witchy_lib::{Datastore, Repository, DEFAULT_SUGGESTIONS};

use crate::highlight::highlight;
use crate::CliError;
use crate::present::{show_match, show_record, Present};

/// A parsed lookup: `<name...>` or `use <term...>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Query {
    Name(String),
    Use(String),
}

impl Query {
    /// Build a query from the words following the lookup type.
    ///
    /// `use` only starts a content search when a term follows it.
    pub(crate) fn from_words<S: AsRef<str>>(words: &[S]) -> Option<Self> {
        let words: Vec<&str> = words
            .iter()
            .map(|w| w.as_ref().trim())
            .filter(|w| !w.is_empty())
            .collect();
        match words.as_slice() {
            [] => None,
            [first, rest @ ..] if first.eq_ignore_ascii_case("use") && !rest.is_empty() => {
                Some(Query::Use(rest.join(" ")))
            }
            all => Some(Query::Name(all.join(" "))),
        }
    }

    /// Like [`Query::from_words`], but blank input is a usage error.
    pub(crate) fn from_args<S: AsRef<str>>(words: &[S]) -> Result<Self, CliError> {
        Self::from_words(words).ok_or_else(|| CliError::usage("a search term is required"))
    }
}

/// Run one lookup against the datastore and print the outcome.
///
/// Finding nothing is a normal outcome, not an error.
pub(crate) async fn run_lookup(store: &Datastore, kind: EntityKind, query: &Query) {
    match kind {
        EntityKind::Herb => lookup::<Herb>(store, query).await,
        EntityKind::Crystal => lookup::<Crystal>(store, query).await,
        EntityKind::Color => lookup::<Color>(store, query).await,
        EntityKind::Moon => lookup::<MoonPhase>(store, query).await,
        EntityKind::Metal => lookup::<Metal>(store, query).await,
        EntityKind::Day => lookup::<Day>(store, query).await,
    }
}

async fn lookup<E: Present>(store: &Datastore, query: &Query) {
    let repo = store.repository::<E>().await;
    match query {
        Query::Name(term) => by_name(&repo, term).await,
        Query::Use(term) => by_content(&repo, term).await,
    }
}

async fn by_name<E: Present>(repo: &Repository<E>, term: &str) {
    if let Some(record) = repo.find_by_name(term).await {
        show_record(&record);
        return;
    }

    let kind = E::KIND;
    log::info!("\u{274C} {} \"{}\" not found.", E::LABEL, term);
    crate::log_blank();
    log::info!("Tip: Try searching with alternative names or check spelling.");

    if !repo.find_by_content(term).await.is_empty() {
        log::info!(
            "\u{1F4A1} Did you mean: {}",
            format!("witchy {} use {}", kind, term).if_supports_color(Stdout, |t| t.bold())
        );
    }

    let suggestions = repo.suggest(term, DEFAULT_SUGGESTIONS).await;
    if !suggestions.is_empty() {
        crate::log_blank();
        log::info!("Did you mean one of these?");
        for record in &suggestions {
            log::info!("   \u{2022} {}", record.name());
        }
    }
    crate::log_blank();
}

async fn by_content<E: Present>(repo: &Repository<E>, term: &str) {
    let matches = repo.find_by_content(term).await;
    let kind = E::KIND;

    if matches.is_empty() {
        log::info!(
            "\u{274C} No {} found with {} containing \"{}\".",
            kind.plural(),
            kind.description_label(),
            term
        );
        crate::log_blank();
        log::info!("Try searching for common terms like:");
        for hint in E::HINTS {
            log::info!("   \u{2022} {}", hint);
        }
        crate::log_blank();
        return;
    }

    crate::log_blank();
    log::info!(
        "\u{1F50D} Found {} {}(s) with {} containing \"{}\":",
        matches.len(),
        E::LABEL.to_lowercase(),
        kind.description_label(),
        highlight(term, term)
    );
    crate::log_blank();
    for record in &matches {
        show_match(record, term);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_query() {
        assert_eq!(
            Query::from_words(&["bay", "laurel"]),
            Some(Query::Name("bay laurel".into()))
        );
    }

    #[test]
    fn test_use_query() {
        assert_eq!(
            Query::from_words(&["USE", "love", "spells"]),
            Some(Query::Use("love spells".into()))
        );
    }

    #[test]
    fn test_lone_use_is_a_name() {
        assert_eq!(Query::from_words(&["use"]), Some(Query::Name("use".into())));
    }

    #[test]
    fn test_blank_words() {
        assert_eq!(Query::from_words::<&str>(&[]), None);
        assert_eq!(Query::from_words(&["  ", ""]), None);
    }

    #[test]
    fn test_blank_arguments_are_a_usage_error() {
        assert!(matches!(
            Query::from_args(&["  "]),
            Err(CliError::Usage(_))
        ));
        assert_eq!(
            Query::from_args(&["sage"]).unwrap(),
            Query::Name("sage".into())
        );
    }
}
