use std::ops::Range;
use std::time::{Duration, Instant};

use tracing::debug;

use super::domain::Candidate;

/// Shorter queries leave the list unfiltered.
pub const MIN_QUERY_CHARS: usize = 2;

#[derive(Debug, Clone, PartialEq)]
pub struct SearchHit<'a> {
    pub candidate: &'a Candidate,
    /// Byte ranges into `candidate.name` to highlight.
    pub spans: Vec<Range<usize>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchResults<'a> {
    /// False while the query is too short to filter on.
    pub active: bool,
    pub hits: Vec<SearchHit<'a>>,
}

impl<'a> SearchResults<'a> {
    pub fn candidates(&self) -> impl Iterator<Item = &'a Candidate> + '_ {
        self.hits.iter().map(|hit| hit.candidate)
    }

    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }
}

/// Typeahead over candidate names.
pub fn search_candidates<'a>(query: &str, candidates: &[&'a Candidate]) -> SearchResults<'a> {
    let query = query.trim();
    if query.chars().count() < MIN_QUERY_CHARS {
        return SearchResults {
            active: false,
            hits: candidates
                .iter()
                .map(|&candidate| SearchHit {
                    candidate,
                    spans: Vec::new(),
                })
                .collect(),
        };
    }

    let hits = candidates
        .iter()
        .filter_map(|&candidate| {
            let spans = match_spans(&candidate.name, query);
            (!spans.is_empty()).then_some(SearchHit { candidate, spans })
        })
        .collect();

    SearchResults { active: true, hits }
}

/// Every non-overlapping case-insensitive occurrence of `needle`, left to right.
pub fn match_spans(haystack: &str, needle: &str) -> Vec<Range<usize>> {
    let needle: Vec<char> = needle.chars().flat_map(char::to_lowercase).collect();
    if needle.is_empty() {
        return Vec::new();
    }

    let chars: Vec<(usize, char)> = haystack.char_indices().collect();
    let byte_at = |index: usize| {
        chars
            .get(index)
            .map(|&(offset, _)| offset)
            .unwrap_or(haystack.len())
    };

    let mut spans = Vec::new();
    let mut start = 0;
    while start < chars.len() {
        match match_at(&chars, start, &needle) {
            Some(end) => {
                spans.push(byte_at(start)..byte_at(end));
                start = end;
            }
            None => start += 1,
        }
    }
    spans
}

fn match_at(chars: &[(usize, char)], start: usize, needle: &[char]) -> Option<usize> {
    let mut consumed = 0;
    let mut index = start;
    while consumed < needle.len() {
        let (_, current) = *chars.get(index)?;
        for lower in current.to_lowercase() {
            if needle.get(consumed) != Some(&lower) {
                return None;
            }
            consumed += 1;
        }
        index += 1;
    }
    Some(index)
}

#[derive(Debug, Clone)]
struct PendingQuery {
    query: String,
    due: Instant,
}

/// Quiet-period scheduler for the typeahead. A new schedule replaces the
/// pending one; the query only applies once nothing newer arrived in time.
#[derive(Debug, Clone)]
pub struct SearchDebouncer {
    quiet_period: Duration,
    pending: Option<PendingQuery>,
    applied: String,
}

impl SearchDebouncer {
    pub fn new(quiet_period: Duration) -> Self {
        Self {
            quiet_period,
            pending: None,
            applied: String::new(),
        }
    }

    pub fn schedule(&mut self, query: impl Into<String>, now: Instant) {
        self.pending = Some(PendingQuery {
            query: query.into(),
            due: now + self.quiet_period,
        });
    }

    pub fn is_searching(&self) -> bool {
        self.pending.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|pending| pending.due)
    }

    /// The query the list is currently filtered by.
    pub fn applied_query(&self) -> &str {
        &self.applied
    }

    /// Apply the pending query if its quiet period elapsed by `now`.
    pub fn poll(&mut self, now: Instant) -> Option<&str> {
        let due = self.pending.as_ref()?.due;
        if now < due {
            return None;
        }

        let pending = self.pending.take()?;
        debug!(query = %pending.query, "applying debounced candidate search");
        self.applied = pending.query;
        Some(self.applied.as_str())
    }

    /// Wait out the quiet period of whatever is pending and apply it.
    pub async fn settle(&mut self) -> Option<&str> {
        let due = self.deadline()?;
        tokio::time::sleep_until(due.into()).await;
        self.poll(Instant::now())
    }

    /// Drop any pending query and clear the applied one.
    pub fn reset(&mut self) {
        self.pending = None;
        self.applied.clear();
    }
}

impl Default for SearchDebouncer {
    fn default() -> Self {
        Self::new(Duration::from_millis(300))
    }
}
