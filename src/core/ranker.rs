/// Fuzzy ranking and highlighting
///
/// Filters candidates by subsequence match against their title and orders
/// them by match score, highest first. Ties keep their incoming order.

use crate::config::HighlightConfig;
use crate::core::command::Command;
use crate::core::query::{ClassifiedQuery, Mode};
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

/// Ranks palette candidates with skim-style fuzzy matching
///
/// Matching ignores case regardless of the query, in line with the
/// case-insensitive entity lookups that feed it.
pub struct Ranker {
    matcher: SkimMatcherV2,
    markers: HighlightConfig,
}

impl Default for Ranker {
    fn default() -> Self {
        Self::new(HighlightConfig::default())
    }
}

impl Ranker {
    pub fn new(markers: HighlightConfig) -> Self {
        Self {
            matcher: SkimMatcherV2::default().ignore_case(),
            markers,
        }
    }

    /// Rank candidates for a classified query
    ///
    /// Command mode filters only. Search mode also fills in `highlighted_title`,
    /// except for an empty query where candidates pass through untouched.
    pub fn rank(&self, query: &ClassifiedQuery, candidates: Vec<Command>) -> Vec<Command> {
        match query.mode {
            Mode::Command => self.filter(&query.prepared, candidates),
            Mode::Search if query.is_empty() => candidates,
            Mode::Search => self.highlight(&query.prepared, candidates),
        }
    }

    /// Drop non-matching candidates and sort the rest by score
    pub fn filter(&self, query: &str, candidates: Vec<Command>) -> Vec<Command> {
        if query.is_empty() {
            return candidates;
        }

        let scored = candidates
            .into_iter()
            .filter_map(|cmd| {
                self.matcher
                    .fuzzy_match(&cmd.title, query)
                    .map(|score| (score, cmd))
            })
            .collect();

        sort_by_score(scored)
    }

    /// Like `filter`, but wraps every matched run of the title in markers
    pub fn highlight(&self, query: &str, candidates: Vec<Command>) -> Vec<Command> {
        let scored = candidates
            .into_iter()
            .filter_map(|mut cmd| {
                let (score, indices) = self.matcher.fuzzy_indices(&cmd.title, query)?;
                cmd.highlighted_title = Some(self.wrap_runs(&cmd.title, &indices));
                Some((score, cmd))
            })
            .collect();

        sort_by_score(scored)
    }

    /// `indices` are char positions, ascending
    fn wrap_runs(&self, title: &str, indices: &[usize]) -> String {
        let mut out = String::with_capacity(title.len() + indices.len() * 4);
        let mut matched = indices.iter().peekable();
        let mut in_run = false;

        for (pos, ch) in title.chars().enumerate() {
            let hit = matched.peek() == Some(&&pos);
            if hit {
                matched.next();
            }

            if hit && !in_run {
                out.push_str(&self.markers.open);
            } else if !hit && in_run {
                out.push_str(&self.markers.close);
            }
            in_run = hit;
            out.push(ch);
        }

        if in_run {
            out.push_str(&self.markers.close);
        }
        out
    }
}

fn sort_by_score(mut scored: Vec<(i64, Command)>) -> Vec<Command> {
    // stable: equal scores keep candidate order
    scored.sort_by(|a, b| b.0.cmp(&a.0));
    scored.into_iter().map(|(_, cmd)| cmd).collect()
}
