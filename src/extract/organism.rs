//! Fuzzy matching of free-text organism names against the GapMind index.
//!
//! Resolution chain, first stage to produce a match wins:
//! 1. case-insensitive exact name match;
//! 2. case-insensitive substring match, shortest matching name first
//!    (the most specific container of the query);
//! 3. similarity ranking over all lowercased names with a minimum cutoff.
//!
//! No stage matching means the caller reports the index and the top
//! candidates as a warning; the resolver never guesses.

use std::cmp::Ordering;

use strsim::jaro_winkler;

use crate::models::Organism;

/// Minimum Jaro-Winkler similarity for the ranked fallback stage.
const SIMILARITY_CUTOFF: f64 = 0.80;

/// Resolve a free-text organism query against the index.
pub fn resolve<'a>(organisms: &'a [Organism], query: &str) -> Option<&'a Organism> {
    let q = query.trim().to_lowercase();
    if q.is_empty() {
        return None;
    }

    if let Some(org) = organisms.iter().find(|o| o.name.to_lowercase() == q) {
        return Some(org);
    }

    if let Some(org) = organisms
        .iter()
        .filter(|o| o.name.to_lowercase().contains(&q))
        .min_by_key(|o| o.name.len())
    {
        return Some(org);
    }

    organisms
        .iter()
        .map(|o| (jaro_winkler(&o.name.to_lowercase(), &q), o))
        .filter(|(score, _)| *score >= SIMILARITY_CUTOFF)
        .max_by(|(a, _), (b, _)| a.partial_cmp(b).unwrap_or(Ordering::Equal))
        .map(|(_, org)| org)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index() -> Vec<Organism> {
        ["Escherichia coli", "Escherichia coli BW25113", "Pseudomonas fluorescens FW300-N1B4"]
            .iter()
            .enumerate()
            .map(|(i, name)| Organism {
                org_id: format!("org{}", i),
                name: name.to_string(),
                taxonomy: String::new(),
            })
            .collect()
    }

    #[test]
    fn test_exact_match_wins_over_substring() {
        let orgs = index();
        // "escherichia coli" is also a substring of the BW25113 entry, but
        // the exact match must win.
        let hit = resolve(&orgs, "Escherichia Coli").unwrap();
        assert_eq!(hit.name, "Escherichia coli");
    }

    #[test]
    fn test_substring_prefers_shortest_name() {
        let orgs = index();
        let hit = resolve(&orgs, "coli BW").unwrap();
        assert_eq!(hit.name, "Escherichia coli BW25113");

        let hit = resolve(&orgs, "fluorescens").unwrap();
        assert_eq!(hit.org_id, "org2");
    }

    #[test]
    fn test_similarity_fallback_tolerates_typos() {
        let orgs = index();
        let hit = resolve(&orgs, "Escherichia colli BW25113").unwrap();
        assert_eq!(hit.name, "Escherichia coli BW25113");
    }

    #[test]
    fn test_no_match_returns_none() {
        let orgs = index();
        assert!(resolve(&orgs, "Danio rerio").is_none());
        assert!(resolve(&orgs, "   ").is_none());
    }
}
