//! TF-IDF scoring and top-K ranking.
//!
//! Scoring is a two-phase pass over the inverted index:
//!
//! 1. every document under a minus-word is marked excluded;
//! 2. for every plus-word, `tf * idf` is accumulated into each non-excluded
//!    document that passes the caller's predicate.
//!
//! Phase 1 must be fully complete before phase 2 reads the exclusion set,
//! otherwise a document could slip through because its mark had not landed
//! yet. In parallel mode that barrier is the join of the phase-1 rayon
//! tasks; phase 2 then splits the plus-words into a fixed number of slices
//! and processes them concurrently, with all partial sums meeting in the
//! sharded accumulator.

use std::cmp::Ordering;

use rayon::prelude::*;

use crate::concurrent::{ShardedMap, ShardedSet};
use crate::document::{DocumentId, DocumentStatus, ScoredDocument};
use crate::index::IndexStore;
use crate::query::ParsedQuery;
use crate::search::{ExecutionMode, RELEVANCE_EPSILON};

/// Score every candidate document against `query`, in either mode.
///
/// Returns unranked `(id, relevance, rating)` records; ordering and
/// truncation happen in [`rank_documents`].
pub(crate) fn score_documents<P>(
    store: &IndexStore,
    query: &ParsedQuery,
    predicate: &P,
    mode: ExecutionMode,
    partitions: usize,
) -> Vec<ScoredDocument>
where
    P: Fn(DocumentId, DocumentStatus, i32) -> bool + Sync,
{
    let relevance: ShardedMap<DocumentId, f64> =
        ShardedMap::with_shards(query.plus_words.len().max(1));
    let excluded: ShardedSet<DocumentId> =
        ShardedSet::with_shards(store.document_count().max(1));

    match mode {
        ExecutionMode::Sequential => {
            for word in &query.minus_words {
                mark_excluded(store, word, &excluded);
            }
            for word in &query.plus_words {
                accumulate_word(store, word, &excluded, predicate, &relevance);
            }
        }
        ExecutionMode::Parallel => {
            query
                .minus_words
                .par_iter()
                .for_each(|word| mark_excluded(store, word, &excluded));
            // for_each has joined: every exclusion is visible from here on.

            let plus_words: Vec<&String> = query.plus_words.iter().collect();
            let slice_len = plus_words.len().div_ceil(partitions.max(1)).max(1);
            plus_words.par_chunks(slice_len).for_each(|slice| {
                for word in slice {
                    accumulate_word(store, word, &excluded, predicate, &relevance);
                }
            });
        }
    }

    let mut scored = Vec::new();
    for (id, relevance) in relevance.into_ordered_map() {
        if let Some(entry) = store.entry(id) {
            scored.push(ScoredDocument {
                id,
                relevance,
                rating: entry.rating,
            });
        }
    }
    scored
}

/// Sort by relevance descending, breaking near-ties (within
/// [`RELEVANCE_EPSILON`]) by rating descending, then truncate to
/// `max_results`. The secondary key keeps the ranking deterministic across
/// sequential and parallel runs despite floating-point summation order.
pub(crate) fn rank_documents(
    mut documents: Vec<ScoredDocument>,
    max_results: usize,
) -> Vec<ScoredDocument> {
    documents.sort_by(|lhs, rhs| {
        if (lhs.relevance - rhs.relevance).abs() < RELEVANCE_EPSILON {
            rhs.rating.cmp(&lhs.rating)
        } else {
            rhs.relevance
                .partial_cmp(&lhs.relevance)
                .unwrap_or(Ordering::Equal)
        }
    });
    documents.truncate(max_results);
    documents
}

fn mark_excluded(store: &IndexStore, word: &str, excluded: &ShardedSet<DocumentId>) {
    if let Some(postings) = store.postings(word) {
        for &id in postings.keys() {
            excluded.insert(id);
        }
    }
}

fn accumulate_word<P>(
    store: &IndexStore,
    word: &str,
    excluded: &ShardedSet<DocumentId>,
    predicate: &P,
    relevance: &ShardedMap<DocumentId, f64>,
) where
    P: Fn(DocumentId, DocumentStatus, i32) -> bool,
{
    let Some(postings) = store.postings(word) else {
        return;
    };
    let idf = inverse_document_frequency(store.document_count(), postings.len());
    for (&id, &tf) in postings {
        if excluded.contains(&id) {
            continue;
        }
        let Some(entry) = store.entry(id) else {
            continue;
        };
        if predicate(id, entry.status, entry.rating) {
            relevance.update(id, |sum| *sum += tf * idf);
        }
    }
}

/// `ln(total documents / documents containing the word)`.
fn inverse_document_frequency(document_count: usize, containing_count: usize) -> f64 {
    (document_count as f64 / containing_count as f64).ln()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::StopWordSet;
    use crate::query::QueryParser;

    fn store_fixture() -> IndexStore {
        let mut store = IndexStore::new(StopWordSet::from_text("and with").unwrap());
        store
            .add(1, "white cat and yellow hat", DocumentStatus::Actual, &[8, -3])
            .unwrap();
        store
            .add(2, "curly cat curly tail", DocumentStatus::Actual, &[7, 2, 7])
            .unwrap();
        store
            .add(3, "nasty dog with big eyes", DocumentStatus::Actual, &[5, -12, 2, 1])
            .unwrap();
        store
            .add(4, "nasty pigeon john", DocumentStatus::Banned, &[9])
            .unwrap();
        store
    }

    fn actual_only(_id: DocumentId, status: DocumentStatus, _rating: i32) -> bool {
        status == DocumentStatus::Actual
    }

    fn parse(store: &IndexStore, raw: &str) -> ParsedQuery {
        QueryParser::new(store.stop_words()).parse(raw).unwrap()
    }

    #[test]
    fn test_relevance_values() {
        let store = store_fixture();
        let query = parse(&store, "curly nasty cat");
        let scored = score_documents(
            &store,
            &query,
            &actual_only,
            ExecutionMode::Sequential,
            10,
        );

        // 4 documents; "curly" appears in doc 2 (tf 0.5), "cat" in docs 1
        // and 2 (tf 0.25 each), "nasty" in doc 3 (tf 0.25); doc 4 is Banned.
        let by_id: std::collections::BTreeMap<DocumentId, f64> =
            scored.iter().map(|d| (d.id, d.relevance)).collect();
        let ln2 = 2.0f64.ln();
        let ln4 = 4.0f64.ln();
        assert!((by_id[&1] - 0.25 * ln2).abs() < 1e-12);
        assert!((by_id[&2] - (0.5 * ln4 + 0.25 * ln2)).abs() < 1e-12);
        assert!((by_id[&3] - 0.25 * ln2).abs() < 1e-12);
        assert!(!by_id.contains_key(&4));
    }

    #[test]
    fn test_minus_words_exclude_before_accumulation() {
        let store = store_fixture();
        let query = parse(&store, "curly -nasty cat");
        for mode in [ExecutionMode::Sequential, ExecutionMode::Parallel] {
            let scored = score_documents(&store, &query, &actual_only, mode, 10);
            let ids: Vec<DocumentId> = scored.iter().map(|d| d.id).collect();
            assert_eq!(ids, vec![1, 2]);
        }
    }

    #[test]
    fn test_predicate_applied_in_both_modes() {
        let store = store_fixture();
        let query = parse(&store, "nasty");
        let even_only =
            |id: DocumentId, _status: DocumentStatus, _rating: i32| id % 2 == 0;
        for mode in [ExecutionMode::Sequential, ExecutionMode::Parallel] {
            let scored = score_documents(&store, &query, &even_only, mode, 10);
            let ids: Vec<DocumentId> = scored.iter().map(|d| d.id).collect();
            assert_eq!(ids, vec![4]);
        }
    }

    #[test]
    fn test_rank_orders_by_relevance_then_rating() {
        let documents = vec![
            ScoredDocument { id: 1, relevance: 0.2, rating: 1 },
            ScoredDocument { id: 2, relevance: 0.9, rating: 0 },
            ScoredDocument { id: 3, relevance: 0.2 + 1e-9, rating: 5 },
        ];
        let ranked = rank_documents(documents, 10);
        let ids: Vec<DocumentId> = ranked.iter().map(|d| d.id).collect();
        // Docs 1 and 3 are tied within epsilon; doc 3 wins on rating.
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[test]
    fn test_rank_truncates() {
        let documents: Vec<ScoredDocument> = (0..10)
            .map(|i| ScoredDocument {
                id: i,
                relevance: i as f64,
                rating: 0,
            })
            .collect();
        let ranked = rank_documents(documents, 3);
        let ids: Vec<DocumentId> = ranked.iter().map(|d| d.id).collect();
        assert_eq!(ids, vec![9, 8, 7]);
    }

    #[test]
    fn test_empty_query_scores_nothing() {
        let store = store_fixture();
        let query = ParsedQuery::default();
        let scored = score_documents(
            &store,
            &query,
            &actual_only,
            ExecutionMode::Parallel,
            10,
        );
        assert!(scored.is_empty());
    }

    #[test]
    fn test_idf() {
        assert!((inverse_document_frequency(4, 1) - 4.0f64.ln()).abs() < 1e-12);
        assert_eq!(inverse_document_frequency(4, 4), 0.0);
    }
}
