//! Bootstrap resampling of the language sample.
//!
//! Each iteration draws `k` languages uniformly with replacement, then
//! materializes the working set: every observation of a drawn language, as
//! many times as its language was drawn. Repetition is the point of the
//! bootstrap; a twice-drawn language weighs twice in the objective.

use std::collections::HashMap;

use rand::prelude::*;

use crate::types::{Language, Observation};

/// Draw `k` languages independently and uniformly with replacement. An
/// empty language list yields an empty draw.
pub fn draw_sample(languages: &[Language], k: usize, rng: &mut impl Rng) -> Vec<Language> {
    (0..k)
        .filter_map(|_| languages.choose(rng).cloned())
        .collect()
}

/// Materialize the working set for a draw: corpus order, with each
/// observation repeated once per occurrence of its language in the draw.
pub fn working_set<'a>(corpus: &'a [Observation], draw: &[Language]) -> Vec<&'a Observation> {
    let mut multiplicity: HashMap<&Language, usize> = HashMap::new();
    for language in draw {
        *multiplicity.entry(language).or_insert(0) += 1;
    }

    let mut set = Vec::new();
    for obs in corpus {
        if let Some(&n) = multiplicity.get(&obs.language) {
            for _ in 0..n {
                set.push(obs);
            }
        }
    }
    set
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;

    fn langs(names: &[&str]) -> Vec<Language> {
        names.iter().map(|n| Language::from(*n)).collect()
    }

    #[test]
    fn test_draw_has_requested_size_and_stays_in_pool() {
        let pool = langs(&["Nuer", "Lakota", "Mawng"]);
        let mut rng = StdRng::seed_from_u64(7);
        let draw = draw_sample(&pool, 12, &mut rng);

        assert_eq!(draw.len(), 12);
        assert!(draw.iter().all(|l| pool.contains(l)));
    }

    #[test]
    fn test_draw_is_with_replacement() {
        // a single-language pool can only repeat
        let pool = langs(&["Nuer"]);
        let mut rng = StdRng::seed_from_u64(0);
        let draw = draw_sample(&pool, 5, &mut rng);
        assert_eq!(draw, langs(&["Nuer", "Nuer", "Nuer", "Nuer", "Nuer"]));
    }

    #[test]
    fn test_draw_from_empty_pool_is_empty() {
        let mut rng = StdRng::seed_from_u64(0);
        assert!(draw_sample(&[], 12, &mut rng).is_empty());
    }

    #[test]
    fn test_same_seed_same_draw() {
        let pool = langs(&["Nuer", "Lakota", "Mawng", "Palula"]);
        let a = draw_sample(&pool, 12, &mut StdRng::seed_from_u64(42));
        let b = draw_sample(&pool, 12, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn test_working_set_applies_multiplicity_in_corpus_order() {
        let corpus = [
            Observation::from("A:one:LOVE,PITY"),
            Observation::from("B:two:FEAR,WORRY"),
            Observation::from("A:three:TRUST,RESPECT"),
        ];
        let draw = langs(&["B", "A", "A"]);
        let set = working_set(&corpus, &draw);

        let lemmas: Vec<&str> = set.iter().map(|o| o.lemma.as_str()).collect();
        assert_eq!(lemmas, vec!["one", "one", "two", "three", "three"]);
    }

    #[test]
    fn test_undrawn_language_contributes_nothing() {
        let corpus = [
            Observation::from("A:one:LOVE,PITY"),
            Observation::from("B:two:FEAR,WORRY"),
        ];
        let set = working_set(&corpus, &langs(&["A"]));
        assert_eq!(set.len(), 1);
        assert_eq!(set[0].lemma, "one");
    }
}
