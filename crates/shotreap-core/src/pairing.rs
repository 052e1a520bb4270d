use crate::candidate::Candidate;

/// One unit of comparison work for a pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComparisonUnit {
    /// Two positionally adjacent candidates; the first is the keeper if they
    /// turn out to be duplicates.
    Pair(Candidate, Candidate),
    /// Odd leftover. Sits the pass out and is never disposed.
    Single(Candidate),
}

/// Split a sorted candidate list into disjoint adjacent pairs, first with
/// second, third with fourth, and so on. An odd count leaves one `Single`.
pub fn partition(candidates: Vec<Candidate>) -> Vec<ComparisonUnit> {
    let mut units = Vec::with_capacity(candidates.len() / 2 + 1);
    let mut iter = candidates.into_iter();

    while let Some(first) = iter.next() {
        match iter.next() {
            Some(second) => units.push(ComparisonUnit::Pair(first, second)),
            None => units.push(ComparisonUnit::Single(first)),
        }
    }

    units
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn candidates(names: &[&str]) -> Vec<Candidate> {
        names
            .iter()
            .map(|name| Candidate {
                path: PathBuf::from(name),
                name: (*name).to_string(),
            })
            .collect()
    }

    fn unit_names(unit: &ComparisonUnit) -> Vec<String> {
        match unit {
            ComparisonUnit::Pair(a, b) => vec![a.name.clone(), b.name.clone()],
            ComparisonUnit::Single(a) => vec![a.name.clone()],
        }
    }

    #[test]
    fn test_even_count_yields_only_pairs() {
        let units = partition(candidates(&["d", "c", "b", "a"]));
        assert_eq!(units.len(), 2);
        assert_eq!(unit_names(&units[0]), vec!["d", "c"]);
        assert_eq!(unit_names(&units[1]), vec!["b", "a"]);
    }

    #[test]
    fn test_odd_count_leaves_one_single() {
        let units = partition(candidates(&["e", "d", "c", "b", "a"]));
        assert_eq!(units.len(), 3);
        assert!(matches!(&units[2], ComparisonUnit::Single(c) if c.name == "a"));
    }

    #[test]
    fn test_every_candidate_appears_exactly_once() {
        for count in 0..9 {
            let names: Vec<String> = (0..count).map(|i| format!("shot_{i}")).collect();
            let name_refs: Vec<&str> = names.iter().map(String::as_str).collect();

            let units = partition(candidates(&name_refs));
            let mut seen: Vec<String> = units.iter().flat_map(|u| unit_names(u)).collect();
            seen.sort();

            let mut expected = names.clone();
            expected.sort();
            assert_eq!(seen, expected, "count {count}");

            let pairs = units
                .iter()
                .filter(|u| matches!(u, ComparisonUnit::Pair(_, _)))
                .count();
            let singles = units.len() - pairs;
            assert_eq!(pairs, count / 2, "count {count}");
            assert_eq!(singles, count % 2, "count {count}");
        }
    }

    #[test]
    fn test_empty_input_yields_no_units() {
        assert!(partition(Vec::new()).is_empty());
    }
}
