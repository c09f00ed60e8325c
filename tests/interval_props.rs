use mafstats::{FeatureSet, SeqRange, SequenceFeature, Strand};
use proptest::prelude::*;

fn strand() -> impl Strategy<Value = Strand> {
    prop_oneof![
        Just(Strand::Plus),
        Just(Strand::Minus),
        Just(Strand::Unstranded),
        Just(Strand::UnknownStrandedness),
    ]
}

fn range() -> impl Strategy<Value = SeqRange> {
    prop_oneof![
        3 => (0u64..200, 0u64..200, strand()).prop_map(|(a, b, s)| SeqRange::new(a, b, s)),
        1 => (0u64..200, strand()).prop_map(|(a, s)| SeqRange::new(a, a, s)),
    ]
}

#[test]
fn zero_length_ranges_overlap_nothing() {
    let empty = SeqRange::unstranded(50, 50);
    let around = SeqRange::unstranded(10, 100);
    assert!(!empty.overlap(&around));
    assert!(!around.overlap(&empty));
    assert!(!empty.overlap(&empty));
    assert!(empty.contains(&empty));
    assert!(empty.is_included_in(&around));
    assert!(!empty.contains(&SeqRange::unstranded(50, 51)));
}

#[test]
fn zero_length_feature_is_absent_from_both_range_queries() {
    let set: FeatureSet = [
        SequenceFeature::new("empty", "chr1", "test", "site", 144, 144, '+'),
        SequenceFeature::new("full", "chr1", "test", "exon", 0, 144, '+'),
    ]
    .into_iter()
    .collect();
    let query = SeqRange::unstranded(0, 144);
    let complete = set.by_range(&query, true);
    let overlapping = set.by_range(&query, false);
    let ids = |s: &FeatureSet| s.iter().map(|f| f.id().to_string()).collect::<Vec<_>>();
    assert_eq!(ids(&complete), vec!["full"]);
    assert_eq!(ids(&overlapping), vec!["full"]);
}

proptest! {
    #[test]
    fn overlap_is_symmetric_and_matches_definition(a in range(), b in range()) {
        prop_assert_eq!(a.overlap(&b), b.overlap(&a));
        let expected = a.start().max(b.start()) < a.end().min(b.end());
        prop_assert_eq!(a.overlap(&b), expected);
    }

    #[test]
    fn contains_mirrors_inclusion(a in range(), b in range()) {
        prop_assert_eq!(a.contains(&b), b.is_included_in(&a));
    }

    #[test]
    fn invert_twice_is_identity(a in range()) {
        let mut twice = a;
        twice.invert();
        if !a.is_stranded() {
            prop_assert_eq!(twice, a);
        }
        twice.invert();
        prop_assert_eq!(twice, a);
    }

    #[test]
    fn complete_range_query_is_subset_of_overlap_query(
        ranges in proptest::collection::vec(range(), 0..20),
        query in range(),
    ) {
        let set: FeatureSet = ranges
            .iter()
            .enumerate()
            .map(|(i, r)| {
                SequenceFeature::new(
                    format!("f{i}"),
                    "chr1",
                    "test",
                    "exon",
                    r.start(),
                    r.end(),
                    r.strand(),
                )
            })
            .collect();
        let complete = set.by_range(&query, true);
        let overlapping = set.by_range(&query, false);
        for feature in complete.iter() {
            prop_assert!(overlapping.iter().any(|f| f == feature));
        }
        prop_assert!(complete.len() <= overlapping.len());
    }
}
