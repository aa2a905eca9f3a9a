//! Property-based tests for duplicate description generation.

use proptest::prelude::*;

use super::description::{generate_duplicate_description, same_description};

/// Strategy for plain descriptions like "Janeiro 2024".
fn description() -> impl Strategy<Value = String> {
    "[A-Za-z][A-Za-z0-9 ]{0,20}"
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// The generated description never collides with an existing one,
    /// ignoring case and padding.
    #[test]
    fn prop_result_is_free(
        original in description(),
        copies in 0usize..8,
        extra in prop::collection::vec(description(), 0..5),
        shout in any::<bool>(),
    ) {
        let mut existing = vec![original.clone()];
        existing.extend((1..=copies).map(|n| {
            let copy = format!("{original} (Cópia {n})");
            if shout { copy.to_uppercase() } else { copy.to_lowercase() }
        }));
        existing.extend(extra);

        let generated = generate_duplicate_description(&original, &existing);

        prop_assert!(!existing.iter().any(|d| same_description(d, &generated)));
    }

    /// With copies 1..=k already taken, the next copy is k + 1.
    #[test]
    fn prop_takes_next_free_number(original in description(), copies in 0usize..8) {
        let mut existing = vec![original.clone()];
        existing.extend((1..=copies).map(|n| format!("{original} (Cópia {n})")));

        let generated = generate_duplicate_description(&original, &existing);

        prop_assert_eq!(generated, format!("{original} (Cópia {})", copies + 1));
    }

    /// A free original is kept as is.
    #[test]
    fn prop_free_original_is_kept(
        original in description(),
        others in prop::collection::vec(description(), 0..5),
    ) {
        prop_assume!(!others.iter().any(|o| same_description(o, &original)));

        prop_assert_eq!(generate_duplicate_description(&original, &others), original);
    }
}
