mod common;

use cipherforge::alphabet::Alphabet;
use cipherforge::annealer::acceptance_probability;
use cipherforge::hypothesis::{Hypothesis, Message};
use cipherforge::model::{laplace_prob, LanguageModel};
use proptest::prelude::*;

const SIGMA: &str = "abcdefgh ,.";

// --- STRATEGIES ---

prop_compose! {
    fn arb_text(max_len: usize)(
        picks in proptest::collection::vec(0usize..SIGMA.len(), 0..max_len)
    ) -> String {
        let chars: Vec<char> = SIGMA.chars().collect();
        picks.into_iter().map(|i| chars[i]).collect()
    }
}

prop_compose! {
    fn arb_key()(seed in any::<u64>()) -> Vec<u8> {
        let mut key: Vec<u8> = (0..SIGMA.chars().count() as u8).collect();
        fastrand::Rng::with_seed(seed).shuffle(&mut key);
        key
    }
}

fn alphabet() -> Alphabet {
    Alphabet::new(SIGMA).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn test_tables_sum_to_one(corpus in arb_text(300)) {
        let model = LanguageModel::from_text(alphabet(), &corpus);
        let n = model.alphabet().len() as u8;

        let total: f64 = (0..n).map(|s| model.unigram_probability(s)).sum();
        prop_assert!((total - 1.0).abs() < 1e-9);

        for prev in 0..n {
            let row: f64 = (0..n).map(|s| model.bigram_probability(s, prev)).sum();
            prop_assert!((row - 1.0).abs() < 1e-9, "row {} sums to {}", prev, row);
            for s in 0..n {
                let p = model.bigram_probability(s, prev);
                prop_assert!(p > 0.0 && p <= 1.0);
            }
        }
    }

    #[test]
    fn test_laplace_monotonic(a in 0u64..10_000, gap in 1u64..10_000, total in 0u64..100_000) {
        let denominator = total + a + gap;
        prop_assert!(laplace_prob(a, denominator) < laplace_prob(a + gap, denominator));
        prop_assert_eq!(laplace_prob(0, total), 1.0 / (total + 1) as f64);
    }

    #[test]
    fn test_neighbor_is_one_transposition(key in arb_key(), text in arb_text(50), seed in any::<u64>()) {
        let alphabet = alphabet();
        let message = Message::new(&alphabet, &text).unwrap();
        let h = Hypothesis::from_key(&message, key).unwrap();

        let mut rng = fastrand::Rng::with_seed(seed);
        let next = h.neighbor(&mut rng);

        let diffs: Vec<usize> = (0..h.key().len())
            .filter(|&i| h.key()[i] != next.key()[i])
            .collect();
        prop_assert_eq!(diffs.len(), 2);
        prop_assert_eq!(h.key()[diffs[0]], next.key()[diffs[1]]);
        prop_assert_eq!(h.key()[diffs[1]], next.key()[diffs[0]]);

        let mut before = h.key().to_vec();
        let mut after = next.key().to_vec();
        before.sort_unstable();
        after.sort_unstable();
        prop_assert_eq!(before, after);
    }

    #[test]
    fn test_decrypt_then_encrypt_round_trips(key in arb_key(), text in arb_text(80)) {
        let alphabet = alphabet();
        let message = Message::new(&alphabet, &text).unwrap();
        let h = Hypothesis::from_key(&message, key).unwrap();

        let plain = h.decrypt(message.symbols());
        prop_assert_eq!(h.encrypt(&plain), message.symbols().to_vec());
    }

    #[test]
    fn test_energy_matches_probability_queries(
        corpus in arb_text(200),
        key in arb_key(),
        text in arb_text(60)
    ) {
        let model = LanguageModel::from_text(alphabet(), &corpus);
        let message = Message::new(model.alphabet(), &text).unwrap();
        let h = Hypothesis::from_key(&message, key).unwrap();
        let plain = h.decrypt(message.symbols());

        let mut expected = 0.0;
        for (i, &s) in plain.iter().enumerate() {
            let prev = if i == 0 { None } else { Some(plain[i - 1]) };
            expected -= model.probability(s, prev).log2();
        }

        let energy = h.energy(&message, &model).unwrap();
        prop_assert!(energy >= 0.0);
        prop_assert!((energy - expected).abs() < 1e-9 * (1.0 + expected));
    }

    #[test]
    fn test_acceptance_probability_shape(
        delta in 0.01f64..50.0,
        step in 0.5f64..10.0,
        temperature in 1.0f64..100.0
    ) {
        prop_assert_eq!(acceptance_probability(-delta, temperature), 1.0);
        prop_assert_eq!(acceptance_probability(0.0, temperature), 1.0);

        let p = acceptance_probability(delta, temperature);
        prop_assert!(p > 0.0 && p < 1.0);
        prop_assert!(acceptance_probability(delta + step, temperature) < p);
        prop_assert!(acceptance_probability(delta, temperature + step) > p);
    }
}
