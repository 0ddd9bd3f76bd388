use planscope::analytics::frequency_tree::FrequencyTree;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[test]
fn test_stays_balanced_under_random_inserts() {
    let mut rng = StdRng::seed_from_u64(42);
    let mut tree = FrequencyTree::new();

    for i in 0..5_000 {
        let term = format!("q{}", rng.gen_range(0..1_500));
        tree.insert(&term);
        if i % 500 == 0 {
            assert!(tree.is_balanced());
        }
    }

    assert!(tree.is_balanced());
    assert_eq!(tree.total(), 5_000);
    // AVL height bound: ~1.44 * log2(n + 2)
    let bound = (1.45 * ((tree.len() + 2) as f64).log2()).ceil() as i32;
    assert!(tree.height() <= bound);
}

#[test]
fn test_sorted_inserts_do_not_degenerate() {
    let mut tree = FrequencyTree::new();
    for i in 0..1_024 {
        tree.insert(&format!("{:05}", i));
    }

    assert!(tree.is_balanced());
    assert!(tree.height() <= 11);

    let in_order: Vec<String> = tree.in_order().into_iter().map(|(term, _)| term).collect();
    let mut sorted = in_order.clone();
    sorted.sort();
    assert_eq!(in_order, sorted);
}
