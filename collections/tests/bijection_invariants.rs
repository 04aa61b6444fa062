use std::collections::HashMap;

use duplex_collections::HashBijection;
use rand::Rng;

// Drives a random operation sequence against a plain HashMap model and audits
// the bijectivity invariant after every step.
#[test]
fn randomized_operations_preserve_bijectivity() {
    let mut rng = rand::thread_rng();
    let mut bijection: HashBijection<u32, u32> = HashBijection::new();
    let mut model: HashMap<u32, u32> = HashMap::new();

    for _ in 0..2000 {
        let first = rng.gen_range(0..50u32);
        let second = rng.gen_range(0..50u32);

        match rng.gen_range(0..4) {
            0 => {
                let free = !model.contains_key(&first) && !model.values().any(|s| *s == second);
                assert_eq!(bijection.insert(first, second), free);
                if free {
                    model.insert(first, second);
                }
            }
            1 => {
                let removed = bijection.remove_by_first(&first);
                assert_eq!(removed.map(|p| p.into_parts().1), model.remove(&first));
            }
            2 => {
                let removed = bijection.remove_by_second(&second);
                let model_first = model
                    .iter()
                    .find(|(_, s)| **s == second)
                    .map(|(f, _)| *f);
                if let Some(f) = model_first {
                    model.remove(&f);
                }
                assert_eq!(removed.map(|p| p.into_parts().0), model_first);
            }
            _ => {
                assert_eq!(
                    bijection.get_by_first(&first).map(|p| *p.second()),
                    model.get(&first).copied()
                );
                assert_eq!(
                    bijection.get_by_second(&second).map(|p| *p.first()),
                    model.iter().find(|(_, s)| **s == second).map(|(f, _)| *f)
                );
            }
        }

        bijection
            .verify()
            .expect("bijectivity must hold after every operation");
        assert_eq!(bijection.len(), model.len());
    }
}

#[test]
fn randomized_retain_matches_the_model() {
    let mut rng = rand::thread_rng();
    let mut bijection: HashBijection<u32, u32> = HashBijection::new();
    let mut model: HashMap<u32, u32> = HashMap::new();

    for i in 0..200u32 {
        let second = 1000 + i;
        bijection.insert(i, second);
        model.insert(i, second);
    }

    let threshold = rng.gen_range(0..200u32);
    bijection.retain(|pairing| *pairing.first() < threshold);
    model.retain(|first, _| *first < threshold);

    bijection.verify().expect("retain must keep both indexes in step");
    assert_eq!(bijection.len(), model.len());
    for (first, second) in &model {
        assert_eq!(
            bijection.get_by_first(first).map(|p| *p.second()),
            Some(*second)
        );
        assert_eq!(
            bijection.get_by_second(second).map(|p| *p.first()),
            Some(*first)
        );
    }
}
