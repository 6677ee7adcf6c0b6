use flashcard_types::WordId;
use rand::Rng;

use crate::WordCatalog;

/// In-place Fisher–Yates shuffle. Every permutation is equally likely.
pub fn fisher_yates<T, R: Rng>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.gen_range(0..=i);
        items.swap(i, j);
    }
}

/// A fresh random ordering of every id in the catalog.
pub fn shuffled_ids<R: Rng>(catalog: &WordCatalog, rng: &mut R) -> Vec<WordId> {
    let mut ids = catalog.ids();
    fisher_yates(&mut ids, rng);
    ids
}
