//! Next-slide selection: uniform random pick that never repeats the current index.

use rand::Rng;

/// Pick the next slideshow index using the thread-local RNG.
///
/// Returns `0` when there is at most one image. Otherwise the result is in
/// `0..total_images` and differs from `current_index`.
pub fn select_new_index(current_index: usize, total_images: usize) -> usize {
    select_new_index_with(&mut rand::rng(), current_index, total_images)
}

/// Same as [`select_new_index`] with a caller-supplied RNG.
pub fn select_new_index_with<R: Rng + ?Sized>(
    rng: &mut R,
    current_index: usize,
    total_images: usize,
) -> usize {
    if total_images <= 1 {
        return 0;
    }

    loop {
        let candidate = rng.random_range(0..total_images);
        if candidate != current_index {
            return candidate;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_single_or_empty_returns_zero() {
        for current in [0, 1, 7, usize::MAX] {
            assert_eq!(select_new_index(current, 0), 0);
            assert_eq!(select_new_index(current, 1), 0);
        }
    }

    #[test]
    fn test_never_repeats_current() {
        let mut rng = StdRng::seed_from_u64(42);
        for total in 2..12 {
            for current in 0..total {
                for _ in 0..50 {
                    let next = select_new_index_with(&mut rng, current, total);
                    assert!(next < total);
                    assert_ne!(next, current);
                }
            }
        }
    }

    #[test]
    fn test_two_images_alternate() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut current = 0;
        for _ in 0..20 {
            let next = select_new_index_with(&mut rng, current, 2);
            assert_eq!(next, 1 - current);
            current = next;
        }
    }

    #[test]
    fn test_stale_index_stays_in_range() {
        // Index left over from a larger folder
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..50 {
            assert!(select_new_index_with(&mut rng, 40, 3) < 3);
        }
    }

    #[test]
    fn test_thread_rng_variant() {
        for _ in 0..100 {
            let next = select_new_index(2, 5);
            assert!(next < 5 && next != 2);
        }
    }
}
