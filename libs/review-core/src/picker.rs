//! Randomness provider for reviewer selection.
//!
//! Selection is uniform over the candidate set with no weighting by workload
//! or history. The trait exists so tests can inject a deterministic picker
//! instead of relying on a shared global generator.

use rand::seq::SliceRandom;

pub trait ReviewerPicker: Send + Sync {
    /// Pick up to `count` distinct candidates uniformly without replacement.
    /// Fewer candidates than `count` means all of them are returned.
    fn pick(&self, candidates: &[String], count: usize) -> Vec<String>;

    /// Pick one candidate uniformly; `None` iff `candidates` is empty.
    fn pick_one(&self, candidates: &[String]) -> Option<String>;
}

/// Production picker backed by the thread-local RNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRngPicker;

impl ReviewerPicker for ThreadRngPicker {
    fn pick(&self, candidates: &[String], count: usize) -> Vec<String> {
        let mut rng = rand::thread_rng();
        candidates
            .choose_multiple(&mut rng, count)
            .cloned()
            .collect()
    }

    fn pick_one(&self, candidates: &[String]) -> Option<String> {
        candidates.choose(&mut rand::thread_rng()).cloned()
    }
}

/// Deterministic picker that takes candidates in the order given.
/// Primary use-case: tests that need predictable selection outcomes.
#[derive(Debug, Clone, Copy, Default)]
pub struct SequentialPicker;

impl ReviewerPicker for SequentialPicker {
    fn pick(&self, candidates: &[String], count: usize) -> Vec<String> {
        candidates.iter().take(count).cloned().collect()
    }

    fn pick_one(&self, candidates: &[String]) -> Option<String> {
        candidates.first().cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn thread_rng_picker_respects_bounds() {
        let picker = ThreadRngPicker;
        let candidates = ids(&["a", "b", "c"]);

        let picked = picker.pick(&candidates, 2);
        assert_eq!(picked.len(), 2);
        assert!(picked.iter().all(|p| candidates.contains(p)));
        assert_ne!(picked[0], picked[1]);

        // Asking for more than available returns everything.
        assert_eq!(picker.pick(&candidates, 5).len(), 3);
        assert!(picker.pick(&[], 2).is_empty());
        assert!(picker.pick_one(&[]).is_none());
    }

    #[test]
    fn sequential_picker_is_deterministic() {
        let picker = SequentialPicker;
        let candidates = ids(&["r1", "r2", "r3"]);

        assert_eq!(picker.pick(&candidates, 2), ids(&["r1", "r2"]));
        assert_eq!(picker.pick_one(&candidates), Some("r1".to_string()));
    }
}
