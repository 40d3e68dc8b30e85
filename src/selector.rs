//! Reference sentence selection
//!
//! Picks the sentence a user is asked to type. The "avoid repeating the last
//! sentence" behavior is held in an explicit value owned by the caller, not
//! in hidden process-wide state, so tests and concurrent captures stay
//! order-independent.

use rand::seq::SliceRandom;
use rand::Rng;

/// Default reference sentences, graded roughly from short to paragraph-like.
pub const DEFAULT_SENTENCES: [&str; 6] = [
    "Python makes data science fun and powerful for students who love logic.",
    "Typing speed and accuracy during a test can reflect how focused or distracted a student is at that moment.",
    "Machine learning models can discover hidden patterns in noisy data, helping us make better predictions about the real world.",
    "College projects are a great way to learn real skills, because they force us to combine theory, problem solving, teamwork, and clear communication in one place.",
    "When students track their daily habits, such as sleep, screen time, and study hours, they can often see clear trends that explain why their performance improves or drops over time.",
    "Stress does not always reduce productivity immediately, but over time it can increase mistakes, reduce focus, and make even simple tasks feel much harder than they actually are.",
];

/// Sentence picker that avoids repeating its previous pick when possible.
#[derive(Debug, Clone, Default)]
pub struct SentencePicker {
    last: Option<String>,
}

impl SentencePicker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pick a sentence uniformly at random, excluding the previous pick
    /// unless that would leave nothing to choose from. Returns `None` only
    /// for an empty slice.
    pub fn pick<'a, R: Rng + ?Sized>(
        &mut self,
        sentences: &'a [&'a str],
        rng: &mut R,
    ) -> Option<&'a str> {
        let candidates: Vec<&str> = sentences
            .iter()
            .copied()
            .filter(|s| Some(*s) != self.last.as_deref())
            .collect();

        let pool: &[&str] = if candidates.is_empty() {
            sentences
        } else {
            &candidates
        };

        let chosen = pool.choose(rng).copied()?;
        self.last = Some(chosen.to_string());
        Some(chosen)
    }

    /// The previously picked sentence, if any.
    pub fn last(&self) -> Option<&str> {
        self.last.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_never_repeats_immediately_with_multiple_sentences() {
        let sentences = ["one", "two", "three"];
        let mut picker = SentencePicker::new();
        let mut rng = StdRng::seed_from_u64(7);

        let mut previous = picker.pick(&sentences, &mut rng).unwrap();
        for _ in 0..200 {
            let next = picker.pick(&sentences, &mut rng).unwrap();
            assert_ne!(next, previous);
            previous = next;
        }
    }

    #[test]
    fn test_single_sentence_falls_back_to_repeat() {
        let sentences = ["only"];
        let mut picker = SentencePicker::new();
        let mut rng = StdRng::seed_from_u64(7);

        assert_eq!(picker.pick(&sentences, &mut rng), Some("only"));
        assert_eq!(picker.pick(&sentences, &mut rng), Some("only"));
    }

    #[test]
    fn test_empty_slice_yields_none() {
        let mut picker = SentencePicker::new();
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(picker.pick(&[], &mut rng), None);
        assert_eq!(picker.last(), None);
    }

    #[test]
    fn test_last_tracks_pick() {
        let sentences = ["a", "b"];
        let mut picker = SentencePicker::new();
        let mut rng = StdRng::seed_from_u64(7);
        let picked = picker.pick(&sentences, &mut rng).unwrap();
        assert_eq!(picker.last(), Some(picked));
    }
}
