//! Seeded planet names from a tiny syllable grammar.
//!
//! Generation rewrites a string of symbols until only letters remain:
//! `S` (syllable) splits into `SS` with a chance that shrinks after every
//! split, otherwise becomes `CV`; `C` and `V` become a consonant and a vowel.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const CONSONANTS: &[u8] = b"bcdfghjklmnpqrstvwxyz";
const VOWELS: &[u8] = b"aeiou";

/// Chance that the first `S` splits.
const SYLLABLE_CHANCE: f32 = 0.8;
/// Subtracted from the split chance after each split.
const SYLLABLE_CHANCE_REDUCTION: f32 = 0.4;

/// A capitalized name, the same for the same seed.
pub fn generate_name(seed: i32) -> String {
    let mut rng = ChaCha8Rng::seed_from_u64(u64::from(seed as u32));
    let mut state = String::from("SS");
    let mut split_chance = SYLLABLE_CHANCE;

    while state.contains(['S', 'C', 'V']) {
        let mut next = String::with_capacity(state.len() * 2);
        for ch in state.chars() {
            match ch {
                'S' => {
                    if rng.random::<f32>() < split_chance {
                        next.push_str("SS");
                        split_chance -= SYLLABLE_CHANCE_REDUCTION;
                    } else {
                        next.push_str("CV");
                    }
                }
                // The last letter of each set is never drawn.
                'C' => next.push(char::from(CONSONANTS[rng.random_range(0..CONSONANTS.len() - 1)])),
                'V' => next.push(char::from(VOWELS[rng.random_range(0..VOWELS.len() - 1)])),
                other => next.push(other),
            }
        }
        state = next;
    }

    capitalize(&state)
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
