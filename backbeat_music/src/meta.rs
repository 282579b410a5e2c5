// Piece metadata sampling: key, tempo, time signature.
//
// Pure random sampling over finite tables — no retries, no failure modes.
// Two quirks of the key table are deliberate: B and E are always minor
// (their major keys are heavy on sharps) and F never takes a mode suffix.
// The tempo pool is the concatenation of a wide range and a narrower one
// that overlaps it, so the central 80-119 BPM band is sampled twice as
// often; that weighting is intentional.

use rand::Rng;
use serde::{Deserialize, Serialize};

use backbeat_theory::{KEY_LETTERS, MODE_SUFFIXES};

/// Metadata shared by every generator working on one piece.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PieceMeta {
    /// Key name as the scale table spells it ("C", "Am", "Dm").
    pub key: String,
    /// Tempo in BPM (quarter notes per minute).
    pub tempo: u16,
    /// Fixed 4/4.
    pub time_signature: (u8, u8),
}

/// Sample a piece's metadata.
pub fn generate_meta(rng: &mut impl Rng) -> PieceMeta {
    PieceMeta {
        key: generate_key(rng),
        tempo: generate_tempo(rng),
        time_signature: (4, 4),
    }
}

fn generate_key(rng: &mut impl Rng) -> String {
    let letter = KEY_LETTERS[rng.random_range(0..KEY_LETTERS.len())];

    match letter {
        "B" | "E" => format!("{letter}m"),
        "F" => letter.to_string(),
        _ => {
            let suffix = MODE_SUFFIXES[rng.random_range(0..MODE_SUFFIXES.len())];
            format!("{letter}{suffix}")
        }
    }
}

fn generate_tempo(rng: &mut impl Rng) -> u16 {
    let pool: Vec<u16> = (60..140).chain(80..120).collect();
    pool[rng.random_range(0..pool.len())]
}

#[cfg(test)]
mod tests {
    use super::*;
    use backbeat_theory::scale;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_keys_are_always_in_the_scale_table() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let meta = generate_meta(&mut rng);
            assert!(scale(&meta.key).is_ok(), "key {}", meta.key);
            assert_eq!(meta.time_signature, (4, 4));
        }
    }

    #[test]
    fn test_forced_modes() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..500 {
            let key = generate_key(&mut rng);
            assert_ne!(key, "B", "B is always minor");
            assert_ne!(key, "E", "E is always minor");
            assert_ne!(key, "Fm", "F never takes a suffix");
        }
    }

    #[test]
    fn test_tempo_bounds_and_central_weighting() {
        let mut rng = StdRng::seed_from_u64(13);
        let mut central = 0u32;
        let n = 4000;
        for _ in 0..n {
            let tempo = generate_tempo(&mut rng);
            assert!((60..140).contains(&tempo), "tempo {tempo}");
            if (80..120).contains(&tempo) {
                central += 1;
            }
        }
        // 80 of 120 pool slots land in 80..120, so about two thirds of
        // samples should; well above the half that a flat range would give.
        assert!(central as f64 / n as f64 > 0.55, "central {central}/{n}");
    }

    #[test]
    fn test_same_seed_same_meta() {
        let mut a = StdRng::seed_from_u64(21);
        let mut b = StdRng::seed_from_u64(21);
        assert_eq!(generate_meta(&mut a), generate_meta(&mut b));
    }
}
