//! Dice sources.
//!
//! Three modes share one interface:
//! - `Rng`: ChaCha8 PRNG, one uniform draw per rerolled die.
//! - `DeterministicEventKeyed`: dice are a pure function of (episode_seed, turn_idx, roll_idx).
//!   When rerolling k dice, the first k values of that event's sequence are used, so which
//!   positions are held does not change the faces that come up.
//! - `Scripted`: a fixed cyclic sequence of faces.

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use rand_core::SeedableRng;

/// Structural event key for deterministic dice generation.
///
/// `roll_idx` is 0 for the fresh dice issued at turn start and 1..=3 for player rolls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventKey {
    pub episode_seed: u64,
    pub turn_idx: u8,
    pub roll_idx: u8,
}

/// SplitMix64 step.
fn splitmix64_next(state: &mut u64) -> u64 {
    *state = state.wrapping_add(0x9E3779B97F4A7C15);
    let mut z = *state;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
    z ^ (z >> 31)
}

fn mix_seed(key: EventKey) -> u64 {
    // Fixed mixing; std Hash/RandomState is not stable across runs.
    let mut x = key.episode_seed;
    x ^= (key.turn_idx as u64).wrapping_mul(0xA5A35625E4F7C1AD);
    x ^= (key.roll_idx as u64).wrapping_mul(0xD6E8FEB86659FD93);
    let mut s = x;
    splitmix64_next(&mut s)
}

/// Deterministically generate 5 dice for the given event key.
pub fn roll5(key: EventKey) -> [u8; 5] {
    let mut state = mix_seed(key);
    let mut out = [0u8; 5];
    for o in &mut out {
        let r = splitmix64_next(&mut state);
        *o = ((r % 6) + 1) as u8;
    }
    out
}

/// How dice are generated.
pub enum ChanceMode {
    Rng { rng: Box<ChaCha8Rng> },
    DeterministicEventKeyed { episode_seed: u64 },
    Scripted { faces: Vec<u8>, pos: usize },
}

impl ChanceMode {
    /// PRNG mode; `None` seeds from OS randomness.
    pub fn rng(seed: Option<u64>) -> Self {
        let seed = seed.unwrap_or_else(rand::random);
        ChanceMode::Rng {
            rng: Box::new(ChaCha8Rng::seed_from_u64(seed)),
        }
    }

    pub fn deterministic(episode_seed: u64) -> Self {
        ChanceMode::DeterministicEventKeyed { episode_seed }
    }

    /// Cycle through `faces` forever.
    ///
    /// # Panics
    /// Panics if `faces` is empty or contains a value outside 1..=6.
    pub fn scripted(faces: impl Into<Vec<u8>>) -> Self {
        let faces = faces.into();
        assert!(!faces.is_empty(), "scripted dice need at least one face");
        assert!(
            faces.iter().all(|f| (1..=6).contains(f)),
            "scripted faces must be in 1..=6: {:?}",
            faces
        );
        ChanceMode::Scripted { faces, pos: 0 }
    }

    /// Produce `n` (<= 5) fresh faces for the event `key`.
    ///
    /// The key is only consulted in deterministic mode.
    pub fn draw(&mut self, n: usize, key: EventKey) -> [u8; 5] {
        debug_assert!(n <= 5);
        let mut out = [0u8; 5];
        match self {
            ChanceMode::Rng { rng } => {
                for o in out.iter_mut().take(n) {
                    *o = rng.gen_range(1..=6);
                }
            }
            ChanceMode::DeterministicEventKeyed { episode_seed } => {
                let draws = roll5(EventKey {
                    episode_seed: *episode_seed,
                    ..key
                });
                out[..n].copy_from_slice(&draws[..n]);
            }
            ChanceMode::Scripted { faces, pos } => {
                for o in out.iter_mut().take(n) {
                    *o = faces[*pos % faces.len()];
                    *pos = (*pos + 1) % faces.len();
                }
            }
        }
        out
    }
}

impl std::fmt::Debug for ChanceMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChanceMode::Rng { .. } => f.write_str("Rng"),
            ChanceMode::DeterministicEventKeyed { episode_seed } => f
                .debug_struct("DeterministicEventKeyed")
                .field("episode_seed", episode_seed)
                .finish(),
            ChanceMode::Scripted { faces, pos } => f
                .debug_struct("Scripted")
                .field("faces", faces)
                .field("pos", pos)
                .finish(),
        }
    }
}
