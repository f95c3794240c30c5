use soroban_sdk::{Env, Vec};

/// Source of uniform randomness for drawing.
///
/// `next_unit` returns a fraction of 2^64, the fixed-point form of a
/// uniform value in `[0, 1)`.
pub trait RandomSource {
    fn next_unit(&mut self) -> u64;
}

/// Randomness from the ledger PRNG of the current invocation.
pub struct LedgerRandom {
    env: Env,
}

impl LedgerRandom {
    pub fn new(env: &Env) -> Self {
        LedgerRandom { env: env.clone() }
    }
}

impl RandomSource for LedgerRandom {
    fn next_unit(&mut self) -> u64 {
        self.env.prng().gen::<u64>()
    }
}

/// `floor(random * len)`. `len` must be non-zero.
pub fn pick_index<R: RandomSource + ?Sized>(rng: &mut R, len: u32) -> u32 {
    ((u128::from(rng.next_unit()) * u128::from(len)) >> 64) as u32
}

/// In-place Fisher-Yates shuffle.
pub fn shuffle<R: RandomSource + ?Sized>(items: &mut Vec<u32>, rng: &mut R) {
    let mut i = items.len();
    while i > 1 {
        i -= 1;
        let j = pick_index(rng, i + 1);
        if j != i {
            let a = items.get_unchecked(i);
            let b = items.get_unchecked(j);
            items.set(i, b);
            items.set(j, a);
        }
    }
}
