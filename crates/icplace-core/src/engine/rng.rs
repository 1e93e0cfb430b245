use rand::{Error as RandError, RngCore};

const MBIG: i64 = 1_000_000_000;
const MSEED: i64 = 161_803_398;
const MZ: i64 = 0;

/// Seed used by the placement workflow when none is configured.
pub const DEFAULT_SEED: i32 = -873;

/// The classical additive lagged-Fibonacci generator ("ran3").
///
/// The generator carries its own state; construct one per run and pass it by
/// mutable reference. Output of [`next_f64`](Self::next_f64) is uniform in
/// [0, 1) with roughly 30 bits of resolution.
///
/// `Ran3` also implements [`rand::RngCore`], so every sampling seam in this
/// crate is written against `rand::Rng` and any other generator can be
/// substituted; exact sequence reproduction is not part of the contract.
#[derive(Debug, Clone)]
pub struct Ran3 {
    ma: [i64; 56],
    inext: usize,
    inextp: usize,
}

impl Ran3 {
    pub fn new(seed: i32) -> Self {
        let mut ma = [0i64; 56];

        let mut mj = (MSEED - i64::from(seed).abs()).rem_euclid(MBIG);
        ma[55] = mj;
        let mut mk: i64 = 1;
        for i in 1..=54 {
            let ii = (21 * i) % 55;
            ma[ii] = mk;
            mk = mj - mk;
            if mk < MZ {
                mk += MBIG;
            }
            mj = ma[ii];
        }

        // Four warm-up passes scramble the seeded table.
        for _ in 0..4 {
            for i in 1..=55 {
                ma[i] -= ma[1 + (i + 30) % 55];
                if ma[i] < MZ {
                    ma[i] += MBIG;
                }
            }
        }

        Self {
            ma,
            inext: 0,
            inextp: 31,
        }
    }

    fn step(&mut self) -> i64 {
        self.inext += 1;
        if self.inext == 56 {
            self.inext = 1;
        }
        self.inextp += 1;
        if self.inextp == 56 {
            self.inextp = 1;
        }

        let mut mj = self.ma[self.inext] - self.ma[self.inextp];
        if mj < MZ {
            mj += MBIG;
        }
        self.ma[self.inext] = mj;
        mj
    }

    /// Returns the next value, uniform in [0, 1).
    pub fn next_f64(&mut self) -> f64 {
        self.step() as f64 / MBIG as f64
    }
}

impl Default for Ran3 {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

impl RngCore for Ran3 {
    fn next_u32(&mut self) -> u32 {
        (self.next_f64() * 4_294_967_296.0) as u32
    }

    fn next_u64(&mut self) -> u64 {
        (u64::from(self.next_u32()) << 32) | u64::from(self.next_u32())
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(4) {
            let bytes = self.next_u32().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), RandError> {
        self.fill_bytes(dest);
        Ok(())
    }
}
