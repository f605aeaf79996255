use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use rand_xoshiro::Xoshiro256PlusPlus;
use session_dice::{format_breakdown, parse, roll, DiceLimits, DiceSpec};
use std::{convert::TryFrom, error::Error};

fn fresh_rng(master: &mut ChaCha20Rng) -> Xoshiro256PlusPlus {
    let mut seed: <Xoshiro256PlusPlus as SeedableRng>::Seed = Default::default();
    master.fill(&mut seed);
    Xoshiro256PlusPlus::from_seed(seed)
}

/// Counts per value in `[min, max]`. The first entry holds `min` itself.
struct Histogram {
    min: i64,
    data: Vec<i64>,
}

impl Histogram {
    fn new(min: i64, max: i64) -> Result<Histogram, Box<dyn Error>> {
        let mut data = vec![0; usize::try_from(max - min + 2)?];
        data[0] = min;
        Ok(Histogram { min, data })
    }

    fn count(&mut self, value: i64) -> Result<(), Box<dyn Error>> {
        let bucket = self
            .data
            .get_mut(usize::try_from(value - self.min + 1)?)
            .ok_or_else(|| format!("{} is out of range", value))?;
        *bucket += 1;
        Ok(())
    }
}

fn histograms(spec: &DiceSpec, num: u32) -> Result<(), Box<dyn Error>> {
    let mut master_rng = ChaCha20Rng::from_entropy();
    let mut results = Histogram::new(spec.min(), spec.max())?;
    let mut throws = Histogram::new(1, i64::from(spec.sides()))?;

    for _ in 0..num {
        let result = roll(spec, &mut fresh_rng(&mut master_rng))?;
        results.count(result.kept_sum)?;
        for face in result.all_rolls.iter() {
            throws.count(i64::from(*face))?;
        }
    }

    npy::to_file("throws.npy", throws.data)?;
    npy::to_file("rolls.npy", results.data)?;
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    let mut args = std::env::args().skip(1);
    let expr = args
        .next()
        .ok_or("usage: roll-cmd <expression> [number of rolls]")?;
    let spec = parse(&expr)?;
    match args.next() {
        None => {
            let result = roll(&spec, &mut fresh_rng(&mut ChaCha20Rng::from_entropy()))?;
            println!(
                "{}",
                serde_json::to_string_pretty(&format_breakdown(&spec, &result))?
            );
            Ok(())
        }
        Some(num) => histograms(&spec, num.parse()?),
    }
}
