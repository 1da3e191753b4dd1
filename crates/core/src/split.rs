//! Train/validation/test split assignment

use crate::{CoreError, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Mutex;

/// The dataset split an example belongs to
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Split {
    Train,
    Validation,
    Test,
}

impl Split {
    pub const ALL: [Split; 3] = [Split::Train, Split::Validation, Split::Test];

    pub fn as_str(&self) -> &'static str {
        match self {
            Split::Train => "train",
            Split::Validation => "validation",
            Split::Test => "test",
        }
    }
}

impl std::fmt::Display for Split {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Percentage weights for the three splits, summing to 100
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(try_from = "(u32, u32, u32)", into = "(u32, u32, u32)")]
pub struct SplitRatios {
    train: u32,
    validation: u32,
    test: u32,
}

impl SplitRatios {
    pub fn new(train: u32, validation: u32, test: u32) -> Result<Self> {
        if u64::from(train) + u64::from(validation) + u64::from(test) != 100 {
            return Err(CoreError::InvalidSplitRatios {
                train,
                validation,
                test,
            });
        }
        Ok(Self {
            train,
            validation,
            test,
        })
    }

    pub fn train(&self) -> u32 {
        self.train
    }

    pub fn validation(&self) -> u32 {
        self.validation
    }

    pub fn test(&self) -> u32 {
        self.test
    }

    /// Map a roll in `0..100` onto a split
    pub fn split_for(&self, roll: u32) -> Split {
        if roll < self.train {
            Split::Train
        } else if roll < self.train + self.validation {
            Split::Validation
        } else {
            Split::Test
        }
    }
}

impl Default for SplitRatios {
    fn default() -> Self {
        Self {
            train: 80,
            validation: 10,
            test: 10,
        }
    }
}

impl TryFrom<(u32, u32, u32)> for SplitRatios {
    type Error = CoreError;

    fn try_from((train, validation, test): (u32, u32, u32)) -> Result<Self> {
        Self::new(train, validation, test)
    }
}

impl From<SplitRatios> for (u32, u32, u32) {
    fn from(ratios: SplitRatios) -> Self {
        (ratios.train, ratios.validation, ratios.test)
    }
}

/// Parses `"80,10,10"` (also accepts `/` or `:` as separators)
impl FromStr for SplitRatios {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s.split([',', '/', ':']).map(str::trim).collect();
        let [train, validation, test] = parts.as_slice() else {
            return Err(CoreError::Config(format!(
                "expected three split weights like 80,10,10, got '{s}'"
            )));
        };
        let parse = |p: &str| {
            p.parse::<u32>()
                .map_err(|_| CoreError::Config(format!("invalid split weight '{p}'")))
        };
        Self::new(parse(*train)?, parse(*validation)?, parse(*test)?)
    }
}

impl std::fmt::Display for SplitRatios {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{},{}", self.train, self.validation, self.test)
    }
}

/// Something that hands out one split per call
pub trait SplitSource: Send + Sync {
    fn next_split(&self) -> Split;
}

/// Independent weighted draws from a seeded generator
///
/// The generator sits behind a mutex, so one instance can be shared by
/// workers; draws are reproducible only if callers draw in a fixed order.
pub struct RandomSplitter {
    ratios: SplitRatios,
    rng: Mutex<StdRng>,
}

impl RandomSplitter {
    pub fn new(ratios: SplitRatios, seed: u64) -> Self {
        Self {
            ratios,
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    pub fn ratios(&self) -> SplitRatios {
        self.ratios
    }
}

impl SplitSource for RandomSplitter {
    fn next_split(&self) -> Split {
        let roll = {
            let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
            rng.gen_range(0..100)
        };
        self.ratios.split_for(roll)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ratios_must_sum_to_100() {
        assert!(SplitRatios::new(80, 10, 10).is_ok());
        assert!(matches!(
            SplitRatios::new(80, 10, 5),
            Err(CoreError::InvalidSplitRatios { test: 5, .. })
        ));
    }

    #[test]
    fn test_parse_ratios() {
        let ratios: SplitRatios = "70, 20, 10".parse().unwrap();
        assert_eq!((ratios.train(), ratios.validation(), ratios.test()), (70, 20, 10));
        assert_eq!(ratios.to_string(), "70,20,10");

        assert!("80,20".parse::<SplitRatios>().is_err());
        assert!("80,x,10".parse::<SplitRatios>().is_err());
        assert!("50/25/25".parse::<SplitRatios>().is_ok());
    }

    #[test]
    fn test_split_boundaries() {
        let ratios = SplitRatios::default();

        assert_eq!(ratios.split_for(0), Split::Train);
        assert_eq!(ratios.split_for(79), Split::Train);
        assert_eq!(ratios.split_for(80), Split::Validation);
        assert_eq!(ratios.split_for(89), Split::Validation);
        assert_eq!(ratios.split_for(90), Split::Test);
        assert_eq!(ratios.split_for(99), Split::Test);
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let a = RandomSplitter::new(SplitRatios::default(), 42);
        let b = RandomSplitter::new(SplitRatios::default(), 42);

        let first: Vec<Split> = (0..200).map(|_| a.next_split()).collect();
        let second: Vec<Split> = (0..200).map(|_| b.next_split()).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_degenerate_ratios() {
        let all_test = RandomSplitter::new(SplitRatios::new(0, 0, 100).unwrap(), 7);
        assert!((0..50).all(|_| all_test.next_split() == Split::Test));

        let all_train = RandomSplitter::new(SplitRatios::new(100, 0, 0).unwrap(), 7);
        assert!((0..50).all(|_| all_train.next_split() == Split::Train));
    }

    #[test]
    fn test_draws_cover_all_splits() {
        let splitter = RandomSplitter::new(SplitRatios::new(34, 33, 33).unwrap(), 0);
        let draws: Vec<Split> = (0..1000).map(|_| splitter.next_split()).collect();

        for split in Split::ALL {
            assert!(draws.contains(&split), "never drew {split}");
        }
    }

    #[test]
    fn test_ratios_serde() {
        let json = serde_json::to_string(&SplitRatios::default()).unwrap();
        assert_eq!(json, "[80,10,10]");
        assert!(serde_json::from_str::<SplitRatios>("[50,50,50]").is_err());
    }
}
