use serde::{Deserialize, Serialize};

use crate::decimal::Rate;
use crate::errors::{LockerError, Result};

/// a duration threshold and the discount it unlocks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscountTier {
    pub min_months: i32,
    pub rate: Rate,
}

impl DiscountTier {
    pub fn new(min_months: i32, rate_percent: u32) -> Self {
        Self {
            min_months,
            rate: Rate::from_percentage(rate_percent),
        }
    }
}

/// ordered discount tiers; exactly one tier (or none) applies
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<DiscountTier>", into = "Vec<DiscountTier>")]
pub struct DiscountPolicy {
    // ascending by min_months, scanned from the back
    tiers: Vec<DiscountTier>,
}

impl DiscountPolicy {
    /// build a policy from tiers in any order
    pub fn new(mut tiers: Vec<DiscountTier>) -> Result<Self> {
        tiers.sort_by_key(|t| t.min_months);

        for pair in tiers.windows(2) {
            if pair[0].min_months == pair[1].min_months {
                return Err(LockerError::InvalidConfiguration {
                    message: format!("duplicate discount tier for {} months", pair[0].min_months),
                });
            }
        }

        for tier in &tiers {
            let pct = tier.rate.as_percentage();
            if pct.is_sign_negative() || pct > rust_decimal::Decimal::ONE_HUNDRED {
                return Err(LockerError::InvalidConfiguration {
                    message: format!("discount rate {} out of range", tier.rate),
                });
            }
        }

        Ok(Self { tiers })
    }

    /// >=3 months 5%, >=6 months 10%, >=12 months 15%
    pub fn standard() -> Self {
        Self {
            tiers: vec![
                DiscountTier::new(3, 5),
                DiscountTier::new(6, 10),
                DiscountTier::new(12, 15),
            ],
        }
    }

    /// policy that never discounts
    pub fn none() -> Self {
        Self { tiers: Vec::new() }
    }

    pub fn tiers(&self) -> &[DiscountTier] {
        &self.tiers
    }

    /// tier matched by the duration, highest threshold first
    pub fn tier_for(&self, months: i32) -> Option<&DiscountTier> {
        self.tiers.iter().rev().find(|t| months >= t.min_months)
    }

    /// discount rate for the duration; zero when no tier matches
    pub fn resolve(&self, months: i32) -> Rate {
        self.tier_for(months).map(|t| t.rate).unwrap_or(Rate::ZERO)
    }
}

impl Default for DiscountPolicy {
    fn default() -> Self {
        Self::standard()
    }
}

impl TryFrom<Vec<DiscountTier>> for DiscountPolicy {
    type Error = LockerError;

    fn try_from(tiers: Vec<DiscountTier>) -> Result<Self> {
        DiscountPolicy::new(tiers)
    }
}

impl From<DiscountPolicy> for Vec<DiscountTier> {
    fn from(policy: DiscountPolicy) -> Self {
        policy.tiers
    }
}

/// discount rate under the standard tiers
pub fn resolve_discount_rate(months: i32) -> Rate {
    DiscountPolicy::standard().resolve(months)
}
