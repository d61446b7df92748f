use serde::{Deserialize, Serialize};

use crate::calculator::PaymentCalculator;
use crate::decimal::Money;
use crate::discount::DiscountPolicy;
use crate::errors::{LockerError, Result};
use crate::validation::PaymentValidator;

/// pricing configuration for a locker bank
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingConfig {
    pub monthly_fee: Money,
    #[serde(default)]
    pub discount_policy: DiscountPolicy,
    #[serde(default = "default_min_months")]
    pub min_months: i32,
    #[serde(default = "default_max_months")]
    pub max_months: i32,
    /// rentals ending within this many days are flagged as expiring soon
    #[serde(default = "default_expiring_soon_days")]
    pub expiring_soon_days: i64,
}

fn default_min_months() -> i32 {
    1
}

fn default_max_months() -> i32 {
    12
}

fn default_expiring_soon_days() -> i64 {
    7
}

impl PricingConfig {
    /// standard tiers, 1..=12 months, 7-day expiry warning
    pub fn standard(monthly_fee: Money) -> Self {
        Self {
            monthly_fee,
            discount_policy: DiscountPolicy::standard(),
            min_months: default_min_months(),
            max_months: default_max_months(),
            expiring_soon_days: default_expiring_soon_days(),
        }
    }

    /// flat pricing, no duration discounts
    pub fn flat(monthly_fee: Money) -> Self {
        Self {
            discount_policy: DiscountPolicy::none(),
            ..Self::standard(monthly_fee)
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.monthly_fee.is_negative() {
            return Err(LockerError::InvalidMonthlyFee {
                fee: self.monthly_fee,
            });
        }
        if self.min_months < 1 {
            return Err(LockerError::InvalidConfiguration {
                message: format!("min_months must be at least 1, got {}", self.min_months),
            });
        }
        if self.min_months > self.max_months {
            return Err(LockerError::InvalidConfiguration {
                message: format!(
                    "min_months {} exceeds max_months {}",
                    self.min_months, self.max_months
                ),
            });
        }
        if self.expiring_soon_days < 0 {
            return Err(LockerError::InvalidConfiguration {
                message: "expiring_soon_days cannot be negative".to_string(),
            });
        }
        Ok(())
    }

    /// parse and validate a json config
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn calculator(&self) -> PaymentCalculator {
        PaymentCalculator::new(self.discount_policy.clone())
    }

    pub fn validator(&self) -> PaymentValidator {
        PaymentValidator::new(self.min_months, self.max_months)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decimal::Rate;

    #[test]
    fn test_standard_config() {
        let config = PricingConfig::standard(Money::from_major(50_000));
        assert!(config.validate().is_ok());
        assert_eq!(config.validator(), PaymentValidator::default());
        assert_eq!(config.calculator().policy().resolve(6), Rate::from_percentage(10));
    }

    #[test]
    fn test_flat_config() {
        let config = PricingConfig::flat(Money::from_major(50_000));
        assert_eq!(config.calculator().policy().resolve(12), Rate::ZERO);
    }

    #[test]
    fn test_json_defaults() {
        let config = PricingConfig::from_json(r#"{ "monthly_fee": "45000" }"#).unwrap();
        assert_eq!(config, PricingConfig::standard(Money::from_major(45_000)));
    }

    #[test]
    fn test_json_round_trip_with_custom_tiers() {
        let json = r#"{
            "monthly_fee": "30000",
            "discount_policy": [
                { "min_months": 6, "rate": "12" },
                { "min_months": 2, "rate": "4" }
            ],
            "min_months": 2,
            "max_months": 6,
            "expiring_soon_days": 3
        }"#;
        let config = PricingConfig::from_json(json).unwrap();
        assert_eq!(config.calculator().policy().resolve(3), Rate::from_percentage(4));
        assert_eq!(config.validator(), PaymentValidator::new(2, 6));

        let pretty = config.to_json_pretty().unwrap();
        assert_eq!(PricingConfig::from_json(&pretty).unwrap(), config);
    }

    #[test]
    fn test_invalid_configs() {
        let mut config = PricingConfig::standard(Money::from_major(50_000));
        config.min_months = 6;
        config.max_months = 3;
        assert!(matches!(config.validate(), Err(LockerError::InvalidConfiguration { .. })));

        let config = PricingConfig::standard(Money::from_major(-1));
        assert!(matches!(config.validate(), Err(LockerError::InvalidMonthlyFee { .. })));

        assert!(matches!(
            PricingConfig::from_json("{ not json"),
            Err(LockerError::Serialization(_))
        ));
        assert!(PricingConfig::from_json(r#"{ "monthly_fee": "1", "min_months": 0 }"#).is_err());
    }
}
