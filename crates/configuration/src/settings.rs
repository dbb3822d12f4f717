use crate::error::ConfigError;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub recommendation: RecommendationRules,
    #[serde(default)]
    pub display: DisplaySettings,
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.recommendation.validate()
    }
}

/// The fixed rule table used to turn the latest year's metrics into a lending
/// recommendation. Every comparison is inclusive (`>=`).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RecommendationRules {
    /// DSCR ladder: strong / adequate / marginal.
    pub debt_service: ThresholdLadder,
    /// Current ratio ladder: strong / adequate / tight.
    pub liquidity: ThresholdLadder,
    /// ROE (%) ladder: excellent / good / average.
    pub profitability: ThresholdLadder,
    /// Minimums that must all hold for a "strong candidate".
    pub strong_candidate: CandidateFloor,
    /// Minimums that must all hold for an "acceptable candidate".
    pub acceptable_candidate: CandidateFloor,
}

/// Three descending cut-offs splitting a metric into four bands.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct ThresholdLadder {
    pub top: Decimal,
    pub middle: Decimal,
    pub bottom: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct CandidateFloor {
    pub min_dscr: Decimal,
    pub min_current_ratio: Decimal,
    /// Return on equity, in percent.
    pub min_roe_pct: Decimal,
}

/// Terminal rendering options for the driver.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    /// Decimal places shown for every table cell.
    pub decimal_places: u32,
}

// --- Default Implementations ---
// These are the published lending thresholds. A `config.toml` only needs to
// mention the sections it changes.

impl Default for RecommendationRules {
    fn default() -> Self {
        Self {
            debt_service: ThresholdLadder {
                top: dec!(1.5),
                middle: dec!(1.25),
                bottom: dec!(1.1),
            },
            liquidity: ThresholdLadder {
                top: dec!(2.0),
                middle: dec!(1.5),
                bottom: dec!(1.0),
            },
            profitability: ThresholdLadder {
                top: dec!(20),
                middle: dec!(15),
                bottom: dec!(10),
            },
            strong_candidate: CandidateFloor {
                min_dscr: dec!(1.25),
                min_current_ratio: dec!(1.5),
                min_roe_pct: dec!(12),
            },
            acceptable_candidate: CandidateFloor {
                min_dscr: dec!(1.1),
                min_current_ratio: dec!(1.0),
                min_roe_pct: dec!(8),
            },
        }
    }
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self { decimal_places: 2 }
    }
}

impl RecommendationRules {
    /// Rejects ladders that are not strictly descending and candidate tiers
    /// where "acceptable" is stricter than "strong".
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, ladder) in [
            ("debt_service", &self.debt_service),
            ("liquidity", &self.liquidity),
            ("profitability", &self.profitability),
        ] {
            if !(ladder.top > ladder.middle && ladder.middle > ladder.bottom) {
                return Err(ConfigError::ValidationError(format!(
                    "recommendation.{name} thresholds must be strictly descending (got {}, {}, {})",
                    ladder.top, ladder.middle, ladder.bottom
                )));
            }
        }

        let strong = &self.strong_candidate;
        let acceptable = &self.acceptable_candidate;
        if acceptable.min_dscr > strong.min_dscr
            || acceptable.min_current_ratio > strong.min_current_ratio
            || acceptable.min_roe_pct > strong.min_roe_pct
        {
            return Err(ConfigError::ValidationError(
                "recommendation.acceptable_candidate must not be stricter than strong_candidate"
                    .to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn rejects_non_descending_ladder() {
        let mut rules = RecommendationRules::default();
        rules.liquidity.middle = dec!(2.0);
        let err = rules.validate().unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(msg) if msg.contains("liquidity")));
    }

    #[test]
    fn rejects_acceptable_tier_stricter_than_strong() {
        let mut rules = RecommendationRules::default();
        rules.acceptable_candidate.min_roe_pct = dec!(13);
        assert!(rules.validate().is_err());
    }
}
