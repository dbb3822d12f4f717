use configuration::ThresholdLadder;
use core_types::MetricValue;
use serde::Serialize;
use std::fmt;

/// Where a value falls on a three-step ladder: 0 clears `top`, 3 clears nothing.
fn band(value: MetricValue, ladder: &ThresholdLadder) -> u8 {
    if value.at_least(ladder.top) {
        0
    } else if value.at_least(ladder.middle) {
        1
    } else if value.at_least(ladder.bottom) {
        2
    } else {
        3
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DebtServiceRating {
    Strong,
    Adequate,
    Marginal,
    Weak,
}

impl DebtServiceRating {
    pub fn rate(dscr: MetricValue, ladder: &ThresholdLadder) -> Self {
        match band(dscr, ladder) {
            0 => Self::Strong,
            1 => Self::Adequate,
            2 => Self::Marginal,
            _ => Self::Weak,
        }
    }

    pub fn commentary(&self) -> &'static str {
        match self {
            Self::Strong => "Strong debt service capacity",
            Self::Adequate => "Adequate debt service capacity",
            Self::Marginal => "Marginal debt service capacity",
            Self::Weak => "Weak debt service capacity - high risk",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LiquidityRating {
    Strong,
    Adequate,
    Tight,
    Concern,
}

impl LiquidityRating {
    pub fn rate(current_ratio: MetricValue, ladder: &ThresholdLadder) -> Self {
        match band(current_ratio, ladder) {
            0 => Self::Strong,
            1 => Self::Adequate,
            2 => Self::Tight,
            _ => Self::Concern,
        }
    }

    pub fn commentary(&self) -> &'static str {
        match self {
            Self::Strong => "Strong liquidity position",
            Self::Adequate => "Adequate liquidity",
            Self::Tight => "Tight liquidity - monitor closely",
            Self::Concern => "Liquidity concern - potential cash flow issues",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfitabilityRating {
    Excellent,
    Good,
    Average,
    BelowAverage,
}

impl ProfitabilityRating {
    pub fn rate(roe_pct: MetricValue, ladder: &ThresholdLadder) -> Self {
        match band(roe_pct, ladder) {
            0 => Self::Excellent,
            1 => Self::Good,
            2 => Self::Average,
            _ => Self::BelowAverage,
        }
    }

    pub fn commentary(&self) -> &'static str {
        match self {
            Self::Excellent => "Excellent profitability",
            Self::Good => "Good profitability",
            Self::Average => "Average profitability",
            Self::BelowAverage => "Below average profitability - review business model",
        }
    }
}

/// The overall lending verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskTier {
    StrongCandidate,
    AcceptableCandidate,
    CautionAdvised,
}

impl RiskTier {
    pub fn label(&self) -> &'static str {
        match self {
            Self::StrongCandidate => "strong candidate",
            Self::AcceptableCandidate => "acceptable candidate",
            Self::CautionAdvised => "caution advised",
        }
    }

    pub fn recommendation(&self) -> &'static str {
        match self {
            Self::StrongCandidate => "Strong candidate for lending - low risk profile",
            Self::AcceptableCandidate => "Acceptable candidate for lending - moderate risk profile",
            Self::CautionAdvised => {
                "Caution advised - higher risk profile, consider additional collateral or guarantees"
            }
        }
    }
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
