use serde::{Deserialize, Serialize};

/// Technical indicators a trading rule can be built from.
///
/// The wire identifier returned by [`IndicatorKind::value`] is stable across
/// locales and is what the backend matches on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum IndicatorKind {
    #[default]
    None,
    BollingerBands,
    Ema,
    Sma,
    Rsi,
    Mfi,
    Macd,
    Supertrend,
    StochasticRsi,
    Stochastic,
    Cci,
    WilliamsR,
    Adx,
    ParabolicSar,
    Ichimoku,
}

impl IndicatorKind {
    /// Catalog display order.
    pub const ALL: [IndicatorKind; 15] = [
        IndicatorKind::None,
        IndicatorKind::BollingerBands,
        IndicatorKind::Ema,
        IndicatorKind::Sma,
        IndicatorKind::Rsi,
        IndicatorKind::Mfi,
        IndicatorKind::Macd,
        IndicatorKind::Supertrend,
        IndicatorKind::StochasticRsi,
        IndicatorKind::Stochastic,
        IndicatorKind::Cci,
        IndicatorKind::WilliamsR,
        IndicatorKind::Adx,
        IndicatorKind::ParabolicSar,
        IndicatorKind::Ichimoku,
    ];

    #[must_use]
    pub fn value(self) -> &'static str {
        match self {
            Self::None => "None",
            Self::BollingerBands => "BollingerBands",
            Self::Ema => "EMA",
            Self::Sma => "SMA",
            Self::Rsi => "RSI",
            Self::Mfi => "MFI",
            Self::Macd => "MACD",
            Self::Supertrend => "Supertrend",
            Self::StochasticRsi => "StochasticRSI",
            Self::Stochastic => "Stochastic",
            Self::Cci => "CCI",
            Self::WilliamsR => "WilliamsR",
            Self::Adx => "ADX",
            Self::ParabolicSar => "ParabolicSAR",
            Self::Ichimoku => "Ichimoku",
        }
    }

    #[must_use]
    pub fn from_value(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.value() == value)
    }

    /// Ordered `(name, default)` argument pairs.
    #[must_use]
    pub fn arg_specs(self) -> &'static [(&'static str, &'static str)] {
        match self {
            Self::None => &[],
            Self::BollingerBands => &[("period", "20"), ("multiplier", "2")],
            Self::Ema => &[("period", "9")],
            Self::Sma => &[("period", "20")],
            Self::Rsi | Self::Mfi | Self::WilliamsR | Self::Adx => &[("period", "14")],
            Self::Cci => &[("period", "20")],
            Self::Macd => &[
                ("fast_period", "12"),
                ("slow_period", "26"),
                ("signal_period", "9"),
            ],
            Self::Supertrend => &[("period", "10"), ("multiplier", "3")],
            Self::StochasticRsi => &[
                ("rsi_period", "14"),
                ("stoch_period", "14"),
                ("k_smoothing", "3"),
                ("d_smoothing", "3"),
            ],
            Self::Stochastic => &[("k_period", "14"), ("k_smoothing", "3"), ("d_period", "3")],
            Self::ParabolicSar => &[("step", "0.02"), ("max_step", "0.2")],
            Self::Ichimoku => &[
                ("conversion_period", "9"),
                ("base_period", "26"),
                ("span_b_period", "52"),
            ],
        }
    }

    /// Comparison options valid for this indicator, first entry is the UI default.
    #[must_use]
    pub fn option_keywords(self) -> &'static [ComparisonKeyword] {
        use ComparisonKeyword as K;
        match self {
            Self::None => &[K::None],
            Self::BollingerBands => &[
                K::SurpassedUpperLine,
                K::SurpassedLowerLine,
                K::ReturnedInsideUpper,
                K::ReturnedInsideLower,
            ],
            Self::Ema | Self::Sma => &[
                K::PriceAbove,
                K::PriceBelow,
                K::PriceCrossedAbove,
                K::PriceCrossedBelow,
            ],
            Self::Rsi | Self::Mfi | Self::Cci | Self::WilliamsR => &[
                K::ConstantHigh,
                K::ConstantLow,
                K::CrossedAboveConstant,
                K::CrossedBelowConstant,
            ],
            Self::Macd => &[
                K::GoldenCross,
                K::DeadCross,
                K::HistogramPositive,
                K::HistogramNegative,
            ],
            Self::Supertrend | Self::ParabolicSar => &[
                K::TrendUp,
                K::TrendDown,
                K::TrendTurnedUp,
                K::TrendTurnedDown,
            ],
            Self::StochasticRsi | Self::Stochastic => &[
                K::GoldenCross,
                K::DeadCross,
                K::ConstantHigh,
                K::ConstantLow,
            ],
            Self::Adx => &[
                K::ConstantHigh,
                K::ConstantLow,
                K::DiGoldenCross,
                K::DiDeadCross,
            ],
            Self::Ichimoku => &[
                K::PriceAboveCloud,
                K::PriceBelowCloud,
                K::GoldenCross,
                K::DeadCross,
            ],
        }
    }

    /// Whether conditions on this indicator carry a numeric threshold.
    #[must_use]
    pub fn show_constant(self) -> bool {
        matches!(
            self,
            Self::Rsi
                | Self::Mfi
                | Self::Cci
                | Self::WilliamsR
                | Self::StochasticRsi
                | Self::Stochastic
                | Self::Adx
        )
    }
}

/// Locale-independent comparison keywords used on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonKeyword {
    None,
    ConstantHigh,
    ConstantLow,
    CrossedAboveConstant,
    CrossedBelowConstant,
    SurpassedUpperLine,
    SurpassedLowerLine,
    ReturnedInsideUpper,
    ReturnedInsideLower,
    PriceAbove,
    PriceBelow,
    PriceCrossedAbove,
    PriceCrossedBelow,
    GoldenCross,
    DeadCross,
    HistogramPositive,
    HistogramNegative,
    TrendUp,
    TrendDown,
    TrendTurnedUp,
    TrendTurnedDown,
    PriceAboveCloud,
    PriceBelowCloud,
    DiGoldenCross,
    DiDeadCross,
}

impl ComparisonKeyword {
    pub const ALL: [ComparisonKeyword; 25] = [
        ComparisonKeyword::None,
        ComparisonKeyword::ConstantHigh,
        ComparisonKeyword::ConstantLow,
        ComparisonKeyword::CrossedAboveConstant,
        ComparisonKeyword::CrossedBelowConstant,
        ComparisonKeyword::SurpassedUpperLine,
        ComparisonKeyword::SurpassedLowerLine,
        ComparisonKeyword::ReturnedInsideUpper,
        ComparisonKeyword::ReturnedInsideLower,
        ComparisonKeyword::PriceAbove,
        ComparisonKeyword::PriceBelow,
        ComparisonKeyword::PriceCrossedAbove,
        ComparisonKeyword::PriceCrossedBelow,
        ComparisonKeyword::GoldenCross,
        ComparisonKeyword::DeadCross,
        ComparisonKeyword::HistogramPositive,
        ComparisonKeyword::HistogramNegative,
        ComparisonKeyword::TrendUp,
        ComparisonKeyword::TrendDown,
        ComparisonKeyword::TrendTurnedUp,
        ComparisonKeyword::TrendTurnedDown,
        ComparisonKeyword::PriceAboveCloud,
        ComparisonKeyword::PriceBelowCloud,
        ComparisonKeyword::DiGoldenCross,
        ComparisonKeyword::DiDeadCross,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::ConstantHigh => "constant_high",
            Self::ConstantLow => "constant_low",
            Self::CrossedAboveConstant => "crossed_above_constant",
            Self::CrossedBelowConstant => "crossed_below_constant",
            Self::SurpassedUpperLine => "surpassed_upper_line",
            Self::SurpassedLowerLine => "surpassed_lower_line",
            Self::ReturnedInsideUpper => "returned_inside_upper",
            Self::ReturnedInsideLower => "returned_inside_lower",
            Self::PriceAbove => "price_above",
            Self::PriceBelow => "price_below",
            Self::PriceCrossedAbove => "price_crossed_above",
            Self::PriceCrossedBelow => "price_crossed_below",
            Self::GoldenCross => "golden_cross",
            Self::DeadCross => "dead_cross",
            Self::HistogramPositive => "histogram_positive",
            Self::HistogramNegative => "histogram_negative",
            Self::TrendUp => "trend_up",
            Self::TrendDown => "trend_down",
            Self::TrendTurnedUp => "trend_turned_up",
            Self::TrendTurnedDown => "trend_turned_down",
            Self::PriceAboveCloud => "price_above_cloud",
            Self::PriceBelowCloud => "price_below_cloud",
            Self::DiGoldenCross => "di_golden_cross",
            Self::DiDeadCross => "di_dead_cross",
        }
    }
}

/// Candle price a setting is evaluated on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CandleType {
    #[default]
    Last,
    Open,
    High,
    Low,
}

impl CandleType {
    pub const ALL: [CandleType; 4] = [
        CandleType::Last,
        CandleType::Open,
        CandleType::High,
        CandleType::Low,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Last => "last",
            Self::Open => "open",
            Self::High => "high",
            Self::Low => "low",
        }
    }
}

/// Zero-based argument position with its `argN` wire key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ArgKey(usize);

impl ArgKey {
    #[must_use]
    pub fn new(position: usize) -> Self {
        Self(position)
    }

    #[must_use]
    pub fn position(self) -> usize {
        self.0
    }

    #[must_use]
    pub fn wire_key(self) -> String {
        format!("arg{}", self.0 + 1)
    }

    /// Parses `arg1..argN`; `arg0`, `arg01`, `arg+1` and anything else is rejected.
    #[must_use]
    pub fn parse(key: &str) -> Option<Self> {
        let digits = key.strip_prefix("arg")?;
        let ordinal: usize = digits.parse().ok()?;
        if ordinal.to_string() != digits {
            return None;
        }
        ordinal.checked_sub(1).map(Self)
    }
}
