//! Built-in display labels.
//!
//! Each keyword has exactly one label per locale and labels are unique within
//! a locale, so the tables stay invertible.

use super::{CandleType, ComparisonKeyword, IndicatorKind, Locale};

#[must_use]
pub fn comparison_label(keyword: ComparisonKeyword, locale: Locale) -> &'static str {
    use ComparisonKeyword as K;
    let [en, ko, ja, zh] = match keyword {
        K::None => ["no condition", "조건 없음", "条件なし", "无条件"],
        K::ConstantHigh => ["above constant", "상수 초과", "定数超過", "高于常数"],
        K::ConstantLow => ["below constant", "상수 미만", "定数未満", "低于常数"],
        K::CrossedAboveConstant => [
            "crossed above constant",
            "상수 상향 돌파",
            "定数を上抜け",
            "向上突破常数",
        ],
        K::CrossedBelowConstant => [
            "crossed below constant",
            "상수 하향 돌파",
            "定数を下抜け",
            "向下跌破常数",
        ],
        K::SurpassedUpperLine => [
            "upper line surpassed",
            "상단선 돌파",
            "上限線を突破",
            "突破上轨",
        ],
        K::SurpassedLowerLine => [
            "lower line surpassed",
            "하단선 이탈",
            "下限線を割り込み",
            "跌破下轨",
        ],
        K::ReturnedInsideUpper => [
            "returned below upper line",
            "상단선 안으로 복귀",
            "上限線内に回帰",
            "回落至上轨内",
        ],
        K::ReturnedInsideLower => [
            "returned above lower line",
            "하단선 안으로 복귀",
            "下限線内に回帰",
            "回升至下轨内",
        ],
        K::PriceAbove => ["price above line", "가격이 선 위", "価格がライン上", "价格在线上方"],
        K::PriceBelow => [
            "price below line",
            "가격이 선 아래",
            "価格がライン下",
            "价格在线下方",
        ],
        K::PriceCrossedAbove => [
            "price crossed above line",
            "가격 상향 돌파",
            "価格が上抜け",
            "价格向上穿越",
        ],
        K::PriceCrossedBelow => [
            "price crossed below line",
            "가격 하향 돌파",
            "価格が下抜け",
            "价格向下穿越",
        ],
        K::GoldenCross => ["golden cross", "골든 크로스", "ゴールデンクロス", "金叉"],
        K::DeadCross => ["dead cross", "데드 크로스", "デッドクロス", "死叉"],
        K::HistogramPositive => [
            "histogram positive",
            "히스토그램 양수",
            "ヒストグラムがプラス",
            "柱状图为正",
        ],
        K::HistogramNegative => [
            "histogram negative",
            "히스토그램 음수",
            "ヒストグラムがマイナス",
            "柱状图为负",
        ],
        K::TrendUp => ["uptrend", "상승 추세", "上昇トレンド", "上升趋势"],
        K::TrendDown => ["downtrend", "하락 추세", "下降トレンド", "下降趋势"],
        K::TrendTurnedUp => ["trend turned up", "상승 전환", "上昇転換", "转为上升"],
        K::TrendTurnedDown => ["trend turned down", "하락 전환", "下降転換", "转为下降"],
        K::PriceAboveCloud => [
            "price above cloud",
            "가격이 구름대 위",
            "価格が雲の上",
            "价格在云上方",
        ],
        K::PriceBelowCloud => [
            "price below cloud",
            "가격이 구름대 아래",
            "価格が雲の下",
            "价格在云下方",
        ],
        K::DiGoldenCross => [
            "+DI crossed above -DI",
            "+DI 상향 교차",
            "+DIが-DIを上抜け",
            "+DI上穿-DI",
        ],
        K::DiDeadCross => [
            "+DI crossed below -DI",
            "+DI 하향 교차",
            "+DIが-DIを下抜け",
            "+DI下穿-DI",
        ],
    };
    pick(locale, en, ko, ja, zh)
}

#[must_use]
pub fn candle_label(candle: CandleType, locale: Locale) -> &'static str {
    let [en, ko, ja, zh] = match candle {
        CandleType::Last => ["last", "현재가", "現在値", "最新价"],
        CandleType::Open => ["open", "시가", "始値", "开盘价"],
        CandleType::High => ["high", "고가", "高値", "最高价"],
        CandleType::Low => ["low", "저가", "安値", "最低价"],
    };
    pick(locale, en, ko, ja, zh)
}

#[must_use]
pub fn indicator_label(kind: IndicatorKind, locale: Locale) -> &'static str {
    match kind {
        IndicatorKind::None => pick(locale, "None", "없음", "なし", "无"),
        IndicatorKind::BollingerBands => pick(
            locale,
            "Bollinger Bands",
            "볼린저 밴드",
            "ボリンジャーバンド",
            "布林带",
        ),
        IndicatorKind::Ichimoku => pick(
            locale,
            "Ichimoku Cloud",
            "일목균형표",
            "一目均衡表",
            "一目均衡表",
        ),
        IndicatorKind::Ema => "EMA",
        IndicatorKind::Sma => "SMA",
        IndicatorKind::Rsi => "RSI",
        IndicatorKind::Mfi => "MFI",
        IndicatorKind::Macd => "MACD",
        IndicatorKind::Supertrend => "Supertrend",
        IndicatorKind::StochasticRsi => "Stochastic RSI",
        IndicatorKind::Stochastic => "Stochastic",
        IndicatorKind::Cci => "CCI",
        IndicatorKind::WilliamsR => "Williams %R",
        IndicatorKind::Adx => "ADX",
        IndicatorKind::ParabolicSar => "Parabolic SAR",
    }
}

fn pick(
    locale: Locale,
    en: &'static str,
    ko: &'static str,
    ja: &'static str,
    zh: &'static str,
) -> &'static str {
    match locale {
        Locale::En => en,
        Locale::Ko => ko,
        Locale::Ja => ja,
        Locale::Zh => zh,
    }
}
