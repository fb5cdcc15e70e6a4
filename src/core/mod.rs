pub mod catalog;
pub mod chain;
pub mod indicator;
pub mod labels;
pub mod locale;
pub mod rules;
pub mod snapshot;
pub mod vocabulary;

pub use catalog::{ComparisonOption, IndicatorArg, IndicatorCatalog, IndicatorDefinition};
pub use chain::{ChainLink, ChainNode, NodeId, RuleChain};
pub use indicator::{ArgKey, CandleType, ComparisonKeyword, IndicatorKind};
pub use locale::Locale;
pub use rules::{
    BasicSettings, BotOperation, IndicatorSelection, IndicatorSlot, Position, RuleSet,
    TradeSetting,
};
pub use snapshot::{BuiltinVocabularyProvider, LocaleSnapshot, VocabularyProvider};
pub use vocabulary::{ComparisonVocabulary, KeywordLookup, VocabularyTable};
