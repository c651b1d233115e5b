pub mod candle;
pub mod interval;
pub mod symbol;

pub use candle::{Candle, CandleTable, ColumnLayout};
pub use interval::Interval;
pub use symbol::SymbolPair;
