pub mod candles;
pub mod lookup;
pub mod orders;
pub mod series;
pub mod snapshot;
