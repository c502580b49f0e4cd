pub mod market_hours;
pub mod spread;
