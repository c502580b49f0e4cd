pub mod bar;
pub mod bar_series;
pub mod display;
pub mod quote;
pub mod timeframe;
