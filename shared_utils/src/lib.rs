//! Small helpers shared by the quote feed and the market board.

pub mod env;
