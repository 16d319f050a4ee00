//! Analysis engine
//!
//! Pure price indicators plus the flip engine that feeds them market data

pub mod analysis_engine;
pub mod indicators;
pub mod result;

pub use analysis_engine::FlipEngine;
pub use result::{AnalysisResult, FlipPick, TradeAnalysis};
