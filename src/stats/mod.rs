//! Stats module - headline metrics and histograms

mod calculator;

pub use calculator::{HistogramBin, StatsCalculator, Summary, AGE_BINS};
