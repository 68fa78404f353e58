//! HR Analytics Dashboard - CSV aggregation served as an interactive web page
//!
//! Loads the HR dataset once, then recomputes counts, cross tabulations and
//! key metrics for every page request and renders them as SVG charts.

pub mod charts;
pub mod data;
pub mod stats;
pub mod web;
