pub mod aggregator;
pub mod analyzer;
pub mod cache;
pub mod calibration;
pub mod config;
pub mod demo;
pub mod error;
pub mod fetcher;
pub mod grouper;
pub mod models;
pub mod scoring;
