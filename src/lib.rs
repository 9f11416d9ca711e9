//! Adapter between a serverless API gateway's event envelope and an
//! in-process HTTP application, run as a Lambda-style function.

pub mod app;
pub mod config;
pub mod gateway;
pub mod handler;
pub mod models;
pub mod utils;
