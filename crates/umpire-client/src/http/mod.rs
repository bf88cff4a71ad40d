mod client;

pub use client::{HttpRulesClient, HttpRulesClientBuilder};
