pub mod api_client;
pub mod api_utils;
pub mod components;
pub mod config;
pub mod icons;
pub mod outside_click;
pub mod selector_chain;
