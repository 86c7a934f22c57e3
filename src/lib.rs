pub mod config;
pub mod logger;
pub mod server;
pub mod content;
pub mod comments;
pub mod search;
pub mod related;
pub mod toc;
pub mod subscribe;
pub mod post_render;
mod ad_slot;
mod content_cache;
mod page_processor;
mod query_string;
mod text_utils;
mod view;
mod test_data;
