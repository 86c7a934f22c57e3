use std::fmt;
use std::fmt::{Display, Formatter};

use chrono::NaiveDateTime;
use serde::Serialize;

pub mod content_store;
pub mod markdown_renderer;
pub mod parsing_utils;

#[derive(Debug, Clone, Eq, Hash, PartialEq, Serialize)]
pub struct PostId(pub String);

impl Display for PostId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An article as loaded at startup. Never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub excerpt: String,
    /// Raw markdown, title heading included.
    pub content: String,
    pub author: String,
    pub published_at: NaiveDateTime,
    pub read_time: u32,
    pub tags: Vec<String>,
    pub image_url: String,
}

impl Display for Post {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "id={}, date={}, author={}, tags=[{}]\ntitle={}",
               self.id,
               self.published_at,
               self.author,
               self.tags.join(", "),
               self.title,
        )
    }
}
