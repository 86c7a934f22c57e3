use std::collections::HashMap;
use std::io;
use std::io::ErrorKind;

use spdlog::debug;

use crate::content::parsing_utils::parse_post;
use crate::content::{Post, PostId};

/// Articles compiled into the binary, in feed order.
const POST_SOURCES: &[(&str, &str)] = &[
    ("1_getting_started_with_react_and_typescript.md",
     include_str!("../../content/posts/1_getting_started_with_react_and_typescript.md")),
    ("2_modern_css_techniques_for_2024.md",
     include_str!("../../content/posts/2_modern_css_techniques_for_2024.md")),
    ("3_building_scalable_node_js_applications.md",
     include_str!("../../content/posts/3_building_scalable_node_js_applications.md")),
];

pub struct ContentStore {
    posts: Vec<Post>,
    by_id: HashMap<PostId, usize>,
}

impl ContentStore {
    pub fn load() -> io::Result<ContentStore> {
        Self::from_sources(POST_SOURCES)
    }

    pub fn from_sources(sources: &[(&str, &str)]) -> io::Result<ContentStore> {
        let mut posts = Vec::with_capacity(sources.len());
        for (source_name, raw_content) in sources {
            let post = parse_post(source_name, raw_content)?;
            debug!("Post: {}", post);
            posts.push(post);
        }
        Self::from_posts(posts)
    }

    pub fn from_posts(posts: Vec<Post>) -> io::Result<ContentStore> {
        let mut by_id = HashMap::with_capacity(posts.len());
        for (i, post) in posts.iter().enumerate() {
            if by_id.insert(post.id.clone(), i).is_some() {
                return Err(io::Error::new(ErrorKind::InvalidData, format!("Duplicated post id {}", post.id)));
            }
        }

        Ok(ContentStore {
            posts,
            by_id,
        })
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn get(&self, id: &str) -> Option<&Post> {
        self.by_id.get(&PostId(id.to_string()))
            .map(|&i| &self.posts[i])
    }

    /// The first post of the feed is the featured one.
    pub fn featured(&self) -> Option<&Post> {
        self.posts.first()
    }

    pub fn recent(&self) -> &[Post] {
        self.posts.get(1..).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use crate::test_data::{sample_post, POST_DATA_MD};

    use super::*;

    #[test]
    fn test_load_embedded() -> io::Result<()> {
        let store = ContentStore::load()?;
        assert_eq!(store.len(), 3);

        let ids: Vec<&str> = store.posts().iter().map(|p| p.id.0.as_str()).collect();
        assert_eq!(ids, ["1", "2", "3"]);

        let post = store.get("2").unwrap();
        assert_eq!(post.title, "Modern CSS Techniques for 2024");
        assert_eq!(post.author, "Jane Smith");
        assert_eq!(post.tags, ["CSS", "Web Design", "Frontend"]);
        assert_eq!(post.read_time, 6);
        Ok(())
    }

    #[test]
    fn test_featured_and_recent() -> io::Result<()> {
        let store = ContentStore::load()?;
        assert_eq!(store.featured().unwrap().id.0, "1");
        let recent: Vec<&str> = store.recent().iter().map(|p| p.id.0.as_str()).collect();
        assert_eq!(recent, ["2", "3"]);

        let empty = ContentStore::from_posts(vec![])?;
        assert!(empty.featured().is_none());
        assert!(empty.recent().is_empty());
        Ok(())
    }

    #[test]
    fn test_unknown_id() -> io::Result<()> {
        let store = ContentStore::from_sources(&[("fast.md", POST_DATA_MD)])?;
        assert!(store.get("42").is_some());
        assert!(store.get("404").is_none());
        Ok(())
    }

    #[test]
    fn test_duplicated_id() {
        let posts = vec![sample_post("1", "A", &[]), sample_post("1", "B", &[])];
        let err = ContentStore::from_posts(posts).err().unwrap();
        assert_eq!(err.kind(), ErrorKind::InvalidData);
    }
}
