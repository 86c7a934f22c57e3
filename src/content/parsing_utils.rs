use std::io;
use std::io::ErrorKind;
use std::str::Lines;

use lazy_static::lazy_static;
use regex::Regex;

use crate::content::{Post, PostId};
use crate::text_utils::parse_date_time;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PostHeader {
    pub id: String,
    pub date: String,
    pub author: String,
    pub tags: Vec<String>,
    pub read_time: String,
    pub image_url: String,
    pub excerpt: String,
}

/// Example of post source
/// [ID]: # (1)
/// [DATE]: # (2024-01-15)
/// [AUTHOR]: # (John Doe)
/// [TAGS]: # (React, TypeScript)
/// [READ_TIME]: # (8)
/// [IMAGE]: # (https://images.example.com/cover.jpeg)
/// [EXCERPT]: # (Learn how to build modern web applications.)
///
/// # Getting Started with React and TypeScript
pub fn parse_post(source_name: &str, raw_content: &str) -> io::Result<Post> {
    let (header, mut lines, maybe_line) = parse_post_header(source_name, raw_content.lines())?;

    let mut content = String::new();
    if let Some(line) = maybe_line {
        content.push_str(line);
        content.push('\n');
    }
    for line in lines.by_ref() {
        content.push_str(line);
        content.push('\n');
    }

    let title = parse_title_markdown(&content);
    if header.id.is_empty() {
        return Err(invalid_data(source_name, "Post id is missing"));
    }

    let published_at = parse_date_time(&header.date)
        .map_err(|e| invalid_data(source_name, &e))?;

    let read_time = match header.read_time.trim().parse::<u32>() {
        Ok(x) if x > 0 => x,
        _ => return Err(invalid_data(source_name, &format!("Invalid read time '{}'", header.read_time))),
    };

    Ok(Post {
        id: PostId(header.id),
        title,
        excerpt: header.excerpt,
        content,
        author: header.author,
        published_at,
        read_time,
        tags: header.tags,
        image_url: header.image_url,
    })
}

fn invalid_data(source_name: &str, desc: &str) -> io::Error {
    io::Error::new(ErrorKind::InvalidData, format!("{} - source={}", desc, source_name))
}

pub fn parse_post_header<'a>(source_name: &str, lines: Lines<'a>) -> io::Result<(PostHeader, Lines<'a>, Option<&'a str>)> {
    let mut header = PostHeader::default();
    let mut found_any = false;

    let mut lines = lines.clone();
    let mut maybe_line = lines.next();

    // Skip optional HTML comment in the beginning
    let mut start_with_comment = false;

    while let Some(line) = maybe_line {
        let line = line.trim();

        // Empty lines are ok
        if line.is_empty() {
            maybe_line = lines.next();
            continue;
        }

        if line == "<!--" {
            maybe_line = lines.next();
            start_with_comment = true;
        }
        break;
    }

    while let Some(line) = maybe_line {
        if line.trim().is_empty() {
            maybe_line = lines.next();
            continue;
        }

        let (key, val) = match extract_header(line) {
            None => break,
            Some((k, v)) => (k, v),
        };

        found_any = true;
        match key {
            "ID" => header.id = val.to_string(),
            "DATE" => header.date = val.to_string(),
            "AUTHOR" => header.author = val.to_string(),
            "TAGS" => header.tags = extract_tags(val),
            "READ_TIME" => header.read_time = val.to_string(),
            "IMAGE" => header.image_url = val.to_string(),
            "EXCERPT" => header.excerpt = val.to_string(),
            _ => {}
        }
        maybe_line = lines.next();
    }

    if start_with_comment {
        // Let's find the end of the comment
        loop {
            match maybe_line {
                Some(line) if line.trim() == "-->" => {
                    maybe_line = lines.next();
                    break;
                }
                Some(_) => maybe_line = lines.next(),
                None => return Err(invalid_data(source_name, "End of comment in the header is missing")),
            }
        }

        while let Some(line) = maybe_line {
            if !line.trim().is_empty() {
                break;
            }
            maybe_line = lines.next();
        }
    }

    if !found_any {
        return Err(invalid_data(source_name, "Invalid post header"));
    }

    Ok((header, lines, maybe_line))
}

/// Text of the first `# ` line, or empty when there is none.
pub fn parse_title_markdown(content: &str) -> String {
    content.lines()
        .find_map(|line| line.strip_prefix("# "))
        .map(|title| title.trim().to_string())
        .unwrap_or_default()
}

fn extract_tags(tags_str: &str) -> Vec<String> {
    tags_str.split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect()
}

fn extract_header(line: &str) -> Option<(&str, &str)> {
    lazy_static! {
        static ref HEADER_REGEX: Regex = Regex::new(r"^\[(?P<key>\w+)\]: # \((?P<value>.+)\)\s*$").unwrap();
    }

    HEADER_REGEX.captures(line).and_then(|cap| {
        let key = cap.name("key").map(|key| key.as_str());
        let val = cap.name("value").map(|val| val.as_str());
        match (key, val) {
            (Some(key), Some(val)) => Some((key, val)),
            _ => None
        }
    })
}

pub fn remove_comments(md_post: &str) -> io::Result<String> {
    let mut res: String = String::new();
    let mut slice = Some(md_post);

    let start_comment = "<!--";
    let end_comment = "-->";

    while let Some(block) = slice {
        let md_buf: &str = match block.find(start_comment) {
            Some(start) => {
                let to_render: &str = &block[0..start];

                let next: &str = &block[(start + start_comment.len())..];
                match next.find(end_comment) {
                    Some(end) => {
                        slice = Some(&next[(end + end_comment.len())..]);
                    }
                    None => {
                        return Err(io::Error::new(
                            ErrorKind::InvalidData,
                            "Error finding end of comment",
                        ));
                    }
                };

                to_render
            }
            None => {
                slice = None;
                block
            }
        };
        res.push_str(md_buf);
    }

    Ok(res)
}
