#[cfg(test)]
pub const POST_DATA_MD: &str = "[ID]: # (42)
[DATE]: # (2024-03-02)
[AUTHOR]: # (Jane Smith)
[TAGS]: # (Rust, Performance)
[READ_TIME]: # (5)
[IMAGE]: # (https://images.example.com/fast.jpeg)
[EXCERPT]: # (Profiling first, then optimizing (in that order).)

# Writing Fast Rust

Measure before you change anything.

## Profiling

```bash
# Record a profile
perf record ./target/release/app
```

## Allocation

### Reuse buffers

##### Tiny footnote heading

## Profiling
";

#[cfg(test)]
pub fn sample_post(id: &str, title: &str, tags: &[&str]) -> crate::content::Post {
    use chrono::NaiveDate;

    crate::content::Post {
        id: crate::content::PostId(id.to_string()),
        title: title.to_string(),
        excerpt: format!("Excerpt of {}", title),
        content: format!("# {}\n\nBody of post {}.\n", title, id),
        author: "John Doe".to_string(),
        published_at: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap().and_hms_opt(0, 0, 0).unwrap(),
        read_time: 4,
        tags: tags.iter().map(|t| t.to_string()).collect(),
        image_url: format!("https://images.example.com/{}.jpeg", id),
    }
}

#[cfg(test)]
pub fn sample_site() -> crate::config::Site {
    crate::config::Site {
        title: "TechGlobe".to_string(),
        tagline: "Web development, programming tutorials and tech insights".to_string(),
    }
}
