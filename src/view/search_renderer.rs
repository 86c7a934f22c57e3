use std::io;

use ramhorns::Template;

use crate::config::Site;
use crate::content::Post;
use crate::search::result_label;
use crate::view::{parse_template, PostCard};

#[derive(ramhorns::Content)]
struct SearchPage<'a> {
    site_title: &'a str,
    query: &'a str,
    has_query: bool,
    result_label: String,
    results: Vec<PostCard<'a>>,
    ad_slot: &'a str,
}

pub struct SearchRenderer<'a> {
    pub template: Template<'a>,
}

impl SearchRenderer<'_> {
    pub fn new(search_tpl_src: &str) -> io::Result<SearchRenderer> {
        let template = parse_template(search_tpl_src, "search")?;
        Ok(SearchRenderer { template })
    }

    pub fn render(&self, site: &Site, query: &str, results: &[&Post], ad_slot: &str) -> String {
        self.template.render(&SearchPage {
            site_title: site.title.as_str(),
            query,
            has_query: !query.is_empty(),
            result_label: result_label(results.len()),
            results: results.iter().map(|p| PostCard::new(p)).collect(),
            ad_slot,
        })
    }
}
