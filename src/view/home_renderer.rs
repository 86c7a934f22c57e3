use std::io;

use ramhorns::Template;

use crate::config::Site;
use crate::content::Post;
use crate::view::{parse_template, PostCard};

#[derive(ramhorns::Content)]
struct HomePage<'a> {
    site_title: &'a str,
    site_tagline: &'a str,
    featured: Option<PostCard<'a>>,
    recent: Vec<PostCard<'a>>,
    ad_slot: &'a str,
}

pub struct HomeRenderer<'a> {
    pub template: Template<'a>,
}

impl HomeRenderer<'_> {
    pub fn new(home_tpl_src: &str) -> io::Result<HomeRenderer> {
        let template = parse_template(home_tpl_src, "home")?;
        Ok(HomeRenderer { template })
    }

    pub fn render(&self, site: &Site, featured: Option<&Post>, recent: &[Post], ad_slot: &str) -> String {
        self.template.render(&HomePage {
            site_title: site.title.as_str(),
            site_tagline: site.tagline.as_str(),
            featured: featured.map(PostCard::new),
            recent: recent.iter().map(PostCard::new).collect(),
            ad_slot,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::test_data::{sample_post, sample_site};

    use super::*;

    #[test]
    fn render_home() {
        let template_src = "{{site_title}}|{{#featured}}F:{{title}}@{{link}}{{/featured}}|{{#recent}}[{{title}} {{read_time}} {{#tags}}({{tag}}){{/tags}}]{{/recent}}";
        let renderer = HomeRenderer::new(template_src).unwrap();
        let posts = vec![
            sample_post("1", "First", &["a"]),
            sample_post("2", "Second", &["b", "c"]),
            sample_post("3", "Third", &[]),
        ];
        let res = renderer.render(&sample_site(), posts.first(), &posts[1..], "");
        assert_eq!(res, "TechGlobe|F:First@/blog/1|[Second 4 min read (b)(c)][Third 4 min read ]");
    }

    #[test]
    fn render_empty_home() {
        let renderer = HomeRenderer::new("{{#featured}}F{{/featured}}{{^featured}}nothing yet{{/featured}}").unwrap();
        let res = renderer.render(&sample_site(), None, &[], "");
        assert_eq!(res, "nothing yet");
    }
}
