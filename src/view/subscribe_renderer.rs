use std::io;

use ramhorns::Template;

use crate::config::Site;
use crate::view::parse_template;

#[derive(Debug, PartialEq)]
pub enum SubscribeView<'a> {
    Form { email: &'a str, error: Option<&'a str> },
    Subscribed,
}

#[derive(ramhorns::Content)]
struct SubscribePage<'a> {
    site_title: &'a str,
    subscribed: bool,
    email: &'a str,
    has_error: bool,
    error: &'a str,
}

pub struct SubscribeRenderer<'a> {
    pub template: Template<'a>,
}

impl SubscribeRenderer<'_> {
    pub fn new(subscribe_tpl_src: &str) -> io::Result<SubscribeRenderer> {
        let template = parse_template(subscribe_tpl_src, "subscribe")?;
        Ok(SubscribeRenderer { template })
    }

    pub fn render(&self, site: &Site, view: SubscribeView) -> String {
        let page = match view {
            SubscribeView::Form { email, error } => SubscribePage {
                site_title: site.title.as_str(),
                subscribed: false,
                email,
                has_error: error.is_some(),
                error: error.unwrap_or_default(),
            },
            SubscribeView::Subscribed => SubscribePage {
                site_title: site.title.as_str(),
                subscribed: true,
                email: "",
                has_error: false,
                error: "",
            },
        };
        self.template.render(&page)
    }
}

#[cfg(test)]
mod tests {
    use crate::test_data::sample_site;

    use super::*;

    const TEMPLATE: &str = "{{#subscribed}}Welcome aboard! You've subscribed to {{site_title}}.{{/subscribed}}{{^subscribed}}[{{email}}]{{#has_error}}({{error}}){{/has_error}}{{/subscribed}}";

    #[test]
    fn render_form() {
        let renderer = SubscribeRenderer::new(TEMPLATE).unwrap();
        let res = renderer.render(&sample_site(), SubscribeView::Form { email: "", error: None });
        assert_eq!(res, "[]");
        let res = renderer.render(&sample_site(), SubscribeView::Form { email: "bob", error: Some("invalid") });
        assert_eq!(res, "[bob](invalid)");
    }

    #[test]
    fn render_subscribed() {
        let renderer = SubscribeRenderer::new(TEMPLATE).unwrap();
        let res = renderer.render(&sample_site(), SubscribeView::Subscribed);
        assert_eq!(res, "Welcome aboard! You've subscribed to TechGlobe.");
    }
}
