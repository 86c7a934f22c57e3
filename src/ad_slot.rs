use ramhorns::Template;
use spdlog::error;

use crate::config::Ads;

const AD_SLOT_TPL: &str = r##"<div class="ad-slot"><script async src="https://pagead2.googlesyndication.com/pagead/js/adsbygoogle.js?client={{client}}" crossorigin="anonymous"></script><ins class="adsbygoogle" style="display:block" data-ad-client="{{client}}" data-ad-slot="{{slot}}" data-ad-format="{{format}}" data-full-width-responsive="{{full_width_responsive}}"></ins><script>try { (window.adsbygoogle = window.adsbygoogle || []).push({}); } catch (e) { console.error('AdSense error:', e); }</script></div>"##;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Placement {
    Home,
    Article,
    Search,
}

#[derive(ramhorns::Content)]
struct AdSlot<'a> {
    client: &'a str,
    slot: &'a str,
    format: &'a str,
    full_width_responsive: &'a str,
}

/// Markup for the ad placeholder of a page, or an empty string when ads are
/// not configured for it or the placeholder cannot be produced.
pub fn embed(ads: Option<&Ads>, placement: Placement) -> String {
    let Some(ads) = ads else {
        return String::new();
    };

    let slot = match placement {
        Placement::Home => ads.home_slot.as_deref(),
        Placement::Article => ads.article_slot.as_deref(),
        Placement::Search => ads.search_slot.as_deref(),
    };

    match slot {
        Some(slot) => render_slot(AD_SLOT_TPL, &ads.client, slot),
        None => String::new(),
    }
}

fn render_slot(template_src: &str, client: &str, slot: &str) -> String {
    let template = match Template::new(template_src) {
        Ok(template) => template,
        Err(e) => {
            error!("Ad slot {} skipped: {}", slot, e);
            return String::new();
        }
    };

    template.render(&AdSlot {
        client,
        slot,
        format: "auto",
        full_width_responsive: "true",
    })
}
