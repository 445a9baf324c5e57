//! `robots.txt` generation.

use crate::utils::url::SiteUrls;

/// Allow all crawlers; point at the sitemap when one is generated.
pub fn robots_txt(urls: &SiteUrls, sitemap_path: Option<&str>) -> String {
    let mut robots = String::from("User-agent: *\nAllow: /\n");
    if let Some(path) = sitemap_path {
        robots.push_str(&format!("\nSitemap: {}\n", urls.absolute(path)));
    }
    robots
}
