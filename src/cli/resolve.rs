//! `resolve` command: resolve one request path to its page.

use anyhow::Result;

use crate::config::SiteConfig;
use crate::language;
use crate::log;
use crate::site::Site;

pub fn run_resolve(
    config: SiteConfig,
    path: &str,
    lang: Option<&str>,
    lenient: bool,
) -> Result<()> {
    let site = Site::load(config)?;
    let resolver = site.resolver(!lenient);

    let language_code = lang.unwrap_or(language::authoritative().code);
    match resolver.find_page_in(path, language_code)? {
        Some(page) => {
            log!("resolve"; "{path} -> {} ({})", page.relative_path, page.language);
            println!("title:     {}", page.title());
            println!("area:      {}", page.area);
            println!("versions:  {}", page.versions.join(", "));
            println!("permalinks:");
            for permalink in &page.permalinks {
                println!("  {}", permalink.href);
            }
            println!("languages:");
            for variant in language::language_variants(page.permalinks[0].href.as_str()) {
                println!("  {}  {}", variant.hreflang, variant.href);
            }
            Ok(())
        }
        None => {
            log!("resolve"; "{path}: not found");
            std::process::exit(1);
        }
    }
}
