//! `list` command: enumerate loaded pages.

use anyhow::Result;

use crate::config::SiteConfig;
use crate::log;
use crate::site::Site;

pub fn run_list(config: SiteConfig, lang: Option<&str>) -> Result<()> {
    let site = Site::load(config)?;

    let mut shown = 0usize;
    for page in site.index.pages() {
        if lang.is_some_and(|l| l != page.language) {
            continue;
        }
        println!(
            "{}\t{}\t{} permalink(s)",
            page.language,
            page.path,
            page.permalinks.len()
        );
        shown += 1;
    }

    log!("list"; "{shown} page edition(s)");
    Ok(())
}
