use std::sync::Arc;

use crate::commands::detail::{report_detail_error, show_detail};
use crate::commands::pager::{read_action, scroll_to_bottom, PagerAction};
use crate::core::{
    derived_list::DerivedList,
    error::Result,
    model::ALL_TYPES,
    print_info, print_progress, print_section_header,
    render::format_gallery_row,
    session::CatalogSession,
};

pub struct GalleryArgs {
    pub types: Vec<String>,
    pub pages: usize,
    pub interactive: bool,
}

pub async fn execute_gallery(session: &CatalogSession, args: GalleryArgs) -> Result<()> {
    print_progress("Loading Pokédex...");
    let mut list = session.derived_list().await?;

    for type_name in &args.types {
        if !list.state().predicates.contains(type_name) {
            list.toggle_predicate(type_name);
        }
    }
    resolve_types_if_needed(session, &mut list).await?;

    let mut shown = render_from_start(session, &list).await?;
    for _ in 1..args.pages.max(1) {
        if !scroll_to_bottom(&mut list).await {
            break;
        }
        shown = render_new_rows(session, &list, shown).await?;
    }

    if !args.interactive {
        return Ok(());
    }

    loop {
        match read_action("[Enter] more, #key details, t <type> toggle, [c]lear, [q]uit:") {
            PagerAction::Quit => break,
            PagerAction::More => {
                if scroll_to_bottom(&mut list).await {
                    shown = render_new_rows(session, &list, shown).await?;
                } else {
                    print_progress("End of gallery");
                }
            }
            PagerAction::Open(key) => {
                if let Err(e) = show_detail(session, key, Some(&list)).await {
                    report_detail_error(&e);
                }
            }
            PagerAction::ToggleType(type_name) => {
                if !ALL_TYPES.contains(&type_name.as_str()) {
                    print_progress(&format!(
                        "Unknown type '{type_name}'. Known types: {}",
                        ALL_TYPES.join(", ")
                    ));
                    continue;
                }
                list.toggle_predicate(&type_name);
                resolve_types_if_needed(session, &mut list).await?;
                shown = render_from_start(session, &list).await?;
            }
            PagerAction::ClearTypes => {
                list.clear_predicates();
                shown = render_from_start(session, &list).await?;
            }
            _ => print_progress("Search and ordering are available in the list view"),
        }
    }

    Ok(())
}

/// Pull every record through the cache when a type predicate is active.
async fn resolve_types_if_needed(session: &CatalogSession, list: &mut DerivedList) -> Result<()> {
    let missing = list.unresolved_keys();
    if missing.is_empty() {
        return Ok(());
    }

    print_progress("Loading type data...");
    let records = session.catalog.resolve_all(&missing).await?;
    list.attach_details(records.iter().map(Arc::as_ref));
    Ok(())
}

async fn render_from_start(session: &CatalogSession, list: &DerivedList) -> Result<usize> {
    let predicates: Vec<&str> = list.state().predicates.iter().map(String::as_str).collect();
    let header = if predicates.is_empty() {
        "Pokémon Gallery".to_string()
    } else {
        format!("Pokémon Gallery ({})", predicates.join(" + "))
    };
    print_section_header(&header);

    if list.window().is_empty() {
        print_info("❌ No Pokémon match this type combination.");
        return Ok(0);
    }
    render_new_rows(session, list, 0).await
}

/// Fetch the records of rows not shown yet, then print them.
///
/// Nothing is printed unless every record of the batch resolved.
async fn render_new_rows(session: &CatalogSession, list: &DerivedList, shown: usize) -> Result<usize> {
    let window = list.window();
    let new_keys = &window.visible_keys[shown.min(window.visible_keys.len())..];
    let records = session.catalog.details_for(new_keys).await?;

    for (entry, record) in list.visible_entries().skip(shown).zip(&records) {
        println!("{}", format_gallery_row(entry, record));
    }
    // The next page is one scroll away.
    session
        .catalog
        .warm_all(list.upcoming_keys(session.config.page_size));

    Ok(window.visible_keys.len())
}
