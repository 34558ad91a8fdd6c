use crate::commands::detail::{report_detail_error, show_detail};
use crate::commands::pager::{read_action, scroll_to_bottom, PagerAction};
use crate::core::{
    derived_list::DerivedList,
    error::Result,
    print_info, print_progress, print_section_header,
    render::format_list_row,
    session::CatalogSession,
    state::{SortDirection, SortKey},
};

pub struct ListArgs {
    pub search: Option<String>,
    pub sort: SortKey,
    pub order: SortDirection,
    pub pages: usize,
    pub interactive: bool,
    pub artwork: bool,
}

pub async fn execute_list(session: &CatalogSession, args: ListArgs) -> Result<()> {
    print_progress("Loading Pokémon list...");
    let mut list = session.derived_list().await?;

    if let Some(term) = &args.search {
        list.set_search(term.as_str());
    }
    list.set_sort(args.sort, args.order);

    let mut shown = print_header_and_window(&list, args.artwork);
    warm_rows(session, &list, 0);
    for _ in 1..args.pages.max(1) {
        if !scroll_to_bottom(&mut list).await {
            break;
        }
        let from = shown;
        shown = print_new_rows(&list, args.artwork, from);
        warm_rows(session, &list, from);
    }

    if !args.interactive {
        print_footer(&list);
        return Ok(());
    }

    loop {
        match read_action("[Enter] more, #key details, /search, [o]rder, [q]uit:") {
            PagerAction::Quit => break,
            PagerAction::More => {
                if scroll_to_bottom(&mut list).await {
                    let from = shown;
                    shown = print_new_rows(&list, args.artwork, from);
                    warm_rows(session, &list, from);
                } else {
                    print_progress("End of list");
                }
            }
            PagerAction::Open(key) => {
                if let Err(e) = show_detail(session, key, Some(&list)).await {
                    report_detail_error(&e);
                }
            }
            PagerAction::Search(term) => {
                list.set_search(term);
                shown = print_header_and_window(&list, args.artwork);
                warm_rows(session, &list, 0);
            }
            PagerAction::ToggleOrder => {
                let (key, direction) = (list.state().sort_key, list.state().sort_direction);
                list.set_sort(key, direction.toggled());
                shown = print_header_and_window(&list, args.artwork);
                warm_rows(session, &list, 0);
            }
            _ => print_progress("Type filters are available in the gallery view"),
        }
    }

    Ok(())
}

/// Print the header and the window from scratch. Returns the number of rows shown.
fn print_header_and_window(list: &DerivedList, artwork: bool) -> usize {
    let state = list.state();
    let mut header = format!(
        "Pokémon List ({} matches, by {} {})",
        list.filtered_len(),
        state.sort_key,
        state.sort_direction
    );
    if !state.search_term.is_empty() {
        header.push_str(&format!(", search '{}'", state.search_term));
    }
    print_section_header(&header);

    if list.window().is_empty() {
        print_info("No Pokémon match this search.");
        return 0;
    }
    print_new_rows(list, artwork, 0)
}

/// Print rows of the window not printed yet and return the new row count.
fn print_new_rows(list: &DerivedList, artwork: bool, shown: usize) -> usize {
    let mut count = shown;
    for entry in list.visible_entries().skip(shown) {
        println!("{}", format_list_row(entry, artwork));
        count += 1;
    }
    count
}

/// Warm the rows printed from `from` on, plus the page one scroll away.
fn warm_rows(session: &CatalogSession, list: &DerivedList, from: usize) {
    let window = list.window();
    let page_size = session.config.page_size;
    let end = window.visible_keys.len().min(from + page_size);
    if from < end {
        session
            .catalog
            .warm_all(window.visible_keys[from..end].iter().copied());
    }
    session.catalog.warm_all(list.upcoming_keys(page_size));
}

fn print_footer(list: &DerivedList) {
    let window = list.window();
    if window.has_more {
        print_info(&format!(
            "Showing {} of {}. Use --pages or --interactive to see more.",
            window.visible_keys.len(),
            window.total
        ));
    }
}
