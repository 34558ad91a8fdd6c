use crate::commands::pager::{read_action, PagerAction};
use crate::core::{
    derived_list::{DerivedList, Neighbors},
    error::{DexNavigatorError, Result},
    key_parser::KeyParser,
    print_error, print_progress,
    render::render_detail,
    session::CatalogSession,
};

pub struct DetailArgs {
    pub key: String,
    pub browse: bool,
}

pub async fn execute_detail(session: &CatalogSession, args: DetailArgs) -> Result<()> {
    // Reject bad input before touching the network
    let key = session.parse_key(&args.key)?;

    print_progress("Loading...");
    let (index, record) = tokio::join!(session.derived_list(), session.catalog.detail(key));
    let record = record?;

    let list = match index {
        Ok(list) => Some(list),
        Err(e) => {
            log::warn!("Index unavailable, previous/next disabled: {e}");
            None
        }
    };

    let mut neighbors = show_detail(session, key, list.as_ref()).await?;
    log::debug!("Displayed #{} ({})", record.key, record.name);

    if args.browse {
        loop {
            let target = match read_action("[n]ext, [p]revious, #key, [q]uit:") {
                PagerAction::Quit => break,
                PagerAction::Next => neighbors.next,
                PagerAction::Previous => neighbors.prev,
                PagerAction::Open(target) => Some(target),
                _ => {
                    print_progress("Only n, p, #key and q work here");
                    continue;
                }
            };
            let Some(target) = target else {
                print_progress("No more entries in that direction");
                continue;
            };
            match show_detail(session, target, list.as_ref()).await {
                Ok(found) => neighbors = found,
                Err(e) => report_detail_error(&e),
            }
        }
    }

    Ok(())
}

/// Fetch, validate and print one record, warming both neighbours.
///
/// `list` supplies the previous/next order; without it there are no neighbours.
pub async fn show_detail(
    session: &CatalogSession,
    key: u32,
    list: Option<&DerivedList>,
) -> Result<Neighbors> {
    KeyParser::validate(key, session.config.max_key)?;
    let record = session.catalog.detail(key).await?;

    // The source serves alternate forms under ids far above the main range.
    if KeyParser::validate(record.key, session.config.max_key).is_err() {
        return Err(DexNavigatorError::key_out_of_range(
            record.key,
            session.config.max_key,
        ));
    }

    let neighbors = list.map(|l| l.neighbors(key)).unwrap_or_default();
    session
        .catalog
        .warm_all(neighbors.prev.into_iter().chain(neighbors.next));

    println!();
    for line in render_detail(&record, neighbors) {
        println!("{line}");
    }
    Ok(neighbors)
}

/// Report a failed detail lookup without ending an interactive session.
pub fn report_detail_error(err: &DexNavigatorError) {
    if err.is_invalid_key() {
        print_error(&err.to_string());
    } else {
        log::error!("{err}");
        print_error("Failed to load Pokémon data.");
    }
}
