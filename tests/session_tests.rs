use dex_navigator::core::{
    config::DexConfig, error::DexNavigatorError, model::IndexEntry, session::CatalogSession,
};
use std::sync::Arc;

mod common;
use common::fake_source::FakeSource;

#[cfg(test)]
mod session_tests {
    use super::*;

    fn session_over(source: Arc<FakeSource>) -> CatalogSession {
        let config = DexConfig {
            page_size: 2,
            ..DexConfig::default()
        };
        CatalogSession::with_source(config, source)
    }

    #[tokio::test]
    async fn test_type_filter_resolves_whole_catalog_once() -> anyhow::Result<()> {
        let source = Arc::new(FakeSource::starters());
        let session = session_over(source.clone());
        let mut list = session.derived_list().await?;

        list.toggle_predicate("fire");
        let missing = list.unresolved_keys();
        assert_eq!(missing.len(), 9);

        let records = session.catalog.resolve_all(&missing).await?;
        list.attach_details(records.iter().map(Arc::as_ref));

        assert_eq!(list.filtered_keys(), vec![4, 5, 6]);
        assert_eq!(list.window().visible_keys, vec![4, 5]);
        assert!(list.unresolved_keys().is_empty());
        assert_eq!(source.total_detail_calls(), 9);

        // A second derived list reuses the cached index
        session.derived_list().await?;
        assert_eq!(source.index_calls(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_details_for_window_keeps_display_order() -> anyhow::Result<()> {
        let source = Arc::new(FakeSource::starters());
        let session = session_over(source);
        let list = session.derived_list().await?;

        let window = list.window();
        let records = session.catalog.details_for(&window.visible_keys).await?;
        let names: Vec<&str> = records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["bulbasaur", "ivysaur"]);
        Ok(())
    }

    #[tokio::test]
    async fn test_parse_key_uses_configured_range() {
        let session = session_over(Arc::new(FakeSource::starters()));

        assert_eq!(session.parse_key("#25").ok(), Some(25));
        assert!(matches!(
            session.parse_key("1026"),
            Err(DexNavigatorError::KeyOutOfRange { key: 1026, max: 1025 })
        ));
        assert!(matches!(
            session.parse_key("pikachu"),
            Err(DexNavigatorError::InvalidKey { .. })
        ));
    }

    #[tokio::test]
    async fn test_empty_index_is_reported() {
        struct EmptySource;

        #[async_trait::async_trait]
        impl dex_navigator::core::client::CatalogSource for EmptySource {
            async fn fetch_index(&self) -> dex_navigator::Result<Vec<IndexEntry>> {
                Ok(Vec::new())
            }

            async fn fetch_detail(
                &self,
                key: u32,
            ) -> dex_navigator::Result<dex_navigator::DetailRecord> {
                Err(DexNavigatorError::fetch_failed(Some(key), "status 404 Not Found"))
            }
        }

        let session = CatalogSession::with_source(DexConfig::default(), Arc::new(EmptySource));
        let err = session.derived_list().await.err();
        assert!(matches!(err, Some(DexNavigatorError::EmptyCatalog)));
    }
}
