use quiz_core::model::{Category, CategoryId};
use quiz_core::time::fixed_clock;
use services::{AppServices, CatalogError, Listing};
use storage::{InMemoryProvider, ProviderError, Storage};

#[tokio::test]
async fn add_browse_delete_question() {
    let provider = InMemoryProvider::new();
    provider
        .insert_category(Category::new(CategoryId::new(3), "Geography").unwrap())
        .unwrap();
    let services = AppServices::new(&Storage::in_memory(provider), fixed_clock());
    let catalog = services.catalog();
    let mut browser = services.question_browser();

    let categories = catalog.list_categories().await.expect("list categories");
    assert_eq!(categories.len(), 1);

    let id = catalog
        .create_question(
            "What is the largest lake in Africa?",
            "Lake Victoria",
            2,
            CategoryId::new(3),
        )
        .await
        .expect("create question");

    let shown = browser.search("largest lake").await.expect("search");
    assert_eq!(shown.len(), 1);
    assert_eq!(shown[0].id(), id);
    assert_eq!(browser.listing(), &Listing::Search("largest lake".into()));

    catalog.delete_question(id).await.expect("delete question");
    let shown = browser.refresh().await.expect("refresh");
    assert!(shown.is_empty());

    let err = catalog
        .create_question("Q?", "A", 1, CategoryId::new(99))
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::Provider(ProviderError::Unprocessable(_))));
}
