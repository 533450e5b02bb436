//! End-to-end event flow over the in-memory authority.

use std::pin::pin;
use std::time::Duration;

use futures_util::future::{self, BoxFuture};
use futures_util::{poll, FutureExt};
use stocktake::app::{derive, SortDirection, SortState};
use stocktake::notify::{Channel, MessageKind, Notifier};
use stocktake::remote::{MemoryRemote, ProductRemote, RemoteCall};
use stocktake::{handle_event, Action, App, Event, FormMode, Product, ProductField, ProductId, Result};

/// A service that never answers.
struct StalledRemote;

impl ProductRemote for StalledRemote {
    fn list(&self) -> BoxFuture<'_, Result<Vec<Product>>> {
        future::pending().boxed()
    }

    fn create<'a>(&'a self, _: &'a Product) -> BoxFuture<'a, Result<Product>> {
        future::pending().boxed()
    }

    fn update<'a>(&'a self, _: ProductId, _: &'a Product) -> BoxFuture<'a, Result<Product>> {
        future::pending().boxed()
    }

    fn delete(&self, _: ProductId) -> BoxFuture<'_, Result<()>> {
        future::pending().boxed()
    }
}

fn widget() -> Product {
    Product::new(1, "Widget", "", 9.99, 5, "tools")
}

fn catalog() -> Vec<Product> {
    vec![
        widget(),
        Product::new(2, "Gadget", "Handheld gadget", 19.5, 2, "toys"),
        Product::new(3, "bolt", "Steel bolt", 0.25, 400, "hardware"),
    ]
}

async fn loaded(products: Vec<Product>) -> (App<MemoryRemote>, MemoryRemote) {
    let remote = MemoryRemote::with_products(products);
    let mut app = App::new(remote.clone(), Notifier::default());
    handle_event(&mut app, Event::Refresh).await.unwrap();
    (app, remote)
}

async fn fill(app: &mut App<MemoryRemote>, values: [(ProductField, &str); 6]) {
    for (field, value) in values {
        handle_event(app, Event::FieldChanged { field, value: value.into() })
            .await
            .unwrap();
    }
}

fn ids(products: &[Product]) -> Vec<i64> {
    products.iter().map(|p| p.id).collect()
}

#[test]
fn derive_matches_worked_example() {
    let c = vec![widget()];
    assert_eq!(derive(&c, "wid", ProductField::Price, SortDirection::Asc), c);
    assert!(derive(&c, "zzz", ProductField::Price, SortDirection::Asc).is_empty());
    assert_eq!(derive(&c, "   ", ProductField::Price, SortDirection::Asc), c);
}

#[test]
fn sort_toggle_policy() {
    let mut sort = SortState::default();
    sort.select(ProductField::Price);
    assert_eq!(sort.direction, SortDirection::Asc);
    sort.select(ProductField::Price);
    assert_eq!(sort.direction, SortDirection::Desc);
    sort.select(ProductField::Name);
    assert_eq!((sort.field, sort.direction), (ProductField::Name, SortDirection::Asc));
}

#[tokio::test]
async fn create_through_form_prepends_and_resets() {
    let (mut app, remote) = loaded(catalog()).await;

    fill(
        &mut app,
        [
            (ProductField::Id, "7"),
            (ProductField::Name, "Nut"),
            (ProductField::Description, "Hex nut"),
            (ProductField::Price, "0.10"),
            (ProductField::Quantity, "900"),
            (ProductField::Category, "hardware"),
        ],
    )
    .await;
    handle_event(&mut app, Event::Submit).await.unwrap();

    assert_eq!(ids(app.store.products()), vec![7, 1, 2, 3]);
    assert_eq!(remote.products().len(), 4);
    assert_eq!(app.form.state().name, "");
    assert_eq!(app.form.mode(), FormMode::Create);

    let toast = app.notifier.current(Channel::Toast).unwrap();
    assert_eq!((toast.kind, toast.text.as_str()), (MessageKind::Success, "Product created successfully"));
}

#[tokio::test]
async fn invalid_form_never_reaches_remote() {
    let (mut app, remote) = loaded(catalog()).await;

    fill(
        &mut app,
        [
            (ProductField::Id, "8"),
            (ProductField::Name, "Spring"),
            (ProductField::Description, ""),
            (ProductField::Price, "cheap"),
            (ProductField::Quantity, "3"),
            (ProductField::Category, "hardware"),
        ],
    )
    .await;
    handle_event(&mut app, Event::Submit).await.unwrap();

    assert_eq!(remote.calls(), vec![RemoteCall::List]);
    assert_eq!(app.form.state().price, "cheap");
    let inline = app.notifier.current(Channel::Inline).unwrap();
    assert_eq!(inline.kind, MessageKind::Error);
}

#[tokio::test]
async fn edit_replaces_in_place_and_keeps_order() {
    let (mut app, remote) = loaded(catalog()).await;

    handle_event(&mut app, Event::Edit(2)).await.unwrap();
    assert!(app.compute_viewmodel().form.id_locked);
    assert!(!handle_event(&mut app, Event::FieldChanged { field: ProductField::Id, value: "99".into() })
        .await
        .unwrap()
        .0);
    handle_event(&mut app, Event::FieldChanged { field: ProductField::Price, value: "25".into() })
        .await
        .unwrap();
    handle_event(&mut app, Event::Submit).await.unwrap();

    assert_eq!(ids(app.store.products()), vec![1, 2, 3]);
    assert_eq!(app.store.get(2).unwrap().price, 25.0);
    assert_eq!(app.store.get(1), Some(&widget()));
    assert!(matches!(remote.calls().last(), Some(RemoteCall::Update(2, _))));
    assert_eq!(app.form.mode(), FormMode::Create);
}

#[tokio::test]
async fn failed_mutations_leave_collection_untouched() {
    let (mut app, remote) = loaded(catalog()).await;
    let before = app.store.products().to_vec();

    handle_event(&mut app, Event::Edit(1)).await.unwrap();
    remote.fail_next(Some("Database unavailable"));
    handle_event(&mut app, Event::Submit).await.unwrap();
    assert_eq!(app.store.products(), before.as_slice());
    assert_eq!(app.form.mode(), FormMode::Edit { id: 1 });
    assert_eq!(app.notifier.current(Channel::Toast).unwrap().text, "Database unavailable");

    remote.fail_next(None);
    handle_event(&mut app, Event::DeleteConfirmed(3)).await.unwrap();
    assert_eq!(app.store.products(), before.as_slice());
    let inline = app.notifier.current(Channel::Inline).unwrap();
    assert_eq!((inline.kind, inline.text.as_str()), (MessageKind::Error, "Delete failed"));
    assert!(!app.store.is_busy());
}

#[tokio::test]
async fn delete_requires_confirmation() {
    let (mut app, remote) = loaded(catalog()).await;

    let (_, actions) = handle_event(&mut app, Event::RequestDelete(3)).await.unwrap();
    assert_eq!(actions, vec![Action::ConfirmDelete { id: 3, name: "bolt".into() }]);

    handle_event(&mut app, Event::DeleteDeclined(3)).await.unwrap();
    assert!(app.notifier.current(Channel::Toast).is_none());
    assert_eq!(app.store.products().len(), 3);

    handle_event(&mut app, Event::DeleteConfirmed(3)).await.unwrap();
    assert_eq!(ids(app.store.products()), vec![1, 2]);
    assert_eq!(ids(&remote.products()), vec![1, 2]);
}

#[tokio::test]
async fn ids_stay_unique_across_operations() {
    let (mut app, _) = loaded(catalog()).await;

    for id in ["4", "1", "4"] {
        fill(
            &mut app,
            [
                (ProductField::Id, id),
                (ProductField::Name, "Dup"),
                (ProductField::Description, ""),
                (ProductField::Price, "1"),
                (ProductField::Quantity, "1"),
                (ProductField::Category, "misc"),
            ],
        )
        .await;
        handle_event(&mut app, Event::Submit).await.unwrap();
        handle_event(&mut app, Event::CancelEdit).await.unwrap();
    }

    let mut seen = ids(app.store.products());
    let total = seen.len();
    seen.sort_unstable();
    seen.dedup();
    assert_eq!(seen.len(), total);
    assert_eq!(total, 4);
}

#[tokio::test]
async fn view_model_reflects_query_and_sort() {
    let (mut app, _) = loaded(catalog()).await;

    handle_event(&mut app, Event::SortBy(ProductField::Name)).await.unwrap();
    let view = app.compute_viewmodel();
    let names: Vec<_> = view.rows.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["bolt", "Gadget", "Widget"]);
    assert_eq!(view.rows[0].price, "0.25");
    assert_eq!(view.header.total, 3);

    handle_event(&mut app, Event::QueryChanged("nothing here".into())).await.unwrap();
    let view = app.compute_viewmodel();
    assert!(view.rows.is_empty());
    assert_eq!(view.empty_state.unwrap().message, "No products found.");
    assert_eq!(view.header.total, 3);
}

#[tokio::test(start_paused = true)]
async fn messages_expire_unless_replaced() {
    let (mut app, remote) = loaded(catalog()).await;

    remote.fail_next(None);
    handle_event(&mut app, Event::Refresh).await.unwrap();
    assert_eq!(app.notifier.current(Channel::Inline).unwrap().text, "Failed to fetch products");
    assert_eq!(app.store.products().len(), 3);

    tokio::time::sleep(Duration::from_millis(3000)).await;
    app.notifier.error(Channel::Inline, "again");

    tokio::time::sleep(Duration::from_millis(3000)).await;
    assert_eq!(app.notifier.current(Channel::Inline).unwrap().text, "again");

    tokio::time::sleep(Duration::from_millis(2001)).await;
    assert!(app.notifier.current(Channel::Inline).is_none());
}

#[tokio::test]
async fn pending_operation_shows_busy_view() {
    let mut app = App::new(StalledRemote, Notifier::default());
    let busy = app.store.busy_flag();
    let notifier = app.notifier.clone();
    let mut view = app.compute_viewmodel();
    assert!(!view.busy);
    assert!(view.form.submit_enabled);

    {
        let mut refresh = pin!(handle_event(&mut app, Event::Refresh));
        assert!(poll!(refresh.as_mut()).is_pending());

        view.refresh_live(&busy, &notifier);
        assert!(view.busy);
        assert!(!view.form.submit_enabled);
        assert_eq!(view.form.submit_label, "Add Please wait");
    }

    view.refresh_live(&busy, &notifier);
    assert!(!view.busy);
    assert_eq!(view.form.submit_label, "Add");
    assert!(app.compute_viewmodel().form.submit_enabled);
}
