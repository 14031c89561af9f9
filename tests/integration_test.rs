use stockroom::commands::{run_inventory_session, run_order_session};
use stockroom::lifecycle::StockSystem;
use stockroom::model::{CancelStatus, ItemStatus, OrderItem, ProductId, StockStatus};
use tokio::task::JoinSet;

async fn quantity_of(system: &StockSystem, id: ProductId) -> i64 {
    match system.inventory.change_quantity(id, 0).await.unwrap() {
        StockStatus::Committed(quantity) => quantity,
        other => panic!("product {id} is not readable: {other:?}"),
    }
}

/// Full end-to-end run of the reservation and compensation protocol with both real services.
#[tokio::test]
async fn test_reserve_and_cancel_scenarios() {
    let system = StockSystem::new();

    // Add, take some, then ask for more than is left.
    let widget = system.inventory.add_product("Widget", 10).await.unwrap();
    assert_eq!(widget, ProductId(1));
    assert_eq!(
        system.inventory.change_quantity(widget, -3).await.unwrap(),
        StockStatus::Committed(7)
    );
    assert_eq!(
        system.inventory.change_quantity(widget, -10).await.unwrap(),
        StockStatus::InsufficientStock
    );
    assert_eq!(quantity_of(&system, widget).await, 7);

    // An order with one good line and one unknown product.
    let created = system
        .orders
        .create_order(vec![OrderItem::new(1, 5), OrderItem::new(99, 1)])
        .await
        .unwrap();
    assert_eq!(
        created.items,
        vec![
            ItemStatus {
                product_id: ProductId(1),
                status: StockStatus::Committed(2)
            },
            ItemStatus {
                product_id: ProductId(99),
                status: StockStatus::UnknownProduct
            },
        ]
    );
    assert_eq!(quantity_of(&system, widget).await, 2);

    // Cancelling gives back only what was reserved.
    assert_eq!(
        system.orders.cancel_order(created.order_id).await.unwrap(),
        CancelStatus::Cancelled
    );
    assert_eq!(quantity_of(&system, widget).await, 7);
    assert_eq!(
        system.inventory.change_quantity(ProductId(99), 0).await.unwrap(),
        StockStatus::UnknownProduct
    );
    assert_eq!(
        system.orders.cancel_order(created.order_id).await.unwrap(),
        CancelStatus::UnknownOrder
    );

    system.shutdown().await.unwrap();
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_last_unit_goes_to_exactly_one_order() {
    let system = StockSystem::new();
    let last = system.inventory.add_product("Last one", 1).await.unwrap();

    let mut tasks = JoinSet::new();
    for _ in 0..2 {
        let orders = system.orders.clone();
        tasks.spawn(async move { orders.create_order(vec![OrderItem::new(last, 1)]).await });
    }

    let mut statuses = Vec::new();
    while let Some(joined) = tasks.join_next().await {
        statuses.push(joined.unwrap().unwrap().items[0].status);
    }
    statuses.sort_by_key(|status| status.code());
    assert_eq!(
        statuses,
        vec![StockStatus::InsufficientStock, StockStatus::Committed(0)]
    );
    assert_eq!(quantity_of(&system, last).await, 0);

    system.shutdown().await.unwrap();
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_create_then_cancel_restores_stock() {
    let system = StockSystem::new();
    let bolts = system.inventory.add_product("Bolt", 50).await.unwrap();
    let nuts = system.inventory.add_product("Nut", 3).await.unwrap();

    let mut tasks = JoinSet::new();
    for _ in 0..10 {
        let orders = system.orders.clone();
        tasks.spawn(async move {
            let created = orders
                .create_order(vec![OrderItem::new(bolts, 2), OrderItem::new(nuts, 1)])
                .await
                .unwrap();
            for item in &created.items {
                if let StockStatus::Committed(quantity) = item.status {
                    assert!(quantity >= 0);
                }
            }
            orders.cancel_order(created.order_id).await.unwrap()
        });
    }
    while let Some(joined) = tasks.join_next().await {
        assert_eq!(joined.unwrap(), CancelStatus::Cancelled);
    }

    assert_eq!(quantity_of(&system, bolts).await, 50);
    assert_eq!(quantity_of(&system, nuts).await, 3);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_shutdown_call_stops_both_services() {
    let system = StockSystem::new();
    system.inventory.add_product("a", 1).await.unwrap();
    system.inventory.add_product("b", 1).await.unwrap();
    system.inventory.add_product("a", 1).await.unwrap();
    system.orders.create_order(Vec::new()).await.unwrap();

    let totals = system.orders.shutdown().await.unwrap();
    assert_eq!((totals.total_products, totals.total_orders), (2, 1));

    let inventory = system.inventory.clone();
    system.join().await.unwrap();
    assert!(inventory.list_products().await.is_err());
}

#[tokio::test]
async fn test_command_sessions() {
    let system = StockSystem::new();

    let script = "P 10 Widget\nP 4 Blue gadget\nQ 1 -3\nQ 1 -10\nnonsense\nQ 7 1\nL\n";
    let mut out = Vec::new();
    let mut err = Vec::new();
    run_inventory_session(&system.inventory, script.as_bytes(), &mut out, &mut err)
        .await
        .unwrap();
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "1\n2\n7\n-1\n-2\n1 7 Widget\n2 4 Blue gadget\n"
    );
    assert!(err.is_empty());

    let script = "P 1 5 99 1\nP 1 1 2\nX 1\nX 1\nT\nL\n";
    let mut out = Vec::new();
    let mut err = Vec::new();
    run_order_session(
        &system.inventory,
        &system.orders,
        script.as_bytes(),
        &mut out,
        &mut err,
    )
    .await
    .unwrap();
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "1 7 Widget\n2 4 Blue gadget\n1 2\n99 -2\n0\n-1\n2 0\n"
    );
    assert!(err.is_empty());

    system.join().await.unwrap();
}
