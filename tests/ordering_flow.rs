use std::sync::Arc;

use chrono::{Datelike, Local, Weekday};
use microgreens_api::{
    calendar,
    dto::admin::HarvestToggleRequest,
    dto::auth::RegisterRequest,
    dto::cart::AddToCartRequest,
    dto::partners::AssignRegionRequest,
    middleware::auth::AuthUser,
    models::{Region, Role},
    routes::params::{AdminOrdersQuery, DateQuery, RouteQuery},
    services::{
        admin_service, auth_service, cart_service, catalog_service, order_service, partner_service,
    },
    state::AppState,
    store::MemoryStore,
};

// Integration flow: a partner registers, fills a cart and checks out; the
// admin assigns the region, reads the cutting list, ticks off harvest
// lines, plans the route and marks the order delivered.
#[tokio::test]
async fn register_order_and_plan_the_route() -> anyhow::Result<()> {
    let state = AppState::init(Arc::new(MemoryStore::default())).await?;

    let admin = AuthUser {
        name: "marek".to_string(),
        role: Role::Admin,
    };

    // Partner registers with an address in Dubnica but no region yet.
    let registered = auth_service::register_user(
        &state,
        RegisterRequest {
            name: "Bistro Test".to_string(),
            password: "tajneheslo".to_string(),
            email: Some("bistro@example.sk".to_string()),
            phone: Some("+421 900 123 456".to_string()),
            address: Some("Továrenská 2, Dubnica nad Váhom".to_string()),
            region: Region::Unassigned,
        },
    )
    .await?;
    let profile = registered.data.unwrap();
    assert_eq!(profile.region, Region::Unassigned);

    let partner = AuthUser {
        name: profile.name.clone(),
        role: Role::Customer,
    };

    partner_service::assign_region(
        &state,
        &admin,
        partner.name.clone(),
        AssignRegionRequest {
            region: Region::TrencinArea,
        },
    )
    .await?;

    // The bootstrap catalogue is fully available to partners.
    let catalogue = catalog_service::list_products(&state, &partner).await?;
    let greens = catalogue.data.unwrap().items;
    assert_eq!(greens.len(), 3);
    let green = &greens[0];

    cart_service::add_item(
        &state,
        &partner,
        AddToCartRequest {
            product_id: green.id,
            weight: 50,
            quantity: Some(2),
        },
    )
    .await?;
    let cart = cart_service::add_item(
        &state,
        &partner,
        AddToCartRequest {
            product_id: green.id,
            weight: 100,
            quantity: None,
        },
    )
    .await?;
    assert_eq!(cart.data.unwrap().total_quantity, 3);

    // Checkout pins the delivery date to the next Trenčín run.
    let order = order_service::checkout(&state, &partner).await?.data.unwrap();
    assert_eq!(order.delivery_date.weekday(), Weekday::Thu);
    assert!(order.delivery_date > Local::now().date_naive());
    assert!(!order.delivered);

    let emptied = cart_service::view_cart(&state, &partner).await?.data.unwrap();
    assert!(emptied.items.is_empty());

    let date = calendar::format_date(order.delivery_date);

    // Cutting list shows the two package sizes, nothing harvested yet.
    let summary = admin_service::harvest_summary(
        &state,
        &admin,
        DateQuery {
            date: Some(date.clone()),
        },
    )
    .await?
    .data
    .unwrap();
    assert_eq!(summary.region, Region::TrencinArea);
    let row = summary
        .rows
        .iter()
        .find(|r| r.product_id == green.id)
        .unwrap();
    assert_eq!(row.total, 3);
    assert!(row.lines.iter().all(|l| !l.harvested));

    let toggled = admin_service::toggle_harvest(
        &state,
        &admin,
        HarvestToggleRequest {
            date: date.clone(),
            product_id: green.id,
            weight: 50,
        },
    )
    .await?
    .data
    .unwrap();
    assert!(toggled.harvested);

    let summary = admin_service::harvest_summary(
        &state,
        &admin,
        DateQuery {
            date: Some(date.clone()),
        },
    )
    .await?
    .data
    .unwrap();
    let row = summary
        .rows
        .iter()
        .find(|r| r.product_id == green.id)
        .unwrap();
    assert!(row.lines.iter().any(|l| l.weight == 50 && l.harvested));
    assert!(row.lines.iter().any(|l| l.weight == 100 && !l.harvested));

    // Route plan has our single stop with a maps link for the address.
    let plan = admin_service::route_plan(
        &state,
        &admin,
        RouteQuery {
            date: Some(date.clone()),
            region: None,
        },
    )
    .await?
    .data
    .unwrap();
    assert_eq!(plan.region, Region::TrencinArea);
    assert_eq!(plan.stops.len(), 1);
    assert_eq!(plan.stops[0].order.id, order.id);
    assert!(plan.stops[0].maps_url.is_some());

    let delivered = admin_service::toggle_delivered(&state, &admin, order.id)
        .await?
        .data
        .unwrap();
    assert!(delivered.delivered);

    // Moving the partner to another region leaves the placed order where
    // it was scheduled.
    partner_service::assign_region(
        &state,
        &admin,
        partner.name.clone(),
        AssignRegionRequest {
            region: Region::BratislavaArea,
        },
    )
    .await?;

    let listed = admin_service::list_all_orders(
        &state,
        &admin,
        AdminOrdersQuery {
            date: Some(date),
            page: None,
            per_page: None,
        },
    )
    .await?
    .data
    .unwrap();
    assert_eq!(listed.items.len(), 1);
    assert!(listed.items[0].delivered);
    assert_eq!(listed.items[0].delivery_date, order.delivery_date);

    Ok(())
}

#[tokio::test]
async fn partner_access_is_scoped() -> anyhow::Result<()> {
    let state = AppState::init(Arc::new(MemoryStore::default())).await?;

    let partner = AuthUser {
        name: "Nezmluvný podnik".to_string(),
        role: Role::Customer,
    };

    // Admin surfaces refuse non-admin callers.
    assert!(admin_service::current_window(&state, &partner).await.is_err());
    assert!(admin_service::delivery_dates(&state, &partner).await.is_err());
    assert!(partner_service::roster(&state, &partner).await.is_err());

    let registered = auth_service::register_user(
        &state,
        RegisterRequest {
            name: "Prázdny Košík".to_string(),
            password: "heslo".to_string(),
            email: None,
            phone: None,
            address: None,
            region: Region::BratislavaArea,
        },
    )
    .await?;
    let empty_partner = AuthUser {
        name: registered.data.unwrap().name,
        role: Role::Customer,
    };

    // A case variant of a taken name is the same name, accents included.
    let duplicate = auth_service::register_user(
        &state,
        RegisterRequest {
            name: "prázdny košík".to_string(),
            password: "heslo2".to_string(),
            email: None,
            phone: None,
            address: None,
            region: Region::BratislavaArea,
        },
    )
    .await;
    assert!(duplicate.is_err());

    // Checkout with nothing in the cart is rejected.
    assert!(order_service::checkout(&state, &empty_partner).await.is_err());

    Ok(())
}
