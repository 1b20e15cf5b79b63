use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dispatch::RouteStop,
    dto::{
        admin::{
            AdminWindowResponse, DeliveryDatesResponse, HarvestSummaryResponse,
            HarvestToggleRequest, HarvestToggleResponse, RoutePlanResponse, SummaryLine,
            SummaryRow,
        },
        auth::{LoginRequest, LoginResponse, RegisterRequest},
        cart::{AddToCartRequest, CartLineView, CartView},
        orders::{NextDeliveryResponse, OrderList},
        partners::{
            AssignRegionRequest, PartnerList, PartnerProfile, RemovePartnerRequest,
            UpdateProfileRequest,
        },
        products::{CreateProductRequest, ProductList, UpdateProductRequest},
    },
    models::{Microgreen, Order, OrderItem, Region, Role, Unit},
    response::{ApiResponse, Meta},
    routes::{admin, auth, cart, health, orders, params, partners, products},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        auth::register,
        auth::login,
        partners::me,
        partners::update_me,
        partners::roster,
        partners::remove_partner,
        partners::assign_region,
        products::list_products,
        products::get_product,
        products::create_product,
        products::update_product,
        products::delete_product,
        products::toggle_availability,
        cart::cart_view,
        cart::add_item,
        cart::remove_item,
        orders::list_orders,
        orders::checkout,
        orders::next_delivery,
        orders::get_order,
        admin::current_window,
        admin::delivery_dates,
        admin::harvest_summary,
        admin::toggle_harvest,
        admin::route_plan,
        admin::list_all_orders,
        admin::toggle_delivered
    ),
    components(
        schemas(
            Role,
            Region,
            Unit,
            Microgreen,
            OrderItem,
            Order,
            RouteStop,
            RegisterRequest,
            LoginRequest,
            LoginResponse,
            PartnerProfile,
            UpdateProfileRequest,
            PartnerList,
            RemovePartnerRequest,
            AssignRegionRequest,
            CreateProductRequest,
            UpdateProductRequest,
            ProductList,
            AddToCartRequest,
            CartLineView,
            CartView,
            OrderList,
            NextDeliveryResponse,
            AdminWindowResponse,
            DeliveryDatesResponse,
            SummaryLine,
            SummaryRow,
            HarvestSummaryResponse,
            HarvestToggleRequest,
            HarvestToggleResponse,
            RoutePlanResponse,
            health::HealthData,
            params::DateQuery,
            params::RouteQuery,
            params::AdminOrdersQuery,
            Meta,
            ApiResponse<Microgreen>,
            ApiResponse<ProductList>,
            ApiResponse<OrderList>,
            ApiResponse<CartView>,
            ApiResponse<PartnerProfile>
        )
    ),
    security(
        ("bearer_auth" = [])
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Auth", description = "Partner login and registration"),
        (name = "Partners", description = "Partner profiles and roster"),
        (name = "Products", description = "Microgreen catalogue"),
        (name = "Cart", description = "Session cart"),
        (name = "Orders", description = "Partner orders"),
        (name = "Admin", description = "Harvest planning and delivery routes"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
