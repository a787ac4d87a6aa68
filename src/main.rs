//! Walkin.it Storefront - headless storefront service
//!
//! Thin JSON adapter over the storefront core. Handlers validate at the
//! boundary, take the session lock, call into the core, and forward drained
//! shop events to the tracing subscriber.

use std::sync::Arc;

use anyhow::Result;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use validator::Validate;

use walkinit_storefront::checkout::{CheckoutError, CheckoutFlow, CheckoutStage, OrderForm};
use walkinit_storefront::config::ShopConfig;
use walkinit_storefront::domain::aggregates::{Catalog, CategoryFilter, Product};
use walkinit_storefront::domain::user::User;
use walkinit_storefront::domain::value_objects::{Money, ProductId};
use walkinit_storefront::services::assistant::{ChatTurn, StylistClient};
use walkinit_storefront::services::orders::OrderStoreClient;
use walkinit_storefront::shop::ShopState;
use walkinit_storefront::{pricing, seed, CartLine};

/// The one browsing session this process serves. Everything mutable lives
/// behind a single lock, held across a submission's network round trip, so
/// all state changes happen on one logical thread.
struct Session {
    shop: ShopState,
    flow: CheckoutFlow,
}

#[derive(Clone)]
struct AppState {
    session: Arc<Mutex<Session>>,
    orders: OrderStoreClient,
    stylist: StylistClient,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ShopConfig::from_env()?;
    let orders = OrderStoreClient::new(&config.order_store_url, &config.order_store_api_key)?;
    let stylist = StylistClient::new(config.gemini_api_key.clone(), config.gemini_model.clone())?;
    let shop = ShopState::new(
        Catalog::with_products(seed::initial_catalog()),
        Some(seed::demo_user()),
    );
    let state = AppState {
        session: Arc::new(Mutex::new(Session {
            shop,
            flow: CheckoutFlow::new(),
        })),
        orders,
        stylist,
    };

    let app = Router::new()
        .route(
            "/health",
            get(|| async {
                Json(serde_json::json!({"status": "healthy", "service": "walkinit-storefront"}))
            }),
        )
        .route("/api/v1/products", get(list_products).post(create_product))
        .route("/api/v1/products/:id", get(get_product))
        .route("/api/v1/categories", get(list_categories))
        .route("/api/v1/user", get(current_user))
        .route(
            "/api/v1/cart",
            get(get_cart).post(add_to_cart).delete(clear_cart),
        )
        .route("/api/v1/cart/:product_id", delete(remove_from_cart))
        .route(
            "/api/v1/checkout",
            get(checkout_view).post(proceed_to_checkout).delete(back_to_cart),
        )
        .route("/api/v1/checkout/order", post(submit_order))
        .route("/api/v1/assistant/describe", post(describe_product))
        .route("/api/v1/assistant/chat", post(assistant_chat))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state);

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("walkinit-storefront listening on {addr}");
    axum::serve(tokio::net::TcpListener::bind(addr).await?, app).await?;
    Ok(())
}

fn drain_events(shop: &mut ShopState) {
    for event in shop.take_events() {
        tracing::debug!(?event, "shop event");
    }
}

// ---- catalog ----

#[derive(Debug, Deserialize)]
struct ProductQuery {
    category: Option<String>,
    max_price: Option<f64>,
}

async fn list_products(
    State(s): State<AppState>,
    Query(q): Query<ProductQuery>,
) -> Result<Json<Vec<Product>>, (StatusCode, String)> {
    let ceiling = match q.max_price {
        Some(raw) => Money::new(
            Decimal::try_from(raw)
                .map_err(|e| (StatusCode::BAD_REQUEST, format!("invalid max_price: {e}")))?,
        ),
        None => Money::new(Decimal::MAX),
    };
    let category = CategoryFilter::from(q.category);

    let session = s.session.lock().await;
    let products = session
        .shop
        .catalog()
        .filter(&category, ceiling)
        .into_iter()
        .cloned()
        .collect();
    Ok(Json(products))
}

async fn get_product(
    State(s): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Product>, (StatusCode, String)> {
    let session = s.session.lock().await;
    session
        .shop
        .catalog()
        .get(&ProductId::new(id))
        .cloned()
        .map(Json)
        .ok_or((StatusCode::NOT_FOUND, "product not found".to_string()))
}

async fn list_categories(State(s): State<AppState>) -> Json<Vec<String>> {
    let session = s.session.lock().await;
    let labels = session
        .shop
        .catalog()
        .category_options()
        .iter()
        .map(|option| option.label().to_string())
        .collect();
    Json(labels)
}

async fn current_user(
    State(s): State<AppState>,
) -> Result<Json<User>, (StatusCode, String)> {
    let session = s.session.lock().await;
    session
        .shop
        .user()
        .cloned()
        .map(Json)
        .ok_or((StatusCode::NOT_FOUND, "no user signed in".to_string()))
}

#[derive(Debug, Deserialize, Validate)]
struct CreateProductRequest {
    #[validate(length(min = 1, message = "name is required"))]
    name: String,
    price: Money,
    #[validate(length(min = 1, message = "category is required"))]
    category: String,
    sizes: Vec<Decimal>,
    colors: Vec<String>,
    image: Option<String>,
    #[serde(default)]
    description: String,
}

async fn create_product(
    State(s): State<AppState>,
    Json(r): Json<CreateProductRequest>,
) -> Result<(StatusCode, Json<Product>), (StatusCode, String)> {
    let mut session = s.session.lock().await;
    if !session.shop.user().is_some_and(User::is_admin) {
        return Err((StatusCode::FORBIDDEN, "admin role required".to_string()));
    }
    r.validate()
        .map_err(|e| (StatusCode::UNPROCESSABLE_ENTITY, e.to_string()))?;
    if r.price < Money::ZERO {
        return Err((
            StatusCode::UNPROCESSABLE_ENTITY,
            "price must be non-negative".to_string(),
        ));
    }

    let product = Product {
        id: ProductId::generate(),
        name: r.name,
        price: r.price,
        category: r.category,
        sizes: r.sizes,
        colors: r.colors,
        image: r
            .image
            .unwrap_or_else(|| "https://picsum.photos/600/600".to_string()),
        description: r.description,
        is_featured: false,
    };
    session.shop.add_product(product.clone());
    drain_events(&mut session.shop);
    Ok((StatusCode::CREATED, Json(product)))
}

// ---- cart ----

#[derive(Serialize)]
struct CartView {
    lines: Vec<CartLine>,
    subtotal: Money,
    shipping: Money,
    total: Money,
}

fn cart_view(shop: &ShopState) -> CartView {
    let subtotal = pricing::subtotal(shop.cart());
    CartView {
        lines: shop.cart().snapshot(),
        subtotal,
        shipping: pricing::shipping(subtotal),
        total: pricing::total(shop.cart()),
    }
}

/// The cart is read-only while the checkout form is active.
fn ensure_cart_editable(flow: &CheckoutFlow) -> Result<(), (StatusCode, String)> {
    if flow.stage() == CheckoutStage::Checkout {
        return Err((
            StatusCode::CONFLICT,
            "cart is read-only during checkout".to_string(),
        ));
    }
    Ok(())
}

async fn get_cart(State(s): State<AppState>) -> Json<CartView> {
    let session = s.session.lock().await;
    Json(cart_view(&session.shop))
}

#[derive(Debug, Deserialize)]
struct AddToCartRequest {
    product_id: ProductId,
    size: Decimal,
    color: String,
}

async fn add_to_cart(
    State(s): State<AppState>,
    Json(r): Json<AddToCartRequest>,
) -> Result<(StatusCode, Json<CartView>), (StatusCode, String)> {
    let mut session = s.session.lock().await;
    ensure_cart_editable(&session.flow)?;

    let product = session
        .shop
        .catalog()
        .get(&r.product_id)
        .cloned()
        .ok_or((StatusCode::NOT_FOUND, "product not found".to_string()))?;
    if !product.offers_size(r.size) {
        return Err((
            StatusCode::UNPROCESSABLE_ENTITY,
            format!("size {} is not offered for this product", r.size),
        ));
    }
    if !product.offers_color(&r.color) {
        return Err((
            StatusCode::UNPROCESSABLE_ENTITY,
            format!("color {} is not offered for this product", r.color),
        ));
    }

    session.shop.add_to_cart(product, r.size, r.color);
    drain_events(&mut session.shop);
    Ok((StatusCode::CREATED, Json(cart_view(&session.shop))))
}

async fn remove_from_cart(
    State(s): State<AppState>,
    Path(product_id): Path<String>,
) -> Result<Json<CartView>, (StatusCode, String)> {
    let mut session = s.session.lock().await;
    ensure_cart_editable(&session.flow)?;
    session.shop.remove_from_cart(&ProductId::new(product_id));
    drain_events(&mut session.shop);
    Ok(Json(cart_view(&session.shop)))
}

async fn clear_cart(
    State(s): State<AppState>,
) -> Result<Json<CartView>, (StatusCode, String)> {
    let mut session = s.session.lock().await;
    ensure_cart_editable(&session.flow)?;
    session.shop.clear_cart();
    drain_events(&mut session.shop);
    Ok(Json(cart_view(&session.shop)))
}

// ---- checkout ----

#[derive(Serialize)]
struct CheckoutView {
    stage: CheckoutStage,
    in_flight: bool,
}

fn checkout_error(err: CheckoutError) -> (StatusCode, String) {
    match err {
        CheckoutError::Submission(source) => {
            tracing::error!(error = %source, "order submission failed");
            (
                StatusCode::BAD_GATEWAY,
                "There was an issue processing your order. Please try again.".to_string(),
            )
        }
        CheckoutError::InvalidForm(errors) => {
            (StatusCode::UNPROCESSABLE_ENTITY, errors.to_string())
        }
        other => (StatusCode::CONFLICT, other.to_string()),
    }
}

async fn checkout_view(State(s): State<AppState>) -> Json<CheckoutView> {
    let session = s.session.lock().await;
    Json(CheckoutView {
        stage: session.flow.stage(),
        in_flight: session.flow.is_in_flight(),
    })
}

async fn proceed_to_checkout(
    State(s): State<AppState>,
) -> Result<Json<CheckoutView>, (StatusCode, String)> {
    let mut session = s.session.lock().await;
    let Session { shop, flow } = &mut *session;
    flow.proceed(shop).map_err(checkout_error)?;
    Ok(Json(CheckoutView {
        stage: flow.stage(),
        in_flight: flow.is_in_flight(),
    }))
}

async fn back_to_cart(
    State(s): State<AppState>,
) -> Result<Json<CheckoutView>, (StatusCode, String)> {
    let mut session = s.session.lock().await;
    session.flow.back().map_err(checkout_error)?;
    Ok(Json(CheckoutView {
        stage: session.flow.stage(),
        in_flight: session.flow.is_in_flight(),
    }))
}

#[derive(Serialize)]
struct OrderConfirmation {
    stage: CheckoutStage,
    confirmation_email: String,
}

async fn submit_order(
    State(s): State<AppState>,
    Json(form): Json<OrderForm>,
) -> Result<Json<OrderConfirmation>, (StatusCode, String)> {
    let mut session = s.session.lock().await;
    let Session { shop, flow } = &mut *session;
    flow.submit(shop, &form, &s.orders)
        .await
        .map_err(checkout_error)?;
    drain_events(shop);
    Ok(Json(OrderConfirmation {
        stage: flow.stage(),
        confirmation_email: form.email,
    }))
}

// ---- assistant ----

#[derive(Debug, Deserialize)]
struct DescribeRequest {
    name: String,
    #[serde(default)]
    features: String,
}

async fn describe_product(
    State(s): State<AppState>,
    Json(r): Json<DescribeRequest>,
) -> Result<Json<serde_json::Value>, (StatusCode, String)> {
    if r.name.trim().is_empty() {
        return Err((
            StatusCode::UNPROCESSABLE_ENTITY,
            "a product name is required before generating a description".to_string(),
        ));
    }
    let features = if r.features.trim().is_empty() {
        "comfortable, stylish, durable"
    } else {
        r.features.as_str()
    };
    let description = s.stylist.generate_description(&r.name, features).await;
    Ok(Json(serde_json::json!({ "description": description })))
}

#[derive(Debug, Deserialize)]
struct ChatRequest {
    #[serde(default)]
    history: Vec<ChatTurn>,
    message: String,
}

async fn assistant_chat(
    State(s): State<AppState>,
    Json(r): Json<ChatRequest>,
) -> Result<Json<serde_json::Value>, (StatusCode, String)> {
    if r.message.trim().is_empty() {
        return Err((
            StatusCode::UNPROCESSABLE_ENTITY,
            "message must not be empty".to_string(),
        ));
    }
    let reply = s.stylist.chat(&r.history, &r.message).await;
    Ok(Json(serde_json::json!({ "reply": reply })))
}
