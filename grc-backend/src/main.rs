// src/main.rs
use axum::middleware::from_fn;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use grc_backend::api::handlers::rbac_handler::rbac_router;
use grc_backend::api::AppState;
use grc_backend::config::Config;
use grc_backend::db::create_db_pool;
use grc_backend::logging::{inject_request_context, logging_middleware};
use grc_backend::middleware::identity::identity_middleware;
use migration::Migrator;
use sea_orm_migration::MigratorTrait;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // トレーシングの設定
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "grc_backend=info,tower_http=info".into()),
        )
        .with(fmt::layer())
        .init();

    tracing::info!("Starting GRC RBAC backend server...");

    // 設定を読み込む
    let app_config = Config::from_env().expect("Failed to load configuration");

    // データベース接続を作成
    let db_pool = create_db_pool(&app_config)
        .await
        .expect("Failed to create database pool");

    tracing::info!("Database pool created successfully.");

    // 未適用のマイグレーションを適用してからアプリ状態を組み立てる
    Migrator::up(&db_pool, None)
        .await
        .expect("Failed to run database migrations");

    tracing::info!("Database migrations applied.");

    let app_state = AppState::new(db_pool);

    // ルーターの設定
    //
    // 識別ミドルウェアを最外層に置き、その内側でリクエストコンテキストを
    // 生成する（抽出済みユーザーIDをログに載せるため）。
    let app_router = rbac_router(app_state)
        .layer(from_fn(logging_middleware))
        .layer(from_fn(inject_request_context))
        .layer(from_fn(identity_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(30)))
        .layer(CorsLayer::permissive());

    // サーバーの起動
    tracing::info!(
        "Router configured. Server listening on {}",
        app_config.server_addr
    );

    let listener = TcpListener::bind(&app_config.server_addr).await?;
    axum::serve(listener, app_router.into_make_service()).await?;

    Ok(())
}
