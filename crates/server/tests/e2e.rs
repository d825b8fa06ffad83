use std::net::SocketAddr;

use axum::Router;
use migration::MigratorTrait;
use reqwest::StatusCode as HttpStatusCode;
use serde_json::{json, Value};
use service::auth::service::AuthConfig;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use uuid::Uuid;

use server::routes;
use server::state::ServerState;

fn cors() -> CorsLayer { CorsLayer::very_permissive() }

struct TestApp {
    base_url: String,
}

/// Start the real stack on an ephemeral port, or `None` without a database.
async fn start_server() -> Option<TestApp> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return None;
    }
    let db = match models::db::connect().await {
        Ok(db) => db,
        Err(e) => {
            eprintln!("skip e2e: cannot connect to db: {}", e);
            return None;
        }
    };
    if let Err(e) = migration::Migrator::up(&db, None).await {
        eprintln!("skip e2e: migrate up failed: {}", e);
        return None;
    }

    let state = ServerState::with_database(db, AuthConfig { jwt_secret: Some("test-secret".into()), password_algorithm: "argon2".into() });
    let app: Router = routes::build_router(state, cors());
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await.ok()?;
    let addr: SocketAddr = listener.local_addr().ok()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await { eprintln!("server error: {}", e); }
    });
    Some(TestApp { base_url })
}

#[tokio::test]
async fn e2e_signup_entries_and_balance() -> anyhow::Result<()> {
    let Some(app) = start_server().await else { return Ok(()) };
    let client = reqwest::Client::new();
    let email = format!("e2e_{}@email.com", Uuid::new_v4());

    let resp = client
        .post(format!("{}/api/usuarios", app.base_url))
        .json(&json!({"nome": "usuario", "email": email, "senha": "senha"}))
        .send()
        .await?;
    assert_eq!(resp.status(), HttpStatusCode::CREATED);
    let user: Value = resp.json().await?;
    let user_id = user["id"].as_str().unwrap_or_default().to_string();

    let resp = client
        .post(format!("{}/api/usuarios/autenticar", app.base_url))
        .json(&json!({"email": email, "senha": "senha"}))
        .send()
        .await?;
    assert_eq!(resp.status(), HttpStatusCode::OK);
    assert!(resp.headers().get("set-cookie").is_some());

    for (tipo, valor) in [("RECEITA", "300.00"), ("DESPESA", "120.00")] {
        let resp = client
            .post(format!("{}/api/lancamentos", app.base_url))
            .json(&json!({"descricao": "e2e", "mes": 5, "ano": 2024, "valor": valor, "usuario": user_id, "tipo": tipo}))
            .send()
            .await?;
        assert_eq!(resp.status(), HttpStatusCode::CREATED);
    }

    let resp = client
        .get(format!("{}/api/lancamentos?usuario={}&tipo=DESPESA", app.base_url, user_id))
        .send()
        .await?;
    assert_eq!(resp.status(), HttpStatusCode::OK);
    let list: Vec<Value> = resp.json().await?;
    assert_eq!(list.len(), 1);

    let resp = client
        .get(format!("{}/api/usuarios/{}/saldo", app.base_url, user_id))
        .send()
        .await?;
    assert_eq!(resp.status(), HttpStatusCode::OK);
    let saldo: Value = resp.json().await?;
    assert_eq!(saldo["saldo"], "180.00");

    let resp = client.get(format!("{}/api-docs/openapi.json", app.base_url)).send().await?;
    assert_eq!(resp.status(), HttpStatusCode::OK);
    Ok(())
}
