use commuteu::{
    client::{ClientError, FormField, HttpRidesApi, LoadState, RideBoard, RidesApi},
    config::AppConfig,
    db::{init_pool, run_migrations},
    models::{driver::Driver, ride::NewRide},
    routes::create_router,
    state::AppState,
};
use tempfile::TempDir;
use tokio::net::TcpListener;

struct TestServer {
    base_url: String,
    state: AppState,
    _root: TempDir,
}

async fn spawn_server() -> TestServer {
    let root = TempDir::new().expect("temp dir");
    let config = AppConfig {
        database_url: format!(
            "sqlite://{}",
            root.path().join("client.sqlite").to_string_lossy()
        ),
        listen_addr: ([127, 0, 0, 1], 0).into(),
    };
    let db = init_pool(&config.database_url).await.expect("pool");
    run_migrations(&db).await.expect("migrations");
    let state = AppState::new(db);

    let listener = TcpListener::bind(config.listen_addr).await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    let app = create_router(state.clone());
    tokio::spawn(async move {
        axum::serve(listener, app.into_make_service())
            .await
            .expect("server");
    });

    TestServer {
        base_url: format!("http://{addr}"),
        state,
        _root: root,
    }
}

async fn add_driver(server: &TestServer, id: &str) {
    let driver = Driver {
        id: id.into(),
        ..Driver::new("Priya", Some("priya@example.edu".into()))
    };
    server
        .state
        .rides
        .store()
        .create_driver(driver)
        .await
        .expect("driver");
}

fn new_ride(depart: &str, from: &str) -> NewRide {
    NewRide {
        driver_id: Some("d1".into()),
        depart_time: Some(depart.into()),
        from_label: Some(from.into()),
        to_campus: Some("Surrey".into()),
        seats: Some(2i64.into()),
        notes: Some("Meet at the north entrance".into()),
    }
}

#[tokio::test]
async fn created_ride_is_listed_in_departure_order() {
    let server = spawn_server().await;
    add_driver(&server, "d1").await;
    let api = HttpRidesApi::new(format!("{}/", server.base_url));

    let later = api
        .create_ride(&new_ride("2025-10-02T08:15", "Burquitlam"))
        .await
        .expect("create later ride");
    let sooner = api
        .create_ride(&new_ride("2025-10-01T08:15", "Lougheed"))
        .await
        .expect("create sooner ride");

    let listed = api.list_rides().await.expect("list");
    assert_eq!(listed, vec![sooner, later.clone()]);
    assert_eq!(later.notes.as_deref(), Some("Meet at the north entrance"));
}

#[tokio::test]
async fn rejected_create_carries_server_message() {
    let server = spawn_server().await;
    let api = HttpRidesApi::new(server.base_url.clone());

    let mut missing = new_ride("2025-10-01T08:15", "Lougheed");
    missing.to_campus = None;
    match api.create_ride(&missing).await {
        Err(ClientError::Rejected { status, message }) => {
            assert_eq!(status, 400);
            assert_eq!(message, "Missing required fields");
        }
        other => panic!("expected a rejection, got {other:?}"),
    }

    match api.create_ride(&new_ride("2025-10-01T08:15", "Lougheed")).await {
        Err(ClientError::Rejected { status, message }) => {
            assert_eq!(status, 500);
            assert!(message.contains("FOREIGN KEY constraint failed"));
        }
        other => panic!("expected a store failure, got {other:?}"),
    }
}

#[tokio::test]
async fn board_over_http_prepends_without_refetch() {
    let server = spawn_server().await;
    add_driver(&server, "d1").await;
    let api = HttpRidesApi::new(server.base_url.clone());
    api.create_ride(&new_ride("2025-10-01T08:15", "Lougheed"))
        .await
        .expect("seed ride");

    let mut board = RideBoard::new(api);
    board.mount().await;
    assert_eq!(board.load_state(), LoadState::Loaded);
    assert_eq!(board.rides().len(), 1);

    board.update_field(FormField::DriverId, "d1");
    board.update_field(FormField::FromLabel, "Production Way");
    board.update_field(FormField::ToCampus, "Burnaby");
    board.update_field(FormField::Seats, "4");
    board.update_field(FormField::DepartTime, "2025-10-03T07:45");
    board.submit().await.expect("submit");

    let origins: Vec<_> = board.rides().iter().map(|r| r.from_label.as_str()).collect();
    assert_eq!(origins, ["Production Way", "Lougheed"]);
    assert!(board.form().is_empty());
}

#[tokio::test]
async fn unreachable_server_leaves_board_empty() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let mut board = RideBoard::new(HttpRidesApi::new(format!("http://{addr}")));
    board.mount().await;
    assert_eq!(board.load_state(), LoadState::Loaded);
    assert!(board.rides().is_empty());

    board.update_field(FormField::DriverId, "d1");
    let err = board.submit().await.expect_err("no server to talk to");
    assert!(matches!(err, ClientError::Network(_)));
    assert_eq!(board.form().driver_id, "d1");
    assert!(board
        .notification()
        .is_some_and(|n| n.message.starts_with("Error creating ride: ")));
}
