use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use todo_api::client::{ClientError, TodoBoard, TodoClient, ViewState};
use todo_api::repository::{InMemoryStore, TodoStore};
use todo_api::server::configure_app;

fn spawn_api() -> String {
    let store: Arc<dyn TodoStore> = Arc::new(InMemoryStore::new());
    let data = web::Data::from(store);
    let server = HttpServer::new(move || App::new().app_data(data.clone()).configure(configure_app))
        .workers(1)
        .bind(("127.0.0.1", 0))
        .expect("failed to bind test server");
    let addr = server.addrs()[0];
    actix_web::rt::spawn(server.run());
    format!("http://{}", addr)
}

fn contents(board: &TodoBoard) -> Vec<&str> {
    board.todos().iter().map(|t| t.content.as_str()).collect()
}

#[actix_web::test]
async fn board_reloads_after_every_change() {
    let mut board = TodoBoard::new(TodoClient::new(&spawn_api()).unwrap());

    board.mount().await;
    assert_eq!(board.state(), &ViewState::Loaded(vec![]));

    board.add("buy milk").await;
    board.add("write report").await;
    assert_eq!(contents(&board), vec!["write report", "buy milk"]);

    let id = board.todos()[1].id.clone();
    board.remove(&id).await;
    assert_eq!(contents(&board), vec!["write report"]);

    board.remove(&id).await;
    assert_eq!(contents(&board), vec!["write report"]);
}

#[actix_web::test]
async fn board_ignores_blank_input() {
    let mut board = TodoBoard::new(TodoClient::new(&spawn_api()).unwrap());
    board.mount().await;
    board.add("   ").await;
    assert_eq!(board.state(), &ViewState::Loaded(vec![]));
}

#[actix_web::test]
async fn board_stays_idle_when_api_is_unreachable() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let url = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let mut board = TodoBoard::new(TodoClient::new(&url).unwrap());
    board.mount().await;
    assert_eq!(board.state(), &ViewState::Idle);
    board.add("buy milk").await;
    assert_eq!(board.state(), &ViewState::Idle);
}

#[actix_web::test]
async fn client_reports_validation_errors() {
    let client = TodoClient::new(&spawn_api()).unwrap();
    match client.create("").await {
        Err(ClientError::Api { status, message }) => {
            assert_eq!(status, 400);
            assert_eq!(message, "content must not be empty");
        }
        other => panic!("expected a validation error, got {:?}", other),
    }
    assert!(client.list().await.unwrap().is_empty());
}

#[actix_web::test]
async fn client_delete_of_unknown_id_is_none() {
    let client = TodoClient::new(&spawn_api()).unwrap();
    let created = client.create("buy milk").await.unwrap();
    assert_eq!(client.delete("missing").await.unwrap(), None);
    assert_eq!(client.delete(&created.id).await.unwrap(), Some(created));
    assert!(client.list().await.unwrap().is_empty());
}

#[actix_web::test]
async fn client_round_trips_content() {
    let client = TodoClient::new(&spawn_api()).unwrap();
    let contents = [
        "Milch kaufen, Ärger vermeiden".to_string(),
        "牛乳を買う 🥛".to_string(),
        "say \"hi\" to C:\\temp".to_string(),
        "first line\nsecond line".to_string(),
        "  padded both sides  ".to_string(),
        "x".repeat(10_000),
    ];

    for (count, content) in contents.iter().enumerate() {
        let created = client.create(content).await.unwrap();
        assert_eq!(&created.content, content);

        let todos = client.list().await.unwrap();
        assert_eq!(todos.len(), count + 1);
        let stored: Vec<_> = todos.iter().filter(|t| t.id == created.id).collect();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].content.as_bytes(), content.as_bytes());
    }
}
