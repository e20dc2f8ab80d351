use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, patch},
};
use chrono::{Local, NaiveTime};
use client::api::{HttpTaskApi, TaskApi};
use client::app::App;
use client::error::{ClientError, FailureHandler, Operation};
use common::{NewTask, Priority, Task};
use parking_lot::Mutex;
use serde_json::{Value, json};

/// In-memory stand-in for the task service, recording what it receives.
#[derive(Default)]
struct Backend {
    tasks: Vec<Task>,
    next_id: i64,
    create_bodies: Vec<Value>,
    requests: usize,
    fail_creates: bool,
}

type Shared = Arc<Mutex<Backend>>;

async fn list_tasks(State(backend): State<Shared>) -> Json<Vec<Task>> {
    let mut backend = backend.lock();
    backend.requests += 1;
    Json(backend.tasks.clone())
}

async fn create_task(
    State(backend): State<Shared>,
    Json(body): Json<Value>,
) -> Result<Json<Task>, StatusCode> {
    let mut backend = backend.lock();
    backend.requests += 1;
    backend.create_bodies.push(body.clone());
    if backend.fail_creates {
        return Err(StatusCode::INTERNAL_SERVER_ERROR);
    }

    let new_task: NewTask = serde_json::from_value(body).map_err(|_| StatusCode::BAD_REQUEST)?;
    backend.next_id += 1;
    let task = Task {
        id: backend.next_id,
        description: new_task.description,
        category: new_task.category,
        priority: new_task.priority,
        completed: false,
        date_created: Local::now().naive_local(),
        due_date: new_task.due_date.map(|d| d.and_time(NaiveTime::MIN)),
    };
    backend.tasks.push(task.clone());
    Ok(Json(task))
}

async fn toggle_task(
    State(backend): State<Shared>,
    Path(id): Path<i64>,
) -> Result<Json<Task>, StatusCode> {
    let mut backend = backend.lock();
    backend.requests += 1;
    let task = backend
        .tasks
        .iter_mut()
        .find(|t| t.id == id)
        .ok_or(StatusCode::NOT_FOUND)?;
    task.completed = !task.completed;
    Ok(Json(task.clone()))
}

async fn delete_task(State(backend): State<Shared>, Path(id): Path<i64>) -> StatusCode {
    let mut backend = backend.lock();
    backend.requests += 1;
    let before = backend.tasks.len();
    backend.tasks.retain(|t| t.id != id);
    if backend.tasks.len() == before {
        StatusCode::NOT_FOUND
    } else {
        StatusCode::NO_CONTENT
    }
}

/// Starts the stub service on a free local port and returns its root URL.
async fn spawn_backend(backend: Shared) -> String {
    let app = Router::new()
        .route("/tasks", get(list_tasks).post(create_task))
        .route("/tasks/{id}", patch(toggle_task).delete(delete_task))
        .with_state(backend);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind stub backend");
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}

#[derive(Default)]
struct RecordFailures(Vec<ClientError>);

impl FailureHandler for RecordFailures {
    fn report(&mut self, err: &ClientError) {
        self.0.push(err.clone());
    }
}

async fn setup() -> (Shared, App<HttpTaskApi, RecordFailures>) {
    let backend: Shared = Arc::default();
    let url = spawn_backend(backend.clone()).await;
    let api = HttpTaskApi::new(&url).unwrap();
    let (app, _outcomes) = App::new(api, RecordFailures::default());
    (backend, app)
}

fn seed(backend: &Shared, descriptions: &[(i64, &str)]) {
    let mut backend = backend.lock();
    for (id, description) in descriptions {
        backend.tasks.push(Task {
            id: *id,
            description: description.to_string(),
            category: None,
            priority: 1,
            completed: false,
            date_created: Local::now().naive_local(),
            due_date: None,
        });
        backend.next_id = backend.next_id.max(*id);
    }
}

#[tokio::test]
async fn test_load_twice_gives_same_list() {
    // Arrange
    let (backend, mut app) = setup().await;
    seed(&backend, &[(1, "First"), (2, "Second")]);

    // Act
    app.load_all().await;
    let first = app.board.tasks.clone();
    app.load_all().await;

    // Assert
    assert_eq!(first.len(), 2);
    assert_eq!(app.board.tasks, first);
    assert_eq!(first[0].description, "First");
}

#[tokio::test]
async fn test_create_round_trip() {
    // Arrange
    let (_backend, mut app) = setup().await;
    app.board.drafts.description = "Buy milk".to_string();
    app.board.drafts.category = "Shopping".to_string();
    app.board.drafts.priority = Priority::Medium;
    app.board.drafts.due_date = chrono::NaiveDate::from_ymd_opt(2025, 1, 1);

    // Act
    assert!(app.add_task().await);
    let local = app.board.tasks.clone();
    app.load_all().await;

    // Assert: the fetched list holds exactly the created task
    assert_eq!(app.board.tasks.len(), 1);
    let task = &app.board.tasks[0];
    assert_eq!(task, &local[0]);
    assert_eq!(task.description, "Buy milk");
    assert_eq!(task.category.as_deref(), Some("Shopping"));
    assert_eq!(task.priority, 2);
    assert!(!task.completed);
    assert!(task.id > 0);
    assert_eq!(
        task.due_date.map(|d| d.date().to_string()).as_deref(),
        Some("2025-01-01")
    );
}

#[tokio::test]
async fn test_blank_description_sends_nothing() {
    let (backend, mut app) = setup().await;
    app.board.drafts.description = "   ".to_string();

    let sent = app.add_task().await;

    assert!(!sent);
    assert_eq!(backend.lock().requests, 0);
    assert!(app.board.tasks.is_empty());
}

#[tokio::test]
async fn test_blank_optionals_are_absent_from_body() {
    // Arrange
    let (backend, mut app) = setup().await;
    app.board.drafts.description = "Task A".to_string();

    // Act
    app.add_task().await;

    // Assert: the keys are missing, not null or empty
    let bodies = backend.lock().create_bodies.clone();
    assert_eq!(bodies, vec![json!({ "description": "Task A", "priority": 1 })]);
}

#[tokio::test]
async fn test_toggle_round_trip() {
    let (backend, mut app) = setup().await;
    seed(&backend, &[(1, "Flip me")]);
    app.load_all().await;

    app.toggle_task(1).await;
    assert!(app.board.tasks[0].completed);
    assert_eq!(app.board.tasks[0], backend.lock().tasks[0]);

    app.toggle_task(1).await;
    assert!(!app.board.tasks[0].completed);
}

#[tokio::test]
async fn test_delete_removes_exactly_one() {
    // Arrange
    let (backend, mut app) = setup().await;
    seed(&backend, &[(3, "three"), (5, "five"), (7, "seven")]);
    app.load_all().await;

    // Act
    app.delete_task(5).await;

    // Assert
    let ids: Vec<i64> = app.board.tasks.iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![3, 7]);
}

#[tokio::test]
async fn test_delete_of_missing_task_is_silent() {
    let (backend, mut app) = setup().await;
    seed(&backend, &[(3, "three"), (7, "seven")]);
    app.load_all().await;

    app.delete_task(5).await;

    assert_eq!(app.board.tasks.len(), 2);
    let failures = &app.failure_handler().0;
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].operation, Operation::Delete(5));
}

#[tokio::test]
async fn test_form_resets_only_on_success() {
    // Arrange: the service refuses the first creation
    let (backend, mut app) = setup().await;
    backend.lock().fail_creates = true;
    app.board.drafts.description = "Call mum".to_string();
    app.board.drafts.category = "Personal".to_string();
    app.board.drafts.priority = Priority::High;
    let typed = app.board.drafts.clone();

    // Act & Assert: failure keeps the input
    app.add_task().await;
    assert_eq!(app.board.drafts, typed);
    assert!(app.board.tasks.is_empty());
    assert_eq!(app.failure_handler().0[0].operation, Operation::Create);

    // Act & Assert: success clears it
    backend.lock().fail_creates = false;
    app.add_task().await;
    assert_eq!(app.board.drafts, Default::default());
    assert_eq!(app.board.tasks.len(), 1);
}

#[tokio::test]
async fn test_unreachable_service_leaves_list_empty() {
    // Nothing listens on the discard port
    let api = HttpTaskApi::new("http://127.0.0.1:9").unwrap();
    let (mut app, _outcomes) = App::new(api, RecordFailures::default());

    app.load_all().await;

    assert!(app.board.tasks.is_empty());
    assert_eq!(app.failure_handler().0[0].operation, Operation::Load);
}

#[tokio::test]
async fn test_api_accepts_bare_date_answers() {
    // A service answering with date-only due dates
    let app = Router::new().route(
        "/tasks",
        get(|| async {
            Json(json!([{
                "id": 1,
                "description": "Dentist",
                "category": null,
                "priority": 3,
                "completed": false,
                "dateCreated": "2025-01-01T08:00:00.250000",
                "dueDate": "2025-03-10"
            }]))
        }),
    );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let api = HttpTaskApi::new(&format!("http://{}", addr)).unwrap();
    let tasks = api.list().await.unwrap();

    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].priority_label(), "High");
    assert_eq!(
        tasks[0].due_date.map(|d| d.to_string()).as_deref(),
        Some("2025-03-10 00:00:00")
    );
}
