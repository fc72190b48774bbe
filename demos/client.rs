use anyhow::{Context, Result, bail};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
struct CreateTodo<'a> {
    title: &'a str,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Todo {
    id: i32,
    title: String,
    status: bool,
    created: String,
    updated: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Defaults assume the server is running locally on :8000
    let base = std::env::var("BASE_URL").unwrap_or_else(|_| "http://127.0.0.1:8000/api".to_string());
    let http = Client::new();

    // 1) list
    let todos = list(&http, &base).await?;
    println!("{} todo(s) on the server", todos.len());

    // 2) create
    let todo = create(&http, &base, "Try the todo API").await?;
    println!("created #{} {:?}", todo.id, todo.title);

    // 3) toggle completion by sending the whole object back
    let mut toggled = todo.clone();
    toggled.status = !toggled.status;
    let toggled = replace(&http, &base, &toggled).await?;
    println!("#{} status -> {}", toggled.id, toggled.status);

    // 4) rename
    let mut renamed = toggled.clone();
    renamed.title = "Tried the todo API".to_string();
    let renamed = replace(&http, &base, &renamed).await?;
    println!("#{} title -> {:?} (updated {})", renamed.id, renamed.title, renamed.updated);

    // 5) delete, then confirm it is gone
    delete(&http, &base, renamed.id).await?;
    let res = http
        .get(format!("{base}/todos/{}/", renamed.id))
        .send()
        .await?;
    if res.status() != StatusCode::NOT_FOUND {
        bail!("expected 404 after delete, got {}", res.status());
    }
    println!("deleted #{}", renamed.id);

    Ok(())
}

async fn list(http: &Client, base: &str) -> Result<Vec<Todo>> {
    let res = http.get(format!("{base}/todos/")).send().await?;
    if !res.status().is_success() {
        bail!("list failed: {}", res.text().await?);
    }
    res.json().await.context("decode todo list")
}

async fn create(http: &Client, base: &str, title: &str) -> Result<Todo> {
    let res = http
        .post(format!("{base}/todos/create/"))
        .json(&CreateTodo { title })
        .send()
        .await?;
    if res.status() != StatusCode::CREATED {
        bail!("create failed: {} {}", res.status(), res.text().await?);
    }
    res.json().await.context("decode created todo")
}

async fn replace(http: &Client, base: &str, todo: &Todo) -> Result<Todo> {
    let res = http
        .put(format!("{base}/todos/{}/update/", todo.id))
        .json(todo)
        .send()
        .await?;
    if !res.status().is_success() {
        bail!("update failed: {} {}", res.status(), res.text().await?);
    }
    res.json().await.context("decode updated todo")
}

async fn delete(http: &Client, base: &str, id: i32) -> Result<()> {
    let res = http
        .delete(format!("{base}/todos/{id}/delete/"))
        .send()
        .await?;
    if res.status() != StatusCode::NO_CONTENT {
        bail!("delete failed: {} {}", res.status(), res.text().await?);
    }
    Ok(())
}
