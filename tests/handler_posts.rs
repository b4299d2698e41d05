mod common;

use axum::http::StatusCode;
use common::TestApp;

#[tokio::test]
async fn test_admin_creates_post_and_is_redirected_to_it() {
    let app = TestApp::new();
    let (_, cookie) = app.admin().await;

    let response = app
        .server
        .post("/posts/create")
        .add_header(cookie.0.clone(), cookie.1.clone())
        .form(&[("title", "  Hello world  "), ("content", "First post body")])
        .await;

    response.assert_status(StatusCode::SEE_OTHER);
    let posts = app.db.posts();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].title, "Hello world");
    assert_eq!(
        response.header("location"),
        format!("/posts/detail/{}", posts[0].id).as_str()
    );

    let response = app
        .server
        .get(&format!("/posts/detail/{}", posts[0].id))
        .add_header(cookie.0, cookie.1)
        .await;
    response.assert_status_ok();
    let body = response.text();
    assert!(body.contains("Hello world"));
    assert!(body.contains("by Ada"));
    assert!(body.contains("/posts/edit/"));
}

#[tokio::test]
async fn test_create_post_validation_rerenders_form() {
    let app = TestApp::new();
    let (_, cookie) = app.admin().await;

    let response = app
        .server
        .post("/posts/create")
        .add_header(cookie.0, cookie.1)
        .form(&[("title", "   "), ("content", "Body kept")])
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    let body = response.text();
    assert!(body.contains("Title must be between 1 and 200 characters"));
    assert!(body.contains("Body kept"));
    assert_eq!(app.db.post_count(), 0);
}

#[tokio::test]
async fn test_admin_edits_post() {
    let app = TestApp::new();
    let (admin, cookie) = app.admin().await;
    app.db.insert_post(5, admin.id, "Draft");

    let response = app
        .server
        .post("/posts/edit/5")
        .add_header(cookie.0, cookie.1)
        .form(&[("title", "Final"), ("content", "Polished")])
        .await;

    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(response.header("location"), "/posts/detail/5");
    let post = &app.db.posts()[0];
    assert_eq!(post.title, "Final");
    assert_eq!(post.content, "Polished");
    assert!(post.is_edited());
}

#[tokio::test]
async fn test_edit_and_delete_missing_post_is_not_found() {
    let app = TestApp::new();
    let (_, cookie) = app.admin().await;

    let response = app
        .server
        .get("/posts/edit/404")
        .add_header(cookie.0.clone(), cookie.1.clone())
        .await;
    response.assert_status(StatusCode::NOT_FOUND);

    let response = app
        .server
        .get("/posts/delete/404")
        .add_header(cookie.0, cookie.1)
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_detail_is_public_and_hides_admin_links() {
    let app = TestApp::new();
    let (admin, _) = app.admin().await;
    app.db.insert_post(5, admin.id, "Public");
    app.db.insert_comment(5, admin.id, "A remark");

    let response = app.server.get("/posts/detail/5").await;

    response.assert_status_ok();
    let body = response.text();
    assert!(body.contains("Public"));
    assert!(body.contains("A remark"));
    assert!(!body.contains("/posts/edit/5"));
    assert!(body.contains("to comment"));
}

#[tokio::test]
async fn test_detail_of_missing_post_is_not_found() {
    let app = TestApp::new();

    let response = app.server.get("/posts/detail/77").await;

    response.assert_status(StatusCode::NOT_FOUND);
    assert!(response.text().contains("Post not found"));
}

#[tokio::test]
async fn test_index_paginates_newest_first() {
    let app = TestApp::new();
    let (admin, _) = app.admin().await;
    for i in 1..=12 {
        app.db.insert_post(100 + i, admin.id, &format!("Post number {i:02}"));
    }

    let response = app.server.get("/posts/index").await;
    response.assert_status_ok();
    let body = response.text();
    assert!(body.contains("Page 1 of 2 (12 posts)"));
    assert!(body.contains("Post number 12"));
    assert!(!body.contains("Post number 02"));

    let response = app
        .server
        .get("/posts/index")
        .add_query_param("page", 2)
        .await;
    response.assert_status_ok();
    let body = response.text();
    assert!(body.contains("Page 2 of 2"));
    assert!(body.contains("Post number 01"));
    assert!(!body.contains("Post number 12"));
}

#[tokio::test]
async fn test_index_clamps_per_page_and_rejects_page_zero() {
    let app = TestApp::new();

    let response = app
        .server
        .get("/posts/index")
        .add_query_param("per_page", 1000)
        .await;
    response.assert_status_ok();
    assert!(response.text().contains("Page 1 of 1 (0 posts)"));

    let response = app
        .server
        .get("/posts/index")
        .add_query_param("page", 0)
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_home_shows_five_recent_posts() {
    let app = TestApp::new();
    let (admin, _) = app.admin().await;
    for i in 1..=7 {
        app.db.insert_post(200 + i, admin.id, &format!("Entry {i}"));
    }

    let response = app.server.get("/").await;

    response.assert_status_ok();
    let body = response.text();
    for i in 3..=7 {
        assert!(body.contains(&format!("Entry {i}")));
    }
    assert!(!body.contains("Entry 1<"));
    assert!(!body.contains("Entry 2<"));
    assert!(body.contains("Log in"));
}

#[tokio::test]
async fn test_home_navigation_reflects_admin() {
    let app = TestApp::new();
    let (_, cookie) = app.admin().await;

    let response = app.server.get("/").add_header(cookie.0, cookie.1).await;

    let body = response.text();
    assert!(body.contains("New post"));
    assert!(body.contains("Log out"));
}
