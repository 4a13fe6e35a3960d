mod common;

use common::{context, logged_in_context, post_json, FakeHttp, FakeResponse};
use complexapp::api::Method;
use complexapp::editor::{PostEditor, BODY_REQUIRED, TITLE_REQUIRED};
use complexapp::post::PostView;
use complexapp::store::flash;
use serde_json::{json, Value};

fn backend() -> std::sync::Arc<FakeHttp> {
    let http = FakeHttp::new();
    http.route(
        Method::Get,
        "/post/p1",
        FakeResponse::json(post_json("p1", "Hello", "alice")),
    );
    http.route(
        Method::Post,
        "/post/p1/edit",
        FakeResponse::json(json!("Success")),
    );
    http
}

#[tokio::test(start_paused = true)]
async fn mount_fetches_the_post() {
    let http = backend();
    let editor = PostEditor::mount(&logged_in_context(http.clone(), "alice"), "p1");
    assert!(editor.state().is_fetching);

    common::settle().await;
    let state = editor.state();
    assert!(!state.is_fetching);
    assert_eq!(state.title.value, "Hello");
    assert_eq!(state.body.value, "body of Hello");
}

#[tokio::test(start_paused = true)]
async fn missing_post_is_reported() {
    let http = FakeHttp::new();
    http.route(Method::Get, "/post/nope", FakeResponse::json(Value::Null));
    let editor = PostEditor::mount(&context(http), "nope");

    common::settle().await;
    assert!(editor.state().not_found);
}

#[tokio::test(start_paused = true)]
async fn valid_submit_saves_and_flashes() {
    let http = backend();
    let ctx = logged_in_context(http.clone(), "alice");
    let editor = PostEditor::mount(&ctx, "p1");
    common::settle().await;

    editor.set_title("Hello again");
    assert!(editor.submit());
    assert!(editor.state().is_saving());
    common::settle().await;

    let saves = http.requests_to("/post/p1/edit");
    assert_eq!(saves.len(), 1);
    assert_eq!(
        saves[0].body,
        Some(json!({"title": "Hello again", "body": "body of Hello", "token": "token-alice"}))
    );
    assert!(!editor.state().is_saving());
    assert_eq!(
        ctx.store.state().flash_messages,
        vec![flash::POST_UPDATED.to_string()]
    );
}

#[tokio::test(start_paused = true)]
async fn blank_fields_block_submit() {
    let http = backend();
    let editor = PostEditor::mount(&logged_in_context(http.clone(), "alice"), "p1");
    common::settle().await;

    editor.set_title("  ");
    editor.set_body("");
    assert!(!editor.submit());

    let state = editor.state();
    assert_eq!(state.title.message, TITLE_REQUIRED);
    assert_eq!(state.body.message, BODY_REQUIRED);
    assert_eq!(state.send_count.get(), 0);
    common::settle().await;
    assert_eq!(http.count("/post/p1/edit"), 0);
}

#[tokio::test(start_paused = true)]
async fn blur_validates_single_field() {
    let http = backend();
    let editor = PostEditor::mount(&logged_in_context(http, "alice"), "p1");
    common::settle().await;

    editor.set_title("");
    editor.blur_title();
    editor.blur_body();
    let state = editor.state();
    assert!(state.title.has_errors);
    assert!(!state.body.has_errors);
}

#[tokio::test(start_paused = true)]
async fn double_submit_issues_two_saves() {
    let http = backend();
    let ctx = logged_in_context(http.clone(), "alice");
    let editor = PostEditor::mount(&ctx, "p1");
    common::settle().await;

    assert!(editor.submit());
    assert!(editor.submit());
    assert_eq!(editor.state().send_count.get(), 2);
    assert_eq!(editor.state().saves_in_flight, 2);

    common::settle().await;
    assert_eq!(http.count("/post/p1/edit"), 2);
    assert!(!editor.state().is_saving());
    assert_eq!(ctx.store.state().flash_messages.len(), 2);
}

#[tokio::test(start_paused = true)]
async fn unmount_during_save_changes_nothing() {
    let http = backend();
    http.route(
        Method::Post,
        "/post/p1/edit",
        FakeResponse::json(json!("Success")).delayed(1_000),
    );
    let ctx = logged_in_context(http.clone(), "alice");
    let editor = PostEditor::mount(&ctx, "p1");
    common::settle().await;

    editor.submit();
    common::advance(100).await;
    drop(editor);

    common::advance(5_000).await;
    assert!(ctx.store.state().flash_messages.is_empty());
}

#[tokio::test(start_paused = true)]
async fn rejected_token_on_save_forces_logout() {
    let http = backend();
    http.route(
        Method::Post,
        "/post/p1/edit",
        FakeResponse::error(401, "bad token"),
    );
    let ctx = logged_in_context(http.clone(), "alice");
    let editor = PostEditor::mount(&ctx, "p1");
    common::settle().await;

    editor.submit();
    common::settle().await;

    let state = ctx.store.state();
    assert!(!state.logged_in());
    assert_eq!(state.flash_messages, vec![flash::SESSION_EXPIRED.to_string()]);
    assert!(editor.state().error.is_some());
}

#[tokio::test(start_paused = true)]
async fn author_can_delete_post() {
    let http = backend();
    http.route(Method::Delete, "/post/p1", FakeResponse::json(json!("Success")));
    let ctx = logged_in_context(http.clone(), "alice");
    let view = PostView::mount(&ctx, "p1");
    common::settle().await;

    assert!(view.is_owner());
    assert!(view.delete());
    common::settle().await;

    assert!(view.state().deleted);
    assert_eq!(
        http.requests_to("/post/p1")
            .iter()
            .filter(|request| request.method == Method::Delete)
            .count(),
        1
    );
    assert_eq!(
        ctx.store.state().flash_messages,
        vec![flash::POST_DELETED.to_string()]
    );
}

#[tokio::test(start_paused = true)]
async fn other_users_cannot_delete() {
    let http = backend();
    let view = PostView::mount(&logged_in_context(http.clone(), "bob"), "p1");
    common::settle().await;

    assert!(!view.is_owner());
    assert!(!view.delete());
}
