use std::sync::Arc;

use serde_json::json;
use tokio_test::assert_ok;
use video_desk_core::controller::EMPTY_ADVISORY;
use video_desk_core::{
    format_display_date, InMemoryStore, ListController, NewVideo, RemoveOutcome, StaticConfirm,
    VideoGateway, VideoPatch, ViewState,
};

async fn wait_until(
    controller: &ListController<InMemoryStore>,
    ready: impl FnMut(&ViewState) -> bool,
) -> ViewState {
    controller.watch().wait_for(ready).await.unwrap().clone()
}

#[tokio::test]
async fn create_update_delete_round_through_the_live_list() {
    let store = InMemoryStore::default();
    let gateway = Arc::new(VideoGateway::new(store.clone()));
    let controller = ListController::start(Arc::clone(&gateway)).await;

    let state = wait_until(&controller, |s| !s.loading).await;
    assert!(state.records.is_empty());
    assert_eq!(state.error.as_deref(), Some(EMPTY_ADVISORY));

    let created = assert_ok!(
        gateway
            .create(NewVideo {
                title: "Product tour".into(),
                url: "https://cdn.example/tour.mp4".into(),
                uploaded_date: Some(json!({"seconds": 1_700_000_000, "nanoseconds": 0})),
                ..Default::default()
            })
            .await
    );
    assert_eq!(created.created_at, created.updated_at);
    let id = created.id.clone().unwrap();

    let state = wait_until(&controller, |s| s.records.len() == 1).await;
    assert_eq!(state.error, None);
    let listed = &state.records[0];
    assert_eq!(listed.id.as_deref(), Some(id.as_str()));
    assert_eq!(listed.title, "Product tour");
    assert_eq!(listed.status, "public");
    assert!(!listed.converted);
    assert_eq!(format_display_date(listed.uploaded_date.as_ref()), "14/11/2023");
    assert_eq!(format_display_date(listed.created_at), format_display_date(created.created_at));

    let updated_at = assert_ok!(
        gateway
            .update(
                &id,
                VideoPatch {
                    converted: Some(true),
                    ..Default::default()
                },
            )
            .await
    );
    assert!(Some(updated_at) > created.updated_at);

    let state = wait_until(&controller, |s| s.records.first().is_some_and(|r| r.converted)).await;
    assert_eq!(state.records[0].title, "Product tour");
    assert_eq!(state.records[0].created_at, created.created_at);
    assert_eq!(state.records[0].updated_at, Some(updated_at));

    let outcome = controller
        .remove(&state.records[0], &StaticConfirm(true))
        .await;
    assert_eq!(outcome, RemoveOutcome::Deleted);

    let state = wait_until(&controller, |s| !s.loading).await;
    assert!(state.records.is_empty());
    assert_eq!(state.error.as_deref(), Some(EMPTY_ADVISORY));
    assert_eq!(store.live_subscriptions(), 1);
}

#[tokio::test]
async fn documents_written_outside_the_gateway_are_normalized() {
    let store = InMemoryStore::default();
    let raw = serde_json::from_value(json!({
        "id": "legacy-1",
        "title": "",
        "createdAt": "2021-04-05T06:07:08Z",
        "updatedAt": 1_617_602_828_000_i64,
        "converted": 1,
        "duration": "03:12",
    }))
    .unwrap();
    store.seed("videos", [raw]).await.unwrap();

    let controller = ListController::start(Arc::new(VideoGateway::new(store))).await;
    let state = wait_until(&controller, |s| !s.loading).await;

    let record = &state.records[0];
    assert_eq!(record.title, "Untitled");
    assert_eq!(record.description, "");
    assert!(record.converted);
    assert_eq!(record.duration.as_deref(), Some("03:12"));
    assert_eq!(format_display_date(record.created_at), "05/04/2021");
    assert_eq!(record.created_at, record.updated_at);
}
