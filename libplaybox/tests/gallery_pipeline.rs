//! Gallery pipeline end to end through the service facade, on the mock api

use std::sync::Arc;

use libplaybox::gallery::mock::{sample_response, MockFlickrApi};
use libplaybox::gallery::{GalleryViewModel, PhotoEntity, PhotoRecord};
use libplaybox::{ApiError, Config, GalleryScreenState, PlayboxService, RequestParams};
use secrecy::SecretString;

fn moon() -> PhotoEntity {
    PhotoEntity {
        id: "1".to_string(),
        server: "65535".to_string(),
        title: "Moon".to_string(),
        secret: "124a8612b0".to_string(),
    }
}

fn gallery(api: &MockFlickrApi) -> Arc<libplaybox::gallery::GalleryUseCase> {
    let service = PlayboxService::from_config(Config::default());
    Arc::new(
        service
            .gallery_with(SecretString::from("key".to_string()), Arc::new(api.clone()))
            .unwrap(),
    )
}

#[tokio::test]
async fn test_success_maps_to_photo_records() {
    let api = MockFlickrApi::success(sample_response(vec![moon()]));

    let result = gallery(&api)
        .get(RequestParams::first("NASA").unwrap())
        .await
        .unwrap();

    assert_eq!(
        result.photos,
        vec![PhotoRecord {
            id: "1".to_string(),
            title: "Moon".to_string(),
            url: "https://live.staticflickr.com/65535/1_124a8612b0_z.jpg".to_string(),
            placeholder: None,
        }]
    );
}

#[tokio::test]
async fn test_empty_body_scenario() {
    let api = MockFlickrApi::empty_body();
    let error = gallery(&api)
        .get(RequestParams::first("NASA").unwrap())
        .await
        .unwrap_err();

    assert_eq!(error.message(), "Body cannot be null on a successful response");
    assert!(error.cause().is_none());
}

#[tokio::test]
async fn test_status_scenario() {
    let api = MockFlickrApi::status(404);
    let error = gallery(&api)
        .get(RequestParams::first("NASA").unwrap())
        .await
        .unwrap_err();

    assert_eq!(error.message(), "Api error with errorCode: 404");
    assert!(error.cause().is_some());
}

#[tokio::test]
async fn test_thrown_fault_scenario() {
    let api = MockFlickrApi::failure("connection reset by peer");
    let error = gallery(&api)
        .get(RequestParams::first("NASA").unwrap())
        .await
        .unwrap_err();

    assert!(matches!(error, ApiError::Transport(_)));
    assert_eq!(error.message(), "Received Exception as part of api call");
    assert_eq!(error.cause().unwrap().to_string(), "connection reset by peer");
}

#[tokio::test]
async fn test_each_fetch_replaces_the_result_set() {
    let api = MockFlickrApi::with_photos(vec![moon()]);
    let use_case = gallery(&api);

    let first = use_case.get(RequestParams::first("NASA").unwrap()).await.unwrap();
    let second = use_case.get(RequestParams::page("NASA", 2).unwrap()).await.unwrap();

    assert_eq!(first.photos.len(), 1);
    assert_eq!(second.photos.len(), 1);
    assert_eq!(api.call_count(), 2);
}

#[tokio::test]
async fn test_screen_shows_no_photos_on_error_but_keeps_reason() {
    let api = MockFlickrApi::status(500);
    let mut screen = GalleryViewModel::spawn(gallery(&api), RequestParams::first("NASA").unwrap());

    let state = screen.settled().await;
    assert!(state.photos().is_empty());
    match state {
        GalleryScreenState::Failed { message, .. } => {
            assert_eq!(message, "Api error with errorCode: 500")
        }
        other => panic!("Expected failed state, got {:?}", other),
    }
}
