use std::io::Write;

use axum::body::Body;
use axum::http::{HeaderValue, Request};
use http_body_util::BodyExt;
use reel_axum::{reel, ReelApp};
use reel_media::{FsMediaSource, MemoryMediaSource, RangeStreamer, StreamConfig};
use tower::ServiceExt;

fn sample(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i % 253) as u8).collect()
}

fn memory_app(len: usize) -> ReelApp {
    reel(RangeStreamer::new(MemoryMediaSource::new("clip", sample(len)), StreamConfig::default()))
}

fn video_request(range: Option<&str>) -> Request<Body> {
    let mut req = Request::builder().method("GET").uri("/video.mp4");
    if let Some(range) = range {
        req = req.header("range", range);
    }
    req.body(Body::empty()).unwrap()
}

async fn body_bytes(res: axum::response::Response) -> Vec<u8> {
    res.into_body().collect().await.unwrap().to_bytes().to_vec()
}

fn header<'a>(res: &'a axum::response::Response, name: &str) -> &'a str {
    res.headers().get(name).unwrap().to_str().unwrap()
}

#[tokio::test]
async fn first_window_is_partial_content() {
    let res = memory_app(2_500_000)
        .into_router()
        .oneshot(video_request(Some("bytes=0-")))
        .await
        .unwrap();

    assert_eq!(res.status().as_u16(), 206);
    assert_eq!(header(&res, "content-range"), "bytes 0-999999/2500000");
    assert_eq!(header(&res, "accept-ranges"), "bytes");
    assert_eq!(header(&res, "content-length"), "1000000");
    assert_eq!(header(&res, "content-type"), "video/mp4");
    assert!(res.headers().get("x-request-id").is_some());

    let body = body_bytes(res).await;
    assert_eq!(body, &sample(2_500_000)[..1_000_000]);
}

#[tokio::test]
async fn windows_walk_the_resource() {
    let router = memory_app(2_500_000).into_router();

    let res = router.clone().oneshot(video_request(Some("bytes=1000000-"))).await.unwrap();
    assert_eq!(header(&res, "content-range"), "bytes 1000000-1999999/2500000");

    let res = router.oneshot(video_request(Some("bytes=2000000-"))).await.unwrap();
    assert_eq!(res.status().as_u16(), 206);
    assert_eq!(header(&res, "content-range"), "bytes 2000000-2499999/2500000");
    assert_eq!(header(&res, "content-length"), "500000");
    assert_eq!(body_bytes(res).await.len(), 500_000);
}

#[tokio::test]
async fn small_resource_is_served_whole() {
    let res = memory_app(500_000)
        .into_router()
        .oneshot(video_request(Some("bytes=0-")))
        .await
        .unwrap();

    assert_eq!(res.status().as_u16(), 206);
    assert_eq!(header(&res, "content-range"), "bytes 0-499999/500000");
    assert_eq!(body_bytes(res).await, sample(500_000));
}

#[tokio::test]
async fn missing_range_is_bad_request() {
    let res = memory_app(10)
        .into_router()
        .oneshot(video_request(None))
        .await
        .unwrap();

    assert_eq!(res.status().as_u16(), 400);
    assert!(res.headers().get("content-range").is_none());
    let body = body_bytes(res).await;
    assert_eq!(std::str::from_utf8(&body).unwrap(), "Range header is required");
}

#[tokio::test]
async fn empty_range_is_bad_request() {
    let res = memory_app(2_500_000)
        .into_router()
        .oneshot(video_request(Some("")))
        .await
        .unwrap();

    assert_eq!(res.status().as_u16(), 400);
    assert!(res.headers().get("content-range").is_none());
    let body = body_bytes(res).await;
    assert_eq!(std::str::from_utf8(&body).unwrap(), "Range header is required");
}

fn raw_range_request(value: &'static [u8]) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri("/video.mp4")
        .header("range", HeaderValue::from_bytes(value).unwrap())
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn non_utf8_range_keeps_its_digits_in_permissive_mode() {
    let res = memory_app(10)
        .into_router()
        .oneshot(raw_range_request(b"bytes=\xff4-"))
        .await
        .unwrap();

    assert_eq!(res.status().as_u16(), 206);
    assert_eq!(header(&res, "content-range"), "bytes 4-9/10");
}

#[tokio::test]
async fn non_utf8_range_is_bad_request_in_strict_mode() {
    let app = reel(RangeStreamer::new(
        MemoryMediaSource::new("clip", sample(10)),
        StreamConfig::default().strict(),
    ));

    let res = app.into_router().oneshot(raw_range_request(b"bytes=\xff4-")).await.unwrap();
    assert_eq!(res.status().as_u16(), 400);
}

#[tokio::test]
async fn start_beyond_size_is_range_not_satisfiable() {
    let res = memory_app(1_000)
        .into_router()
        .oneshot(video_request(Some("bytes=5000-")))
        .await
        .unwrap();

    assert_eq!(res.status().as_u16(), 416);
    assert_eq!(header(&res, "content-range"), "bytes */1000");
}

#[tokio::test]
async fn strict_mode_rejects_malformed_ranges() {
    let app = reel(RangeStreamer::new(
        MemoryMediaSource::new("clip", sample(100)),
        StreamConfig::default().strict(),
    ));

    let res = app.into_router().oneshot(video_request(Some("pages=1-2"))).await.unwrap();
    assert_eq!(res.status().as_u16(), 400);
    let body = body_bytes(res).await;
    assert!(std::str::from_utf8(&body).unwrap().starts_with("Malformed Range header"));
}

#[tokio::test]
async fn missing_media_file_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let app = reel(RangeStreamer::new(
        FsMediaSource::new(dir.path().join("Show.mp4")),
        StreamConfig::default(),
    ));

    let res = app.into_router().oneshot(video_request(Some("bytes=0-"))).await.unwrap();
    assert_eq!(res.status().as_u16(), 404);
    let body = body_bytes(res).await;
    assert_eq!(std::str::from_utf8(&body).unwrap(), "Media not found");
}

#[tokio::test]
async fn file_backed_windows_reconstruct_the_video() {
    let data = sample(2_100_000);
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(&data).unwrap();
    file.flush().unwrap();

    let router = reel(RangeStreamer::new(FsMediaSource::new(file.path()), StreamConfig::default())).into_router();

    let mut rebuilt = Vec::new();
    for start in [0u64, 1_000_000, 2_000_000] {
        let range = format!("bytes={start}-");
        let res = router.clone().oneshot(video_request(Some(range.as_str()))).await.unwrap();
        assert_eq!(res.status().as_u16(), 206);
        rebuilt.extend(body_bytes(res).await);
    }
    assert_eq!(rebuilt, data);

    let again = router.oneshot(video_request(Some("bytes=1000000-"))).await.unwrap();
    assert_eq!(body_bytes(again).await, &data[1_000_000..2_000_000]);
}

#[tokio::test]
async fn player_page_embeds_the_video() {
    let res = memory_app(10)
        .into_router()
        .oneshot(Request::builder().method("GET").uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(res.status().as_u16(), 200);
    assert!(header(&res, "content-type").starts_with("text/html"));
    let body = String::from_utf8(body_bytes(res).await).unwrap();
    assert!(body.contains("<title>MP4 Player</title>"));
    assert!(body.contains(r#"<source src="/video.mp4" type="video/mp4">"#));
}

#[tokio::test]
async fn static_files_are_served_from_the_public_dir() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("poster.txt"), "hello").unwrap();

    let router = memory_app(10).serve_dir(dir.path()).into_router();

    let res = router
        .clone()
        .oneshot(Request::builder().uri("/poster.txt").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(res.status().as_u16(), 200);
    assert_eq!(body_bytes(res).await, b"hello");

    let res = router
        .oneshot(Request::builder().uri("/nope.txt").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(res.status().as_u16(), 404);
}

#[tokio::test]
async fn request_id_is_preserved_when_provided() {
    let provided = HeaderValue::from_static("req-test-123");
    let req = Request::builder()
        .method("GET")
        .uri("/video.mp4")
        .header("range", "bytes=0-")
        .header("x-request-id", provided.clone())
        .body(Body::empty())
        .unwrap();

    let res = memory_app(10).into_router().oneshot(req).await.unwrap();
    assert_eq!(res.headers().get("x-request-id").unwrap(), &provided);
}

#[tokio::test]
async fn extra_routes_can_be_mounted() {
    let router = memory_app(10).use_get("/health", || async { "ok" }).into_router();

    let res = router
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(res.status().as_u16(), 200);
    assert_eq!(body_bytes(res).await, b"ok");
}
