use axum::response::Html;

const PLAYER_PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>MP4 Player</title>
</head>
<body>
  <h1>Video Player</h1>
  <video width="800" controls>
    <source src="/video.mp4" type="video/mp4">
    Your browser does not support the video tag.
  </video>
</body>
</html>
"#;

/// `GET /`
pub async fn player_page() -> Html<&'static str> {
    Html(PLAYER_PAGE)
}
