use utoipa::OpenApi;

use crate::api;
use crate::error::ErrorResponse;
use crate::library::{NewTrack, Track, TrackPatch};

pub const DOCS_PATH: &str = "/docs";
pub const OPENAPI_PATH: &str = "/openapi.json";

/// Swagger UI shell; the assets come from the CDN and the document from [`OPENAPI_PATH`].
pub const DOCS_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <title>Playlist API</title>
  <link rel="stylesheet" href="https://unpkg.com/swagger-ui-dist@5/swagger-ui.css" />
</head>
<body>
  <div id="swagger-ui"></div>
  <script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-bundle.js"></script>
  <script>
    window.onload = () => {
      window.ui = SwaggerUIBundle({ url: "/openapi.json", dom_id: "#swagger-ui" });
    };
  </script>
</body>
</html>
"##;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Playlist API",
        version = "1.0.0",
        description = "A simple Playlist API with Swagger."
    ),
    servers((url = "/")),
    paths(
        api::get_tracks,
        api::get_track_by_id,
        api::create_track,
        api::update_track,
        api::toggle_track,
        api::delete_track,
        api::health,
    ),
    components(schemas(Track, NewTrack, TrackPatch, ErrorResponse, api::HealthResponse))
)]
pub struct ApiDoc;
