use lenz_core::message::{BlobMeta, MessageSink, ToolMessage};
use lenz_core::photo::{PhotoDetail, PhotoRecord};
use unsplash_provider::mapping::{build_photo_detail, map_photo, resolved_description};
use unsplash_provider::models::ApiPhoto;
use unsplash_provider::UnsplashClient;

/// Maps every photo into a record and streams the downloadable ones out as
/// binary payloads. A photo without a regular-size URL stays in the record
/// list but produces no payload or detail entry; a failed download is
/// reported inline and the remaining photos still go out.
pub(crate) async fn collect_photos(
    client: &UnsplashClient,
    results: &[ApiPhoto],
    filename_prefix: &str,
    sink: &mut (dyn MessageSink + Send),
) -> (Vec<PhotoRecord>, Vec<PhotoDetail>) {
    let mut photos = Vec::with_capacity(results.len());
    let mut photo_details = Vec::new();

    for photo in results {
        photos.push(map_photo(photo));

        let Some(image_url) = photo
            .urls
            .as_ref()
            .and_then(|urls| urls.regular.as_deref())
        else {
            continue;
        };

        match client.download_image(image_url).await {
            Ok(data) => {
                let photo_id = photo.id.as_deref().unwrap_or("photo");
                sink.emit(ToolMessage::blob(
                    data,
                    BlobMeta {
                        mime_type: "image/jpeg".into(),
                        filename: format!("{filename_prefix}{photo_id}.jpg"),
                        description: resolved_description(photo),
                    },
                ));
                photo_details.push(build_photo_detail(photo));
            }
            Err(err) => {
                tracing::error!(photo_id = ?photo.id, error = %err, "image download failed");
                sink.emit(ToolMessage::text(err.user_message()));
            }
        }
    }

    (photos, photo_details)
}
