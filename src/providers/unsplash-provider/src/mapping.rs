use crate::models::{ApiPhoto, ApiUser};
use lenz_core::photo::{
    Author, LinkSet, PhotoDetail, PhotoRecord, ProfileImage, UrlSet, UNSPLASH_LICENSE,
};

pub fn map_photo(photo: &ApiPhoto) -> PhotoRecord {
    PhotoRecord {
        id: photo.id.clone(),
        description: photo.description.clone(),
        alt_description: photo.alt_description.clone(),
        width: photo.width,
        height: photo.height,
        color: photo.color.clone(),
        likes: photo.likes,
        created_at: photo.created_at.clone(),
        updated_at: photo.updated_at.clone(),
        urls: photo
            .urls
            .as_ref()
            .map(|urls| UrlSet {
                raw: urls.raw.clone(),
                full: urls.full.clone(),
                regular: urls.regular.clone(),
                small: urls.small.clone(),
                thumb: urls.thumb.clone(),
            })
            .unwrap_or_default(),
        user: photo.user.as_ref().map(map_author).unwrap_or_default(),
        links: photo
            .links
            .as_ref()
            .map(|links| LinkSet {
                self_link: links.self_link.clone(),
                html: links.html.clone(),
                download: links.download.clone(),
                download_location: links.download_location.clone(),
            })
            .unwrap_or_default(),
    }
}

fn map_author(user: &ApiUser) -> Author {
    Author {
        id: user.id.clone(),
        name: user.name.clone(),
        username: user.username.clone(),
        portfolio_url: user.portfolio_url.clone(),
        profile_image: user.profile_image.as_ref().map(|image| ProfileImage {
            small: image.small.clone(),
            medium: image.medium.clone(),
            large: image.large.clone(),
        }),
    }
}

pub fn resolved_description(photo: &ApiPhoto) -> String {
    photo
        .description
        .clone()
        .filter(|s| !s.is_empty())
        .or_else(|| photo.alt_description.clone().filter(|s| !s.is_empty()))
        .unwrap_or_else(|| format!("Photo by {}", author_name(photo)))
}

pub fn build_photo_detail(photo: &ApiPhoto) -> PhotoDetail {
    PhotoDetail {
        id: photo.id.clone(),
        description: resolved_description(photo),
        dimensions: format!("{}x{}", dimension(photo.width), dimension(photo.height)),
        author: author_name(photo),
        photo_link: photo
            .links
            .as_ref()
            .and_then(|links| links.html.clone())
            .unwrap_or_default(),
        user_link: photo
            .user
            .as_ref()
            .and_then(|user| user.links.as_ref())
            .and_then(|links| links.html.clone())
            .unwrap_or_default(),
        license: UNSPLASH_LICENSE.into(),
    }
}

fn author_name(photo: &ApiPhoto) -> String {
    photo
        .user
        .as_ref()
        .and_then(|user| user.name.clone())
        .unwrap_or_else(|| "Unknown".into())
}

fn dimension(value: Option<u32>) -> String {
    value
        .map(|v| v.to_string())
        .unwrap_or_else(|| "Unknown".into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ApiPhotoLinks, ApiUrls, ApiUserLinks};

    fn full_photo() -> ApiPhoto {
        ApiPhoto {
            id: Some("abc123".into()),
            description: Some("A mountain lake".into()),
            alt_description: Some("lake between mountains".into()),
            width: Some(4000),
            height: Some(3000),
            color: Some("#336699".into()),
            likes: Some(57),
            created_at: Some("2020-01-01T00:00:00Z".into()),
            updated_at: Some("2020-06-01T00:00:00Z".into()),
            urls: Some(ApiUrls {
                regular: Some("https://images.unsplash.com/abc123?w=1080".into()),
                thumb: Some("https://images.unsplash.com/abc123?w=200".into()),
                ..Default::default()
            }),
            user: Some(ApiUser {
                id: Some("u1".into()),
                name: Some("Jane Doe".into()),
                username: Some("janedoe".into()),
                links: Some(ApiUserLinks {
                    html: Some("https://unsplash.com/@janedoe".into()),
                }),
                ..Default::default()
            }),
            links: Some(ApiPhotoLinks {
                self_link: Some("https://api.unsplash.com/photos/abc123".into()),
                html: Some("https://unsplash.com/photos/abc123".into()),
                ..Default::default()
            }),
        }
    }

    #[test]
    fn map_photo_preserves_named_fields() {
        let record = map_photo(&full_photo());
        assert_eq!(record.id.as_deref(), Some("abc123"));
        assert_eq!(record.likes, Some(57));
        assert_eq!(
            record.urls.regular.as_deref(),
            Some("https://images.unsplash.com/abc123?w=1080")
        );
        assert_eq!(record.user.username.as_deref(), Some("janedoe"));
        assert_eq!(
            record.links.self_link.as_deref(),
            Some("https://api.unsplash.com/photos/abc123")
        );
    }

    #[test]
    fn map_photo_tolerates_missing_sections() {
        let record = map_photo(&ApiPhoto::default());
        assert_eq!(record.id, None);
        assert_eq!(record.urls, UrlSet::default());
        assert_eq!(record.user, Author::default());
        assert_eq!(record.links, LinkSet::default());
    }

    #[test]
    fn description_falls_back_in_order() {
        let photo = full_photo();
        assert_eq!(resolved_description(&photo), "A mountain lake");

        let photo = ApiPhoto {
            description: Some(String::new()),
            ..full_photo()
        };
        assert_eq!(resolved_description(&photo), "lake between mountains");

        let photo = ApiPhoto {
            description: None,
            alt_description: None,
            ..full_photo()
        };
        assert_eq!(resolved_description(&photo), "Photo by Jane Doe");

        assert_eq!(
            resolved_description(&ApiPhoto::default()),
            "Photo by Unknown"
        );
    }

    #[test]
    fn detail_summarizes_a_downloaded_photo() {
        let detail = build_photo_detail(&full_photo());
        assert_eq!(detail.id.as_deref(), Some("abc123"));
        assert_eq!(detail.dimensions, "4000x3000");
        assert_eq!(detail.author, "Jane Doe");
        assert_eq!(detail.photo_link, "https://unsplash.com/photos/abc123");
        assert_eq!(detail.user_link, "https://unsplash.com/@janedoe");
        assert_eq!(detail.license, UNSPLASH_LICENSE);
    }

    #[test]
    fn detail_marks_unknown_dimensions_and_empty_links() {
        let detail = build_photo_detail(&ApiPhoto {
            width: Some(1200),
            ..Default::default()
        });
        assert_eq!(detail.dimensions, "1200xUnknown");
        assert_eq!(detail.photo_link, "");
        assert_eq!(detail.user_link, "");
    }
}
