use serde::{Deserialize, Serialize};

/// License attribution attached to every photo detail entry.
pub const UNSPLASH_LICENSE: &str = "Unsplash License - https://unsplash.com/license";

/// Normalized view of one photo result.
///
/// Every field is optional. Missing upstream fields map to an absent value,
/// never an error; absence is the signal at this layer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PhotoRecord {
    pub id: Option<String>,
    pub description: Option<String>,
    pub alt_description: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub color: Option<String>,
    pub likes: Option<u64>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub urls: UrlSet,
    pub user: Author,
    pub links: LinkSet,
}

/// Size-keyed image URLs for a photo.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UrlSet {
    pub raw: Option<String>,
    pub full: Option<String>,
    pub regular: Option<String>,
    pub small: Option<String>,
    pub thumb: Option<String>,
}

/// Photo author attribution.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Author {
    pub id: Option<String>,
    pub name: Option<String>,
    pub username: Option<String>,
    pub portfolio_url: Option<String>,
    pub profile_image: Option<ProfileImage>,
}

/// Avatar URLs for an author.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileImage {
    pub small: Option<String>,
    pub medium: Option<String>,
    pub large: Option<String>,
}

/// Links associated with a photo.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LinkSet {
    #[serde(rename = "self")]
    pub self_link: Option<String>,
    pub html: Option<String>,
    pub download: Option<String>,
    pub download_location: Option<String>,
}

/// Derived, UI-friendly summary of one successfully downloaded photo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhotoDetail {
    pub id: Option<String>,
    pub description: String,
    pub dimensions: String,
    pub author: String,
    pub photo_link: String,
    pub user_link: String,
    pub license: String,
}
