use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default)]
    pub total_pages: Option<u64>,
    #[serde(default)]
    pub results: Option<Vec<ApiPhoto>>,
}

// The random endpoint returns an object for a single photo and an array for
// multiple photos.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum RandomResponse {
    Many(Vec<ApiPhoto>),
    One(Box<ApiPhoto>),
}

impl RandomResponse {
    pub fn into_photos(self) -> Vec<ApiPhoto> {
        match self {
            RandomResponse::Many(photos) => photos,
            RandomResponse::One(photo) => vec![*photo],
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ApiPhoto {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub alt_description: Option<String>,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub likes: Option<u64>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub urls: Option<ApiUrls>,
    #[serde(default)]
    pub user: Option<ApiUser>,
    #[serde(default)]
    pub links: Option<ApiPhotoLinks>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ApiUrls {
    #[serde(default)]
    pub raw: Option<String>,
    #[serde(default)]
    pub full: Option<String>,
    #[serde(default)]
    pub regular: Option<String>,
    #[serde(default)]
    pub small: Option<String>,
    #[serde(default)]
    pub thumb: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ApiUser {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub portfolio_url: Option<String>,
    #[serde(default)]
    pub profile_image: Option<ApiProfileImage>,
    #[serde(default)]
    pub links: Option<ApiUserLinks>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ApiProfileImage {
    #[serde(default)]
    pub small: Option<String>,
    #[serde(default)]
    pub medium: Option<String>,
    #[serde(default)]
    pub large: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ApiUserLinks {
    #[serde(default)]
    pub html: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ApiPhotoLinks {
    #[serde(rename = "self", default)]
    pub self_link: Option<String>,
    #[serde(default)]
    pub html: Option<String>,
    #[serde(default)]
    pub download: Option<String>,
    #[serde(default)]
    pub download_location: Option<String>,
}
