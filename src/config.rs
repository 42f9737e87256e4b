// ---------------------------------------------------------------------------
// Application constants
// ---------------------------------------------------------------------------

/// Endpoint returning the JSON array of pictures.
pub const PICTURES_URL: &str = "https://sebi.io/demo-image-api/pictures.json";

/// Base URL that image paths are resolved against.
pub const IMAGE_BASE_URL: &str = "https://sebastianaigner.github.io/demo-image-api/";

/// Fixed application settings. There is no config file; everything here is
/// compiled in and can only be overridden programmatically (tests do).
#[derive(Debug, Clone)]
pub struct Config {
    pub pictures_url: String,
    pub image_base_url: String,
    pub user_agent: String,
    pub window_title: String,
    pub window_size: [f32; 2],
    pub window_min_size: [f32; 2],
    /// Smallest width a grid cell may shrink to before a column is dropped.
    pub min_cell_width: f32,
    /// Gap between tabs and between grid cells.
    pub spacing: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pictures_url: PICTURES_URL.to_string(),
            image_base_url: IMAGE_BASE_URL.to_string(),
            user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string(),
            window_title: "My Bird App".to_string(),
            window_size: [1024.0, 768.0],
            window_min_size: [400.0, 300.0],
            min_cell_width: 180.0,
            spacing: 5.0,
        }
    }
}

impl Config {
    /// Full URL of an image given its relative path.
    pub fn image_url(&self, image_path: &str) -> String {
        let base = self.image_base_url.trim_end_matches('/');
        let path = image_path.trim_start_matches('/');
        format!("{base}/{path}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_url_joins_base_and_path() {
        let config = Config::default();
        assert_eq!(
            config.image_url("pigeon/001.jpg"),
            "https://sebastianaigner.github.io/demo-image-api/pigeon/001.jpg"
        );
    }

    #[test]
    fn test_image_url_does_not_double_slashes() {
        let config = Config {
            image_base_url: "http://localhost/images".to_string(),
            ..Config::default()
        };
        assert_eq!(config.image_url("/a.jpg"), "http://localhost/images/a.jpg");
    }
}
