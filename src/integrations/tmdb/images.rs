// src/integrations/tmdb/images.rs

use std::fmt;
use std::str::FromStr;

/// Rendition sizes served by the image CDN
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageSize {
    W92,
    W154,
    W185,
    W342,
    W500,
    W780,
    Original,
}

impl ImageSize {
    pub const ALL: [ImageSize; 7] = [
        ImageSize::W92,
        ImageSize::W154,
        ImageSize::W185,
        ImageSize::W342,
        ImageSize::W500,
        ImageSize::W780,
        ImageSize::Original,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ImageSize::W92 => "w92",
            ImageSize::W154 => "w154",
            ImageSize::W185 => "w185",
            ImageSize::W342 => "w342",
            ImageSize::W500 => "w500",
            ImageSize::W780 => "w780",
            ImageSize::Original => "original",
        }
    }

    pub fn is_valid(size: &str) -> bool {
        size.parse::<ImageSize>().is_ok()
    }
}

impl fmt::Display for ImageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ImageSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ImageSize::ALL
            .iter()
            .copied()
            .find(|size| size.as_str() == s)
            .ok_or_else(|| format!("Unsupported image size: {}", s))
    }
}

/// `None` for a missing or empty path, otherwise `{base}/{size}{path}`
pub fn build_image_url(base_url: &str, path: Option<&str>, size: ImageSize) -> Option<String> {
    let path = path.map(str::trim).filter(|p| !p.is_empty())?;
    Some(format!("{}/{}{}", base_url.trim_end_matches('/'), size, path))
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://image.tmdb.org/t/p";

    #[test]
    fn test_builds_url() {
        assert_eq!(
            build_image_url(BASE, Some("/test.jpg"), ImageSize::W500).as_deref(),
            Some("https://image.tmdb.org/t/p/w500/test.jpg")
        );
        assert_eq!(
            build_image_url("https://cdn.example/", Some("/x.png"), ImageSize::Original).as_deref(),
            Some("https://cdn.example/original/x.png")
        );
    }

    #[test]
    fn test_empty_path_has_no_url() {
        assert_eq!(build_image_url(BASE, None, ImageSize::W92), None);
        assert_eq!(build_image_url(BASE, Some(""), ImageSize::W92), None);
    }

    #[test]
    fn test_size_validation() {
        assert!(ImageSize::is_valid("w500"));
        assert!(ImageSize::is_valid("original"));
        assert!(!ImageSize::is_valid("w999"));
        assert_eq!("w185".parse::<ImageSize>(), Ok(ImageSize::W185));
    }
}
