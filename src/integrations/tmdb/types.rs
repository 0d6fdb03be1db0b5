// src/integrations/tmdb/types.rs
//
// Wire payloads of the catalog API.
//
// These are cached verbatim (JSON) and handed back unchanged on a hit, so
// every type round-trips through serde without loss. Fields the API is known
// to send as `null` decode to their zero value instead of failing the sync.

use serde::{Deserialize, Deserializer, Serialize};

fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Listing entry (search, popular, person credits)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TmdbMovie {
    pub id: i64,
    #[serde(default, deserialize_with = "nullable")]
    pub title: String,
    #[serde(default, deserialize_with = "nullable")]
    pub overview: String,
    #[serde(default, deserialize_with = "nullable")]
    pub release_date: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub vote_average: f64,
    #[serde(default, deserialize_with = "nullable")]
    pub vote_count: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TmdbSearchResponse {
    pub page: i32,
    #[serde(default)]
    pub results: Vec<TmdbMovie>,
    #[serde(default)]
    pub total_pages: i32,
    #[serde(default)]
    pub total_results: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TmdbMovieDetails {
    pub id: i64,
    #[serde(default, deserialize_with = "nullable")]
    pub title: String,
    #[serde(default, deserialize_with = "nullable")]
    pub original_title: String,
    #[serde(default, deserialize_with = "nullable")]
    pub overview: String,
    #[serde(default, deserialize_with = "nullable")]
    pub release_date: String,
    #[serde(default, deserialize_with = "nullable")]
    pub runtime: i32,
    #[serde(default, deserialize_with = "nullable")]
    pub budget: i64,
    #[serde(default, deserialize_with = "nullable")]
    pub revenue: i64,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub vote_average: f64,
    #[serde(default, deserialize_with = "nullable")]
    pub vote_count: i64,
    #[serde(default, deserialize_with = "nullable")]
    pub imdb_id: String,
    #[serde(default, deserialize_with = "nullable")]
    pub original_language: String,
    #[serde(default)]
    pub genres: Vec<TmdbGenre>,
    /// Present when requested with `append_to_response=credits`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credits: Option<TmdbCredits>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TmdbGenre {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TmdbCredits {
    // Absent when appended to a detail response
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub cast: Vec<TmdbCastMember>,
    #[serde(default)]
    pub crew: Vec<TmdbCrewMember>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TmdbCastMember {
    pub id: i64,
    pub name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub character: String,
    #[serde(default)]
    pub profile_path: Option<String>,
    #[serde(default)]
    pub order: i32,
    #[serde(default)]
    pub gender: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TmdbCrewMember {
    pub id: i64,
    pub name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub job: String,
    #[serde(default, deserialize_with = "nullable")]
    pub department: String,
    #[serde(default)]
    pub profile_path: Option<String>,
    #[serde(default)]
    pub gender: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TmdbVideoResponse {
    pub id: i64,
    #[serde(default)]
    pub results: Vec<TmdbVideo>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TmdbVideo {
    pub key: String,
    #[serde(default, deserialize_with = "nullable")]
    pub name: String,
    pub site: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub official: bool,
}

impl TmdbVideo {
    pub fn is_youtube_trailer(&self) -> bool {
        self.site.eq_ignore_ascii_case("youtube") && self.kind == "Trailer"
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TmdbPersonDetails {
    pub id: i64,
    pub name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub biography: String,
    #[serde(default)]
    pub birthday: Option<String>,
    #[serde(default)]
    pub deathday: Option<String>,
    #[serde(default)]
    pub place_of_birth: Option<String>,
    #[serde(default)]
    pub profile_path: Option<String>,
    #[serde(default)]
    pub gender: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TmdbPersonCredits {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub cast: Vec<TmdbPersonCastMovie>,
}

/// A movie the person appeared in, with the role played
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TmdbPersonCastMovie {
    #[serde(flatten)]
    pub movie: TmdbMovie,
    #[serde(default, deserialize_with = "nullable")]
    pub character: String,
}
