use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: String,
    #[serde(default)]
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub excerpt: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub cover_image: Option<String>,
    #[serde(default)]
    pub published: bool,
    #[serde(default)]
    pub published_at: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ArticleDraft {
    pub slug: String,
    pub title: String,
    pub excerpt: String,
    pub body: String,
    pub cover_image: Option<String>,
    pub published: bool,
}

/// Hero banner shown on the home page. Lower `position` renders first.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Banner {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub subtitle: Option<String>,
    pub image_url: String,
    #[serde(default)]
    pub link_url: Option<String>,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub position: i32,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BannerDraft {
    pub title: String,
    pub subtitle: Option<String>,
    pub image_url: String,
    pub link_url: Option<String>,
    pub active: bool,
    pub position: i32,
}

impl Article {
    pub fn to_draft(&self) -> ArticleDraft {
        ArticleDraft {
            slug: self.slug.clone(),
            title: self.title.clone(),
            excerpt: self.excerpt.clone(),
            body: self.body.clone(),
            cover_image: self.cover_image.clone(),
            published: self.published,
        }
    }
}

impl Banner {
    pub fn to_draft(&self) -> BannerDraft {
        BannerDraft {
            title: self.title.clone(),
            subtitle: self.subtitle.clone(),
            image_url: self.image_url.clone(),
            link_url: self.link_url.clone(),
            active: self.active,
            position: self.position,
        }
    }
}

/// Active banners in display order.
pub fn active_banners(mut banners: Vec<Banner>) -> Vec<Banner> {
    banners.retain(|b| b.active);
    banners.sort_by_key(|b| b.position);
    banners
}

#[cfg(test)]
mod tests {
    use super::*;

    fn banner(id: &str, active: bool, position: i32) -> Banner {
        Banner {
            id: id.into(),
            title: id.into(),
            subtitle: None,
            image_url: format!("/img/{id}.jpg"),
            link_url: None,
            active,
            position,
        }
    }

    #[test]
    fn active_banners_drops_inactive_and_orders_by_position() {
        let banners = vec![
            banner("c", true, 3),
            banner("a", true, 1),
            banner("hidden", false, 0),
            banner("b", true, 2),
        ];
        let ids: Vec<String> = active_banners(banners).into_iter().map(|b| b.id).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn article_decodes_backend_payload() {
        let article: Article = serde_json::from_str(
            r#"{"id":"a1","title":"Packing list","publishedAt":"2024-05-01T00:00:00Z","published":true}"#,
        )
        .unwrap();
        assert_eq!(article.published_at.as_deref(), Some("2024-05-01T00:00:00Z"));
        assert!(article.body.is_empty());
        assert_eq!(article.to_draft().title, "Packing list");
    }
}
