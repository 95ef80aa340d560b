use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Tour {
    pub id: String,
    #[serde(default)]
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub duration_days: u32,
    #[serde(default)]
    pub price: f64,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default)]
    pub cover_image: Option<String>,
    #[serde(default)]
    pub published: bool,
    #[serde(default)]
    pub itinerary: Vec<ItineraryDay>,
    #[serde(default)]
    pub highlights: Vec<Highlight>,
    #[serde(default)]
    pub accommodations: Vec<Accommodation>,
    #[serde(default)]
    pub extras: Vec<TripExtra>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ItineraryDay {
    pub day: u32,
    pub title: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Highlight {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Accommodation {
    pub name: String,
    #[serde(default)]
    pub nights: u32,
    #[serde(default)]
    pub description: Option<String>,
}

/// Optional add-on sold with a tour. Priced per traveler.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TripExtra {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub price: f64,
}

/// Body of `POST /tours` and `PUT /tours/:id`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TourDraft {
    pub slug: String,
    pub title: String,
    pub summary: String,
    pub description: String,
    pub location: String,
    pub duration_days: u32,
    pub price: f64,
    pub currency: String,
    pub cover_image: Option<String>,
    pub published: bool,
    pub itinerary: Vec<ItineraryDay>,
    pub highlights: Vec<Highlight>,
    pub accommodations: Vec<Accommodation>,
    pub extras: Vec<TripExtra>,
}

fn default_currency() -> String {
    "USD".into()
}

impl Tour {
    /// Quote for `travelers` people with the selected extras.
    /// Unknown extra ids are ignored.
    pub fn total_for(&self, travelers: u32, extraIds: &[String]) -> f64 {
        let extrasPerHead: f64 = self
            .extras
            .iter()
            .filter(|extra| extraIds.contains(&extra.id))
            .map(|extra| extra.price)
            .sum();
        (self.price + extrasPerHead) * f64::from(travelers)
    }

    pub fn to_draft(&self) -> TourDraft {
        TourDraft {
            slug: self.slug.clone(),
            title: self.title.clone(),
            summary: self.summary.clone(),
            description: self.description.clone(),
            location: self.location.clone(),
            duration_days: self.duration_days,
            price: self.price,
            currency: self.currency.clone(),
            cover_image: self.cover_image.clone(),
            published: self.published,
            itinerary: self.itinerary.clone(),
            highlights: self.highlights.clone(),
            accommodations: self.accommodations.clone(),
            extras: self.extras.clone(),
        }
    }
}

impl Default for TourDraft {
    fn default() -> Self {
        Self {
            slug: String::new(),
            title: String::new(),
            summary: String::new(),
            description: String::new(),
            location: String::new(),
            duration_days: 1,
            price: 0.0,
            currency: default_currency(),
            cover_image: None,
            published: false,
            itinerary: Vec::new(),
            highlights: Vec::new(),
            accommodations: Vec::new(),
            extras: Vec::new(),
        }
    }
}

/// Lowercase, dash-separated slug derived from a title.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pendingDash = false;
    for c in title.chars() {
        if c.is_alphanumeric() {
            if pendingDash && !slug.is_empty() {
                slug.push('-');
            }
            pendingDash = false;
            slug.extend(c.to_lowercase());
        } else {
            pendingDash = true;
        }
    }
    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tour() -> Tour {
        serde_json::from_str(
            r#"{
                "id": "t1",
                "slug": "highlands-trek",
                "title": "Highlands Trek",
                "durationDays": 5,
                "price": 1200.0,
                "extras": [
                    {"id": "bike", "name": "E-bike rental", "price": 80.0},
                    {"id": "spa", "name": "Spa day", "price": 150.0}
                ]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn missing_lists_default_to_empty() {
        let tour = sample_tour();
        assert!(tour.itinerary.is_empty());
        assert!(tour.highlights.is_empty());
        assert!(tour.accommodations.is_empty());
        assert_eq!(tour.currency, "USD");
        assert!(!tour.published);
    }

    #[test]
    fn quote_multiplies_base_and_extras_by_travelers() {
        let tour = sample_tour();
        assert_eq!(tour.total_for(2, &[]), 2400.0);
        assert_eq!(tour.total_for(2, &["bike".to_string()]), 2560.0);
        assert_eq!(
            tour.total_for(1, &["bike".to_string(), "unknown".to_string()]),
            1280.0
        );
        assert_eq!(tour.total_for(0, &["spa".to_string()]), 0.0);
    }

    #[test]
    fn draft_serializes_camel_case() {
        let draft = sample_tour().to_draft();
        let value = serde_json::to_value(&draft).unwrap();
        assert_eq!(value["durationDays"], 5);
        assert!(value.get("id").is_none());
        assert!(value["coverImage"].is_null());
    }

    #[test]
    fn slugify_collapses_separators() {
        assert_eq!(slugify("  Highlands & Lochs: 5 Days "), "highlands-lochs-5-days");
        assert_eq!(slugify("Café Tour"), "café-tour");
        assert_eq!(slugify("---"), "");
    }
}
