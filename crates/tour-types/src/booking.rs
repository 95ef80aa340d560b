use serde::{Deserialize, Serialize};

pub const MAX_TRAVELERS: u32 = 50;

/// Booking inquiry submitted from a tour page. Body of `POST /bookings`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    pub tour_id: String,
    pub full_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub travelers: u32,
    pub start_date: String,
    #[serde(default)]
    pub extras: Vec<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BookingConfirmation {
    pub id: String,
    #[serde(default)]
    pub status: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl Default for BookingRequest {
    fn default() -> Self {
        Self {
            tour_id: String::new(),
            full_name: String::new(),
            email: String::new(),
            phone: None,
            travelers: 1,
            start_date: String::new(),
            extras: Vec::new(),
            notes: None,
        }
    }
}

impl BookingRequest {
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();
        let mut fail = |field: &str, message: &str| {
            errors.push(FieldError {
                field: field.into(),
                message: message.into(),
            });
        };

        if self.tour_id.trim().is_empty() {
            fail("tourId", "missing tour");
        }
        if self.full_name.trim().is_empty() {
            fail("fullName", "name is required");
        }
        if !looks_like_email(&self.email) {
            fail("email", "enter a valid email address");
        }
        if self.travelers == 0 || self.travelers > MAX_TRAVELERS {
            fail("travelers", "travelers must be between 1 and 50");
        }
        if self.start_date.trim().is_empty() {
            fail("startDate", "pick a start date");
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

fn looks_like_email(email: &str) -> bool {
    let email = email.trim();
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !email.contains(char::is_whitespace)
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> BookingRequest {
        BookingRequest {
            tour_id: "t1".into(),
            full_name: "Ana Silva".into(),
            email: "ana@example.com".into(),
            travelers: 2,
            start_date: "2025-06-01".into(),
            ..BookingRequest::default()
        }
    }

    fn failing_fields(request: &BookingRequest) -> Vec<String> {
        request
            .validate()
            .unwrap_err()
            .into_iter()
            .map(|e| e.field)
            .collect()
    }

    #[test]
    fn valid_request_passes() {
        assert!(valid().validate().is_ok());
    }

    #[test]
    fn reports_every_bad_field() {
        let request = BookingRequest {
            tour_id: "t1".into(),
            ..BookingRequest::default()
        };
        assert_eq!(
            failing_fields(&request),
            vec!["fullName", "email", "startDate"]
        );
    }

    #[test]
    fn traveler_count_is_bounded() {
        let mut request = valid();
        request.travelers = 0;
        assert_eq!(failing_fields(&request), vec!["travelers"]);
        request.travelers = MAX_TRAVELERS + 1;
        assert_eq!(failing_fields(&request), vec!["travelers"]);
        request.travelers = MAX_TRAVELERS;
        assert!(request.validate().is_ok());
    }

    #[test]
    fn rejects_malformed_emails() {
        for email in ["", "ana", "ana@", "@example.com", "ana@example", "a b@example.com", "a@b@c.com"] {
            let mut request = valid();
            request.email = email.into();
            assert_eq!(failing_fields(&request), vec!["email"], "{email}");
        }
    }
}
