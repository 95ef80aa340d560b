use leptos::prelude::*;
use tour_types::Tour;

use crate::format::{format_duration, format_price};

#[component]
pub fn TourCard(tour: Tour) -> impl IntoView {
    let href = format!("/tours/{}", tour.id);
    let cover = tour
        .cover_image
        .clone()
        .unwrap_or_else(|| "/images/tour-placeholder.jpg".into());

    view! {
        <a class="card tour-card" href=href>
            <img class="tour-cover" src=cover alt=tour.title.clone() loading="lazy" />
            <div class="tour-card-body">
                <div class="card-title">{tour.title.clone()}</div>
                <p class="tour-location">{tour.location.clone()}</p>
                <p class="tour-summary">{tour.summary.clone()}</p>
                <div class="tour-meta">
                    <span>{format_duration(tour.duration_days)}</span>
                    <span class="tour-price">
                        "from " {format_price(tour.price, &tour.currency)}
                    </span>
                </div>
            </div>
        </a>
    }
}
