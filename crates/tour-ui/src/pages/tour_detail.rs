use leptos::prelude::*;
use leptos::server_fn::codec::Json;
use leptos_router::hooks::use_params_map;
use tour_types::{BookingConfirmation, BookingRequest, Tour, MAX_TRAVELERS};

use crate::components::status::{ErrorCard, Loading};
use crate::format::{format_duration, format_price};

#[server]
pub async fn get_tour_detail(id: String) -> Result<Tour, ServerFnError> {
    use crate::server::{backend, client_error};

    let tour = backend()?.api.get_tour(&id).await.map_err(client_error)?;
    if !tour.published {
        return Err(ServerFnError::new("Not found"));
    }
    Ok(tour)
}

#[server(input = Json)]
pub async fn submit_booking(request: BookingRequest) -> Result<BookingConfirmation, ServerFnError> {
    use crate::server::{backend, client_error};

    if let Err(errors) = request.validate() {
        let message = errors
            .into_iter()
            .map(|e| e.message)
            .collect::<Vec<_>>()
            .join("; ");
        return Err(ServerFnError::new(message));
    }

    let confirmation = backend()?
        .api
        .submit_booking(&request)
        .await
        .map_err(client_error)?;
    tracing::info!(
        "booking {} received for tour {}",
        confirmation.id,
        request.tour_id
    );
    Ok(confirmation)
}

#[component]
pub fn TourDetailPage() -> impl IntoView {
    let params = use_params_map();
    let tourId = move || params.read().get("id").unwrap_or_default();
    let tour = Resource::new(tourId, get_tour_detail);

    view! {
        <Suspense fallback=|| view! { <Loading message="Loading tour..." /> }>
            {move || Suspend::new(async move {
                match tour.await {
                    Ok(t) => view! { <TourDetail tour=t /> }.into_any(),
                    Err(e) => view! { <ErrorCard what="tour" error=e.to_string() /> }.into_any(),
                }
            })}
        </Suspense>
    }
}

#[component]
fn TourDetail(tour: Tour) -> impl IntoView {
    let cover = tour.cover_image.clone();
    let itinerary = tour.itinerary.clone();
    let highlights = tour.highlights.clone();
    let accommodations = tour.accommodations.clone();

    view! {
        <div class="page-header">
            <h1>{tour.title.clone()}</h1>
            <p class="subtitle">
                {tour.location.clone()} " \u{00B7} " {format_duration(tour.duration_days)}
            </p>
        </div>
        {cover.map(|src| view! { <img class="tour-hero" src=src alt="" /> })}
        <div class="tour-layout">
            <div class="tour-body">
                <div class="card">
                    <p class="tour-description">{tour.description.clone()}</p>
                </div>
                {(!highlights.is_empty())
                    .then(|| {
                        view! {
                            <div class="card">
                                <div class="card-title">"Highlights"</div>
                                <ul class="highlights">
                                    {highlights
                                        .into_iter()
                                        .map(|h| {
                                            view! {
                                                <li>
                                                    <strong>{h.title}</strong>
                                                    {h.description.map(|d| view! { <span>": " {d}</span> })}
                                                </li>
                                            }
                                        })
                                        .collect_view()}
                                </ul>
                            </div>
                        }
                    })}
                {(!itinerary.is_empty())
                    .then(|| {
                        view! {
                            <div class="card">
                                <div class="card-title">"Itinerary"</div>
                                <ol class="itinerary">
                                    {itinerary
                                        .into_iter()
                                        .map(|day| {
                                            view! {
                                                <li>
                                                    <span class="itinerary-day">{format!("Day {}", day.day)}</span>
                                                    <strong>{day.title}</strong>
                                                    <p>{day.description}</p>
                                                </li>
                                            }
                                        })
                                        .collect_view()}
                                </ol>
                            </div>
                        }
                    })}
                {(!accommodations.is_empty())
                    .then(|| {
                        view! {
                            <div class="card">
                                <div class="card-title">"Where you'll stay"</div>
                                <table>
                                    <thead>
                                        <tr>
                                            <th>"Accommodation"</th>
                                            <th>"Nights"</th>
                                            <th>"Notes"</th>
                                        </tr>
                                    </thead>
                                    <tbody>
                                        {accommodations
                                            .into_iter()
                                            .map(|a| {
                                                view! {
                                                    <tr>
                                                        <td>{a.name}</td>
                                                        <td>{a.nights}</td>
                                                        <td>{a.description.unwrap_or_default()}</td>
                                                    </tr>
                                                }
                                            })
                                            .collect_view()}
                                    </tbody>
                                </table>
                            </div>
                        }
                    })}
            </div>
            <aside class="tour-aside">
                <BookingForm tour />
            </aside>
        </div>
    }
}

#[component]
fn BookingForm(tour: Tour) -> impl IntoView {
    let bookingAction = ServerAction::<SubmitBooking>::new();
    let bookingValue = bookingAction.value();
    let pending = bookingAction.pending();

    let (fullName, setFullName) = signal(String::new());
    let (email, setEmail) = signal(String::new());
    let (phone, setPhone) = signal(String::new());
    let (travelers, setTravelers) = signal(1u32);
    let (startDate, setStartDate) = signal(String::new());
    let (notes, setNotes) = signal(String::new());
    let (selectedExtras, setSelectedExtras) = signal(Vec::<String>::new());

    let tourId = tour.id.clone();
    let currency = tour.currency.clone();
    let quoteTour = tour.clone();
    let quote = move || {
        let total = quoteTour.total_for(travelers.get(), &selectedExtras.get());
        format_price(total, &currency)
    };

    let onSubmit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let optional = |value: String| {
            let trimmed = value.trim().to_string();
            (!trimmed.is_empty()).then_some(trimmed)
        };
        let request = BookingRequest {
            tour_id: tourId.clone(),
            full_name: fullName.get_untracked().trim().to_string(),
            email: email.get_untracked().trim().to_string(),
            phone: optional(phone.get_untracked()),
            travelers: travelers.get_untracked(),
            start_date: startDate.get_untracked(),
            extras: selectedExtras.get_untracked(),
            notes: optional(notes.get_untracked()),
        };
        bookingAction.dispatch(SubmitBooking { request });
    };

    let extras = tour.extras.clone();

    view! {
        <div class="card booking-card">
            <div class="card-title">"Book this tour"</div>
            <p class="tour-price">"from " {format_price(tour.price, &tour.currency)} " per person"</p>
            {move || {
                bookingValue
                    .get()
                    .map(|result| match result {
                        Ok(confirmation) => {
                            view! {
                                <div class="form-success">
                                    {format!(
                                        "Thanks! Your booking reference is {}. We'll email you shortly.",
                                        confirmation.id,
                                    )}
                                </div>
                            }
                                .into_any()
                        }
                        Err(e) => view! { <div class="form-error">{e.to_string()}</div> }.into_any(),
                    })
            }}
            <form on:submit=onSubmit>
                <div class="form-group">
                    <label for="full_name">"Full name"</label>
                    <input
                        id="full_name"
                        type="text"
                        required
                        prop:value=fullName
                        on:input=move |ev| setFullName.set(event_target_value(&ev))
                    />
                </div>
                <div class="form-group">
                    <label for="email">"Email"</label>
                    <input
                        id="email"
                        type="email"
                        required
                        prop:value=email
                        on:input=move |ev| setEmail.set(event_target_value(&ev))
                    />
                </div>
                <div class="form-group">
                    <label for="phone">"Phone (optional)"</label>
                    <input
                        id="phone"
                        type="tel"
                        prop:value=phone
                        on:input=move |ev| setPhone.set(event_target_value(&ev))
                    />
                </div>
                <div class="form-row">
                    <div class="form-group">
                        <label for="travelers">"Travelers"</label>
                        <input
                            id="travelers"
                            type="number"
                            min="1"
                            max=MAX_TRAVELERS.to_string()
                            prop:value=move || travelers.get().to_string()
                            on:input=move |ev| {
                                let count = event_target_value(&ev).parse().unwrap_or(1);
                                setTravelers.set(count);
                            }
                        />
                    </div>
                    <div class="form-group">
                        <label for="start_date">"Start date"</label>
                        <input
                            id="start_date"
                            type="date"
                            required
                            prop:value=startDate
                            on:input=move |ev| setStartDate.set(event_target_value(&ev))
                        />
                    </div>
                </div>
                {(!extras.is_empty())
                    .then(|| {
                        view! {
                            <fieldset class="form-group">
                                <legend>"Extras (per traveler)"</legend>
                                {extras
                                    .iter()
                                    .map(|extra| {
                                        let extraId = extra.id.clone();
                                        let checkedId = extra.id.clone();
                                        let label = format!(
                                            "{} (+{})",
                                            extra.name,
                                            format_price(extra.price, &tour.currency),
                                        );
                                        view! {
                                            <label class="checkbox">
                                                <input
                                                    type="checkbox"
                                                    prop:checked=move || selectedExtras.get().contains(&checkedId)
                                                    on:change=move |ev| {
                                                        let checked = event_target_checked(&ev);
                                                        let id = extraId.clone();
                                                        setSelectedExtras.update(|list| {
                                                            list.retain(|e| *e != id);
                                                            if checked {
                                                                list.push(id);
                                                            }
                                                        });
                                                    }
                                                />
                                                {label}
                                            </label>
                                        }
                                    })
                                    .collect_view()}
                            </fieldset>
                        }
                    })}
                <div class="form-group">
                    <label for="notes">"Notes"</label>
                    <textarea
                        id="notes"
                        prop:value=notes
                        on:input=move |ev| setNotes.set(event_target_value(&ev))
                    ></textarea>
                </div>
                <div class="quote">"Estimated total: " <strong>{quote}</strong></div>
                <button type="submit" class="btn btn-primary" disabled=pending>
                    {move || if pending.get() { "Sending..." } else { "Request booking" }}
                </button>
            </form>
        </div>
    }
}
