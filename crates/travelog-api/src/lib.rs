//! JSON API for Travelog.
//!
//! Exposes an axum [`Router`] backed by any [`travelog_core::store::TravelStore`].
//! Every report is computed per request over a fresh snapshot of the store.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", travelog_api::api_router(store.clone()))
//! ```

pub mod error;
pub mod places;
pub mod reports;
pub mod visits;

mod snapshot;

use std::sync::Arc;

use axum::{
  Router,
  routing::{delete, get},
};
use travelog_core::store::TravelStore;

pub use error::ApiError;

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: TravelStore + 'static,
{
  Router::new()
    // Places
    .route("/continents", get(places::continents::<S>))
    .route("/countries", get(places::countries::<S>))
    .route("/states", get(places::states::<S>))
    .route("/places/{kind}/{id}/visits", get(places::visits::<S>))
    // Visits
    .route("/visits/{kind}", get(visits::list::<S>).post(visits::create::<S>))
    .route("/visits/{kind}/{id}", delete(visits::remove::<S>))
    // Reports
    .route("/reports/continents", get(reports::continents::<S>))
    .route("/reports/states", get(reports::states::<S>))
    .route("/reports/{kind}/most-visits", get(reports::most_visits::<S>))
    .route("/reports/{kind}/most-days", get(reports::most_days::<S>))
    .route("/reports/{kind}/years", get(reports::years::<S>))
    .route("/reports/{kind}/map", get(reports::map::<S>))
    .with_state(store)
}

// ─── Integration tests ────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
  };
  use chrono::NaiveDate;
  use serde_json::{Value, json};
  use tower::ServiceExt as _;
  use travelog_core::{
    date::DateRange,
    place::PlaceKind,
    visit::NewVisit,
  };
  use travelog_store_sqlite::SqliteStore;

  struct Fixture {
    store:  Arc<SqliteStore>,
    france: i64,
    spain:  i64,
  }

  /// Europe { France, Spain, Italy }, Asia { Japan }, United States { Texas }.
  async fn fixture() -> Fixture {
    let store = SqliteStore::open_in_memory().await.unwrap();
    let europe = store.add_continent("Europe").await.unwrap();
    let asia = store.add_continent("Asia").await.unwrap();
    let america = store.add_continent("North America").await.unwrap();
    let france = store.add_country("France", europe.id).await.unwrap();
    let spain = store.add_country("Spain", europe.id).await.unwrap();
    store.add_country("Italy", europe.id).await.unwrap();
    store.add_country("Japan", asia.id).await.unwrap();
    let us = store.add_country("United States", america.id).await.unwrap();
    store.add_state("Texas", us.id).await.unwrap();

    Fixture { store: Arc::new(store), france: france.id, spain: spain.id }
  }

  fn range(start: (i32, u32, u32), end: (i32, u32, u32)) -> DateRange {
    DateRange::from_dates(
      NaiveDate::from_ymd_opt(start.0, start.1, start.2).unwrap(),
      NaiveDate::from_ymd_opt(end.0, end.1, end.2).unwrap(),
    )
  }

  /// Two past visits to France, one far-future visit to Spain.
  async fn with_trips(f: &Fixture) {
    for (place_id, r) in [
      (f.france, range((2010, 6, 1), (2010, 6, 10))),
      (f.france, range((2012, 7, 1), (2012, 7, 5))),
      (f.spain, range((2090, 1, 1), (2090, 1, 3))),
    ] {
      f.store
        .record_visit(PlaceKind::Country, NewVisit { place_id, range: r })
        .await
        .unwrap();
    }
  }

  async fn send(
    f: &Fixture,
    method: &str,
    uri: &str,
    body: Option<Value>,
  ) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
      Some(json) => {
        builder = builder.header(header::CONTENT_TYPE, "application/json");
        Body::from(json.to_string())
      }
      None => Body::empty(),
    };
    let resp = api_router(f.store.clone())
      .oneshot(builder.body(body).unwrap())
      .await
      .unwrap();

    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
      .await
      .unwrap();
    let value = if bytes.is_empty() {
      Value::Null
    } else {
      serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
  }

  // ── Places ──────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn countries_are_listed_by_name() {
    let f = fixture().await;
    let (status, body) = send(&f, "GET", "/countries", None).await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = body
      .as_array()
      .unwrap()
      .iter()
      .map(|c| c["name"].as_str().unwrap())
      .collect();
    assert_eq!(names, vec!["France", "Italy", "Japan", "Spain", "United States"]);
  }

  #[tokio::test]
  async fn states_carry_country_names() {
    let f = fixture().await;
    let (status, body) = send(&f, "GET", "/states", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["state"], "Texas");
    assert_eq!(body[0]["country"], "United States");
  }

  #[tokio::test]
  async fn visits_of_missing_place_return_404() {
    let f = fixture().await;
    let (status, _) = send(&f, "GET", "/places/country/999/visits", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
  }

  #[tokio::test]
  async fn visits_of_one_place() {
    let f = fixture().await;
    with_trips(&f).await;
    let uri = format!("/places/country/{}/visits", f.france);
    let (status, body) = send(&f, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 2);
    assert_eq!(body[0]["start"], "2012-07-01");
  }

  // ── Visits ──────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn visits_are_split_into_past_and_future() {
    let f = fixture().await;
    with_trips(&f).await;

    let (status, body) = send(&f, "GET", "/visits/country", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["past"].as_array().unwrap().len(), 2);
    assert_eq!(body["past"][0]["start"], "2012-07-01");
    assert_eq!(body["past"][0]["place"], "France");
    assert_eq!(body["future"][0]["place"], "Spain");
  }

  #[tokio::test]
  async fn unknown_kind_is_rejected() {
    let f = fixture().await;
    let (status, _) = send(&f, "GET", "/visits/planet", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
  }

  #[tokio::test]
  async fn post_visit_returns_201() {
    let f = fixture().await;
    let body = json!({
      "place_id":   f.france.to_string(),
      "start_date": "2015-03-01",
      "end_date":   "2015-03-04",
    });
    let (status, resp) = send(&f, "POST", "/visits/country", Some(body)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(resp["message"], "Visit added successfully!");
    assert_eq!(resp["visit"]["place_id"], f.france);

    let (_, page) = send(&f, "GET", "/visits/country", None).await;
    assert_eq!(page["past"][0]["end"], "2015-03-04");
  }

  #[tokio::test]
  async fn post_visit_to_unknown_country_returns_400() {
    let f = fixture().await;
    let body = json!({
      "place_id":   "99",
      "start_date": "2022-01-01",
      "end_date":   "2022-01-10",
    });
    let (status, resp) = send(&f, "POST", "/visits/country", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(resp["error"], "no country with id 99");

    let (_, page) = send(&f, "GET", "/visits/country", None).await;
    assert!(page["past"].as_array().unwrap().is_empty());
    assert!(page["future"].as_array().unwrap().is_empty());
  }

  #[tokio::test]
  async fn post_visit_with_missing_field_returns_400() {
    let f = fixture().await;
    let body = json!({ "place_id": f.france.to_string(), "start_date": "2022-01-01" });
    let (status, resp) = send(&f, "POST", "/visits/country", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(resp["error"], "input data missing");
  }

  #[tokio::test]
  async fn delete_always_returns_204() {
    let f = fixture().await;
    with_trips(&f).await;

    let (status, _) = send(&f, "DELETE", "/visits/country/abc", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = send(&f, "DELETE", "/visits/country/4242", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, page) = send(&f, "GET", "/visits/country", None).await;
    let id = page["future"][0]["id"].as_i64().unwrap();
    let (status, _) = send(&f, "DELETE", &format!("/visits/country/{id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, page) = send(&f, "GET", "/visits/country", None).await;
    assert_eq!(page["past"].as_array().unwrap().len(), 2);
    assert!(page["future"].as_array().unwrap().is_empty());
  }

  // ── Reports ─────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn most_visits_and_most_days() {
    let f = fixture().await;
    with_trips(&f).await;

    let (status, body) = send(&f, "GET", "/reports/country/most-visits", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([{ "value": 2, "places": ["France"] }]));

    let (_, body) = send(&f, "GET", "/reports/country/most-days", None).await;
    assert_eq!(body, json!([{ "value": 15, "places": ["France"] }]));
  }

  #[tokio::test]
  async fn map_splits_past_and_future_places() {
    let f = fixture().await;
    with_trips(&f).await;

    let (_, body) = send(&f, "GET", "/reports/country/map", None).await;
    assert_eq!(body, json!({
      "total_places": 2,
      "past":         ["France"],
      "future":       ["Spain"],
    }));
  }

  #[tokio::test]
  async fn continent_coverage_report() {
    let f = fixture().await;
    with_trips(&f).await;

    let (_, body) = send(&f, "GET", "/reports/continents", None).await;
    let europe = &body[1];
    assert_eq!(europe["name"], "Europe");
    assert_eq!(europe["visited"], 1);
    assert_eq!(europe["total"], 3);
    assert_eq!(europe["places"][0], json!({ "name": "France", "visited": true }));
  }

  #[tokio::test]
  async fn state_coverage_report() {
    let f = fixture().await;
    let (_, body) = send(&f, "GET", "/reports/states", None).await;
    assert_eq!(body, json!([{
      "name":    "United States",
      "visited": 0,
      "total":   1,
      "places":  [{ "name": "Texas", "visited": false }],
    }]));
  }

  #[tokio::test]
  async fn years_start_at_first_visit() {
    let f = fixture().await;
    with_trips(&f).await;

    let (_, body) = send(&f, "GET", "/reports/country/years", None).await;
    let rows = body.as_array().unwrap();
    let last = rows.last().unwrap();
    assert_eq!(last["year"], 2010);
    assert_eq!(last["total_days"], 10);
    assert_eq!(last["new_places"], 1);

    let (_, body) = send(&f, "GET", "/reports/state/years", None).await;
    assert_eq!(body, json!([]));
  }
}
