//! Fintual real-asset price feed.

use chrono::NaiveDate;
use reqwest::blocking::Client;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info};

use crate::data::PriceSource;
use crate::domain::{FetchQuery, FundId, PricePoint};
use crate::error::AppError;

pub const DEFAULT_BASE_URL: &str = "https://fintual.cl/api";

/// Environment variable overriding the API base URL.
pub const BASE_URL_ENV: &str = "FINTUAL_API_URL";

pub struct FintualClient {
    client: Client,
    base_url: String,
}

impl FintualClient {
    /// Build a client, honoring `FINTUAL_API_URL` from the environment or `.env`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let base_url = std::env::var(BASE_URL_ENV).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self::with_base_url(&base_url)
    }

    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn days_url(&self, fund_id: FundId) -> String {
        format!("{}/real_assets/{fund_id}/days", self.base_url)
    }
}

impl PriceSource for FintualClient {
    fn fetch(&self, fund_id: FundId, query: &FetchQuery) -> Result<Vec<PricePoint>, AppError> {
        let url = self.days_url(fund_id);
        let mut req = self.client.get(&url);

        if let Some(from) = query.from {
            req = req.query(&[("from_date", from.to_string())]);
        }
        if let Some(to) = query.to {
            req = req.query(&[("to_date", to.to_string())]);
        }

        info!(fund_id, url = %url, from = ?query.from, to = ?query.to, "fetching fund prices");

        let resp = req
            .send()
            .map_err(|e| AppError::feed(format!("Fund data request failed: {e}")))?;

        if !resp.status().is_success() {
            return Err(AppError::feed(format!(
                "Fund data request for {fund_id} failed with status {}.",
                resp.status()
            )));
        }

        let body: DaysBody = resp
            .json()
            .map_err(|e| AppError::feed(format!("Failed to parse fund data response: {e}")))?;

        let (points, dropped) = parse_days(body);
        if dropped > 0 {
            debug!(fund_id, dropped, "dropped feed items without a usable date");
        }
        info!(fund_id, points = points.len(), "received fund prices");
        Ok(points)
    }
}

/// Response body: `{ "data": [...] }`, or a bare array.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum DaysBody {
    Wrapped { data: Vec<DayItem> },
    Bare(Vec<DayItem>),
}

/// One day of the feed. Fields may sit under `attributes` or at the top level.
#[derive(Debug, Default, Deserialize)]
struct DayItem {
    #[serde(default)]
    attributes: Option<DayFields>,
    #[serde(default)]
    date: Option<String>,
    #[serde(default)]
    price: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
struct DayFields {
    #[serde(default)]
    date: Option<String>,
    #[serde(default)]
    price: Option<Value>,
}

/// Convert feed items into price points; returns the points and how many
/// items were dropped for lack of a valid date.
fn parse_days(body: DaysBody) -> (Vec<PricePoint>, usize) {
    let items = match body {
        DaysBody::Wrapped { data } => data,
        DaysBody::Bare(items) => items,
    };

    let mut out = Vec::with_capacity(items.len());
    let mut dropped = 0usize;

    for item in items {
        let (attr_date, attr_price) = match item.attributes {
            Some(fields) => (fields.date, fields.price),
            None => (None, None),
        };

        let Some(date) = attr_date.or(item.date).as_deref().and_then(parse_date) else {
            dropped += 1;
            continue;
        };
        let price = attr_price.or(item.price).as_ref().and_then(parse_price);
        out.push(PricePoint { date, price });
    }

    (out, dropped)
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    // Accept plain dates and timestamps like `2024-01-05T00:00:00Z`.
    let day = trimmed.get(..10).unwrap_or(trimmed);
    NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
}

fn parse_price(raw: &Value) -> Option<f64> {
    let v = match raw {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    if v.is_finite() {
        Some(v)
    } else {
        None
    }
}
