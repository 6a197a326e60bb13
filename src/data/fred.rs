//! FRED integration for the fiscal series.
//!
//! Two endpoints are supported:
//!
//! - the JSON observations API, used when `FRED_API_KEY` is set (env or `.env`)
//! - the public `fredgraph.csv` download, which needs no key
//!
//! Both return the raw observation list for one series over the fetch window;
//! resampling happens later in `align`.

use chrono::NaiveDate;
use csv::{ReaderBuilder, Trim};
use reqwest::blocking::{Client, Response};
use serde::Deserialize;
use tracing::debug;

use crate::data::fetch::SeriesSource;
use crate::domain::FetchWindow;
use crate::error::FetchError;

const OBSERVATIONS_URL: &str = "https://api.stlouisfed.org/fred/series/observations";
const GRAPH_CSV_URL: &str = "https://fred.stlouisfed.org/graph/fredgraph.csv";
const DATE_FORMAT: &str = "%Y-%m-%d";

pub struct FredClient {
    client: Client,
    api_key: Option<String>,
}

impl FredClient {
    /// Build a client, picking up `FRED_API_KEY` if one is configured.
    ///
    /// A missing key is not an error; the keyless CSV endpoint is used instead.
    pub fn from_env() -> Result<Self, FetchError> {
        dotenvy::dotenv().ok();
        let api_key = std::env::var("FRED_API_KEY")
            .ok()
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());

        let client = Client::builder()
            .user_agent(concat!("debt-burden/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;

        Ok(Self { client, api_key })
    }

    fn fetch_json(
        &self,
        series_id: &str,
        api_key: &str,
        window: &FetchWindow,
    ) -> Result<Vec<(NaiveDate, Option<f64>)>, FetchError> {
        let (start, end) = (window.start.to_string(), window.end.to_string());
        let resp = self
            .client
            .get(OBSERVATIONS_URL)
            .query(&[
                ("series_id", series_id),
                ("api_key", api_key),
                ("file_type", "json"),
                ("sort_order", "asc"),
                ("observation_start", start.as_str()),
                ("observation_end", end.as_str()),
            ])
            .send()
            .map_err(|e| request_error(series_id, e))?;

        let resp = check_status(series_id, resp)?;
        let body: ObservationsResponse = resp.json().map_err(|e| FetchError::Parse {
            series_id: series_id.to_string(),
            message: e.to_string(),
        })?;

        observations_to_series(series_id, body.observations)
    }

    fn fetch_csv(
        &self,
        series_id: &str,
        window: &FetchWindow,
    ) -> Result<Vec<(NaiveDate, Option<f64>)>, FetchError> {
        let (start, end) = (window.start.to_string(), window.end.to_string());
        let resp = self
            .client
            .get(GRAPH_CSV_URL)
            .query(&[
                ("id", series_id),
                ("cosd", start.as_str()),
                ("coed", end.as_str()),
            ])
            .send()
            .map_err(|e| request_error(series_id, e))?;

        let resp = check_status(series_id, resp)?;
        let body = resp.bytes().map_err(|e| request_error(series_id, e))?;

        parse_graph_csv(series_id, &body)
    }
}

impl SeriesSource for FredClient {
    fn name(&self) -> &'static str {
        if self.api_key.is_some() {
            "FRED observations API"
        } else {
            "FRED graph CSV"
        }
    }

    fn fetch(
        &self,
        series_id: &str,
        window: &FetchWindow,
    ) -> Result<Vec<(NaiveDate, Option<f64>)>, FetchError> {
        debug!(series_id, start = %window.start, end = %window.end, "requesting series");
        match &self.api_key {
            Some(key) => self.fetch_json(series_id, key, window),
            None => self.fetch_csv(series_id, window),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ObservationsResponse {
    observations: Vec<Observation>,
}

#[derive(Debug, Deserialize)]
struct Observation {
    date: String,
    value: String,
}

fn request_error(series_id: &str, err: reqwest::Error) -> FetchError {
    FetchError::Request {
        series_id: series_id.to_string(),
        message: err.to_string(),
    }
}

fn check_status(series_id: &str, resp: Response) -> Result<Response, FetchError> {
    if resp.status().is_success() {
        Ok(resp)
    } else {
        Err(FetchError::Status {
            series_id: series_id.to_string(),
            status: resp.status().as_u16(),
        })
    }
}

fn parse_date(series_id: &str, raw: &str) -> Result<NaiveDate, FetchError> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).map_err(|_| FetchError::InvalidDate {
        series_id: series_id.to_string(),
        raw: raw.to_string(),
    })
}

fn observations_to_series(
    series_id: &str,
    observations: Vec<Observation>,
) -> Result<Vec<(NaiveDate, Option<f64>)>, FetchError> {
    observations
        .into_iter()
        .map(|obs| Ok((parse_date(series_id, &obs.date)?, parse_value(&obs.value))))
        .collect()
}

/// Parse a `fredgraph.csv` body: a header row, then `date,value` rows.
fn parse_graph_csv(series_id: &str, body: &[u8]) -> Result<Vec<(NaiveDate, Option<f64>)>, FetchError> {
    let parse_err = |message: String| FetchError::Parse {
        series_id: series_id.to_string(),
        message,
    };

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .trim(Trim::All)
        .from_reader(body);

    let headers = reader.headers().map_err(|e| parse_err(e.to_string()))?;
    if headers.len() != 2 {
        return Err(parse_err(format!("expected 2 columns, found {}", headers.len())));
    }

    let mut out = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| parse_err(e.to_string()))?;
        let date = parse_date(series_id, &record[0])?;
        out.push((date, parse_value(&record[1])));
    }
    Ok(out)
}

/// FRED encodes missing observations as `.`; anything unparsable is missing too.
fn parse_value(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed == "." || trimmed.is_empty() {
        return None;
    }
    let v = trimmed.parse::<f64>().ok()?;
    if v.is_finite() { Some(v) } else { None }
}
