//! Loading tables from CSV files, JSON files and JSON web APIs.
//!
//! Every source is normalized into the same [`Table`] shape.

use crate::error::LoadError;
use crate::table::{Table, Value};
use csv::ReaderBuilder;
use reqwest::blocking::Client;
use serde_json::{Map, Value as Json};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

/// Timeout for API requests in seconds.
const API_TIMEOUT_SECS: u64 = 30;

/// Where a table comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum Source {
    Csv(PathBuf),
    Json(PathBuf),
    Api {
        url: String,
        params: Vec<(String, String)>,
    },
}

impl Source {
    /// Guess the source kind from a path or URL.
    pub fn infer(input: &str) -> Source {
        if input.starts_with("http://") || input.starts_with("https://") {
            return Source::Api {
                url: input.to_string(),
                params: Vec::new(),
            };
        }
        let path = PathBuf::from(input);
        let is_json = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("json"))
            .unwrap_or(false);
        if is_json {
            Source::Json(path)
        } else {
            Source::Csv(path)
        }
    }
}

/// Load a table from any supported source.
pub fn load_table(source: &Source) -> Result<Table, LoadError> {
    let (label, table) = match source {
        Source::Csv(path) => (path.display().to_string(), load_csv(path)?),
        Source::Json(path) => (path.display().to_string(), load_json(path)?),
        Source::Api { url, params } => (url.clone(), load_from_api(url, params)?),
    };
    info!("Loaded {} with shape {:?}", label, table.shape());
    Ok(table)
}

pub fn load_csv(path: &Path) -> Result<Table, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    read_csv(file)
}

/// Read CSV with a header row, inferring a [`Value`] for every field.
pub fn read_csv<R: Read>(reader: R) -> Result<Table, LoadError> {
    let mut reader = ReaderBuilder::new().has_headers(true).from_reader(reader);

    let headers: Vec<String> = reader.headers()?.iter().map(|s| s.to_string()).collect();

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        rows.push(record.iter().map(Value::parse_field).collect());
    }

    Ok(Table::new(headers, rows))
}

pub fn load_json(path: &Path) -> Result<Table, LoadError> {
    let mut contents = String::new();
    File::open(path)
        .and_then(|mut f| f.read_to_string(&mut contents))
        .map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    let doc: Json = serde_json::from_str(&contents)?;
    table_from_json(doc)
}

/// GET `url` with query `params` and normalize the JSON body.
pub fn load_from_api(url: &str, params: &[(String, String)]) -> Result<Table, LoadError> {
    let client = Client::builder()
        .timeout(Duration::from_secs(API_TIMEOUT_SECS))
        .build()?;
    fetch_table(&client, url, params)
}

/// Non-2xx responses are errors.
fn fetch_table(client: &Client, url: &str, params: &[(String, String)]) -> Result<Table, LoadError> {
    debug!("GET {} with {} params", url, params.len());
    let doc: Json = client
        .get(url)
        .query(params)
        .send()?
        .error_for_status()?
        .json()?;

    table_from_json(doc)
}

/// Turn a JSON document into a table.
///
/// Accepts a list of records, an object wrapping a list of records in one of
/// its fields (e.g. `{"results": [...]}`), or a single object which becomes
/// one row with nested keys joined by `.`.
pub fn table_from_json(doc: Json) -> Result<Table, LoadError> {
    match doc {
        Json::Array(items) => records_to_table(items),
        Json::Object(map) => {
            let wrapped = map.iter().find_map(|(key, value)| match value {
                Json::Array(items) if items.iter().all(Json::is_object) => {
                    Some((key, items.clone()))
                }
                _ => None,
            });
            match wrapped {
                Some((key, items)) => {
                    debug!("Using records from field '{}'", key);
                    records_to_table(items)
                }
                None => {
                    let mut flat = Map::new();
                    flatten_object("", &map, &mut flat);
                    records_to_table(vec![Json::Object(flat)])
                }
            }
        }
        other => Err(LoadError::UnsupportedJson(format!(
            "expected an array or object, found {}",
            json_kind(&other)
        ))),
    }
}

fn records_to_table(items: Vec<Json>) -> Result<Table, LoadError> {
    let mut headers: Vec<String> = Vec::new();
    let mut records = Vec::with_capacity(items.len());

    for (idx, item) in items.into_iter().enumerate() {
        let object = match item {
            Json::Object(object) => object,
            other => {
                return Err(LoadError::UnsupportedJson(format!(
                    "record {} is {}, expected an object",
                    idx + 1,
                    json_kind(&other)
                )))
            }
        };
        for key in object.keys() {
            if !headers.contains(key) {
                headers.push(key.clone());
            }
        }
        records.push(object);
    }

    let rows = records
        .iter()
        .map(|object| {
            headers
                .iter()
                .map(|h| object.get(h).map(json_to_value).unwrap_or(Value::Missing))
                .collect()
        })
        .collect();

    Ok(Table::new(headers, rows))
}

fn flatten_object(prefix: &str, object: &Map<String, Json>, out: &mut Map<String, Json>) {
    for (key, value) in object {
        let name = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{}.{}", prefix, key)
        };
        match value {
            Json::Object(inner) => flatten_object(&name, inner, out),
            other => {
                out.insert(name, other.clone());
            }
        }
    }
}

fn json_to_value(value: &Json) -> Value {
    match value {
        Json::Null => Value::Missing,
        Json::Bool(b) => Value::Bool(*b),
        Json::Number(n) => n.as_f64().map(Value::Number).unwrap_or(Value::Missing),
        Json::String(s) => Value::Text(s.clone()),
        nested => Value::Text(nested.to_string()),
    }
}

fn json_kind(value: &Json) -> &'static str {
    match value {
        Json::Null => "null",
        Json::Bool(_) => "a boolean",
        Json::Number(_) => "a number",
        Json::String(_) => "a string",
        Json::Array(_) => "an array",
        Json::Object(_) => "an object",
    }
}
