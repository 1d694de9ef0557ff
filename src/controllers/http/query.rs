use std::error::Error;
use std::fmt;
use std::str::FromStr;

use crate::core::data::render_params::{RenderParams, RenderParamsError};

const WIDTH: &str = "width";
const HEIGHT: &str = "height";
const ORIGIN_X: &str = "x";
const ORIGIN_Y: &str = "y";
const ZOOM: &str = "zoom";
const MODE: &str = "mode";
const FIX_POINT_X: &str = "cx";
const FIX_POINT_Y: &str = "cy";
const ITERATIONS: &str = "iterations";

#[derive(Debug, Clone, PartialEq)]
pub enum QueryError {
    MissingValue { key: String },
    InvalidValue { key: String, value: String },
    InvalidParams(RenderParamsError),
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingValue { key } => write!(f, "query parameter '{}' has no value", key),
            Self::InvalidValue { key, value } => {
                write!(f, "could not parse '{}' for query parameter '{}'", value, key)
            }
            Self::InvalidParams(err) => write!(f, "{}", err),
        }
    }
}

impl Error for QueryError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidParams(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RenderParamsError> for QueryError {
    fn from(err: RenderParamsError) -> Self {
        Self::InvalidParams(err)
    }
}

fn parse_value<T: FromStr>(key: &str, value: &str) -> Result<T, QueryError> {
    if value.is_empty() {
        return Err(QueryError::MissingValue {
            key: key.to_string(),
        });
    }

    T::from_str(value).map_err(|_| QueryError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    })
}

/// Builds render parameters from the query part of a request URL, starting
/// from [`RenderParams::default`]. Keys and values are form-urlencoded;
/// unknown keys are ignored.
pub fn parse_render_query(query: &str) -> Result<RenderParams, QueryError> {
    let mut params = RenderParams::default();

    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        let (key, value) = (&*key, &*value);

        match key {
            WIDTH => params.width = parse_value(key, value)?,
            HEIGHT => params.height = parse_value(key, value)?,
            ORIGIN_X => params.origin_x = parse_value(key, value)?,
            ORIGIN_Y => params.origin_y = parse_value(key, value)?,
            ZOOM => params.zoom = parse_value(key, value)?,
            MODE => params.kind = parse_value(key, value)?,
            FIX_POINT_X => params.fix_point_x = parse_value(key, value)?,
            FIX_POINT_Y => params.fix_point_y = parse_value(key, value)?,
            ITERATIONS => params.max_iterations = parse_value(key, value)?,
            _ => {}
        }
    }

    params.validate()?;
    Ok(params)
}
