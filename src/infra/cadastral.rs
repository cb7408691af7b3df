//! Cadastral registry lookup.
//!
//! - `CadastralLookup` is the seam the property form talks to.
//! - `MockCadastralClient` answers with plausible randomized parcels after a
//!   short delay; there is no real registry behind it.

use std::{
    future::Future,
    sync::{Arc, Mutex},
    time::Duration,
};

use rand::{rngs::StdRng, Rng, SeedableRng};
use thiserror::Error;
use tracing::{debug, warn};

use crate::domain::entities::PropertyDraft;

const DEFAULT_DELAY: Duration = Duration::from_secs(1);
pub const UNKNOWN_TERRITORY: &str = "Neznámé území";
const LAND_USE: &str = "zastavěné území";
const OWNER: &str = "Soukromá osoba";
const CENTER_LAT: f64 = 49.7437;
const CENTER_LNG: f64 = 15.3386;
const COORDINATE_SPREAD: f64 = 0.05;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LookupError {
    #[error("enter a parcel number and municipality")]
    EmptyQuery,
    #[error("cadastral registry unavailable: {0}")]
    Unavailable(String),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MapLinks {
    pub map_url: String,
    pub cadastral_url: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CadastralRecord {
    pub parcel_number: String,
    pub territory: String,
    pub address: String,
    /// Parcel area in m².
    pub area: f64,
    pub land_use: String,
    pub owner: String,
    pub restrictions: Vec<String>,
    pub coordinates: Coordinates,
}

impl CadastralRecord {
    pub fn map_links(&self) -> MapLinks {
        let Coordinates { lat, lng } = self.coordinates;
        MapLinks {
            map_url: format!("https://api.mapy.cz/img?x={lng}&y={lat}&z=15&size=400x300"),
            cadastral_url: format!(
                "https://nahlizenidokn.cuzk.cz/MapaIdentifikace.aspx?&x={lng}&y={lat}"
            ),
        }
    }

    /// Copies the registry fields into a property form; the rest of the
    /// draft is kept.
    pub fn fill_draft(&self, draft: &mut PropertyDraft) {
        draft.address = self.address.clone();
        draft.cadastral_number = self.parcel_number.clone();
        draft.cadastral_territory = self.territory.clone();
        draft.land_area = self.area.to_string();
    }
}

/// Parcel number and territory parsed from free text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CadastralQuery {
    pub parcel: String,
    pub territory: String,
}

/// Splits `"<parcel> <territory...>"` on the first space.
pub fn parse_search_query(input: &str) -> Result<CadastralQuery, LookupError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(LookupError::EmptyQuery);
    }
    let (parcel, territory) = match trimmed.split_once(' ') {
        Some((parcel, rest)) => (parcel, rest.trim()),
        None => (trimmed, ""),
    };
    let territory = if territory.is_empty() {
        UNKNOWN_TERRITORY
    } else {
        territory
    };
    Ok(CadastralQuery {
        parcel: parcel.to_string(),
        territory: territory.to_string(),
    })
}

pub trait CadastralLookup {
    fn lookup(
        &self,
        query: &CadastralQuery,
    ) -> impl Future<Output = Result<CadastralRecord, LookupError>> + Send;
}

/// Parses free-text input and runs it through `lookup`.
pub async fn search<L: CadastralLookup>(lookup: &L, input: &str) -> Result<CadastralRecord, LookupError> {
    let query = parse_search_query(input)?;
    lookup.lookup(&query).await
}

#[derive(Clone)]
pub struct MockCadastralClient {
    delay: Duration,
    failure_rate: f64,
    rng: Arc<Mutex<StdRng>>,
}

impl Default for MockCadastralClient {
    fn default() -> Self {
        Self::new()
    }
}

impl MockCadastralClient {
    pub fn new() -> Self {
        Self {
            delay: DEFAULT_DELAY,
            failure_rate: 0.0,
            rng: Arc::new(Mutex::new(StdRng::from_entropy())),
        }
    }

    #[cfg(test)]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = Arc::new(Mutex::new(StdRng::seed_from_u64(seed)));
        self
    }

    #[cfg(test)]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    #[cfg(test)]
    /// Probability in `0..=1` that a lookup reports the registry as down.
    pub fn with_failure_rate(mut self, rate: f64) -> Self {
        self.failure_rate = rate.clamp(0.0, 1.0);
        self
    }

    fn generate(&self, query: &CadastralQuery) -> Result<CadastralRecord, LookupError> {
        let mut rng = self
            .rng
            .lock()
            .map_err(|_| LookupError::Unavailable("random source poisoned".to_string()))?;
        if rng.gen_bool(self.failure_rate) {
            return Err(LookupError::Unavailable("request timed out".to_string()));
        }
        Ok(CadastralRecord {
            parcel_number: query.parcel.clone(),
            territory: query.territory.clone(),
            address: format!("{}, parcela {}", query.territory, query.parcel),
            area: f64::from(rng.gen_range(500_u32..2500)),
            land_use: LAND_USE.to_string(),
            owner: OWNER.to_string(),
            restrictions: Vec::new(),
            coordinates: Coordinates {
                lat: CENTER_LAT + rng.gen_range(-COORDINATE_SPREAD..COORDINATE_SPREAD),
                lng: CENTER_LNG + rng.gen_range(-COORDINATE_SPREAD..COORDINATE_SPREAD),
            },
        })
    }
}

impl CadastralLookup for MockCadastralClient {
    fn lookup(
        &self,
        query: &CadastralQuery,
    ) -> impl Future<Output = Result<CadastralRecord, LookupError>> + Send {
        let client = self.clone();
        let query = query.clone();
        async move {
            debug!(parcel = %query.parcel, territory = %query.territory, "cadastral lookup");
            tokio::time::sleep(client.delay).await;
            let result = client.generate(&query);
            if let Err(error) = &result {
                warn!(%error, parcel = %query.parcel, "cadastral lookup failed");
            }
            result
        }
    }
}
