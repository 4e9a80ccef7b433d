//! Race format enum.
//!
//! The format decides how weather is localised along the route: a road race
//! crosses many weather cells, a track race sits inside one.

/// The kind of event being simulated.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum RaceType {
    /// American Solar Challenge: point-to-point road route with checkpoints.
    #[default]
    Asc,
    /// Formula Sun Grand Prix: laps of a closed track.
    Fsgp,
}

impl RaceType {
    /// `true` when weather must be looked up per location along the route.
    ///
    /// Track races characterise the whole circuit by the weather at its
    /// origin coordinate, so every tick maps to weather location 0.
    #[inline]
    pub fn localises_weather(self) -> bool {
        matches!(self, RaceType::Asc)
    }

    /// Short label, useful for CSV column values and log fields.
    pub fn as_str(self) -> &'static str {
        match self {
            RaceType::Asc  => "ASC",
            RaceType::Fsgp => "FSGP",
        }
    }
}

impl std::fmt::Display for RaceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for RaceType {
    type Err = crate::SrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "ASC"  => Ok(RaceType::Asc),
            "FSGP" => Ok(RaceType::Fsgp),
            other  => Err(crate::SrError::Parse(format!("unknown race type `{other}`"))),
        }
    }
}
