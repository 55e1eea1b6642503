use std::fmt;

/// One of the eight principal compass points, clockwise from north.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompassPoint {
    N,
    NE,
    E,
    SE,
    S,
    SW,
    W,
    NW,
}

impl CompassPoint {
    const ORDERED: [CompassPoint; 8] = [
        CompassPoint::N,
        CompassPoint::NE,
        CompassPoint::E,
        CompassPoint::SE,
        CompassPoint::S,
        CompassPoint::SW,
        CompassPoint::W,
        CompassPoint::NW,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CompassPoint::N => "N",
            CompassPoint::NE => "NE",
            CompassPoint::E => "E",
            CompassPoint::SE => "SE",
            CompassPoint::S => "S",
            CompassPoint::SW => "SW",
            CompassPoint::W => "W",
            CompassPoint::NW => "NW",
        }
    }
}

impl fmt::Display for CompassPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Map a bearing in degrees (0° = north) to the nearest of the eight compass points.
///
/// Sectors are 45° wide and centred on each point. Bearings exactly halfway between two
/// points (22.5°, 67.5°, ...) round half to even, so 22.5° is `N` and 67.5° is `E`.
/// Negative bearings and bearings above 360° wrap around. Non-finite input yields `N`.
pub fn compass_direction(degrees: f64) -> CompassPoint {
    let sector = (degrees / 45.0).round_ties_even();
    if !sector.is_finite() {
        return CompassPoint::N;
    }
    // Reduce before the cast so huge bearings cannot saturate.
    let index = sector.rem_euclid(8.0) as usize;
    CompassPoint::ORDERED[index % 8]
}
