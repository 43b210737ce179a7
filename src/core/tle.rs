use crate::domain::model::SatelliteId;

impl SatelliteId {
    /// Read the NORAD id from the TLE the station hands to its
    /// post-observation hook. The id is the third whitespace-separated token;
    /// anything unparseable yields `Unknown` rather than an error.
    pub fn from_tle(tle: &str) -> Self {
        tle.split_whitespace()
            .nth(2)
            .and_then(|token| token.parse::<i64>().ok())
            .map_or(SatelliteId::Unknown, SatelliteId::Norad)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_third_token_is_the_norad_id() {
        let tle = "METEOR-M2 2 44387 98.5 300.1";
        assert_eq!(SatelliteId::from_tle(tle), SatelliteId::Norad(44387));
    }

    #[test]
    fn test_newlines_count_as_whitespace() {
        let tle = "METEOR-M 2\n  57166\n1 57166U 23091A";
        assert_eq!(SatelliteId::from_tle(tle), SatelliteId::Norad(57166));
    }

    #[test]
    fn test_non_numeric_token_is_unknown() {
        let tle = "1 25544U 98067A   19261.73152778  .00000221  00000-0  11893-4 0  9990";
        assert_eq!(SatelliteId::from_tle(tle), SatelliteId::Unknown);
    }

    #[test]
    fn test_short_or_empty_input_is_unknown() {
        assert_eq!(SatelliteId::from_tle(""), SatelliteId::Unknown);
        assert_eq!(SatelliteId::from_tle("ISS (ZARYA)"), SatelliteId::Unknown);
    }
}
