use serde::Deserialize;

/// Sort key accepted by the listing endpoint. Ordering is always ascending.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShipOrder {
    #[default]
    Id,
    Name,
    Planet,
    Speed,
    Date,
    CrewSize,
    Rating,
}

impl ShipOrder {
    pub fn column(self) -> models::ship::Column {
        use models::ship::Column;
        match self {
            Self::Id => Column::Id,
            Self::Name => Column::Name,
            Self::Planet => Column::Planet,
            Self::Speed => Column::Speed,
            Self::Date => Column::ProdDate,
            Self::CrewSize => Column::CrewSize,
            Self::Rating => Column::Rating,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::ship::Column;

    #[test]
    fn parses_wire_names() {
        let o: ShipOrder = serde_json::from_str(r#""CREW_SIZE""#).unwrap();
        assert_eq!(o, ShipOrder::CrewSize);
        let o: ShipOrder = serde_json::from_str(r#""DATE""#).unwrap();
        assert!(matches!(o.column(), Column::ProdDate));
        assert!(serde_json::from_str::<ShipOrder>(r#""date""#).is_err());
    }

    #[test]
    fn defaults_to_id() {
        assert!(matches!(ShipOrder::default().column(), Column::Id));
    }
}
