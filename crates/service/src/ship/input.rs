use models::ship::{self, ShipFields, ShipType};
use sea_orm::prelude::Date;
use serde::Deserialize;

use crate::errors::ServiceError;

/// Sparse ship attributes as sent by a client.
///
/// Used whole for creation and as a patch for edits: `None` always means
/// "not supplied", never "clear". `id` and `rating` are not accepted.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShipInput {
    pub name: Option<String>,
    pub planet: Option<String>,
    pub ship_type: Option<ShipType>,
    /// Epoch milliseconds, UTC.
    pub prod_date: Option<i64>,
    pub is_used: Option<bool>,
    pub speed: Option<f64>,
    pub crew_size: Option<i32>,
}

impl ShipInput {
    /// Range-check whichever fields are present. Absent fields are not required.
    pub fn validate_present(&self) -> Result<(), ServiceError> {
        if let Some(name) = &self.name { ship::validate_name(name)?; }
        if let Some(planet) = &self.planet { ship::validate_planet(planet)?; }
        if let Some(crew_size) = self.crew_size { ship::validate_crew_size(crew_size)?; }
        if let Some(speed) = self.speed { ship::validate_speed(speed)?; }
        self.prod_date()?;
        Ok(())
    }

    fn prod_date(&self) -> Result<Option<Date>, ServiceError> {
        let Some(millis) = self.prod_date else { return Ok(None) };
        let date = ship::prod_date_from_millis(millis)?;
        ship::validate_prod_date(date)?;
        Ok(Some(date))
    }

    /// Turn a creation request into a complete record; `isUsed` defaults to `false`.
    pub fn into_fields(self) -> Result<ShipFields, ServiceError> {
        fn required<T>(value: Option<T>, field: &str) -> Result<T, ServiceError> {
            value.ok_or_else(|| ServiceError::Validation(format!("{field} is required")))
        }

        let name = required(self.name.clone(), "name")?;
        let planet = required(self.planet.clone(), "planet")?;
        let ship_type = required(self.ship_type, "shipType")?;
        required(self.prod_date, "prodDate")?;
        let speed = required(self.speed, "speed")?;
        let crew_size = required(self.crew_size, "crewSize")?;

        self.validate_present()?;
        let prod_date = required(self.prod_date()?, "prodDate")?;

        Ok(ShipFields {
            name,
            planet,
            ship_type,
            prod_date,
            is_used: self.is_used.unwrap_or(false),
            speed,
            crew_size,
        })
    }

    /// Overlay the supplied fields on `current`, leaving everything else as stored.
    pub fn apply(&self, current: &ShipFields) -> Result<ShipFields, ServiceError> {
        Ok(ShipFields {
            name: self.name.clone().unwrap_or_else(|| current.name.clone()),
            planet: self.planet.clone().unwrap_or_else(|| current.planet.clone()),
            ship_type: self.ship_type.unwrap_or(current.ship_type),
            prod_date: self.prod_date()?.unwrap_or(current.prod_date),
            is_used: self.is_used.unwrap_or(current.is_used),
            speed: self.speed.unwrap_or(current.speed),
            crew_size: self.crew_size.unwrap_or(current.crew_size),
        })
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn millis(year: i32) -> i64 {
        ship::prod_date_to_millis(Date::from_ymd_opt(year, 1, 1).unwrap())
    }

    fn complete() -> ShipInput {
        ShipInput {
            name: Some("Ride".into()),
            planet: Some("Earth".into()),
            ship_type: Some(ShipType::Transport),
            prod_date: Some(millis(3000)),
            is_used: None,
            speed: Some(0.5),
            crew_size: Some(20),
        }
    }

    #[test]
    fn into_fields_defaults_is_used_to_false() {
        let f = complete().into_fields().unwrap();
        assert!(!f.is_used);
        assert_eq!(f.rating(), 2.0);
    }

    #[test]
    fn into_fields_requires_every_field_but_is_used() {
        let cases: [fn(&mut ShipInput); 6] = [
            |i| i.name = None,
            |i| i.planet = None,
            |i| i.ship_type = None,
            |i| i.prod_date = None,
            |i| i.speed = None,
            |i| i.crew_size = None,
        ];
        for clear in cases {
            let mut input = complete();
            clear(&mut input);
            let err = input.into_fields().unwrap_err();
            assert!(err.is_validation(), "{err}");
        }
    }

    #[test]
    fn missing_field_is_reported_by_name() {
        let mut input = complete();
        input.crew_size = None;
        assert!(input.into_fields().unwrap_err().to_string().contains("crewSize"));
    }

    #[test]
    fn validate_present_skips_absent_fields() {
        assert!(ShipInput::default().validate_present().is_ok());
        let only_speed = ShipInput { speed: Some(1.0), ..Default::default() };
        assert!(only_speed.validate_present().unwrap_err().to_string().contains("speed"));
        let bad_year = ShipInput { prod_date: Some(millis(3020)), ..Default::default() };
        assert!(bad_year.validate_present().unwrap_err().to_string().contains("prodDate"));
    }

    #[test]
    fn apply_only_overwrites_supplied_fields() {
        let current = complete().into_fields().unwrap();
        let patch = ShipInput { speed: Some(0.8), ..Default::default() };
        let merged = patch.apply(&current).unwrap();
        assert_eq!(merged.speed, 0.8);
        assert_eq!(ShipFields { speed: current.speed, ..merged.clone() }, current);
        assert_eq!(merged.rating(), 3.2);
    }

    #[test]
    fn empty_patch_is_identity() {
        let current = complete().into_fields().unwrap();
        let patch = ShipInput::default();
        assert!(patch.is_empty());
        assert_eq!(patch.apply(&current).unwrap(), current);
    }

    #[test]
    fn deserializes_camel_case_and_ignores_id_and_rating() {
        let input: ShipInput = serde_json::from_str(
            r#"{"id": 99, "rating": 50.0, "shipType": "MERCHANT", "isUsed": true, "crewSize": 3, "prodDate": null}"#,
        )
        .unwrap();
        assert_eq!(input.ship_type, Some(ShipType::Merchant));
        assert_eq!(input.is_used, Some(true));
        assert_eq!(input.crew_size, Some(3));
        assert_eq!(input.prod_date, None);
    }
}
