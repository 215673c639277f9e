use chrono::{DateTime, Datelike, NaiveTime};
use rust_decimal::{prelude::ToPrimitive, Decimal, RoundingStrategy};
use sea_orm::{entity::prelude::*, ActiveValue::NotSet, ConnectionTrait, Set, Unchanged};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

pub const TEXT_MAX_LEN: usize = 50;
pub const MIN_PROD_YEAR: i32 = 2800;
pub const MAX_PROD_YEAR: i32 = 3019;
pub const MIN_SPEED: f64 = 0.01;
pub const MAX_SPEED: f64 = 0.99;
pub const MIN_CREW_SIZE: i32 = 1;
pub const MAX_CREW_SIZE: i32 = 9999;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShipType {
    #[sea_orm(string_value = "TRANSPORT")]
    Transport,
    #[sea_orm(string_value = "MILITARY")]
    Military,
    #[sea_orm(string_value = "MERCHANT")]
    Merchant,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "ship")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub planet: String,
    pub ship_type: ShipType,
    #[serde(with = "prod_date_millis")]
    pub prod_date: Date,
    pub is_used: bool,
    pub speed: f64,
    pub crew_size: i32,
    pub rating: f64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Every user-settable attribute of a ship, fully populated.
///
/// `rating` is not part of it: it is always derived through [`ShipFields::rating`].
#[derive(Clone, Debug, PartialEq)]
pub struct ShipFields {
    pub name: String,
    pub planet: String,
    pub ship_type: ShipType,
    pub prod_date: Date,
    pub is_used: bool,
    pub speed: f64,
    pub crew_size: i32,
}

impl ShipFields {
    pub fn validate(&self) -> Result<(), ModelError> {
        validate_name(&self.name)?;
        validate_planet(&self.planet)?;
        validate_crew_size(self.crew_size)?;
        validate_speed(self.speed)?;
        validate_prod_date(self.prod_date)
    }

    pub fn rating(&self) -> f64 {
        compute_rating(self.speed, self.is_used, self.prod_date)
    }

    fn into_active_model(self, id: Option<i64>) -> ActiveModel {
        let rating = self.rating();
        ActiveModel {
            id: id.map_or(NotSet, Unchanged),
            name: Set(self.name),
            planet: Set(self.planet),
            ship_type: Set(self.ship_type),
            prod_date: Set(self.prod_date),
            is_used: Set(self.is_used),
            speed: Set(self.speed),
            crew_size: Set(self.crew_size),
            rating: Set(rating),
        }
    }
}

impl From<Model> for ShipFields {
    fn from(m: Model) -> Self {
        Self {
            name: m.name,
            planet: m.planet,
            ship_type: m.ship_type,
            prod_date: m.prod_date,
            is_used: m.is_used,
            speed: m.speed,
            crew_size: m.crew_size,
        }
    }
}

fn validate_text(field: &str, value: &str) -> Result<(), ModelError> {
    let len = value.chars().count();
    if !(1..=TEXT_MAX_LEN).contains(&len) {
        return Err(ModelError::invalid(field));
    }
    Ok(())
}

pub fn validate_name(name: &str) -> Result<(), ModelError> { validate_text("name", name) }

pub fn validate_planet(planet: &str) -> Result<(), ModelError> { validate_text("planet", planet) }

/// NaN falls outside every range and is rejected.
pub fn validate_speed(speed: f64) -> Result<(), ModelError> {
    if !(MIN_SPEED..=MAX_SPEED).contains(&speed) {
        return Err(ModelError::invalid("speed"));
    }
    Ok(())
}

pub fn validate_crew_size(crew_size: i32) -> Result<(), ModelError> {
    if !(MIN_CREW_SIZE..=MAX_CREW_SIZE).contains(&crew_size) {
        return Err(ModelError::invalid("crewSize"));
    }
    Ok(())
}

pub fn validate_prod_date(prod_date: Date) -> Result<(), ModelError> {
    if !(MIN_PROD_YEAR..=MAX_PROD_YEAR).contains(&prod_date.year()) {
        return Err(ModelError::invalid("prodDate"));
    }
    Ok(())
}

/// UTC calendar date of an epoch-millisecond instant.
pub fn prod_date_from_millis(millis: i64) -> Result<Date, ModelError> {
    DateTime::from_timestamp_millis(millis)
        .map(|dt| dt.date_naive())
        .ok_or_else(|| ModelError::invalid("prodDate"))
}

/// Epoch milliseconds of the UTC midnight starting `date`.
pub fn prod_date_to_millis(date: Date) -> i64 {
    date.and_time(NaiveTime::MIN).and_utc().timestamp_millis()
}

/// `80 * speed * k / (3019 - year + 1)` with `k = 0.5` for used ships,
/// rounded half-up to two decimals.
///
/// The denominator is at least 1 for every date accepted by [`validate_prod_date`].
pub fn compute_rating(speed: f64, is_used: bool, prod_date: Date) -> f64 {
    let usage = if is_used { 0.5 } else { 1.0 };
    let years = f64::from(MAX_PROD_YEAR - prod_date.year() + 1);
    round2(80.0 * speed * usage / years)
}

// Rounds the exact binary value, so 2.675 (stored as 2.67499..) becomes 2.67.
fn round2(value: f64) -> f64 {
    Decimal::from_f64_retain(value)
        .map(|d| d.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|d| d.to_f64())
        .unwrap_or(value)
}

pub async fn create<C: ConnectionTrait>(db: &C, fields: ShipFields) -> Result<Model, ModelError> {
    fields.validate()?;
    fields
        .into_active_model(None)
        .insert(db)
        .await
        .map_err(|e| ModelError::Db(e.to_string()))
}

/// Replace every attribute of ship `id` and store a freshly derived rating.
pub async fn overwrite<C: ConnectionTrait>(db: &C, id: i64, fields: ShipFields) -> Result<Model, ModelError> {
    fields.validate()?;
    fields
        .into_active_model(Some(id))
        .update(db)
        .await
        .map_err(|e| ModelError::Db(e.to_string()))
}

mod prod_date_millis {
    use sea_orm::prelude::Date;
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &Date, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_i64(super::prod_date_to_millis(*date))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Date, D::Error> {
        let millis = i64::deserialize(d)?;
        super::prod_date_from_millis(millis).map_err(D::Error::custom)
    }
}
