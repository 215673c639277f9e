//! Predicate builder for ship listings.
//!
//! [`ShipFilter`] holds every optional list/count parameter; [`ShipFilter::clauses`]
//! turns the supplied ones into typed [`Clause`]s whose conjunction is the
//! predicate. Parameters that are absent produce no clause at all. Translation
//! into SQL lives in the persistence layer ([`crate::db::ship_store`]).

use chrono::{DateTime, Days};
use models::ship::{self, ShipType};
use sea_orm::prelude::Date;
use serde::Deserialize;

use crate::errors::ServiceError;

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShipFilter {
    pub name: Option<String>,
    pub planet: Option<String>,
    pub ship_type: Option<ShipType>,
    /// Inclusive lower bound on `prodDate`, epoch milliseconds.
    pub after: Option<i64>,
    /// Inclusive upper bound on `prodDate`, epoch milliseconds.
    pub before: Option<i64>,
    pub is_used: Option<bool>,
    pub min_speed: Option<f64>,
    pub max_speed: Option<f64>,
    pub min_crew_size: Option<i32>,
    pub max_crew_size: Option<i32>,
    pub min_rating: Option<f64>,
    pub max_rating: Option<f64>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    Name,
    Planet,
    ShipType,
    ProdDate,
    IsUsed,
    Speed,
    CrewSize,
    Rating,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Operand {
    ShipType(ShipType),
    Bool(bool),
    Date(Date),
    Float(f64),
    Int(i32),
}

/// Which sides of a range are constrained. Both ends are inclusive.
#[derive(Clone, Debug, PartialEq)]
pub enum Bounds {
    AtLeast(Operand),
    AtMost(Operand),
    Between(Operand, Operand),
}

impl Bounds {
    fn from_pair(lower: Option<Operand>, upper: Option<Operand>) -> Option<Self> {
        match (lower, upper) {
            (None, None) => None,
            (Some(l), None) => Some(Self::AtLeast(l)),
            (None, Some(u)) => Some(Self::AtMost(u)),
            (Some(l), Some(u)) => Some(Self::Between(l, u)),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Clause {
    /// Case-sensitive, unanchored substring match.
    Contains { field: Field, term: String },
    Equals { field: Field, value: Operand },
    Range { field: Field, bounds: Bounds },
}

impl ShipFilter {
    /// The supplied conditions, in a fixed attribute order.
    ///
    /// Fails only when `after`/`before` lie outside the representable calendar.
    pub fn clauses(&self) -> Result<Vec<Clause>, ServiceError> {
        let mut out = Vec::new();

        if let Some(term) = &self.name {
            out.push(Clause::Contains { field: Field::Name, term: term.clone() });
        }
        if let Some(term) = &self.planet {
            out.push(Clause::Contains { field: Field::Planet, term: term.clone() });
        }
        if let Some(t) = self.ship_type {
            out.push(Clause::Equals { field: Field::ShipType, value: Operand::ShipType(t) });
        }

        let after = self.after.map(first_date_at_or_after).transpose()?;
        let before = self.before.map(date_containing).transpose()?;
        push_range(&mut out, Field::ProdDate, after.map(Operand::Date), before.map(Operand::Date));

        if let Some(used) = self.is_used {
            out.push(Clause::Equals { field: Field::IsUsed, value: Operand::Bool(used) });
        }

        push_range(&mut out, Field::Speed, self.min_speed.map(Operand::Float), self.max_speed.map(Operand::Float));
        push_range(&mut out, Field::CrewSize, self.min_crew_size.map(Operand::Int), self.max_crew_size.map(Operand::Int));
        push_range(&mut out, Field::Rating, self.min_rating.map(Operand::Float), self.max_rating.map(Operand::Float));

        Ok(out)
    }
}

fn push_range(out: &mut Vec<Clause>, field: Field, lower: Option<Operand>, upper: Option<Operand>) {
    if let Some(bounds) = Bounds::from_pair(lower, upper) {
        out.push(Clause::Range { field, bounds });
    }
}

// Stored dates compare as their UTC midnight, so `prodDate >= after` holds
// from the first date whose midnight is not earlier than `after`.
fn first_date_at_or_after(millis: i64) -> Result<Date, ServiceError> {
    let date = date_containing(millis).map_err(|_| ServiceError::invalid("after"))?;
    if ship::prod_date_to_millis(date) >= millis {
        return Ok(date);
    }
    date.checked_add_days(Days::new(1)).ok_or_else(|| ServiceError::invalid("after"))
}

// Every date whose midnight is at or before `before`, up to the date containing it.
fn date_containing(millis: i64) -> Result<Date, ServiceError> {
    DateTime::from_timestamp_millis(millis)
        .map(|dt| dt.date_naive())
        .ok_or_else(|| ServiceError::invalid("before"))
}
