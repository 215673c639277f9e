use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, OpenApi, ToSchema};

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

/// A stored ship. `prodDate` is epoch milliseconds (UTC midnight).
#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ShipDoc {
    pub id: i64,
    pub name: String,
    pub planet: String,
    /// TRANSPORT, MILITARY or MERCHANT
    pub ship_type: String,
    pub prod_date: i64,
    pub is_used: bool,
    pub speed: f64,
    pub crew_size: i32,
    /// Derived; ignored on input
    pub rating: f64,
}

/// Ship attributes. All are required on create except `isUsed`; on update any subset may be sent.
#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ShipInputDoc {
    /// 1 to 50 characters
    pub name: Option<String>,
    /// 1 to 50 characters
    pub planet: Option<String>,
    /// TRANSPORT, MILITARY or MERCHANT
    pub ship_type: Option<String>,
    /// Epoch milliseconds; year 2800 to 3019
    pub prod_date: Option<i64>,
    pub is_used: Option<bool>,
    /// 0.01 to 0.99
    pub speed: Option<f64>,
    /// 1 to 9999
    pub crew_size: Option<i32>,
}

#[derive(Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ShipFilterDoc {
    /// Case-sensitive substring of the name
    pub name: Option<String>,
    /// Case-sensitive substring of the planet
    pub planet: Option<String>,
    /// TRANSPORT, MILITARY or MERCHANT
    pub ship_type: Option<String>,
    /// Earliest production instant, epoch milliseconds, inclusive
    pub after: Option<i64>,
    /// Latest production instant, epoch milliseconds, inclusive
    pub before: Option<i64>,
    pub is_used: Option<bool>,
    pub min_speed: Option<f64>,
    pub max_speed: Option<f64>,
    pub min_crew_size: Option<i32>,
    pub max_crew_size: Option<i32>,
    pub min_rating: Option<f64>,
    pub max_rating: Option<f64>,
}

#[derive(Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ShipListDoc {
    /// ID (default), NAME, PLANET, SPEED, DATE, CREW_SIZE or RATING
    pub order: Option<String>,
    /// 0-based, default 0
    pub page_number: Option<u64>,
    /// Default 3
    pub page_size: Option<u64>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::ships::list,
        crate::routes::ships::count,
        crate::routes::ships::create,
        crate::routes::ships::get,
        crate::routes::ships::update,
        crate::routes::ships::delete,
    ),
    components(
        schemas(
            HealthResponse,
            ShipDoc,
            ShipInputDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "ships")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_ship_route() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();
        for p in ["/health", "/rest/ships", "/rest/ships/count", "/rest/ships/{id}"] {
            assert!(paths.iter().any(|k| k.as_str() == p), "missing {p}");
        }
    }
}
