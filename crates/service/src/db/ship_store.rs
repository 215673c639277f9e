use models::ship::{self, Column, Entity as ShipEntity, ShipFields};
use sea_orm::{
    sea_query::{Expr, LikeExpr, SimpleExpr},
    ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::errors::ServiceError;
use crate::pagination::PageRequest;
use crate::ship::{Bounds, Clause, Field, Operand, ShipOrder};

const LIKE_ESCAPE: char = '\\';

fn column(field: Field) -> Column {
    match field {
        Field::Name => Column::Name,
        Field::Planet => Column::Planet,
        Field::ShipType => Column::ShipType,
        Field::ProdDate => Column::ProdDate,
        Field::IsUsed => Column::IsUsed,
        Field::Speed => Column::Speed,
        Field::CrewSize => Column::CrewSize,
        Field::Rating => Column::Rating,
    }
}

impl From<Operand> for sea_orm::Value {
    fn from(op: Operand) -> Self {
        match op {
            Operand::ShipType(t) => t.into(),
            Operand::Bool(b) => b.into(),
            Operand::Date(d) => d.into(),
            Operand::Float(f) => f.into(),
            Operand::Int(i) => i.into(),
        }
    }
}

/// `%term%` with the LIKE metacharacters of `term` taken literally.
fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | LIKE_ESCAPE) {
            pattern.push(LIKE_ESCAPE);
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

fn clause_expr(clause: Clause) -> SimpleExpr {
    match clause {
        Clause::Contains { field, term } => Expr::col(column(field))
            .like(LikeExpr::new(contains_pattern(&term)).escape(LIKE_ESCAPE)),
        Clause::Equals { field, value } => column(field).eq(value),
        Clause::Range { field, bounds } => match bounds {
            Bounds::AtLeast(lower) => column(field).gte(lower),
            Bounds::AtMost(upper) => column(field).lte(upper),
            Bounds::Between(lower, upper) => column(field).between(lower, upper),
        },
    }
}

/// Conjunction of `clauses`; an empty slice matches every row.
pub fn into_condition(clauses: &[Clause]) -> Condition {
    clauses
        .iter()
        .cloned()
        .fold(Condition::all(), |cond, clause| cond.add(clause_expr(clause)))
}

/// One page of matching ships ordered by `order`, ties broken by id.
pub async fn list_ships(
    db: &DatabaseConnection,
    clauses: &[Clause],
    order: ShipOrder,
    page: PageRequest,
) -> Result<Vec<ship::Model>, ServiceError> {
    let mut finder = ShipEntity::find().filter(into_condition(clauses)).order_by_asc(order.column());
    if order != ShipOrder::Id {
        finder = finder.order_by_asc(Column::Id);
    }
    let rows = finder.paginate(db, page.page_size).fetch_page(page.page_number).await?;
    Ok(rows)
}

/// Number of ships matching `clauses`, unpaged.
pub async fn count_ships(db: &DatabaseConnection, clauses: &[Clause]) -> Result<u64, ServiceError> {
    let n = ShipEntity::find().filter(into_condition(clauses)).count(db).await?;
    Ok(n)
}

pub async fn get_ship(db: &DatabaseConnection, id: i64) -> Result<Option<ship::Model>, ServiceError> {
    Ok(ShipEntity::find_by_id(id).one(db).await?)
}

pub async fn insert_ship(db: &DatabaseConnection, fields: ShipFields) -> Result<ship::Model, ServiceError> {
    Ok(ship::create(db, fields).await?)
}

pub async fn update_ship(db: &DatabaseConnection, id: i64, fields: ShipFields) -> Result<ship::Model, ServiceError> {
    Ok(ship::overwrite(db, id, fields).await?)
}

/// Delete a ship; returns true if a row was removed.
pub async fn delete_ship(db: &DatabaseConnection, id: i64) -> Result<bool, ServiceError> {
    let res = ShipEntity::delete_by_id(id).exec(db).await?;
    Ok(res.rows_affected > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ship::ShipFilter;
    use crate::test_support::{get_db, ship_fields};
    use models::ship::ShipType;

    #[test]
    fn like_metacharacters_are_escaped() {
        assert_eq!(contains_pattern("Ri"), "%Ri%");
        assert_eq!(contains_pattern("50%_off\\"), "%50\\%\\_off\\\\%");
    }

    async fn seed(db: &DatabaseConnection) -> Result<(), ServiceError> {
        let rows = [
            ("Falcon", "Earth", ShipType::Transport, 3000, false, 0.5, 20),
            ("falcon mk2", "Mars", ShipType::Military, 3010, true, 0.9, 300),
            ("Dart", "Earth", ShipType::Merchant, 2900, false, 0.1, 1),
            ("50% Off", "Venus", ShipType::Merchant, 3019, false, 0.99, 9999),
        ];
        for (name, planet, ship_type, year, is_used, speed, crew) in rows {
            let mut f = ship_fields(year);
            f.name = name.into();
            f.planet = planet.into();
            f.ship_type = ship_type;
            f.is_used = is_used;
            f.speed = speed;
            f.crew_size = crew;
            insert_ship(db, f).await?;
        }
        Ok(())
    }

    async fn names(db: &DatabaseConnection, filter: ShipFilter, order: ShipOrder) -> Vec<String> {
        let clauses = filter.clauses().unwrap();
        let rows = list_ships(db, &clauses, order, PageRequest::new(0, 100)).await.unwrap();
        let count = count_ships(db, &clauses).await.unwrap();
        assert_eq!(count as usize, rows.len(), "count disagrees with listing");
        rows.into_iter().map(|m| m.name).collect()
    }

    #[tokio::test]
    async fn substring_match_is_case_sensitive() -> anyhow::Result<()> {
        let db = get_db().await?;
        seed(&db).await?;
        let f = ShipFilter { name: Some("alcon".into()), ..Default::default() };
        assert_eq!(names(&db, f, ShipOrder::Id).await, vec!["Falcon", "falcon mk2"]);
        let f = ShipFilter { name: Some("Falcon".into()), ..Default::default() };
        assert_eq!(names(&db, f, ShipOrder::Id).await, vec!["Falcon"]);
        let f = ShipFilter { name: Some("%".into()), ..Default::default() };
        assert_eq!(names(&db, f, ShipOrder::Id).await, vec!["50% Off"]);
        Ok(())
    }

    #[tokio::test]
    async fn substring_match_stays_case_sensitive_after_reconnect() -> anyhow::Result<()> {
        use migration::MigratorTrait;

        let path = std::env::temp_dir().join(format!("starfleet-like-{}.db", std::process::id()));
        let _ = std::fs::remove_file(&path);
        let cfg = configs::DatabaseConfig { url: format!("sqlite://{}?mode=rwc", path.display()), ..Default::default() };
        let db = models::db::connect_with_config(&cfg).await?;
        migration::Migrator::up(&db, None).await?;
        insert_ship(&db, ship_fields(3000)).await?;

        let lower = ShipFilter { name: Some("ride".into()), ..Default::default() }.clauses()?;
        let exact = ShipFilter { name: Some("Ride".into()), ..Default::default() }.clauses()?;
        assert_eq!(count_ships(&db, &lower).await?, 0);

        // force the pool to open a fresh connection
        db.get_sqlite_connection_pool().acquire().await?.close().await?;

        assert_eq!(count_ships(&db, &lower).await?, 0);
        assert_eq!(count_ships(&db, &exact).await?, 1);

        db.close().await?;
        let _ = std::fs::remove_file(&path);
        Ok(())
    }

    #[tokio::test]
    async fn range_bounds_are_inclusive() -> anyhow::Result<()> {
        let db = get_db().await?;
        seed(&db).await?;
        let f = ShipFilter { min_speed: Some(0.1), max_speed: Some(0.5), ..Default::default() };
        assert_eq!(names(&db, f, ShipOrder::Speed).await, vec!["Dart", "Falcon"]);
        let f = ShipFilter { max_crew_size: Some(20), ..Default::default() };
        assert_eq!(names(&db, f, ShipOrder::CrewSize).await, vec!["Dart", "Falcon"]);
        let f = ShipFilter { min_crew_size: Some(9999), ..Default::default() };
        assert_eq!(names(&db, f, ShipOrder::Id).await, vec!["50% Off"]);
        Ok(())
    }

    #[tokio::test]
    async fn rating_and_date_ranges() -> anyhow::Result<()> {
        let db = get_db().await?;
        seed(&db).await?;
        // Falcon 2.0, falcon mk2 3.6, Dart 0.07, 50% Off 79.2
        let f = ShipFilter { min_rating: Some(2.0), max_rating: Some(3.6), ..Default::default() };
        assert_eq!(names(&db, f, ShipOrder::Rating).await, vec!["Falcon", "falcon mk2"]);

        let after = models::ship::prod_date_to_millis(ship_fields(3000).prod_date);
        let f = ShipFilter { after: Some(after), ..Default::default() };
        assert_eq!(names(&db, f, ShipOrder::Date).await, vec!["Falcon", "falcon mk2", "50% Off"]);
        let f = ShipFilter { before: Some(after), ..Default::default() };
        assert_eq!(names(&db, f, ShipOrder::Date).await, vec!["Dart", "Falcon"]);
        let f = ShipFilter { after: Some(after + 1), before: Some(after + 1), ..Default::default() };
        assert!(names(&db, f, ShipOrder::Date).await.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn filters_combine_with_and() -> anyhow::Result<()> {
        let db = get_db().await?;
        seed(&db).await?;
        let f = ShipFilter { planet: Some("Earth".into()), is_used: Some(false), ship_type: Some(ShipType::Merchant), ..Default::default() };
        assert_eq!(names(&db, f, ShipOrder::Id).await, vec!["Dart"]);
        assert_eq!(names(&db, ShipFilter::default(), ShipOrder::Name).await, vec!["50% Off", "Dart", "Falcon", "falcon mk2"]);
        Ok(())
    }

    #[tokio::test]
    async fn pages_slice_the_ordered_result() -> anyhow::Result<()> {
        let db = get_db().await?;
        seed(&db).await?;
        let first = list_ships(&db, &[], ShipOrder::Id, PageRequest::default()).await?;
        let second = list_ships(&db, &[], ShipOrder::Id, PageRequest::new(1, 3)).await?;
        assert_eq!(first.len(), 3);
        assert_eq!(second.len(), 1);
        assert!(first.iter().all(|m| m.id < second[0].id));
        Ok(())
    }

    #[tokio::test]
    async fn delete_reports_whether_a_row_went_away() -> anyhow::Result<()> {
        let db = get_db().await?;
        let created = insert_ship(&db, ship_fields(3000)).await?;
        assert!(delete_ship(&db, created.id).await?);
        assert!(!delete_ship(&db, created.id).await?);
        assert!(get_ship(&db, created.id).await?.is_none());
        Ok(())
    }
}
