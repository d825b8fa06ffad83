use sea_orm::{entity::prelude::*, Set, DatabaseConnection, QueryFilter, QueryOrder, QuerySelect, QueryTrait};
use sea_orm::sea_query::Expr;
use sea_orm::Select;
use uuid::Uuid;
use serde::{Deserialize, Serialize};

use crate::errors;
use crate::user;

/// A single income or expense record. `entry_type` and `status` store the
/// upper-case enum names (`INCOME`/`EXPENSE`, `PENDING`/`SETTLED`/`CANCELED`).
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "entry")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub description: String,
    pub month: i32,
    pub year: i32,
    #[sea_orm(column_type = "Decimal(Some((16, 2)))")]
    pub amount: Decimal,
    pub entry_type: String,
    pub status: String,
    pub registered_on: Date,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { User }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::User => Entity::belongs_to(user::Entity)
                .from(Column::UserId)
                .to(user::Column::Id)
                .into(),
        }
    }
}

impl Related<user::Entity> for Entity {
    fn to() -> RelationDef { Relation::User.def() }
}

impl ActiveModelBehavior for ActiveModel {}

/// Equality constraints pushed down to SQL when listing entries.
#[derive(Clone, Debug, Default)]
pub struct EqualityFilter {
    pub user_id: Option<Uuid>,
    pub month: Option<i32>,
    pub year: Option<i32>,
    pub entry_type: Option<String>,
    pub status: Option<String>,
}

impl EqualityFilter {
    fn select(&self) -> Select<Entity> {
        Entity::find()
            .apply_if(self.user_id, |q, v| q.filter(Column::UserId.eq(v)))
            .apply_if(self.month, |q, v| q.filter(Column::Month.eq(v)))
            .apply_if(self.year, |q, v| q.filter(Column::Year.eq(v)))
            .apply_if(self.entry_type.clone(), |q, v| q.filter(Column::EntryType.eq(v)))
            .apply_if(self.status.clone(), |q, v| q.filter(Column::Status.eq(v)))
    }
}

/// Insert the row, or replace every column of the row with the same id.
pub async fn save(db: &DatabaseConnection, model: Model) -> Result<Model, errors::ModelError> {
    let exists = Entity::find_by_id(model.id)
        .one(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))?
        .is_some();
    let am = ActiveModel {
        id: Set(model.id),
        user_id: Set(model.user_id),
        description: Set(model.description),
        month: Set(model.month),
        year: Set(model.year),
        amount: Set(model.amount),
        entry_type: Set(model.entry_type),
        status: Set(model.status),
        registered_on: Set(model.registered_on),
    };
    let saved = if exists { am.update(db).await } else { am.insert(db).await };
    saved.map_err(|e| errors::ModelError::Db(e.to_string()))
}

pub async fn find(db: &DatabaseConnection, id: Uuid) -> Result<Option<Model>, errors::ModelError> {
    Entity::find_by_id(id).one(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}

/// Returns whether a row was removed.
pub async fn delete(db: &DatabaseConnection, id: Uuid) -> Result<bool, errors::ModelError> {
    let res = Entity::delete_by_id(id).exec(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))?;
    Ok(res.rows_affected > 0)
}

pub async fn list(db: &DatabaseConnection, filter: &EqualityFilter) -> Result<Vec<Model>, errors::ModelError> {
    filter
        .select()
        .order_by_asc(Column::Year)
        .order_by_asc(Column::Month)
        .all(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))
}

/// `SUM(amount)` over one user's entries of one type; `None` when there are no rows.
pub async fn sum_amount_by_type_and_user(
    db: &DatabaseConnection,
    user_id: Uuid,
    entry_type: &str,
) -> Result<Option<Decimal>, errors::ModelError> {
    let total = Entity::find()
        .select_only()
        .column_as(Expr::col(Column::Amount).sum(), "total")
        .filter(Column::UserId.eq(user_id))
        .filter(Column::EntryType.eq(entry_type.to_string()))
        .into_tuple::<Option<Decimal>>()
        .one(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))?;
    Ok(total.flatten())
}
