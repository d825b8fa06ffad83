use sea_orm::{entity::prelude::*, Set, DatabaseConnection, QueryFilter, PaginatorTrait};
use uuid::Uuid;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors;
use crate::entry;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    #[sea_orm(unique)]
    pub email: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Entries,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self { Relation::Entries => Entity::has_many(entry::Entity).into() }
    }
}

impl Related<entry::Entity> for Entity {
    fn to() -> RelationDef { Relation::Entries.def() }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_email(email: &str) -> Result<(), errors::ModelError> {
    if !email.contains('@') { return Err(errors::ModelError::Validation("Informe um email válido.".into())); }
    Ok(())
}

pub fn validate_name(name: &str) -> Result<(), errors::ModelError> {
    if name.trim().is_empty() { return Err(errors::ModelError::Validation("Informe um nome válido.".into())); }
    Ok(())
}

pub async fn create(db: &DatabaseConnection, name: &str, email: &str) -> Result<Model, errors::ModelError> {
    validate_email(email)?;
    validate_name(name)?;
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(name.to_string()),
        email: Set(email.to_string()),
        created_at: Set(Utc::now().into()),
    };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}

pub async fn find_by_email(db: &DatabaseConnection, email: &str) -> Result<Option<Model>, errors::ModelError> {
    Entity::find()
        .filter(Column::Email.eq(email.to_string()))
        .one(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))
}

pub async fn exists_by_email(db: &DatabaseConnection, email: &str) -> Result<bool, errors::ModelError> {
    let n = Entity::find()
        .filter(Column::Email.eq(email.to_string()))
        .count(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))?;
    Ok(n > 0)
}

pub async fn hard_delete(db: &DatabaseConnection, id: Uuid) -> Result<(), errors::ModelError> {
    Entity::delete_by_id(id).exec(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_must_contain_at_sign() {
        assert!(validate_email("usuario@email.com").is_ok());
        let err = validate_email("usuario.email.com").unwrap_err();
        assert_eq!(err.to_string(), "Informe um email válido.");
    }

    #[test]
    fn blank_name_rejected() {
        assert!(validate_name("usuario").is_ok());
        assert!(validate_name("   ").is_err());
    }
}
