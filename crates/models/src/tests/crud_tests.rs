use crate::{entry, user, user_credentials};
use anyhow::Result;
use chrono::Utc;
use rust_decimal_macros::dec;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
use uuid::Uuid;

use super::setup_test_db;

fn entry_for(user_id: Uuid, entry_type: &str, amount: rust_decimal::Decimal) -> entry::Model {
    entry::Model {
        id: Uuid::new_v4(),
        user_id,
        description: "salario".to_string(),
        month: 1,
        year: 2021,
        amount,
        entry_type: entry_type.to_string(),
        status: "PENDING".to_string(),
        registered_on: Utc::now().date_naive(),
    }
}

#[tokio::test]
async fn test_user_and_credentials_crud() -> Result<()> {
    let Some(db) = setup_test_db().await else { return Ok(()) };

    let email = format!("crud_{}@email.com", Uuid::new_v4());
    let created = user::create(&db, "usuario", &email).await?;
    assert!(user::exists_by_email(&db, &email).await?);
    assert_eq!(user::find_by_email(&db, &email).await?.map(|u| u.id), Some(created.id));

    let cred = user_credentials::upsert_password(&db, created.id, "senha".into(), "plain").await?;
    assert_eq!(cred.password_algorithm, "plain");
    let cred = user_credentials::upsert_password(&db, created.id, "outra".into(), "plain").await?;
    assert_eq!(cred.password, "outra");
    assert!(user_credentials::find_by_user(&db, created.id).await?.is_some());

    user_credentials::Entity::delete_many()
        .filter(user_credentials::Column::UserId.eq(created.id))
        .exec(&db)
        .await?;
    user::hard_delete(&db, created.id).await?;
    assert!(!user::exists_by_email(&db, &email).await?);
    Ok(())
}

#[tokio::test]
async fn test_entry_save_list_and_sum() -> Result<()> {
    let Some(db) = setup_test_db().await else { return Ok(()) };

    let email = format!("entries_{}@email.com", Uuid::new_v4());
    let owner = user::create(&db, "usuario", &email).await?;

    let income = entry::save(&db, entry_for(owner.id, "INCOME", dec!(100.50))).await?;
    let expense = entry::save(&db, entry_for(owner.id, "EXPENSE", dec!(40.25))).await?;

    // saving an existing id replaces the row
    let mut changed = income.clone();
    changed.status = "SETTLED".to_string();
    let changed = entry::save(&db, changed).await?;
    assert_eq!(entry::find(&db, income.id).await?.map(|e| e.status), Some("SETTLED".to_string()));
    assert_eq!(changed.id, income.id);

    let filter = entry::EqualityFilter { user_id: Some(owner.id), ..Default::default() };
    assert_eq!(entry::list(&db, &filter).await?.len(), 2);
    let only_income = entry::EqualityFilter { entry_type: Some("INCOME".into()), ..filter.clone() };
    assert_eq!(entry::list(&db, &only_income).await?.len(), 1);

    assert_eq!(entry::sum_amount_by_type_and_user(&db, owner.id, "INCOME").await?, Some(dec!(100.50)));
    assert_eq!(entry::sum_amount_by_type_and_user(&db, owner.id, "EXPENSE").await?, Some(dec!(40.25)));
    assert_eq!(entry::sum_amount_by_type_and_user(&db, Uuid::new_v4(), "INCOME").await?, None);

    assert!(entry::delete(&db, income.id).await?);
    assert!(entry::delete(&db, expense.id).await?);
    assert!(!entry::delete(&db, expense.id).await?);
    user::hard_delete(&db, owner.id).await?;
    Ok(())
}
