use rust_decimal::Decimal;

use super::domain::Entry;
use crate::errors::ServiceError;

pub const MSG_DESCRIPTION: &str = "Informe uma descrição válida";
pub const MSG_MONTH: &str = "Informe um mês válido";
pub const MSG_YEAR: &str = "Informe um Ano válido.";
pub const MSG_USER: &str = "Informe um usuário.";
pub const MSG_AMOUNT: &str = "Informe um valor válido.";
pub const MSG_TYPE: &str = "Informe um tipo de lançamento.";

/// Width of the `entry.description` column.
pub const DESCRIPTION_MAX_CHARS: usize = 255;

/// Check a candidate entry before it is stored. Rules run in a fixed order
/// and only the first one broken is reported.
pub fn validate(entry: &Entry) -> Result<(), ServiceError> {
    let description_ok = entry
        .description
        .as_deref()
        .map_or(false, |d| !d.trim().is_empty() && d.chars().count() <= DESCRIPTION_MAX_CHARS);
    if !description_ok {
        return Err(ServiceError::business(MSG_DESCRIPTION));
    }
    if !entry.month.map_or(false, |m| (1..=12).contains(&m)) {
        return Err(ServiceError::business(MSG_MONTH));
    }
    // length of the decimal text, sign included
    if entry.year.map_or(true, |y| y.to_string().len() != 4) {
        return Err(ServiceError::business(MSG_YEAR));
    }
    if entry.user_id.is_none() {
        return Err(ServiceError::business(MSG_USER));
    }
    if !entry.amount.map_or(false, |a| a > Decimal::ZERO) {
        return Err(ServiceError::business(MSG_AMOUNT));
    }
    if entry.entry_type.is_none() {
        return Err(ServiceError::business(MSG_TYPE));
    }
    Ok(())
}
