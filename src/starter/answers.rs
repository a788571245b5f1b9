use serde::{Deserialize, Serialize};

use super::parsers::{EXPENSE_CATEGORIES, FUEL_KINDS, HEATING_CARRIERS};

/// Simplified questionnaire answers from the starter wizard. Sections are
/// optional; an omitted section simply produces no data sources.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StarterAnswers {
    pub fuel: Option<FuelAnswers>,
    pub heating: Option<HeatingAnswers>,
    pub electricity: Option<ElectricityAnswers>,
    #[serde(default)]
    pub expenses: Vec<ExpenseAnswer>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FuelAnswers {
    pub fuel_kind: String,
    pub annual_litres: Option<f64>,
    pub annual_spend: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeatingAnswers {
    pub heating_type: String,
    pub annual_kwh: Option<f64>,
    pub annual_spend: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElectricityAnswers {
    pub annual_kwh: f64,
    pub green_tariff: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpenseAnswer {
    pub category: String,
    pub annual_amount: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field: field.into(), message: message.into() }
    }
}

/// Answers that passed boundary validation. Only `validate` constructs this,
/// so the parsers can assume presence and table membership without
/// re-checking.
#[derive(Debug, Clone)]
pub struct ValidAnswers(StarterAnswers);

impl ValidAnswers {
    pub fn answers(&self) -> &StarterAnswers {
        &self.0
    }
}

fn in_table(table: &[(&str, &str)], key: &str) -> bool {
    table.iter().any(|(k, _)| *k == key)
}

/// Validate questionnaire answers at the boundary. All errors are collected
/// rather than failing on the first, so the client can surface every problem
/// at once. The parsers behind this never validate.
pub fn validate(answers: StarterAnswers) -> Result<ValidAnswers, Vec<ValidationError>> {
    let mut errors = Vec::new();

    if let Some(fuel) = &answers.fuel {
        if !in_table(FUEL_KINDS, &fuel.fuel_kind) {
            errors.push(ValidationError::new("fuel.fuel_kind", format!("unknown fuel kind '{}'", fuel.fuel_kind)));
        }
        if fuel.annual_litres.is_none() && fuel.annual_spend.is_none() {
            errors.push(ValidationError::new("fuel", "either annual_litres or annual_spend is required"));
        }
        if fuel.annual_litres.is_some_and(|v| v < 0.0) {
            errors.push(ValidationError::new("fuel.annual_litres", "must not be negative"));
        }
        if fuel.annual_spend.is_some_and(|v| v < 0.0) {
            errors.push(ValidationError::new("fuel.annual_spend", "must not be negative"));
        }
    }

    if let Some(heating) = &answers.heating {
        if !in_table(HEATING_CARRIERS, &heating.heating_type) {
            errors.push(ValidationError::new("heating.heating_type", format!("unknown heating type '{}'", heating.heating_type)));
        }
        if heating.annual_kwh.is_none() && heating.annual_spend.is_none() {
            errors.push(ValidationError::new("heating", "either annual_kwh or annual_spend is required"));
        }
        if heating.annual_kwh.is_some_and(|v| v < 0.0) {
            errors.push(ValidationError::new("heating.annual_kwh", "must not be negative"));
        }
        if heating.annual_spend.is_some_and(|v| v < 0.0) {
            errors.push(ValidationError::new("heating.annual_spend", "must not be negative"));
        }
    }

    if let Some(electricity) = &answers.electricity {
        if electricity.annual_kwh < 0.0 {
            errors.push(ValidationError::new("electricity.annual_kwh", "must not be negative"));
        }
    }

    for (i, expense) in answers.expenses.iter().enumerate() {
        if !in_table(EXPENSE_CATEGORIES, &expense.category) {
            errors.push(ValidationError::new(
                format!("expenses[{i}].category"),
                format!("unknown expense category '{}'", expense.category),
            ));
        }
        if expense.annual_amount < 0.0 {
            errors.push(ValidationError::new(format!("expenses[{i}].annual_amount"), "must not be negative"));
        }
    }

    if errors.is_empty() {
        Ok(ValidAnswers(answers))
    } else {
        Err(errors)
    }
}
