use serde_json::json;
use uuid::Uuid;

use crate::domain::{DataSourceKind, NewDataSourceRecord};

use super::answers::{
    ElectricityAnswers, ExpenseAnswer, FuelAnswers, HeatingAnswers, ValidAnswers,
};

/// Questionnaire keys to normalized carrier/category labels. Immutable
/// lookup tables shared by validation and parsing.
pub(crate) const FUEL_KINDS: &[(&str, &str)] = &[
    ("diesel", "Diesel"),
    ("petrol", "Petrol"),
    ("lpg", "LPG"),
    ("cng", "CNG"),
];

pub(crate) const HEATING_CARRIERS: &[(&str, &str)] = &[
    ("natural_gas", "Natural gas"),
    ("heating_oil", "Heating oil"),
    ("district_heating", "District heating"),
    ("heat_pump", "Electricity"),
];

pub(crate) const EXPENSE_CATEGORIES: &[(&str, &str)] = &[
    ("office_supplies", "Office supplies"),
    ("it_equipment", "IT equipment"),
    ("travel", "Business travel"),
    ("services", "Purchased services"),
    ("logistics", "Logistics"),
];

fn label_for(table: &[(&str, &'static str)], key: &str) -> &'static str {
    table
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, label)| *label)
        // Validation guarantees table membership before parsing runs
        .unwrap_or("unknown")
}

/// Convert validated questionnaire answers into normalized data-source
/// records. Pure field mapping over static lookups; no validation, no I/O.
pub fn parse_answers(organization_id: Uuid, valid: &ValidAnswers) -> Vec<NewDataSourceRecord> {
    let answers = valid.answers();
    let mut records = Vec::new();

    if let Some(fuel) = &answers.fuel {
        records.push(parse_fuel(organization_id, fuel));
    }
    if let Some(heating) = &answers.heating {
        records.push(parse_heating(organization_id, heating));
    }
    if let Some(electricity) = &answers.electricity {
        records.push(parse_electricity(organization_id, electricity));
    }
    for expense in &answers.expenses {
        records.push(parse_expense(organization_id, expense));
    }

    records
}

fn parse_fuel(organization_id: Uuid, fuel: &FuelAnswers) -> NewDataSourceRecord {
    let carrier = label_for(FUEL_KINDS, &fuel.fuel_kind);

    // A measured quantity beats a spend estimate when both were answered
    let fields = match fuel.annual_litres {
        Some(litres) => json!({
            "carrier": carrier,
            "basis": "quantity",
            "annual_litres": litres,
        }),
        None => json!({
            "carrier": carrier,
            "basis": "spend",
            "annual_spend": fuel.annual_spend,
        }),
    };

    NewDataSourceRecord {
        organization_id,
        kind: DataSourceKind::Fuel,
        name: format!("Vehicle fleet ({carrier})"),
        fields,
    }
}

fn parse_heating(organization_id: Uuid, heating: &HeatingAnswers) -> NewDataSourceRecord {
    let carrier = label_for(HEATING_CARRIERS, &heating.heating_type);

    let fields = match heating.annual_kwh {
        Some(kwh) => json!({
            "carrier": carrier,
            "basis": "quantity",
            "annual_kwh": kwh,
        }),
        None => json!({
            "carrier": carrier,
            "basis": "spend",
            "annual_spend": heating.annual_spend,
        }),
    };

    NewDataSourceRecord {
        organization_id,
        kind: DataSourceKind::Heating,
        name: format!("Heating ({carrier})"),
        fields,
    }
}

fn parse_electricity(
    organization_id: Uuid,
    electricity: &ElectricityAnswers,
) -> NewDataSourceRecord {
    NewDataSourceRecord {
        organization_id,
        kind: DataSourceKind::Electricity,
        name: "Electricity".to_string(),
        fields: json!({
            "annual_kwh": electricity.annual_kwh,
            "green_tariff": electricity.green_tariff,
        }),
    }
}

fn parse_expense(organization_id: Uuid, expense: &ExpenseAnswer) -> NewDataSourceRecord {
    let category = label_for(EXPENSE_CATEGORIES, &expense.category);

    NewDataSourceRecord {
        organization_id,
        kind: DataSourceKind::Expenses,
        name: format!("Expenses ({category})"),
        fields: json!({
            "category": category,
            "annual_amount": expense.annual_amount,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::starter::answers::{validate, StarterAnswers};

    fn valid(answers: StarterAnswers) -> ValidAnswers {
        validate(answers).expect("answers should validate")
    }

    #[test]
    fn fuel_prefers_measured_quantity_over_spend() {
        let org = Uuid::new_v4();
        let answers = valid(StarterAnswers {
            fuel: Some(FuelAnswers {
                fuel_kind: "diesel".into(),
                annual_litres: Some(1200.0),
                annual_spend: Some(2400.0),
            }),
            ..Default::default()
        });

        let records = parse_answers(org, &answers);
        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.kind, DataSourceKind::Fuel);
        assert_eq!(record.fields["basis"], "quantity");
        assert_eq!(record.fields["annual_litres"], 1200.0);
        assert_eq!(record.fields["carrier"], "Diesel");
        assert!(record.fields.get("annual_spend").is_none());
    }

    #[test]
    fn heating_falls_back_to_spend_basis() {
        let answers = valid(StarterAnswers {
            heating: Some(HeatingAnswers {
                heating_type: "natural_gas".into(),
                annual_kwh: None,
                annual_spend: Some(900.0),
            }),
            ..Default::default()
        });

        let records = parse_answers(Uuid::new_v4(), &answers);
        assert_eq!(records[0].fields["basis"], "spend");
        assert_eq!(records[0].fields["carrier"], "Natural gas");
    }

    #[test]
    fn heat_pump_maps_to_electricity_carrier() {
        let answers = valid(StarterAnswers {
            heating: Some(HeatingAnswers {
                heating_type: "heat_pump".into(),
                annual_kwh: Some(4000.0),
                annual_spend: None,
            }),
            ..Default::default()
        });

        let records = parse_answers(Uuid::new_v4(), &answers);
        assert_eq!(records[0].fields["carrier"], "Electricity");
    }

    #[test]
    fn each_expense_becomes_its_own_record() {
        let answers = valid(StarterAnswers {
            electricity: Some(ElectricityAnswers { annual_kwh: 10000.0, green_tariff: true }),
            expenses: vec![
                ExpenseAnswer { category: "travel".into(), annual_amount: 5000.0 },
                ExpenseAnswer { category: "it_equipment".into(), annual_amount: 3000.0 },
            ],
            ..Default::default()
        });

        let org = Uuid::new_v4();
        let records = parse_answers(org, &answers);
        assert_eq!(records.len(), 3);
        assert!(records.iter().all(|r| r.organization_id == org));

        let expense_records: Vec<_> =
            records.iter().filter(|r| r.kind == DataSourceKind::Expenses).collect();
        assert_eq!(expense_records.len(), 2);
        assert_eq!(expense_records[0].fields["category"], "Business travel");
    }

    #[test]
    fn omitted_sections_produce_no_records() {
        let answers = valid(StarterAnswers::default());
        assert!(parse_answers(Uuid::new_v4(), &answers).is_empty());
    }
}
