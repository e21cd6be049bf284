// File: src/rules/application.rs
// Purpose: Property registration (application) form rules

use super::{RuleContext, RuleSet};
use crate::snapshot::FormSnapshot;
use portal_forms_validation::{
    check_attachment, check_date_order, is_one_of, is_valid_postal_code, validate_date,
    validate_max_length, validate_min_length, validate_number, validate_required,
};

pub const ESTATE: &str = "id_estate";
pub const DISTRICT: &str = "new_est_osiedle";
pub const PROPERTY_TYPE: &str = "new_est_type";
pub const ATTACHMENT: &str = "new_est_attachment";
pub const POSTAL_CODE: &str = "new_est_postal";
pub const STREET: &str = "new_est_street";
pub const BUILDING: &str = "new_est_building";
pub const ARRIVAL: &str = "bag_arrival_date";
pub const DEPARTURE: &str = "bag_depart_date";
pub const NOTES: &str = "notes";

/// `id_estate` value that opens the new-estate section
pub const NEW_ESTATE: &str = "new";
/// Property type that requires an ownership certificate
pub const APARTMENT: &str = "mieszkanie";
pub const HOUSE: &str = "dom";

const FIELDS: &[&str] = &[
    ESTATE,
    DISTRICT,
    PROPERTY_TYPE,
    ATTACHMENT,
    POSTAL_CODE,
    STREET,
    BUILDING,
    ARRIVAL,
    DEPARTURE,
    NOTES,
];

/// Rules of the application form.
///
/// New-estate fields are only reached when their section is shown; that is
/// decided by the visibility controller, not here.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApplicationRules;

impl RuleSet for ApplicationRules {
    fn fields(&self, ctx: &RuleContext<'_>) -> Vec<String> {
        FIELDS
            .iter()
            .map(|f| f.to_string())
            .chain(ctx.config.rules.numeric_fields.iter().map(|f| f.name.clone()))
            .collect()
    }

    fn check(&self, field: &str, snapshot: &FormSnapshot, ctx: &RuleContext<'_>) -> Result<(), String> {
        let value = snapshot.text(field);
        match field {
            ESTATE => validate_required(value).map_err(|_| "Wybierz nieruchomość".to_string()),
            DISTRICT => {
                if ctx.config.districts.contains(value) {
                    Ok(())
                } else {
                    Err("Wybierz osiedle".to_string())
                }
            }
            PROPERTY_TYPE => {
                if is_one_of(value, &[APARTMENT, HOUSE]) {
                    Ok(())
                } else {
                    Err("Wybierz typ nieruchomości".to_string())
                }
            }
            ATTACHMENT => check_attachment(snapshot.file(field), &ctx.config.attachment)
                .map_err(|e| e.to_string()),
            POSTAL_CODE => {
                validate_required(value).map_err(|_| "Wpisz kod pocztowy".to_string())?;
                if is_valid_postal_code(value) {
                    Ok(())
                } else {
                    Err("Kod pocztowy powinien mieć format 09-400".to_string())
                }
            }
            STREET => validate_min_length(value, 2).map_err(|_| "Wpisz nazwę ulicy".to_string()),
            BUILDING => {
                validate_min_length(value, 1).map_err(|_| "Wpisz numer budynku".to_string())
            }
            ARRIVAL => validate_date(value, false).map(drop).map_err(|e| e.to_string()),
            DEPARTURE => {
                let departure = validate_date(value, false).map_err(|e| e.to_string())?;
                // An unparseable arrival is reported on its own field only.
                let arrival = validate_date(snapshot.text(ARRIVAL), false).ok().flatten();
                match (arrival, departure) {
                    (Some(arrival), Some(departure)) => {
                        check_date_order(arrival, departure).map_err(|e| e.to_string())
                    }
                    _ => Ok(()),
                }
            }
            NOTES => validate_max_length(value, ctx.config.rules.notes_max_len),
            other => match ctx.config.rules.numeric_fields.iter().find(|f| f.name == other) {
                Some(numeric) => validate_number(value, &numeric.rule)
                    .map(drop)
                    .map_err(|e| e.to_string()),
                None => Ok(()),
            },
        }
    }
}
