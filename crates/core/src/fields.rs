//! Editable subscription fields and their value normalization rules.

use serde::Serialize;

use crate::platform::Platform;

/// The eight fields a user may propose changes to.
///
/// `CostCenter` is special: it is never written to the subscription table by
/// Submit, only by an approved cost-center ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum EditableField {
    ISc,
    ASc,
    CSc,
    OrganizationalUnit,
    Environment,
    CostCenter,
    ItOwner,
    PersonRelated,
}

impl EditableField {
    /// All editable fields, in the order they appear in the draft table.
    pub const ALL: [EditableField; 8] = [
        EditableField::ISc,
        EditableField::ASc,
        EditableField::CSc,
        EditableField::OrganizationalUnit,
        EditableField::Environment,
        EditableField::CostCenter,
        EditableField::ItOwner,
        EditableField::PersonRelated,
    ];

    /// Human-facing label, as shown in the edit form.
    pub fn label(&self) -> &'static str {
        match self {
            EditableField::ISc => "I-SC",
            EditableField::ASc => "A-SC",
            EditableField::CSc => "C-SC",
            EditableField::OrganizationalUnit => "Organizational Unit",
            EditableField::Environment => "Type of Environment",
            EditableField::CostCenter => "Cost Center",
            EditableField::ItOwner => "IT Owner",
            EditableField::PersonRelated => "Person-related",
        }
    }

    /// Column stem in the `proposed_changes` table
    /// (`<key>_original` / `<key>_proposed`).
    pub fn key(&self) -> &'static str {
        match self {
            EditableField::ISc => "i_sc",
            EditableField::ASc => "a_sc",
            EditableField::CSc => "c_sc",
            EditableField::OrganizationalUnit => "organizational_unit",
            EditableField::Environment => "environment",
            EditableField::CostCenter => "cost_center",
            EditableField::ItOwner => "it_owner",
            EditableField::PersonRelated => "person_related",
        }
    }

    /// Whether this is one of the short SC classification codes.
    pub fn is_sc_code(&self) -> bool {
        matches!(
            self,
            EditableField::ISc | EditableField::ASc | EditableField::CSc
        )
    }

    /// Label prefix for SC codes (`"I-"`, `"A-"`, `"C-"`).
    fn sc_prefix(&self) -> Option<&'static str> {
        match self {
            EditableField::ISc => Some("I-"),
            EditableField::ASc => Some("A-"),
            EditableField::CSc => Some("C-"),
            _ => None,
        }
    }
}

/// Trim a submitted value and reject lone-quote placeholders.
///
/// Some upstream exports fill empty cells with a single `"` or `'`; those
/// are treated as empty.
pub fn clean_value(value: &str) -> String {
    let trimmed = value.trim();
    if trimmed == "\"" || trimmed == "'" {
        String::new()
    } else {
        trimmed.to_string()
    }
}

/// SC-code correction applied when a draft is saved.
///
/// On Azure and GCP, a value entered as `SC<suffix>` is a data-entry
/// shorthand for the labeled form; the `SC` prefix is replaced by the field's
/// own label (`SC1234` -> `I-SC1234` for the I-SC field). Other values pass
/// through unchanged.
pub fn normalize_sc_on_save(field: EditableField, platform: Platform, value: &str) -> String {
    if platform.normalizes_sc_codes() && field.is_sc_code() && !value.is_empty() {
        if let Some(suffix) = value.strip_prefix("SC") {
            return format!("{}{suffix}", field.label());
        }
    }
    value.to_string()
}

/// SC-code correction applied when a submission is committed.
///
/// On Azure and GCP, an SC value missing its `I-`/`A-`/`C-` label prefix
/// gets the prefix prepended before it is written to the live record.
pub fn normalize_on_submit(field: EditableField, platform: Platform, value: &str) -> String {
    if platform.normalizes_sc_codes() && !value.is_empty() {
        if let Some(prefix) = field.sc_prefix() {
            if !value.starts_with(prefix) {
                return format!("{prefix}{value}");
            }
        }
    }
    value.to_string()
}
