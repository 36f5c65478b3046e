//! Cloud platform enumeration and the per-platform physical schema map.
//!
//! Each platform stores its subscriptions in its own table with its own
//! column names for the identifier, display name, environment classification,
//! and person-related flag. All other columns are shared. Repositories
//! consult [`PlatformSchema`] instead of hard-coding column names.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::CoreError;
use crate::fields::EditableField;

/// One of the three supported cloud platforms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    Azure,
    Aws,
    Gcp,
}

/// Physical column mapping for one platform's subscription table.
#[derive(Debug, Clone, Copy)]
pub struct PlatformSchema {
    /// Table holding this platform's subscriptions.
    pub table: &'static str,
    /// Natural-key column (`subscription_id` / `account_id` / `project_id`).
    pub id_column: &'static str,
    /// Display-name column.
    pub name_column: &'static str,
    /// Environment/type classification column.
    pub environment_column: &'static str,
    /// Person-related flag column (`personal_related` on GCP).
    pub person_related_column: &'static str,
}

const AZURE_SCHEMA: PlatformSchema = PlatformSchema {
    table: "azure_assets",
    id_column: "subscription_id",
    name_column: "subscription_name",
    environment_column: "type_of_subscription",
    person_related_column: "person_related",
};

const AWS_SCHEMA: PlatformSchema = PlatformSchema {
    table: "aws_assets",
    id_column: "account_id",
    name_column: "account_name",
    environment_column: "type_of_account",
    person_related_column: "person_related",
};

const GCP_SCHEMA: PlatformSchema = PlatformSchema {
    table: "gcp_assets",
    id_column: "project_id",
    name_column: "project_name",
    environment_column: "type_of_project",
    person_related_column: "personal_related",
};

impl Platform {
    /// All platforms, in display order.
    pub const ALL: [Platform; 3] = [Platform::Azure, Platform::Aws, Platform::Gcp];

    /// Canonical label as stored in the workflow tables and used in URLs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Azure => "Azure",
            Platform::Aws => "AWS",
            Platform::Gcp => "GCP",
        }
    }

    /// The physical schema for this platform's subscription table.
    pub fn schema(&self) -> &'static PlatformSchema {
        match self {
            Platform::Azure => &AZURE_SCHEMA,
            Platform::Aws => &AWS_SCHEMA,
            Platform::Gcp => &GCP_SCHEMA,
        }
    }

    /// Physical column for an editable field on this platform.
    pub fn column(&self, field: EditableField) -> &'static str {
        match field {
            EditableField::ISc => "i_sc",
            EditableField::ASc => "a_sc",
            EditableField::CSc => "c_sc",
            EditableField::OrganizationalUnit => "management_group_oe",
            EditableField::Environment => self.schema().environment_column,
            EditableField::CostCenter => "cost_center",
            EditableField::ItOwner => "it_owner",
            EditableField::PersonRelated => self.schema().person_related_column,
        }
    }

    /// Whether SC classification codes are normalized on this platform.
    ///
    /// AWS stores SC codes verbatim; Azure and GCP prefix them with the
    /// field label.
    pub fn normalizes_sc_codes(&self) -> bool {
        matches!(self, Platform::Azure | Platform::Gcp)
    }
}

impl FromStr for Platform {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Azure" => Ok(Platform::Azure),
            "AWS" => Ok(Platform::Aws),
            "GCP" => Ok(Platform::Gcp),
            other => Err(CoreError::Validation(format!(
                "Invalid platform '{other}'. Must be one of: Azure, AWS, GCP"
            ))),
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Platform {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_canonical_labels() {
        assert_eq!("Azure".parse::<Platform>().unwrap(), Platform::Azure);
        assert_eq!("AWS".parse::<Platform>().unwrap(), Platform::Aws);
        assert_eq!("GCP".parse::<Platform>().unwrap(), Platform::Gcp);
    }

    #[test]
    fn parse_rejects_unknown_platform() {
        let err = "DigitalOcean".parse::<Platform>().unwrap_err();
        assert!(err.to_string().contains("Invalid platform"));
    }

    #[test]
    fn schema_maps_platform_specific_columns() {
        assert_eq!(Platform::Azure.schema().id_column, "subscription_id");
        assert_eq!(Platform::Aws.schema().id_column, "account_id");
        assert_eq!(Platform::Gcp.schema().id_column, "project_id");
        assert_eq!(
            Platform::Gcp.column(EditableField::PersonRelated),
            "personal_related"
        );
        assert_eq!(
            Platform::Aws.column(EditableField::Environment),
            "type_of_account"
        );
    }

    #[test]
    fn shared_columns_are_identical_across_platforms() {
        for p in Platform::ALL {
            assert_eq!(p.column(EditableField::CostCenter), "cost_center");
            assert_eq!(p.column(EditableField::ItOwner), "it_owner");
            assert_eq!(
                p.column(EditableField::OrganizationalUnit),
                "management_group_oe"
            );
        }
    }

    #[test]
    fn only_azure_and_gcp_normalize_sc_codes() {
        assert!(Platform::Azure.normalizes_sc_codes());
        assert!(Platform::Gcp.normalizes_sc_codes());
        assert!(!Platform::Aws.normalizes_sc_codes());
    }
}
