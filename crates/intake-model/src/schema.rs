//! Canonical schema definitions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Whether a canonical field must be populated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldCore {
    Required,
    Optional,
}

impl FieldCore {
    pub fn as_code(&self) -> &'static str {
        match self {
            Self::Required => "Req",
            Self::Optional => "Opt",
        }
    }
}

impl fmt::Display for FieldCore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_code())
    }
}

impl FromStr for FieldCore {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "req" | "required" => Ok(Self::Required),
            "opt" | "optional" => Ok(Self::Optional),
            other => Err(format!("unknown field core designation: {other}")),
        }
    }
}

/// A canonical field with its known header aliases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaField {
    pub name: String,
    pub core: FieldCore,
    /// Lowercase alias strings in declared order.
    pub aliases: Vec<String>,
}

impl SchemaField {
    pub fn new(name: impl Into<String>, core: FieldCore, aliases: Vec<String>) -> Self {
        Self {
            name: name.into(),
            core,
            aliases,
        }
    }

    pub fn is_required(&self) -> bool {
        self.core == FieldCore::Required
    }

    /// The lowercased field name followed by the declared aliases.
    ///
    /// This is the candidate list the header mapper scores against.
    pub fn candidates(&self) -> Vec<String> {
        let mut candidates = Vec::with_capacity(self.aliases.len() + 1);
        candidates.push(self.name.to_lowercase());
        candidates.extend(self.aliases.iter().map(|alias| alias.to_lowercase()));
        candidates
    }
}

/// Canonical schema for one data type (e.g. `lots`, `shipments`).
///
/// Fields are held in declaration order: required fields first, then
/// optional fields, each group in the order the schema table lists them.
/// Instances are immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaDefinition {
    data_type: String,
    label: String,
    worksheet: String,
    fields: Vec<SchemaField>,
}

impl SchemaDefinition {
    pub fn new(
        data_type: impl Into<String>,
        label: impl Into<String>,
        worksheet: impl Into<String>,
        fields: Vec<SchemaField>,
    ) -> Self {
        let (mut ordered, optional): (Vec<_>, Vec<_>) =
            fields.into_iter().partition(SchemaField::is_required);
        ordered.extend(optional);
        Self {
            data_type: data_type.into(),
            label: label.into(),
            worksheet: worksheet.into(),
            fields: ordered,
        }
    }

    pub fn data_type(&self) -> &str {
        &self.data_type
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Name of the row-store worksheet records of this type are appended to.
    pub fn worksheet(&self) -> &str {
        &self.worksheet
    }

    /// All fields, required first, in declaration order.
    pub fn fields(&self) -> &[SchemaField] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&SchemaField> {
        self.fields.iter().find(|field| field.name == name)
    }

    pub fn contains_field(&self, name: &str) -> bool {
        self.field(name).is_some()
    }

    pub fn is_required(&self, name: &str) -> bool {
        self.field(name).is_some_and(SchemaField::is_required)
    }

    pub fn required_fields(&self) -> impl Iterator<Item = &str> {
        self.fields
            .iter()
            .filter(|field| field.is_required())
            .map(|field| field.name.as_str())
    }

    pub fn optional_fields(&self) -> impl Iterator<Item = &str> {
        self.fields
            .iter()
            .filter(|field| !field.is_required())
            .map(|field| field.name.as_str())
    }

    /// Declared aliases of a field; empty for unknown fields.
    pub fn aliases(&self, name: &str) -> &[String] {
        self.field(name)
            .map(|field| field.aliases.as_slice())
            .unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema() -> SchemaDefinition {
        SchemaDefinition::new(
            "lots",
            "Inventory lots",
            "Lots",
            vec![
                SchemaField::new("notes", FieldCore::Optional, vec!["comments".into()]),
                SchemaField::new("id", FieldCore::Required, vec!["lot id".into()]),
                SchemaField::new("quantity", FieldCore::Required, vec![]),
            ],
        )
    }

    #[test]
    fn required_fields_come_first() {
        let schema = schema();
        let names: Vec<&str> = schema.fields().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["id", "quantity", "notes"]);
        assert_eq!(schema.required_fields().collect::<Vec<_>>(), vec!["id", "quantity"]);
        assert_eq!(schema.optional_fields().collect::<Vec<_>>(), vec!["notes"]);
    }

    #[test]
    fn candidates_start_with_field_name() {
        let field = SchemaField::new("lotId", FieldCore::Required, vec!["lot id".into()]);
        assert_eq!(field.candidates(), vec!["lotid", "lot id"]);
    }

    #[test]
    fn parses_core_codes() {
        assert_eq!("Req".parse::<FieldCore>(), Ok(FieldCore::Required));
        assert_eq!(" opt ".parse::<FieldCore>(), Ok(FieldCore::Optional));
        assert!("Perm".parse::<FieldCore>().is_err());
    }

    #[test]
    fn unknown_field_has_no_aliases() {
        let schema = schema();
        assert!(schema.aliases("vendor").is_empty());
        assert!(schema.is_required("id"));
        assert!(!schema.is_required("notes"));
    }
}
