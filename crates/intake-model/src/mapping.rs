//! Header mapping types.

use serde::{Deserialize, Serialize};

/// `matched_alias` sentinel for mappings supplied by the caller.
pub const USER_DEFINED_ALIAS: &str = "user_defined";

/// The mapping decision for one source header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderMapping {
    pub source_header: String,
    pub target_field: String,
    /// Similarity score in `0..=100`.
    pub confidence_score: u8,
    pub matched_alias: String,
    pub is_required: bool,
}

impl HeaderMapping {
    /// A caller-supplied override: full confidence, `user_defined` alias.
    pub fn user_defined(
        source_header: impl Into<String>,
        target_field: impl Into<String>,
        is_required: bool,
    ) -> Self {
        Self {
            source_header: source_header.into(),
            target_field: target_field.into(),
            confidence_score: 100,
            matched_alias: USER_DEFINED_ALIAS.to_string(),
            is_required,
        }
    }

    pub fn is_user_defined(&self) -> bool {
        self.matched_alias == USER_DEFINED_ALIAS
    }
}

/// Outcome of mapping a header list against a schema.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MappingResult {
    /// One entry per mapped source header, in source header order.
    pub mapping: Vec<HeaderMapping>,
    /// Headers whose best score fell below the confidence threshold.
    pub unmapped_headers: Vec<String>,
    /// Required fields no header maps to.
    pub missing_required: Vec<String>,
    pub success: bool,
}

impl MappingResult {
    pub fn get(&self, source_header: &str) -> Option<&HeaderMapping> {
        self.mapping
            .iter()
            .find(|entry| entry.source_header == source_header)
    }

    /// Target fields that at least one header maps to, in mapping order.
    pub fn mapped_fields(&self) -> Vec<&str> {
        let mut fields: Vec<&str> = Vec::new();
        for entry in &self.mapping {
            if !fields.contains(&entry.target_field.as_str()) {
                fields.push(&entry.target_field);
            }
        }
        fields
    }

    /// Recomputes `missing_required` and `success` from the current mapping.
    pub fn refresh_required<'a>(&mut self, required: impl IntoIterator<Item = &'a str>) {
        let mapped = self.mapped_fields();
        let missing: Vec<String> = required
            .into_iter()
            .filter(|field| !mapped.contains(field))
            .map(str::to_string)
            .collect();
        self.missing_required = missing;
        self.success = self.missing_required.is_empty();
    }

    /// Replaces the entry for `entry.source_header`, or inserts it so the
    /// mapping stays in `header_order`. The header leaves `unmapped_headers`.
    ///
    /// Call [`Self::refresh_required`] afterwards.
    pub fn upsert(&mut self, entry: HeaderMapping, header_order: &[String]) {
        self.unmapped_headers
            .retain(|header| header != &entry.source_header);
        if let Some(existing) = self
            .mapping
            .iter_mut()
            .find(|existing| existing.source_header == entry.source_header)
        {
            *existing = entry;
            return;
        }
        let position_of = |header: &str| {
            header_order
                .iter()
                .position(|h| h == header)
                .unwrap_or(usize::MAX)
        };
        let target = position_of(&entry.source_header);
        let index = self
            .mapping
            .iter()
            .take_while(|existing| position_of(&existing.source_header) < target)
            .count();
        self.mapping.insert(index, entry);
    }
}
