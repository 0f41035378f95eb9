// ABOUTME: Meal plan entity and the solver's per-day per-section selection shape
// ABOUTME: MealPlan, SelectionDay, SectionAssignment, and the _links envelope
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Savora

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Hypermedia link carried in a selection assignment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    /// Human-readable link title
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// The linked resource URI; for selection assignments this encodes the
    /// externally-resolved recipe URI for the slot
    pub href: String,
}

/// `_links` envelope of a selection assignment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentLinks {
    /// Self link pointing at the assigned recipe
    #[serde(rename = "self")]
    pub self_link: Link,
}

/// One slot's assignment inside a selection day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionAssignment {
    /// The assigned recipe URI as reported by the solver
    pub assigned: String,
    /// Link envelope; `links.self.href` carries the fetchable recipe URI
    #[serde(rename = "_links")]
    pub links: AssignmentLinks,
}

impl SectionAssignment {
    /// Build an assignment whose `assigned` value and self link agree
    #[must_use]
    pub fn new(recipe_uri: impl Into<String>, title: Option<String>) -> Self {
        let uri = recipe_uri.into();
        Self {
            assigned: uri.clone(),
            links: AssignmentLinks {
                self_link: Link { title, href: uri },
            },
        }
    }

    /// The fetchable recipe URI for this slot
    #[must_use]
    pub fn href(&self) -> &str {
        &self.links.self_link.href
    }
}

/// One day of the solver's selection: section name to assignment
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionDay {
    /// Assignments keyed by section name (e.g. "Breakfast")
    pub sections: BTreeMap<String, SectionAssignment>,
}

/// A generated meal plan owned by a client
///
/// Invariant: `selection.len()` equals the number of days between
/// `start_date` and `end_date` inclusive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealPlan {
    /// Backend-assigned identifier; absent until first persisted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Owning client identifier
    pub client_id: String,
    /// First day covered by the plan
    pub start_date: DateTime<Utc>,
    /// Last day covered by the plan (inclusive)
    pub end_date: DateTime<Utc>,
    /// Whether meals are logged automatically as their scheduled time passes
    pub auto_log_meals: bool,
    /// Per-day, per-section recipe assignments from the solver
    pub selection: Vec<SelectionDay>,
}

impl MealPlan {
    /// Build an unsaved plan from a solver selection
    ///
    /// The end date is derived so the day span matches the selection length:
    /// `end_date = start_date + (selection.len() - 1) days`.
    #[must_use]
    pub fn from_selection(
        client_id: impl Into<String>,
        start_date: DateTime<Utc>,
        auto_log_meals: bool,
        selection: Vec<SelectionDay>,
    ) -> Self {
        let span_days = selection.len().saturating_sub(1) as i64;
        Self {
            id: None,
            client_id: client_id.into(),
            start_date,
            end_date: start_date + Duration::days(span_days),
            auto_log_meals,
            selection,
        }
    }

    /// Number of days the plan covers
    #[must_use]
    pub fn day_count(&self) -> usize {
        self.selection.len()
    }

    /// All distinct recipe hrefs referenced by the selection, in first-seen
    /// order
    #[must_use]
    pub fn selection_hrefs(&self) -> Vec<String> {
        let mut seen = Vec::new();
        for day in &self.selection {
            for assignment in day.sections.values() {
                let href = assignment.href();
                if !seen.iter().any(|s: &String| s == href) {
                    seen.push(href.to_owned());
                }
            }
        }
        seen
    }
}
