// ABOUTME: Client settings record holding persisted meal plan preferences
// ABOUTME: Seeds the "reset to client settings" preference operation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Savora

use serde::{Deserialize, Serialize};

use super::preferences::MealPlanPreferences;

/// A client's settings record as stored by the backend
///
/// Identity, billing, and storage details live with their respective
/// providers; this record carries only what the planning flows need.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientSettings {
    /// Backend-assigned identifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Owning client identifier
    pub client_id: String,
    /// Persisted meal plan preferences, if the client has saved any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meal_plan_preferences: Option<MealPlanPreferences>,
}
