// ABOUTME: Recursive preference filter tree sent to the external meal-plan solver
// ABOUTME: MealFilter combinators, WhenClause, and the LabelCategory taxonomy
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Savora

use serde::{Deserialize, Serialize};

/// Predicate-list categories carried by filter tree leaves
///
/// Four categories (`health`, `diet`, `caution`, `cuisine`) hold labels that
/// the external solver expects in token form (uppercase, underscored); the
/// remaining five are free-text and pass through normalization untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LabelCategory {
    /// Health labels (e.g. "gluten-free", "peanut-free")
    Health,
    /// Diet labels (e.g. "balanced", "high-protein")
    Diet,
    /// Caution labels (allergen warnings)
    Caution,
    /// Cuisine type labels (e.g. "mediterranean")
    Cuisine,
    /// Meal type labels (e.g. "breakfast")
    Meal,
    /// Dish type labels (e.g. "main course")
    Dish,
    /// Restrictive dish type labels
    OnlyDish,
    /// Recipe source labels
    Source,
    /// Recipe source name labels
    SourceName,
}

impl LabelCategory {
    /// Whether labels in this category are rewritten to the solver's token
    /// convention (uppercase, hyphens to underscores)
    #[must_use]
    pub const fn is_tokenized(self) -> bool {
        matches!(
            self,
            Self::Health | Self::Diet | Self::Caution | Self::Cuisine
        )
    }

    /// The category's key on the wire
    #[must_use]
    pub const fn wire_key(self) -> &'static str {
        match self {
            Self::Health => "health",
            Self::Diet => "diet",
            Self::Caution => "caution",
            Self::Cuisine => "cuisine",
            Self::Meal => "meal",
            Self::Dish => "dish",
            Self::OnlyDish => "only-dish",
            Self::Source => "source",
            Self::SourceName => "source-name",
        }
    }
}

/// Conditional requirement inside a filter tree
///
/// When a candidate recipe satisfies `condition`, it must also satisfy
/// `require`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WhenClause {
    /// Predicate selecting the recipes the requirement applies to
    pub condition: Box<MealFilter>,
    /// Predicate those recipes must additionally satisfy
    pub require: Box<MealFilter>,
}

/// One node of the recursive boolean filter tree
///
/// A node may carry boolean combinators (`all`, `any`, `not`, `when`) and
/// leaf predicate lists simultaneously; the external solver accepts the
/// composite shape and consumers must not collapse it into a pure sum type.
/// Absent fields mean "no constraint" — they are never serialized as empty
/// lists, which would assert a constraint that rejects everything.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct MealFilter {
    /// Conjunction of child nodes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub all: Option<Vec<MealFilter>>,
    /// Disjunction of child nodes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub any: Option<Vec<MealFilter>>,
    /// Negation of one child node
    #[serde(skip_serializing_if = "Option::is_none")]
    pub not: Option<Box<MealFilter>>,
    /// Conditional requirement
    #[serde(skip_serializing_if = "Option::is_none")]
    pub when: Option<WhenClause>,
    /// Health labels
    #[serde(skip_serializing_if = "Option::is_none")]
    pub health: Option<Vec<String>>,
    /// Diet labels
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diet: Option<Vec<String>>,
    /// Caution labels
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caution: Option<Vec<String>>,
    /// Cuisine type labels
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cuisine: Option<Vec<String>>,
    /// Meal type labels
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meal: Option<Vec<String>>,
    /// Dish type labels
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dish: Option<Vec<String>>,
    /// Restrictive dish type labels
    #[serde(skip_serializing_if = "Option::is_none")]
    pub only_dish: Option<Vec<String>>,
    /// Recipe source labels
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<Vec<String>>,
    /// Recipe source name labels
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_name: Option<Vec<String>>,
}

impl MealFilter {
    /// Conjunction node over the given children
    #[must_use]
    pub fn all_of(children: Vec<Self>) -> Self {
        Self {
            all: Some(children),
            ..Self::default()
        }
    }

    /// Disjunction node over the given children
    #[must_use]
    pub fn any_of(children: Vec<Self>) -> Self {
        Self {
            any: Some(children),
            ..Self::default()
        }
    }

    /// Negation node over one child
    #[must_use]
    pub fn negation(child: Self) -> Self {
        Self {
            not: Some(Box::new(child)),
            ..Self::default()
        }
    }

    /// Conditional-requirement node
    #[must_use]
    pub fn conditional(condition: Self, require: Self) -> Self {
        Self {
            when: Some(WhenClause {
                condition: Box::new(condition),
                require: Box::new(require),
            }),
            ..Self::default()
        }
    }

    /// Leaf node carrying labels in one category
    #[must_use]
    pub fn labels<I, S>(category: LabelCategory, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::default().with_labels(category, labels)
    }

    /// Add (or replace) the label list for one category on this node
    ///
    /// Combinators and leaves may coexist on the same node.
    #[must_use]
    pub fn with_labels<I, S>(mut self, category: LabelCategory, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values: Vec<String> = labels.into_iter().map(Into::into).collect();
        let slot = match category {
            LabelCategory::Health => &mut self.health,
            LabelCategory::Diet => &mut self.diet,
            LabelCategory::Caution => &mut self.caution,
            LabelCategory::Cuisine => &mut self.cuisine,
            LabelCategory::Meal => &mut self.meal,
            LabelCategory::Dish => &mut self.dish,
            LabelCategory::OnlyDish => &mut self.only_dish,
            LabelCategory::Source => &mut self.source,
            LabelCategory::SourceName => &mut self.source_name,
        };
        *slot = Some(values);
        self
    }

    /// Borrow the label list for one category, if present
    #[must_use]
    pub fn category_labels(&self, category: LabelCategory) -> Option<&[String]> {
        let slot = match category {
            LabelCategory::Health => &self.health,
            LabelCategory::Diet => &self.diet,
            LabelCategory::Caution => &self.caution,
            LabelCategory::Cuisine => &self.cuisine,
            LabelCategory::Meal => &self.meal,
            LabelCategory::Dish => &self.dish,
            LabelCategory::OnlyDish => &self.only_dish,
            LabelCategory::Source => &self.source,
            LabelCategory::SourceName => &self.source_name,
        };
        slot.as_deref()
    }

    /// Whether this node carries no combinators and no leaves
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.all.is_none()
            && self.any.is_none()
            && self.not.is_none()
            && self.when.is_none()
            && self.health.is_none()
            && self.diet.is_none()
            && self.caution.is_none()
            && self.cuisine.is_none()
            && self.meal.is_none()
            && self.dish.is_none()
            && self.only_dish.is_none()
            && self.source.is_none()
            && self.source_name.is_none()
    }
}
