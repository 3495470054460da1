//! Controlled-vocabulary entity extraction.
//!
//! Each vocabulary maps a tag to a list of trigger substrings; a tag is
//! added when the lower-cased query contains any trigger. Tags are sets,
//! not single-choice — several sectors, age groups, or genders may all be
//! present at once.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use yojana_core::types::Sector;

/// Age group inferred from a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgeGroup {
    Children,
    Youth,
    Adult,
    Senior,
}

/// Gender indicated by a query. Inclusive, non-exclusive set: a query
/// mentioning both women and men carries both tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Female,
    Male,
}

/// Entities extracted from one query. `locations` and `scheme_types` are
/// part of the contract but never populated.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QueryEntities {
    pub sectors: BTreeSet<Sector>,
    pub age_groups: BTreeSet<AgeGroup>,
    pub genders: BTreeSet<Gender>,
    pub locations: BTreeSet<String>,
    pub scheme_types: BTreeSet<String>,
}

/// Sector trigger vocabulary. The housing terms ("housing", "house",
/// "awas") are deliberately listed under both social_welfare and
/// urban_development — broad recall over precision for housing queries.
const SECTOR_TRIGGERS: &[(Sector, &[&str])] = &[
    (
        Sector::Agriculture,
        &["agriculture", "farmer", "farming", "crop", "irrigation", "kisan"],
    ),
    (
        Sector::Health,
        &["health", "medical", "hospital", "doctor", "medicine", "treatment"],
    ),
    (
        Sector::Education,
        &["education", "school", "college", "student", "scholarship", "learning"],
    ),
    (
        Sector::Employment,
        &["employment", "job", "work", "skill", "training", "rozgar"],
    ),
    (
        Sector::SocialWelfare,
        &["welfare", "pension", "widow", "disabled", "senior", "social", "housing", "house", "awas"],
    ),
    (
        Sector::UrbanDevelopment,
        &["urban", "city", "housing", "house", "awas", "pmay"],
    ),
    (
        Sector::WomenEmpowerment,
        &["women", "girl", "female", "empowerment", "beti", "mahila"],
    ),
    (
        Sector::YouthDevelopment,
        &["youth", "young", "student", "youth development"],
    ),
];

const AGE_TRIGGERS: &[(AgeGroup, &[&str])] = &[
    (
        AgeGroup::Children,
        &["child", "children", "kid", "kids", "minor", "under 18"],
    ),
    (
        AgeGroup::Youth,
        &["youth", "young", "teenager", "18-30", "18-35"],
    ),
    (AgeGroup::Adult, &["adult", "middle age", "30-60", "35-60"]),
    (
        AgeGroup::Senior,
        &["senior", "elderly", "old", "above 60", "60+", "pension"],
    ),
];

const FEMALE_TRIGGERS: &[&str] = &["women", "woman", "girl", "female", "ladies"];
const MALE_TRIGGERS: &[&str] = &["men", "man", "boy", "male", "gentlemen"];

/// Maps query text onto the controlled vocabularies.
#[derive(Default)]
pub struct EntityExtractor;

impl EntityExtractor {
    pub fn new() -> Self {
        Self
    }

    pub fn extract(&self, query: &str) -> QueryEntities {
        let query = query.to_lowercase();
        let mut entities = QueryEntities::default();

        for (sector, triggers) in SECTOR_TRIGGERS {
            if triggers.iter().any(|t| query.contains(t)) {
                entities.sectors.insert(*sector);
            }
        }

        for (age_group, triggers) in AGE_TRIGGERS {
            if triggers.iter().any(|t| query.contains(t)) {
                entities.age_groups.insert(*age_group);
            }
        }

        if FEMALE_TRIGGERS.iter().any(|t| query.contains(t)) {
            entities.genders.insert(Gender::Female);
        }
        if MALE_TRIGGERS.iter().any(|t| query.contains(t)) {
            entities.genders.insert(Gender::Male);
        }

        entities
    }
}
