//! Keyword categorizer
//!
//! Groups are tested in table order and the first hit wins, so an
//! organization mentioning both schools and hospitals is Education.

use dit_common::models::Category;

/// Keyword groups in priority order
pub const CATEGORY_KEYWORDS: &[(Category, &[&str])] = &[
    (Category::Education, &["SCHOOL", "EDUCATION", "UNIVERSITY", "COLLEGE"]),
    (Category::Healthcare, &["HEALTH", "MEDICAL", "HOSPITAL", "CLINIC"]),
    (Category::SocialServices, &["COMMUNITY", "HOUSING", "FOOD", "SHELTER"]),
    (Category::ArtsCulture, &["ART", "MUSIC", "THEATER", "MUSEUM"]),
    (Category::Environment, &["ENVIRONMENT", "CONSERVATION", "WILDLIFE"]),
    (Category::Religion, &["CHURCH", "RELIGIOUS", "FAITH", "MINISTRY"]),
    (Category::InternationalAid, &["INTERNATIONAL", "GLOBAL", "WORLD"]),
    (Category::HumanRights, &["CIVIL RIGHTS", "HUMAN RIGHTS", "JUSTICE"]),
    (Category::Research, &["RESEARCH", "SCIENCE", "TECHNOLOGY"]),
];

/// Category for an organization name and optional mission text
pub fn categorize(name: &str, mission: Option<&str>) -> Category {
    let text = format!("{} {}", name, mission.unwrap_or("")).to_uppercase();

    CATEGORY_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| text.contains(k)))
        .map(|(category, _)| *category)
        .unwrap_or(Category::GeneralSupport)
}
