use crate::models::{CandidateProfile, SavedFilter};

/// Compose the candidate's searchable location string
///
/// City, state/region, country and the free-text location field joined with
/// single spaces, lowercased. Absent parts are skipped.
pub fn composed_location(profile: &CandidateProfile) -> String {
    let parts = [
        profile.city.as_deref(),
        profile.state_region.as_deref(),
        profile.country.as_deref(),
        profile.location.as_deref(),
    ];

    parts
        .iter()
        .filter_map(|part| *part)
        .filter(|part| !part.is_empty())
        .map(|part| part.to_lowercase())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Skill clause: the candidate must have a skill whose name equals the
/// filter's skill text, case-insensitively
///
/// Equality, not substring: a "Java" filter must not match "JavaScript".
fn matches_skill(filter_skill: &str, profile: &CandidateProfile) -> bool {
    let wanted = filter_skill.to_lowercase();
    profile.skills.iter().any(|skill| skill.to_lowercase() == wanted)
}

/// Location clause: case-insensitive substring over the composed location
fn matches_location(filter_location: &str, profile: &CandidateProfile) -> bool {
    composed_location(profile).contains(&filter_location.to_lowercase())
}

/// Project clause: case-insensitive substring over the projects text
fn matches_project(filter_project: &str, profile: &CandidateProfile) -> bool {
    profile
        .projects
        .as_deref()
        .unwrap_or("")
        .to_lowercase()
        .contains(&filter_project.to_lowercase())
}

/// Whether a candidate profile satisfies a recruiter's saved filter
///
/// All present clauses must pass; absent clauses are vacuously true. The
/// persisted radius field does not participate.
pub fn matches_filter(filter: &SavedFilter, profile: &CandidateProfile) -> bool {
    if !filter.skill.is_empty() && !matches_skill(&filter.skill, profile) {
        return false;
    }

    if !filter.location.is_empty() && !matches_location(&filter.location, profile) {
        return false;
    }

    if !filter.project.is_empty() && !matches_project(&filter.project, profile) {
        return false;
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Privacy;

    fn candidate(skills: &[&str], city: &str, state: &str, country: &str, projects: &str) -> CandidateProfile {
        CandidateProfile {
            user_id: 1,
            username: "gburdell".to_string(),
            headline: None,
            skills: skills.iter().map(|s| s.to_string()).collect(),
            city: if city.is_empty() { None } else { Some(city.to_string()) },
            state_region: if state.is_empty() { None } else { Some(state.to_string()) },
            country: if country.is_empty() { None } else { Some(country.to_string()) },
            location: None,
            projects: if projects.is_empty() { None } else { Some(projects.to_string()) },
            privacy: Privacy::Public,
            latitude: None,
            longitude: None,
        }
    }

    fn filter(skill: &str, location: &str, project: &str) -> SavedFilter {
        SavedFilter {
            id: 1,
            recruiter_id: 10,
            skill: skill.to_string(),
            location: location.to_string(),
            project: project.to_string(),
            radius_miles: None,
            notify_on_match: true,
            created_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_skill_clause_matches_exact_name() {
        let profile = candidate(&["Python", "SQL"], "", "", "", "");
        assert!(matches_filter(&filter("Python", "", ""), &profile));
        assert!(matches_filter(&filter("python", "", ""), &profile));
        assert!(!matches_filter(&filter("Go", "", ""), &profile));
    }

    #[test]
    fn test_skill_clause_is_not_substring() {
        let profile = candidate(&["JavaScript"], "", "", "", "");
        assert!(!matches_filter(&filter("Java", "", ""), &profile));
        assert!(matches_filter(&filter("JavaScript", "", ""), &profile));
    }

    #[test]
    fn test_location_clause_over_composed_string() {
        let atlanta = candidate(&[], "Atlanta", "GA", "USA", "");
        let boston = candidate(&[], "Boston", "MA", "USA", "");

        let flt = filter("", "Atlanta", "");
        assert!(matches_filter(&flt, &atlanta));
        assert!(!matches_filter(&flt, &boston));

        // Substring spanning the state field
        assert!(matches_filter(&filter("", "atlanta ga", ""), &atlanta));
    }

    #[test]
    fn test_project_clause_substring() {
        let profile = candidate(&[], "", "", "", "Built a warehouse inventory tracker in Django");
        assert!(matches_filter(&filter("", "", "inventory"), &profile));
        assert!(!matches_filter(&filter("", "", "compiler"), &profile));
    }

    #[test]
    fn test_clauses_combine_with_and() {
        let profile = candidate(&["Python"], "Atlanta", "GA", "USA", "inventory tracker");

        assert!(matches_filter(&filter("Python", "Atlanta", "inventory"), &profile));
        assert!(!matches_filter(&filter("Python", "Boston", "inventory"), &profile));
        assert!(!matches_filter(&filter("Rust", "Atlanta", "inventory"), &profile));
    }

    #[test]
    fn test_absent_clauses_are_vacuously_true() {
        let profile = candidate(&[], "", "", "", "");
        assert!(matches_filter(&filter("", "", ""), &profile));
    }

    #[test]
    fn test_skill_only_filter_ignores_location_and_projects() {
        let profile = candidate(&["Python", "SQL"], "Boston", "MA", "USA", "anything at all");
        assert!(matches_filter(&filter("Python", "", ""), &profile));
    }

    #[test]
    fn test_composed_location_skips_missing_parts() {
        let profile = candidate(&[], "Atlanta", "", "USA", "");
        assert_eq!(composed_location(&profile), "atlanta usa");
    }
}
