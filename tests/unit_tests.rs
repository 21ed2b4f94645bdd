// Unit tests for BuzzedIn Match

use std::collections::HashSet;

use buzzedin_match::core::{
    distance::{estimate_drive_minutes, great_circle_distance},
    engine::{evaluate_filters, fresh_outcomes, MatchOutcome, NotificationKey},
    filters::{composed_location, matches_filter},
    radius::{prefilter, rank, RadiusMatch, PREFILTER_FACTOR},
};
use buzzedin_match::models::{
    CandidateProfile, DistanceResult, DistanceStatus, GeoPoint, JobPosting, PayType, Privacy,
    SavedFilter,
};

fn create_candidate(
    user_id: i64,
    username: &str,
    skills: &[&str],
    city: &str,
    state_region: &str,
    country: &str,
    projects: &str,
) -> CandidateProfile {
    CandidateProfile {
        user_id,
        username: username.to_string(),
        headline: None,
        skills: skills.iter().map(|s| s.to_string()).collect(),
        city: Some(city.to_string()).filter(|s| !s.is_empty()),
        state_region: Some(state_region.to_string()).filter(|s| !s.is_empty()),
        country: Some(country.to_string()).filter(|s| !s.is_empty()),
        location: None,
        projects: Some(projects.to_string()).filter(|s| !s.is_empty()),
        privacy: Privacy::Public,
        latitude: None,
        longitude: None,
    }
}

fn create_filter(id: i64, recruiter_id: i64, skill: &str, location: &str, project: &str) -> SavedFilter {
    SavedFilter {
        id,
        recruiter_id,
        skill: skill.to_string(),
        location: location.to_string(),
        project: project.to_string(),
        radius_miles: None,
        notify_on_match: true,
        created_at: chrono::Utc::now(),
    }
}

fn create_job(id: i64, latitude: f64, longitude: f64) -> JobPosting {
    JobPosting {
        id,
        name: format!("Job {}", id),
        company: "Acme".to_string(),
        location: "Atlanta, GA".to_string(),
        latitude: Some(latitude),
        longitude: Some(longitude),
        pay_min: 80000.0,
        pay_max: 120000.0,
        pay_type: PayType::Annual,
    }
}

#[test]
fn test_great_circle_coincident_points() {
    let atlanta = GeoPoint::new(33.7490, -84.3880);
    assert_eq!(great_circle_distance(atlanta, atlanta), 0.0);
}

#[test]
fn test_great_circle_symmetry() {
    let atlanta = GeoPoint::new(33.7490, -84.3880);
    let midtown = GeoPoint::new(33.7756, -84.3963);
    assert_eq!(
        great_circle_distance(atlanta, midtown),
        great_circle_distance(midtown, atlanta)
    );
}

#[test]
fn test_great_circle_collinear_additivity() {
    // B lies between A and C on the equator's great circle
    let a = GeoPoint::new(0.0, -10.0);
    let b = GeoPoint::new(0.0, 5.0);
    let c = GeoPoint::new(0.0, 25.0);

    let direct = great_circle_distance(a, c);
    let via_b = great_circle_distance(a, b) + great_circle_distance(b, c);
    assert!((direct - via_b).abs() < 1e-6, "expected {} == {}", direct, via_b);
}

#[test]
fn test_great_circle_atlanta_to_midtown() {
    // Roughly two miles between downtown and midtown Atlanta
    let atlanta = GeoPoint::new(33.7490, -84.3880);
    let midtown = GeoPoint::new(33.7756, -84.3963);

    let distance = great_circle_distance(atlanta, midtown);
    assert!(distance > 1.5 && distance < 2.5, "expected ~2 miles, got {}", distance);
}

#[test]
fn test_fallback_speed_estimate() {
    // 30 mph assumed speed: 10 miles takes 20 minutes
    assert_eq!(estimate_drive_minutes(10.0), 20.0);
}

#[test]
fn test_prefilter_never_keeps_beyond_buffer() {
    let origin = GeoPoint::new(33.7490, -84.3880);
    let radius_miles = 5.0;

    let jobs: Vec<JobPosting> = (0..30)
        .map(|i| create_job(i, 33.7490 + i as f64 * 0.02, -84.3880))
        .collect();

    let kept = prefilter(jobs, origin, radius_miles);
    for job in &kept {
        let distance = great_circle_distance(origin, job.coordinates().unwrap());
        assert!(
            distance <= radius_miles * PREFILTER_FACTOR,
            "job {} at {} miles exceeds the phase-1 bound",
            job.id,
            distance
        );
    }
}

#[test]
fn test_prefilter_drops_records_without_coordinates() {
    let origin = GeoPoint::new(33.7490, -84.3880);
    let mut job = create_job(1, 33.7490, -84.3880);
    job.latitude = None;

    let kept = prefilter(vec![job], origin, 5.0);
    assert!(kept.is_empty());
}

#[test]
fn test_rank_orders_nearest_first() {
    let make = |id: i64, miles: f64, minutes: Option<f64>| RadiusMatch {
        record: create_job(id, 0.0, 0.0),
        distance: DistanceResult {
            distance_miles: miles,
            duration_minutes: minutes,
            duration_in_traffic_minutes: None,
            status: DistanceStatus::Ok,
            error: None,
        },
    };

    let mut matches = vec![
        make(1, 4.0, Some(12.0)),
        make(2, 1.5, Some(6.0)),
        make(3, 4.0, None),
        make(4, 4.0, Some(9.0)),
    ];
    rank(&mut matches);

    let ids: Vec<i64> = matches.iter().map(|m| m.record.id).collect();
    assert_eq!(ids, vec![2, 4, 1, 3], "missing drive time sorts last within a distance tie");
}

#[test]
fn test_skill_filter_ignores_other_fields() {
    // Skill-only filter matches a Python candidate regardless of location
    // or projects
    let filter = create_filter(1, 10, "Python", "", "");
    let candidate = create_candidate(42, "gburdell", &["Python", "SQL"], "Boston", "MA", "USA", "whatever");

    assert!(matches_filter(&filter, &candidate));
}

#[test]
fn test_skill_filter_requires_exact_name() {
    let filter = create_filter(1, 10, "Java", "", "");
    let candidate = create_candidate(42, "gburdell", &["JavaScript"], "", "", "", "");

    assert!(!matches_filter(&filter, &candidate));
}

#[test]
fn test_location_filter_on_composed_string() {
    let filter = create_filter(1, 10, "", "Atlanta", "");

    let atlanta = create_candidate(1, "a", &[], "Atlanta", "GA", "USA", "");
    let boston = create_candidate(2, "b", &[], "Boston", "MA", "USA", "");

    assert_eq!(composed_location(&atlanta), "atlanta ga usa");
    assert!(matches_filter(&filter, &atlanta));
    assert!(!matches_filter(&filter, &boston));
}

#[test]
fn test_project_filter_substring() {
    let filter = create_filter(1, 10, "", "", "tracker");
    let candidate = create_candidate(1, "a", &[], "", "", "", "Inventory Tracker for warehouses");

    assert!(matches_filter(&filter, &candidate));
}

#[test]
fn test_notification_trigger_is_idempotent() {
    let filters = vec![create_filter(1, 10, "Python", "", "")];
    let candidate = create_candidate(42, "gburdell", &["Python"], "Atlanta", "GA", "USA", "");

    let mut existing: HashSet<NotificationKey> = HashSet::new();

    let first = fresh_outcomes(&filters, &candidate, &existing);
    assert_eq!(first.len(), 1);
    assert_eq!(first[0].message, "New candidate matches your filter: gburdell");
    existing.extend(first.iter().map(MatchOutcome::key));

    // Triggering again with no intervening state change yields nothing
    let second = fresh_outcomes(&filters, &candidate, &existing);
    assert!(second.is_empty());
}

#[test]
fn test_evaluate_filters_skips_non_matching() {
    let filters = vec![
        create_filter(1, 10, "Python", "", ""),
        create_filter(2, 10, "Rust", "", ""),
        create_filter(3, 11, "", "Atlanta", ""),
    ];
    let candidate = create_candidate(42, "gburdell", &["Python"], "Atlanta", "GA", "USA", "");

    let outcomes = evaluate_filters(&filters, &candidate);
    let filter_ids: Vec<i64> = outcomes.iter().map(|o| o.filter_id).collect();
    assert_eq!(filter_ids, vec![1, 3]);
}

#[test]
fn test_empty_filter_cannot_be_saved() {
    use buzzedin_match::models::SaveFilterRequest;

    let req = SaveFilterRequest {
        recruiter_id: 10,
        skill: String::new(),
        location: String::new(),
        project: String::new(),
        radius_miles: None,
        notify_on_match: true,
    };
    assert!(req.is_empty());

    let with_location = SaveFilterRequest {
        location: "Atlanta".to_string(),
        ..req
    };
    assert!(!with_location.is_empty());
}
