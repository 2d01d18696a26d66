// tests/catalog_test.rs — Integration test: persona catalog, replies, reports

use std::collections::BTreeSet;
use std::io::Write;

use pretty_assertions::assert_eq;
use rand::rngs::StdRng;
use rand::SeedableRng;

use hcpcoach::assessment::{generate_assessment, Competency};
use hcpcoach::dialogue::{select_response, CANDIDATE_REPLIES};
use hcpcoach::infra::config::CatalogConfig;
use hcpcoach::infra::errors::CoachError;
use hcpcoach::persona::{Difficulty, PersonaCatalog};
use hcpcoach::session::ChatMessage;

#[test]
fn test_every_listed_persona_resolves() {
    let catalog = PersonaCatalog::builtin();
    assert_eq!(catalog.len(), 3);
    for p in catalog.list() {
        let found = catalog.get(p.id()).unwrap();
        assert!(!found.specialty.is_empty());
        assert!(Difficulty::ALL.contains(&found.difficulty));
    }
}

#[test]
fn test_list_keeps_declaration_order() {
    let catalog = PersonaCatalog::builtin();
    let names: Vec<&str> = catalog
        .list()
        .iter()
        .map(|p| p.name.as_str())
        .collect();
    assert_eq!(
        names,
        vec!["Dr. Sarah Chen", "Dr. Michael Roberts", "Dr. Emily Watson"]
    );
}

#[test]
fn test_unknown_id_is_not_found() {
    let err = PersonaCatalog::builtin().get("nonexistent").unwrap_err();
    assert_eq!(err.kind(), "not_found");
    assert_eq!(err.to_string(), "Persona 'nonexistent' not found");
}

#[test]
fn test_personas_file_extends_builtin() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
[[persona]]
name = "Dr. Priya Patel"
specialty = "Endocrinologist"
experience_years = 5
personality = "Curious, asks about outcomes"
context = "Community clinic"
difficulty = "Easy"
"#
    )
    .unwrap();

    let config = CatalogConfig {
        personas_file: Some(file.path().display().to_string()),
    };
    let catalog = PersonaCatalog::from_config(&config).unwrap();
    assert_eq!(catalog.len(), 4);
    assert_eq!(catalog.list()[3].name, "Dr. Priya Patel");
    assert_eq!(catalog.filter(Some(Difficulty::Easy)).len(), 1);
    assert_eq!(catalog.get("Dr. Priya Patel").unwrap().avatar, "doctor");
}

#[test]
fn test_bad_personas_file_is_config_error() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[[persona]]\nname = \"Dr. Incomplete\"").unwrap();
    let config = CatalogConfig {
        personas_file: Some(file.path().display().to_string()),
    };
    assert!(matches!(
        PersonaCatalog::from_config(&config),
        Err(CoachError::Config(_))
    ));
}

#[test]
fn test_select_response_stays_in_candidate_set() {
    let mut rng = StdRng::seed_from_u64(1234);
    let catalog = PersonaCatalog::builtin();
    for p in catalog.list() {
        for utterance in ["", "hello", "what about cost?", "\u{1F600}"] {
            for _ in 0..20 {
                let reply = select_response(&mut rng, p.id(), utterance);
                assert!(CANDIDATE_REPLIES.contains(&reply));
            }
        }
    }
}

#[test]
fn test_assessment_is_total_and_bounded() {
    let catalog = PersonaCatalog::builtin();
    let persona = &catalog.list()[0];
    let long: Vec<ChatMessage> = (0..50)
        .map(|i| {
            if i % 2 == 0 {
                ChatMessage::counterpart(format!("turn {i}"))
            } else {
                ChatMessage::user(format!("turn {i}"))
            }
        })
        .collect();
    let all: BTreeSet<Competency> = Competency::ALL.into_iter().collect();

    for transcript in [&long[..0], &long[..1], &long[..]] {
        let a = generate_assessment(transcript, persona);
        assert!(a.overall_score <= 100);
        assert!(a.scores.values().all(|&s| s <= 100));
        assert!(a.weak_areas.is_subset(&all));
        assert!(a.strong_areas.is_subset(&all));
        assert!(a.weak_areas.is_disjoint(&a.strong_areas));
        assert_eq!(a.overall_score, 87);
        assert_eq!(a.insights.len(), 3);
        assert_eq!(a.modules.len(), 2);
        assert_eq!(a.scenarios.len(), 2);
    }
}
