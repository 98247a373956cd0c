//! Long mutation sequences must never break the part list invariants

use lander_editor::{Mutation, PartHandle, Session};
use lander_parts::{registry, schema_for, Part, PartType};
use std::collections::HashSet;

/// Small deterministic generator so failures replay exactly
struct Lcg(u64);

impl Lcg {
    fn next(&mut self, bound: usize) -> usize {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        ((self.0 >> 33) as usize) % bound
    }
}

fn random_mutation(rng: &mut Lcg, session: &Session) -> Mutation {
    let len = session.parts().len();
    let part = PartHandle::Index(rng.next(len));
    let type_names: Vec<&str> = registry().map(|s| s.part_type.as_str()).collect();

    match rng.next(8) {
        0 | 1 => Mutation::AddPart {
            part_type: type_names[rng.next(type_names.len())].to_string(),
        },
        2 => Mutation::RemovePart { part },
        3 => Mutation::MoveUp { part },
        4 => Mutation::MoveDown { part },
        5 => Mutation::ToggleFooterVisibility,
        6 => Mutation::AddPlan { part },
        _ => Mutation::RemovePlan {
            part,
            index: rng.next(4),
        },
    }
}

fn assert_invariants(parts: &[Part]) {
    let footers = parts.iter().filter(|p| p.is_footer()).count();
    assert_eq!(footers, 1, "exactly one footer");
    assert!(parts.last().map_or(false, Part::is_footer), "footer is last");

    let ids: HashSet<_> = parts.iter().filter_map(|p| p.id.clone()).collect();
    assert_eq!(ids.len(), parts.len(), "ids are unique");

    for part in parts.iter().filter(|p| p.part_type == PartType::Pricing) {
        let (min, max) = schema_for(PartType::Pricing).list_bounds("plans").unwrap();
        let plans = part.fields.items("plans").len();
        assert!(plans >= min && plans <= max, "plans within bounds: {}", plans);
    }
}

#[test]
fn test_random_sequences_keep_invariants() {
    for seed in 0..50u64 {
        let mut rng = Lcg(seed);
        let mut session = Session::new(format!("seq-{}", seed));

        for _ in 0..200 {
            let mutation = random_mutation(&mut rng, &session);
            let before = session.parts().to_vec();

            if session.apply(mutation.clone()).is_err() {
                assert_eq!(session.parts(), &before[..], "rejected {:?} changed state", mutation);
            }
            assert_invariants(session.parts());
        }
    }
    println!("✓ 50 sequences x 200 mutations kept the footer last and unique");
}

#[test]
fn test_added_parts_match_templates() {
    let mut session = Session::new("templates");

    for schema in registry().filter(|s| s.part_type != PartType::Footer) {
        session
            .apply(Mutation::AddPart {
                part_type: schema.part_type.as_str().to_string(),
            })
            .unwrap();
    }

    let parts = session.parts();
    assert_eq!(parts.len(), registry().count());
    for part in &parts[..parts.len() - 1] {
        assert_eq!(part.fields, lander_parts::template_for(part.part_type));
        assert!(part.visible);
    }
    assert_invariants(parts);
}
