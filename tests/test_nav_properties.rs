//! Property tests for the navigation builder.
//!
//! For any sequence of candidate sections, the entry counts must match the
//! headed-sections-with-ids counts, and a subsection with no preceding
//! top-level section must be rejected.

use page_oxide::nav::build_nav;
use page_oxide::{Error, Heading, HeadingLevel, Section};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Candidate {
    Top,
    Sub,
    Anonymous,
}

fn candidate_strategy() -> impl Strategy<Value = Candidate> {
    prop_oneof![
        Just(Candidate::Top),
        Just(Candidate::Sub),
        Just(Candidate::Anonymous),
    ]
}

fn to_section(candidate: &Candidate, idx: usize) -> Section {
    let (id, level) = match candidate {
        Candidate::Top => (Some(format!("sec-{}", idx)), HeadingLevel::H2),
        Candidate::Sub => (Some(format!("sec-{}", idx)), HeadingLevel::H3),
        Candidate::Anonymous => (None, HeadingLevel::H2),
    };
    let mut sec = Section::new(id);
    sec.heading = Some(Heading {
        level,
        text: format!("Section {}", idx),
        removed: false,
    });
    sec
}

proptest! {
    #[test]
    fn nav_counts_match_headed_sections(
        candidates in proptest::collection::vec(candidate_strategy(), 0..32)
    ) {
        let sections: Vec<Section> = candidates
            .iter()
            .enumerate()
            .map(|(idx, c)| to_section(c, idx))
            .collect();

        // Anonymous sections are skipped, so an orphan is a subsection that
        // is the first candidate carrying an id.
        let orphan = matches!(
            candidates.iter().find(|c| !matches!(c, Candidate::Anonymous)),
            Some(Candidate::Sub)
        );

        match build_nav(&sections) {
            Ok(nav) => {
                prop_assert!(!orphan, "orphan subsection must be rejected");

                let tops = candidates.iter().filter(|c| matches!(c, Candidate::Top)).count();
                let subs = candidates.iter().filter(|c| matches!(c, Candidate::Sub)).count();
                prop_assert_eq!(nav.len(), tops);

                let total = nav.len() + nav.iter().map(|e| e.children.len()).sum::<usize>();
                prop_assert_eq!(total, tops + subs);
            },
            Err(Error::OrphanSubsection(_)) => prop_assert!(orphan),
            Err(e) => return Err(TestCaseError::fail(format!("unexpected error: {}", e))),
        }
    }
}
