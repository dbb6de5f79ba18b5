//! Property tests: navigation never leaves the step range, forward moves are
//! always earned and backward moves are never refused.

use std::path::Path;
use std::sync::Arc;

use proptest::prelude::*;
use registration::admission::{AdmissionAnswers, AdmissionTestData, QuestionBank, DEFAULT_PASS_MARK};
use registration::flows::{ProviderSections, SectionKey};
use registration::sections::{AccountPatch, BinaryRef, GalleryPatch, PortfolioItem, ProfilePatch};
use registration::{
    InMemoryGateway, NoNavigation, ProviderPatch, ProviderRegistrationController, Role, Session, User,
};

// ---------------------------------------------------------------------------
// Helpers / Strategies
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
enum Op {
    GoTo(u8),
    Fill(u8),
    Clear(u8),
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0u8..=6).prop_map(Op::GoTo),
        (1u8..=4).prop_map(Op::Fill),
        (1u8..=4).prop_map(Op::Clear),
    ]
}

fn graded_test() -> AdmissionTestData {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("metadata/admission_questions.yaml");
    let bank = QuestionBank::load(&path, DEFAULT_PASS_MARK).unwrap();
    let mut answers = AdmissionAnswers::default();
    for question in bank.questions() {
        bank.record(&mut answers, question.id, question.answer).unwrap();
    }
    bank.grade(answers).unwrap()
}

fn fill(step: u8, graded: &AdmissionTestData) -> ProviderPatch {
    match step {
        1 => ProviderPatch::Account(AccountPatch {
            username: Some("sara".into()),
            terms_accepted: Some(true),
            privacy_accepted: Some(true),
            ..AccountPatch::default()
        }),
        2 => ProviderPatch::Profile(ProfilePatch {
            job_title: Some("Translator".into()),
            specialization: Some("Legal".into()),
            introduction: Some("Arabic and French".into()),
            skills: Some(["Translation".to_string()].into()),
            ..ProfilePatch::default()
        }),
        3 => ProviderPatch::Gallery(GalleryPatch {
            portfolio_items: Some(vec![PortfolioItem {
                title: "Court filings".into(),
                description: "Certified translations".into(),
                thumbnail: Some(BinaryRef::new("filing.png", "image/png", 1024)),
                ..PortfolioItem::empty("1")
            }]),
            ..GalleryPatch::default()
        }),
        _ => ProviderPatch::AdmissionTest(graded.clone()),
    }
}

fn clear(step: u8) -> ProviderPatch {
    match step {
        1 => ProviderPatch::Account(AccountPatch {
            terms_accepted: Some(false),
            ..AccountPatch::default()
        }),
        2 => ProviderPatch::Profile(ProfilePatch {
            skills: Some(Default::default()),
            ..ProfilePatch::default()
        }),
        3 => ProviderPatch::Gallery(GalleryPatch {
            portfolio_items: Some(vec![PortfolioItem::empty("1")]),
            ..GalleryPatch::default()
        }),
        _ => ProviderPatch::AdmissionTest(AdmissionTestData::default()),
    }
}

fn controller() -> ProviderRegistrationController {
    let user = User {
        id: "u-1".into(),
        name: "Sara Nasser".into(),
        email: "sara@example.com".into(),
        role: Role::Freelancer,
    };
    let gateway: Arc<InMemoryGateway<ProviderSections>> = Arc::new(InMemoryGateway::new());
    ProviderRegistrationController::start(&Session::signed_in(user), gateway, Box::new(NoNavigation))
        .unwrap()
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn navigation_respects_step_gates(ops in prop::collection::vec(arb_op(), 0..60)) {
        let graded = graded_test();
        let mut controller = controller();

        for op in ops {
            let before = controller.state().current_step();
            match op {
                Op::GoTo(target) => {
                    let earned = controller.validate_step(before);
                    let moved = controller.go_to_step(target);
                    let after = controller.state().current_step();

                    if moved {
                        prop_assert_eq!(after, target);
                        if target > before {
                            prop_assert_eq!(target, before + 1);
                            prop_assert!(earned);
                        }
                    } else {
                        prop_assert_eq!(after, before);
                    }
                    if (1..before).contains(&target) {
                        prop_assert!(moved);
                    }
                }
                Op::Fill(step) => controller.update_section(fill(step, &graded)).unwrap(),
                Op::Clear(step) => controller.update_section(clear(step)).unwrap(),
            }

            prop_assert!((1..=4).contains(&controller.state().current_step()));
        }
    }

    #[test]
    fn every_section_is_always_present(ops in prop::collection::vec(arb_op(), 0..30)) {
        let graded = graded_test();
        let mut controller = controller();

        for op in ops {
            match op {
                Op::GoTo(target) => {
                    controller.go_to_step(target);
                }
                Op::Fill(step) => controller.update_section(fill(step, &graded)).unwrap(),
                Op::Clear(step) => controller.update_section(clear(step)).unwrap(),
            }
        }

        let json = serde_json::to_value(controller.state().sections()).unwrap();
        let object = json.as_object().unwrap();
        prop_assert_eq!(object.len(), 4);
        for key in SectionKey::ALL {
            prop_assert!(object.contains_key(key.as_str()));
        }
    }
}
