//! Tests for the Evaluator builder surface

use std::panic::{catch_unwind, AssertUnwindSafe};

use rstest::rstest;

use pfsettings::application::{
    ApplicationError, ApplicationResult, CommandLog, Evaluator, RuleCommit,
};
use pfsettings::domain::{DomainError, Matcher};
use pfsettings::util::testing;

fn evaluator() -> Evaluator<CommandLog> {
    testing::init_test_setup();
    Evaluator::new(CommandLog::new())
}

fn lines(eval: Evaluator<CommandLog>) -> Vec<String> {
    eval.finish().lines()
}

fn colors_scenario(e: &mut Evaluator<CommandLog>) -> ApplicationResult<()> {
    e.domain_group("G", |e| {
        e.rule("Colors", "includes", "Red")?;
        e.domain("D", |e| {
            e.conf_group("B", |e| {
                e.rule("Colors", "includes", "Blue")?;
                e.conf("On", |e| e.set("/p", 3))?;
                e.conf("Off", |e| e.set("/p", 4))
            })?;
            e.conf("Green", |e| {
                e.rule("Colors", "includes", "Green")?;
                e.set("/p", 5)
            })?;
            e.conf("Default", |e| e.set("/p", 6))
        })
    })
}

fn domain_error(result: ApplicationResult<()>) -> DomainError {
    match result {
        Err(ApplicationError::Domain(e)) => e,
        other => panic!("expected domain error, got {:?}", other),
    }
}

#[test]
fn given_colors_scenario_when_evaluating_then_emits_full_command_stream() {
    // Arrange
    let mut eval = evaluator();

    // Act
    colors_scenario(&mut eval).unwrap();

    // Assert
    assert_eq!(
        lines(eval),
        [
            "createDomain G.D",
            "createConfiguration G.D B.On",
            "setRule G.D B.On All{ Colors Includes Red, Colors Includes Blue }",
            "setConfigurationParameter G.D B.On /p 3",
            "createConfiguration G.D B.Off",
            "setRule G.D B.Off All{ Colors Includes Red, Colors Includes Blue }",
            "setConfigurationParameter G.D B.Off /p 4",
            "createConfiguration G.D Green",
            "setRule G.D Green All{ Colors Includes Red, Colors Includes Green }",
            "setConfigurationParameter G.D Green /p 5",
            "createConfiguration G.D Default",
            "setRule G.D Default All{ Colors Includes Red }",
            "setConfigurationParameter G.D Default /p 6",
        ]
    );
}

#[test]
fn given_well_formed_description_when_evaluation_completes_then_context_is_empty() {
    let mut eval = evaluator();

    colors_scenario(&mut eval).unwrap();

    assert!(eval.context().is_empty());
    assert_eq!(eval.context().depth(), 0);
}

#[test]
fn given_rules_on_three_levels_when_setting_then_commits_outermost_first() {
    let mut eval = evaluator();

    eval.domain_group("Group", |e| {
        e.rule("A", "is", "r1")?;
        e.domain("Dom", |e| {
            e.rule("B", "is_not", "r2")?;
            e.conf("Conf", |e| {
                e.rule_with("C", Matcher::Excludes, "r3")?;
                e.set("/x", "on")
            })
        })
    })
    .unwrap();

    let lines = lines(eval);
    assert_eq!(lines[2], "setRule Group.Dom Conf All{ A Is r1, B IsNot r2, C Excludes r3 }");
}

#[test]
fn given_two_sets_in_one_conf_when_evaluating_then_rule_set_is_committed_twice() {
    let mut eval = evaluator();

    eval.domain("D", |e| {
        e.conf("C", |e| {
            e.rule("Mode", "is", "Fast")?;
            e.set("/a", 1)?;
            e.set("/b", 2)
        })
    })
    .unwrap();

    let lines = lines(eval);
    assert_eq!(lines.len(), 6);
    assert_eq!(lines[2], "setRule D C All{ Mode Is Fast }");
    assert_eq!(lines[4], lines[2]);
    assert_eq!(lines[3], "setConfigurationParameter D C /a 1");
    assert_eq!(lines[5], "setConfigurationParameter D C /b 2");
}

#[test]
fn given_once_mode_when_setting_twice_then_rule_set_is_committed_once_per_conf() {
    let mut eval = evaluator().with_rule_commit(RuleCommit::Once);

    eval.domain("D", |e| {
        e.conf("C1", |e| {
            e.set("/a", 1)?;
            e.set("/b", 2)
        })?;
        e.conf("C2", |e| e.set("/a", 3))
    })
    .unwrap();

    assert_eq!(
        lines(eval),
        [
            "createDomain D",
            "createConfiguration D C1",
            "setRule D C1 All{  }",
            "setConfigurationParameter D C1 /a 1",
            "setConfigurationParameter D C1 /b 2",
            "createConfiguration D C2",
            "setRule D C2 All{  }",
            "setConfigurationParameter D C2 /a 3",
        ]
    );
}

#[test]
fn given_once_mode_when_rule_follows_first_set_then_context_misuse() {
    let mut eval = evaluator().with_rule_commit(RuleCommit::Once);

    let result = eval.domain("D", |e| {
        e.conf("C", |e| {
            e.set("/a", 1)?;
            e.rule("Mode", "is", "Fast")
        })
    });

    let err = domain_error(result);
    assert_eq!(
        err.to_string(),
        "'rule' is not allowed after the first set inside conf 'C' of domain 'D'"
    );
    assert!(eval.context().is_empty());
}

#[test]
fn given_every_set_mode_when_rule_follows_set_then_next_commit_includes_it() {
    let mut eval = evaluator();

    eval.domain("D", |e| {
        e.conf("C", |e| {
            e.set("/a", 1)?;
            e.rule("Mode", "is", "Fast")?;
            e.set("/b", 2)
        })
    })
    .unwrap();

    let lines = lines(eval);
    assert_eq!(lines[2], "setRule D C All{  }");
    assert_eq!(lines[4], "setRule D C All{ Mode Is Fast }");
}

#[test]
fn given_unknown_matcher_when_adding_rule_then_fails_without_mutation() {
    let mut eval = evaluator();
    let mut observed = None;

    let result = eval.domain("D", |e| {
        e.rule("Colors", "includes", "Red")?;
        let failed = e.rule("Colors", "contains", "Blue");
        observed = Some((failed, e.context().rules_at(0).map(<[_]>::to_vec)));
        Ok(())
    });

    result.unwrap();
    let (failed, rules) = observed.unwrap();
    let err = domain_error(failed);
    assert!(matches!(err, DomainError::UnknownMatcher { .. }));
    assert!(err.to_string().contains("contains"));
    assert!(err.to_string().contains(r#""is", "is_not", "includes", "excludes""#));
    assert_eq!(rules.unwrap().len(), 1);
}

#[test]
fn given_unknown_matcher_when_evaluating_then_aborts_pass_at_first_failure() {
    let mut eval = evaluator();

    let result = eval.domain("D", |e| {
        e.conf("C", |e| {
            e.rule("Colors", "matches", "Red")?;
            e.set("/never", 1)
        })
    });

    assert!(matches!(
        domain_error(result),
        DomainError::UnknownMatcher { .. }
    ));
    assert!(eval.context().is_empty());
    assert_eq!(lines(eval), ["createDomain D", "createConfiguration D C"]);
}

#[test]
fn given_failing_nested_body_when_sibling_evaluated_then_context_was_restored() {
    let mut eval = evaluator();

    eval.domain_group("G", |e| {
        e.rule("Colors", "includes", "Red")?;
        let failed = e.domain("Broken", |e| {
            e.rule("Colors", "includes", "Stale")?;
            e.conf("C", |e| e.component("Mixer"))
        });
        assert!(failed.is_err());
        e.domain("Healthy", |e| e.conf("C", |e| e.set("/p", 1)))
    })
    .unwrap();

    let lines = lines(eval);
    assert_eq!(lines[lines.len() - 3], "createConfiguration G.Healthy C");
    assert_eq!(lines[lines.len() - 2], "setRule G.Healthy C All{ Colors Includes Red }");
}

#[test]
fn given_panicking_body_when_unwinding_then_context_is_restored() {
    let mut eval = evaluator();

    let outcome = catch_unwind(AssertUnwindSafe(|| {
        eval.domain("D", |e| e.conf("C", |_| panic!("body failed")))
    }));

    assert!(outcome.is_err());
    assert!(eval.context().is_empty());
}

#[rstest]
#[case::component("component")]
#[case::conf_type("confType")]
fn given_unfinished_feature_when_invoked_then_not_supported(#[case] feature: &str) {
    let mut eval = evaluator();

    let result = eval.domain("D", |e| match feature {
        "component" => e.component("Mixer"),
        _ => e.conf_type("On"),
    });

    let err = domain_error(result);
    assert_eq!(
        err,
        DomainError::NotSupported {
            feature: feature.to_string()
        }
    );
}

#[test]
fn given_set_directly_in_domain_when_evaluating_then_context_misuse() {
    let mut eval = evaluator();

    let result = eval.domain("D", |e| e.set("/p", 1));

    let err = domain_error(result);
    assert!(matches!(err, DomainError::ContextMisuse { .. }));
    assert_eq!(err.to_string(), "'set' is not allowed inside domain 'D'");
    assert_eq!(lines(eval), ["createDomain D"]);
}

#[test]
fn given_set_at_root_when_evaluating_then_context_misuse() {
    let mut eval = evaluator();

    let err = domain_error(eval.set("/p", 1));

    assert_eq!(err.to_string(), "'set' is not allowed at the root");
    assert!(eval.finish().is_empty());
}

#[rstest]
#[case::conf_at_root(|e: &mut Evaluator<CommandLog>| e.conf("C", |_| Ok(())))]
#[case::conf_group_at_root(|e: &mut Evaluator<CommandLog>| e.conf_group("B", |_| Ok(())))]
#[case::domain_in_domain(|e: &mut Evaluator<CommandLog>| e.domain("D", |e| e.domain("E", |_| Ok(()))))]
#[case::conf_in_conf(|e: &mut Evaluator<CommandLog>| e.domain("D", |e| e.conf("C", |e| e.conf("X", |_| Ok(())))))]
#[case::group_in_conf_group(|e: &mut Evaluator<CommandLog>| e.domain("D", |e| e.conf_group("B", |e| e.domain_group("G", |_| Ok(())))))]
#[case::rule_at_root(|e: &mut Evaluator<CommandLog>| e.rule("Colors", "is", "Red"))]
fn given_block_outside_its_context_when_evaluating_then_context_misuse(
    #[case] declare: fn(&mut Evaluator<CommandLog>) -> ApplicationResult<()>,
) {
    let mut eval = evaluator();

    let err = domain_error(declare(&mut eval));

    assert!(matches!(err, DomainError::ContextMisuse { .. }));
    assert!(eval.context().is_empty());
}

#[rstest]
#[case("")]
#[case("Two.Parts")]
#[case("With Space")]
fn given_malformed_name_when_opening_block_then_invalid_name(#[case] name: &str) {
    let mut eval = evaluator();

    let err = domain_error(eval.domain(name, |_| Ok(())));

    assert!(matches!(err, DomainError::InvalidName { .. }));
    assert!(eval.finish().is_empty());
}

#[test]
fn given_two_evaluators_when_interleaved_then_contexts_are_independent() {
    let mut first = evaluator();
    let mut second = evaluator();

    first
        .domain("A", |a| {
            second.domain("B", |b| {
                assert_eq!(a.context().domain_path().to_string(), "A");
                assert_eq!(b.context().domain_path().to_string(), "B");
                Ok(())
            })
        })
        .unwrap();

    assert_eq!(lines(first), ["createDomain A"]);
    assert_eq!(lines(second), ["createDomain B"]);
}
