// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::trigger::On;
use yare::parameterized;

fn no_extension() -> impl FnMut(bool, u64) -> bool {
    |_, _| false
}

fn run(rule: FiringRule, conditions: &[bool]) -> Vec<Firing> {
    let mut state = TriggerState::default();
    let mut extension = no_extension();
    conditions
        .iter()
        .map(|&c| state.advance(&rule, c, &mut extension))
        .collect()
}

fn fired_ticks(rule: FiringRule, conditions: &[bool]) -> Vec<u64> {
    run(rule, conditions)
        .into_iter()
        .zip(1u64..)
        .filter(|(firing, _)| firing.fired())
        .map(|(_, tick)| tick)
        .collect()
}

/// true on ticks 1..=3 and 10..=12 out of 16
fn two_pulses() -> Vec<bool> {
    (1..=16).map(|t| (1..=3).contains(&t) || (10..=12).contains(&t)).collect()
}

#[test]
fn single_streak_fires_on_every_true_tick() {
    assert_eq!(fired_ticks(FiringRule::default(), &two_pulses()), vec![1, 2, 3, 10, 11, 12]);
}

#[test]
fn streak_of_two_fires_every_other_true_tick() {
    let rule = FiringRule {
        required_streak: 2,
        ..FiringRule::default()
    };
    // The streak carries across the gap: 1,2 | 3,10 | 11,12
    assert_eq!(fired_ticks(rule, &two_pulses()), vec![2, 10, 12]);
}

#[test]
fn base_firing_resets_the_streak() {
    let rule = FiringRule {
        required_streak: 3,
        ..FiringRule::default()
    };
    let mut state = TriggerState::default();
    let mut extension = no_extension();
    for _ in 0..2 {
        assert_eq!(state.advance(&rule, true, &mut extension), Firing::Idle);
    }
    assert_eq!(state.advance(&rule, true, &mut extension), Firing::Base);
    assert_eq!(state.true_streak, 0);
    assert_eq!(state.satisfied_streaks, 1);
}

#[test]
fn offset_skips_leading_satisfied_streaks() {
    let rule = FiringRule {
        offset: 2,
        ..FiringRule::default()
    };
    let firings = run(rule, &two_pulses());
    assert_eq!(firings[0], Firing::Skipped);
    assert_eq!(firings[1], Firing::Skipped);
    assert_eq!(fired_ticks(rule, &two_pulses()), vec![3, 10, 11, 12]);
}

#[parameterized(
    first = { 1, vec![1] },
    second = { 2, vec![2] },
    fourth = { 4, vec![10] },
    seventh = { 7, vec![] },
)]
fn occurrence_fires_exactly_once(k: u32, expected: Vec<u64>) {
    let rule = FiringRule {
        occurrence: Some(k),
        ..FiringRule::default()
    };
    assert_eq!(fired_ticks(rule, &two_pulses()), expected);
}

#[test]
fn occurrence_is_counted_after_offset() {
    let rule = FiringRule {
        offset: 1,
        occurrence: Some(2),
        ..FiringRule::default()
    };
    assert_eq!(fired_ticks(rule, &two_pulses()), vec![3]);
}

#[test]
fn extension_only_applies_once_armed() {
    let rule = FiringRule::default();
    let mut state = TriggerState::default();
    let mut always = |_: bool, _: u64| true;

    // Never fired yet: an available extension does nothing
    assert_eq!(state.advance(&rule, false, &mut always), Firing::Idle);
    assert!(!state.extension_armed);

    assert_eq!(state.advance(&rule, true, &mut always), Firing::Base);
    assert!(state.extension_armed);

    assert_eq!(state.advance(&rule, false, &mut always), Firing::Extended);
    assert!(state.extension_armed);
}

#[test]
fn lapsed_extension_disarms_until_next_base_firing() {
    let rule = FiringRule::default();
    let mut state = TriggerState::default();
    let mut window = |_: bool, tick: u64| tick <= 3;

    assert_eq!(state.advance(&rule, true, &mut window), Firing::Base);
    assert_eq!(state.advance(&rule, false, &mut window), Firing::Extended);
    assert_eq!(state.advance(&rule, false, &mut window), Firing::Extended);
    assert_eq!(state.advance(&rule, false, &mut window), Firing::Idle);
    assert!(!state.extension_armed);

    // The window predicate no longer matters once disarmed
    let mut always = |_: bool, _: u64| true;
    assert_eq!(state.advance(&rule, false, &mut always), Firing::Idle);
}

#[test]
fn skipped_streak_disarms_extension() {
    let rule = FiringRule {
        occurrence: Some(1),
        ..FiringRule::default()
    };
    let mut state = TriggerState::default();
    let mut never = |_: bool, _: u64| false;
    assert_eq!(state.advance(&rule, true, &mut never), Firing::Base);
    assert_eq!(state.advance(&rule, true, &mut never), Firing::Skipped);
    assert!(!state.extension_armed);
}

#[test]
fn extension_is_consulted_every_tick() {
    let rule = FiringRule::default();
    let mut state = TriggerState::default();
    let mut seen = Vec::new();
    let mut spy = |satisfied: bool, tick: u64| {
        seen.push((satisfied, tick));
        false
    };
    for c in [false, true, false] {
        state.advance(&rule, c, &mut spy);
    }
    assert_eq!(seen, vec![(false, 1), (true, 2), (false, 3)]);
}

#[test]
fn rule_selects_by_offset_and_occurrence() {
    let rule = FiringRule {
        required_streak: 1,
        offset: 1,
        occurrence: Some(2),
    };
    assert!(!rule.selects(1));
    assert!(!rule.selects(2));
    assert!(rule.selects(3));
    assert!(!rule.selects(4));
}

#[test]
fn destroy_is_idempotent() {
    let scheduler = Scheduler::new();
    let trigger = On::new(&scheduler, || true).being_true().forever().execute(|| {});
    scheduler.step();
    assert!(trigger.is_hooked());

    trigger.destroy();
    let after_first = (trigger.is_destroyed(), trigger.action_count());
    trigger.destroy();
    assert_eq!((trigger.is_destroyed(), trigger.action_count()), after_first);
    assert_eq!(after_first, (true, 0));

    scheduler.step();
    assert!(!trigger.is_hooked());
    assert_eq!(scheduler.active_count(), 0);
}

#[test]
fn destroyed_trigger_ignores_new_actions_and_ticks() {
    let scheduler = Scheduler::new();
    let trigger = On::new(&scheduler, || true).being_true().forever();
    trigger.destroy();
    let trigger = trigger.execute(|| {});
    assert_eq!(trigger.action_count(), 0);

    scheduler.step();
    assert_eq!(trigger.state().total_ticks, 0);
}

#[test]
fn trigger_ticks_begin_after_the_next_commit() {
    let scheduler = Scheduler::new();
    let trigger = On::new(&scheduler, || true).being_true().forever();
    assert!(!trigger.is_hooked());
    assert_eq!(scheduler.active_count(), 0);

    scheduler.step();
    assert!(trigger.is_hooked());
    assert_eq!(trigger.state().total_ticks, 1);
}
