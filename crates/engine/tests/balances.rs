use std::{sync::Arc, thread};

use engine::{
    DuplicatePolicy, Engine, EngineError, ExpenseCmd, Money, SettlementCmd, SplitInput,
    SplitOptions, Transfer,
};
use rust_decimal_macros::dec;
use uuid::Uuid;

struct Trip {
    engine: Engine,
    group: Uuid,
    alice: Uuid,
    bob: Uuid,
    charlie: Uuid,
}

fn trip_with(options: SplitOptions) -> Trip {
    let engine = Engine::builder().split_options(options).build();
    let alice = engine.create_user("Alice").unwrap().id;
    let bob = engine.create_user("Bob").unwrap().id;
    let charlie = engine.create_user("Charlie").unwrap().id;
    let group = engine
        .create_group("Trip", &[alice, bob, charlie])
        .unwrap()
        .id;
    Trip {
        engine,
        group,
        alice,
        bob,
        charlie,
    }
}

fn trip() -> Trip {
    trip_with(SplitOptions::default())
}

fn balance_sum(engine: &Engine, group: Uuid) -> i64 {
    engine
        .balances(group)
        .unwrap()
        .values()
        .map(|m| m.cents())
        .sum()
}

#[test]
fn equal_expense_updates_balances() {
    let t = trip();
    let expense = t
        .engine
        .create_expense(
            ExpenseCmd::new(
                t.group,
                "Dinner",
                Money::new(6000),
                t.alice,
                SplitInput::Equal(vec![t.alice, t.bob, t.charlie]),
            )
            .category("food"),
        )
        .unwrap();
    assert!(expense.splits.iter().all(|s| s.amount == Money::new(2000)));
    assert_eq!(expense.category.as_deref(), Some("food"));

    let balances = t.engine.balances(t.group).unwrap();
    assert_eq!(balances[&t.alice], Money::new(4000));
    assert_eq!(balances[&t.bob], Money::new(-2000));
    assert_eq!(balances[&t.charlie], Money::new(-2000));
}

#[test]
fn exact_expense_paid_by_bob() {
    let t = trip();
    let expense = t
        .engine
        .create_expense(ExpenseCmd::new(
            t.group,
            "Tickets",
            Money::new(3000),
            t.bob,
            SplitInput::Exact(vec![
                (t.alice, Money::new(1000)),
                (t.bob, Money::new(1200)),
                (t.charlie, Money::new(800)),
            ]),
        ))
        .unwrap();
    let total: Money = expense.splits.iter().map(|s| s.amount).sum();
    assert_eq!(total, Money::new(3000));

    let balances = t.engine.balances(t.group).unwrap();
    assert_eq!(balances[&t.bob], Money::new(1800));
    assert_eq!(balances[&t.alice], Money::new(-1000));
    assert_eq!(balances[&t.charlie], Money::new(-800));
}

#[test]
fn rejected_percent_split_leaves_no_trace() {
    let t = trip();
    let err = t
        .engine
        .create_expense(ExpenseCmd::new(
            t.group,
            "Hotel",
            Money::new(1000),
            t.alice,
            SplitInput::Percent(vec![(t.alice, dec!(50)), (t.bob, dec!(30))]),
        ))
        .unwrap_err();
    assert!(matches!(err, EngineError::SplitConservation(_)));

    assert!(t.engine.list_expenses(t.group).unwrap().is_empty());
    assert!(
        t.engine
            .balances(t.group)
            .unwrap()
            .values()
            .all(|m| m.is_zero())
    );
}

#[test]
fn percent_expense_conserves_total() {
    let t = trip();
    let expense = t
        .engine
        .create_expense(ExpenseCmd::new(
            t.group,
            "Groceries",
            Money::new(100),
            t.charlie,
            SplitInput::Percent(vec![
                (t.alice, dec!(33)),
                (t.bob, dec!(33)),
                (t.charlie, dec!(34)),
            ]),
        ))
        .unwrap();
    let total: Money = expense.splits.iter().map(|s| s.amount).sum();
    assert_eq!(total, Money::new(100));
    assert_eq!(balance_sum(&t.engine, t.group), 0);
}

#[test]
fn non_member_participant_is_rejected() {
    let t = trip();
    let stranger = t.engine.create_user("Dave").unwrap().id;
    let err = t
        .engine
        .create_expense(ExpenseCmd::new(
            t.group,
            "Taxi",
            Money::new(900),
            t.alice,
            SplitInput::Equal(vec![t.alice, stranger]),
        ))
        .unwrap_err();
    assert!(matches!(err, EngineError::Validation(_)));

    let err = t
        .engine
        .create_expense(ExpenseCmd::new(
            t.group,
            "Taxi",
            Money::new(900),
            stranger,
            SplitInput::Equal(vec![t.alice]),
        ))
        .unwrap_err();
    assert!(matches!(err, EngineError::Validation(_)));
    assert!(t.engine.list_expenses(t.group).unwrap().is_empty());
}

#[test]
fn unknown_group_is_not_found() {
    let t = trip();
    let err = t.engine.balances(Uuid::new_v4()).unwrap_err();
    assert!(matches!(err, EngineError::KeyNotFound(_)));
}

#[test]
fn duplicate_user_names_conflict() {
    let t = trip();
    let err = t.engine.create_user("alice").unwrap_err();
    assert!(matches!(err, EngineError::ExistingKey(_)));
}

#[test]
fn duplicate_participants_follow_policy() {
    let strict = trip();
    let err = strict
        .engine
        .create_expense(ExpenseCmd::new(
            strict.group,
            "Snacks",
            Money::new(300),
            strict.alice,
            SplitInput::Equal(vec![strict.bob, strict.bob, strict.charlie]),
        ))
        .unwrap_err();
    assert!(matches!(err, EngineError::Validation(_)));

    let merging = trip_with(SplitOptions::default().duplicates(DuplicatePolicy::Merge));
    merging
        .engine
        .create_expense(ExpenseCmd::new(
            merging.group,
            "Snacks",
            Money::new(300),
            merging.alice,
            SplitInput::Equal(vec![merging.bob, merging.bob, merging.charlie]),
        ))
        .unwrap();
    let balances = merging.engine.balances(merging.group).unwrap();
    assert_eq!(balances[&merging.bob], Money::new(-150));
    assert_eq!(balances[&merging.charlie], Money::new(-150));
}

#[test]
fn settlement_reduces_debt() {
    let t = trip();
    t.engine
        .create_expense(ExpenseCmd::new(
            t.group,
            "Dinner",
            Money::new(6000),
            t.alice,
            SplitInput::Equal(vec![t.alice, t.bob, t.charlie]),
        ))
        .unwrap();
    t.engine
        .settle(SettlementCmd {
            group_id: t.group,
            from: t.bob,
            to: t.alice,
            amount: Money::new(2000),
        })
        .unwrap();

    let balances = t.engine.balances(t.group).unwrap();
    assert_eq!(balances[&t.alice], Money::new(2000));
    assert_eq!(balances[&t.bob], Money::ZERO);
    assert_eq!(balance_sum(&t.engine, t.group), 0);

    let transfers = t.engine.simplified_balances(t.group).unwrap();
    assert_eq!(
        transfers,
        vec![Transfer {
            from: t.charlie,
            to: t.alice,
            amount: Money::new(2000),
        }]
    );
}

#[test]
fn invalid_settlements_are_rejected() {
    let t = trip();
    let cmd = SettlementCmd {
        group_id: t.group,
        from: t.bob,
        to: t.alice,
        amount: Money::ZERO,
    };
    assert!(matches!(
        t.engine.settle(cmd),
        Err(EngineError::InvalidAmount(_))
    ));
    assert!(matches!(
        t.engine.settle(SettlementCmd {
            to: t.bob,
            amount: Money::new(10),
            ..cmd
        }),
        Err(EngineError::Validation(_))
    ));
}

#[test]
fn simplified_scenario_matches_expected_transfers() {
    let t = trip();
    // Alice +3000, Bob -200, Charlie -2800.
    t.engine
        .create_expense(ExpenseCmd::new(
            t.group,
            "Cabin",
            Money::new(3000),
            t.alice,
            SplitInput::Exact(vec![(t.bob, Money::new(200)), (t.charlie, Money::new(2800))]),
        ))
        .unwrap();

    let transfers = t.engine.simplified_balances(t.group).unwrap();
    assert_eq!(
        transfers,
        vec![
            Transfer {
                from: t.charlie,
                to: t.alice,
                amount: Money::new(2800),
            },
            Transfer {
                from: t.bob,
                to: t.alice,
                amount: Money::new(200),
            },
        ]
    );
    assert_eq!(transfers, t.engine.simplified_balances(t.group).unwrap());
}

#[test]
fn reset_clears_everything() {
    let t = trip();
    t.engine
        .create_expense(ExpenseCmd::new(
            t.group,
            "Dinner",
            Money::new(600),
            t.alice,
            SplitInput::Equal(vec![t.alice, t.bob]),
        ))
        .unwrap();

    t.engine.reset();
    assert!(t.engine.list_users().is_empty());
    assert!(t.engine.list_groups().is_empty());
    assert!(matches!(
        t.engine.balances(t.group),
        Err(EngineError::KeyNotFound(_))
    ));
}

#[test]
fn equal_creditors_are_paid_in_order_of_first_activity() {
    let t = trip();
    for payer in [t.alice, t.bob] {
        t.engine
            .create_expense(ExpenseCmd::new(
                t.group,
                "Tickets",
                Money::new(100),
                payer,
                SplitInput::Exact(vec![(t.charlie, Money::new(100))]),
            ))
            .unwrap();
    }

    let transfers = t.engine.simplified_balances(t.group).unwrap();
    assert_eq!(
        transfers,
        vec![
            Transfer {
                from: t.charlie,
                to: t.alice,
                amount: Money::new(100),
            },
            Transfer {
                from: t.charlie,
                to: t.bob,
                amount: Money::new(100),
            },
        ]
    );
}

#[test]
fn settlement_past_the_balance_range_is_rejected() {
    let t = trip();
    t.engine
        .create_expense(ExpenseCmd::new(
            t.group,
            "Everything",
            Money::new(i64::MAX),
            t.alice,
            SplitInput::Exact(vec![(t.charlie, Money::new(i64::MAX))]),
        ))
        .unwrap();

    let err = t
        .engine
        .settle(SettlementCmd {
            group_id: t.group,
            from: t.bob,
            to: t.charlie,
            amount: Money::new(1),
        })
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidAmount(_)));
    assert_eq!(t.engine.balances(t.group).unwrap()[&t.charlie], Money::new(-i64::MAX));

    let transfers = t.engine.simplified_balances(t.group).unwrap();
    assert_eq!(
        transfers,
        vec![Transfer {
            from: t.charlie,
            to: t.alice,
            amount: Money::new(i64::MAX),
        }]
    );
}

#[test]
fn concurrent_writers_keep_ledger_balanced() {
    let t = trip();
    let engine = Arc::new(t.engine);
    let members = [t.alice, t.bob, t.charlie];

    let handles: Vec<_> = (0..8)
        .map(|idx| {
            let engine = Arc::clone(&engine);
            let group = t.group;
            thread::spawn(move || {
                for round in 0..50 {
                    let payer = members[(idx + round) % members.len()];
                    engine
                        .create_expense(ExpenseCmd::new(
                            group,
                            "Round",
                            Money::new(1001),
                            payer,
                            SplitInput::Equal(members.to_vec()),
                        ))
                        .unwrap();
                    assert_eq!(balance_sum(&engine, group), 0);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
    assert_eq!(engine.list_expenses(t.group).unwrap().len(), 400);
    assert_eq!(balance_sum(&engine, t.group), 0);
}
