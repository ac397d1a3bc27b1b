use fxgym::rl::{symmetric_return, Account, Broker, BrokerConfig};
use fxgym::FxError;

fn broker(starting_balance: f64, transaction_fee: f64) -> Broker {
    Broker::new(&BrokerConfig {
        starting_balance,
        transaction_fee,
    })
    .expect("valid broker config")
}

/// Buying at 1.2 with a 1% fee charges the fee before converting.
#[test]
fn buy_scenario_with_fee() {
    let mut broker = broker(2000.0, 0.01);

    let reward = broker.buy(1.2).unwrap();

    let fee_charged = 2000.0 * (1.0 - 0.01);
    let quote = fee_charged * 1.2;
    let balance = quote / 1.2;
    let expected_reward = 2.0 * (balance - 2000.0) / (balance + 2000.0);

    assert_eq!(broker.order_number(), 1);
    assert_eq!(broker.account().currency1(), 0.0);
    assert!((broker.account().currency2() - 2376.0).abs() < 1e-9);

    let mut account = *broker.account();
    assert!((account.calculate_balance(1.2) - 1980.0).abs() < 1e-9);
    assert!((reward - expected_reward).abs() < 1e-12);
    assert!((reward - (-0.010050251256281407)).abs() < 1e-12);
}

/// With no fee a round trip at a constant rate returns to the start exactly.
#[test]
fn zero_fee_round_trip_is_lossless() {
    let mut broker = broker(2000.0, 0.0);

    broker.buy(1.0).unwrap();
    broker.sell(1.0).unwrap();

    assert_eq!(broker.order_number(), 2);
    let mut account = *broker.account();
    assert_eq!(account.calculate_balance(1.0), 2000.0);
}

/// Every round trip at a constant rate pays the fee twice.
#[test]
fn fee_erodes_balance_over_round_trips() {
    let mut broker = broker(2000.0, 0.01);
    let mut last = 2000.0;

    for _ in 0..5 {
        broker.buy(1.35).unwrap();
        broker.sell(1.35).unwrap();
        let balance = broker.account().currency1();
        assert!(balance < last, "balance {balance} did not drop below {last}");
        last = balance;
    }

    assert_eq!(broker.order_number(), 10);
}

/// A buy while already in the quote currency only refreshes the reward.
#[test]
fn repeated_buy_does_not_trade() {
    let mut broker = broker(2000.0, 0.01);
    broker.buy(1.2).unwrap();
    let before = *broker.account();

    broker.buy(1.2).unwrap();

    assert_eq!(broker.order_number(), 1);
    assert_eq!(broker.account().currency1(), before.currency1());
    assert_eq!(broker.account().currency2(), before.currency2());
}

/// Rewards stay within [-2, 2] across a volatile rate path.
#[test]
fn rewards_are_bounded() {
    let mut broker = broker(2000.0, 0.01);
    let rates = [1.2, 0.3, 4.0, 0.05, 80.0, 1.0, 1e-3, 1e3];

    for (i, rate) in rates.iter().enumerate() {
        let reward = if i % 3 == 0 {
            broker.sell(*rate).unwrap()
        } else {
            broker.buy(*rate).unwrap()
        };
        assert!((-2.0..=2.0).contains(&reward), "reward {reward} at rate {rate}");
    }
}

/// Unchanged balance yields exactly zero reward.
#[test]
fn unchanged_balance_gives_zero_reward() {
    let mut broker = broker(2000.0, 0.01);
    assert_eq!(broker.sell(1.1).unwrap(), 0.0);
    assert_eq!(symmetric_return(1234.5, 1234.5).unwrap(), 0.0);
}

/// Invalid rates fail fast and leave the broker as it was.
#[test]
fn invalid_rate_rejected_without_mutation() {
    let mut broker = broker(2000.0, 0.01);
    broker.buy(1.2).unwrap();
    let account = *broker.account();
    let previous = broker.previous_balance();

    for rate in [0.0, -1.2, f64::NAN, f64::NEG_INFINITY] {
        assert!(matches!(broker.sell(rate), Err(FxError::InvalidRate(_))));
    }

    assert_eq!(*broker.account(), account);
    assert_eq!(broker.previous_balance(), previous);
    assert_eq!(broker.order_number(), 1);
}

/// An account holding both currencies violates the single-position rule.
#[test]
fn split_position_is_invalid_state() {
    let result = Broker::with_account(Account::from_balances(500.0, 10.0), 0.01);
    assert!(matches!(result, Err(FxError::InvalidState(_))));
}
