use flipbot::search::TimeBudget;
use std::time::Duration;

fn secs(d: Duration) -> f64 { d.as_secs_f64() }

#[test]
fn allotment_tracks_remaining_time_and_resets_every_k_moves() {
    let mut b = TimeBudget::new(Duration::from_secs(3), 3, Duration::from_millis(50));
    assert!((secs(b.allotment()) - 0.95).abs() < 1e-6);

    b.end_turn(Duration::from_millis(500));
    assert_eq!(b.turns_remaining(), 2);
    assert!((secs(b.allotment()) - 1.2).abs() < 1e-6);

    b.end_turn(Duration::from_secs(2));
    assert_eq!(b.turns_remaining(), 1);
    assert!((secs(b.allotment()) - 0.45).abs() < 1e-6);

    // Third move closes the round whatever it cost.
    b.end_turn(Duration::from_secs(9));
    assert_eq!(b.turns_remaining(), 3);
    assert!((b.time_remaining() - 3.0).abs() < 1e-9);
    assert!((secs(b.allotment()) - 0.95).abs() < 1e-6);
}

#[test]
fn allotments_over_a_round_sum_to_the_pool_less_one_margin() {
    let pool = 2.0;
    let margin = 0.05;
    let k = 4;
    let mut b = TimeBudget::new(Duration::from_secs_f64(pool), k, Duration::from_secs_f64(margin));
    for round in 0..3 {
        let mut sum = 0.0;
        for _ in 0..k {
            let a = b.allotment();
            sum += secs(a);
            b.end_turn(a);
        }
        assert!((sum - (pool - margin)).abs() < 1e-6, "round {round}: sum {sum}");
        assert_eq!(b.turns_remaining(), k);
    }
}

#[test]
fn saved_time_carries_to_later_moves_in_the_round() {
    let mut b = TimeBudget::new(Duration::from_secs(4), 4, Duration::ZERO);
    b.end_turn(Duration::ZERO);
    assert!((secs(b.allotment()) - 4.0 / 3.0).abs() < 1e-6);
}

#[test]
fn k_of_one_resets_every_move() {
    let mut b = TimeBudget::new(Duration::from_secs(1), 1, Duration::ZERO);
    for _ in 0..5 {
        assert!((secs(b.allotment()) - 1.0).abs() < 1e-9);
        b.end_turn(Duration::from_millis(700));
    }
}
