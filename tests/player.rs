use flipbot::book::OpeningBook;
use flipbot::config::{ConfigError, PlayerConfig};
use flipbot::search::Algorithm;
use flipbot::{Color, Move, MoveSource, Player, PlayerError, Position};
use std::time::{Duration, Instant};

fn quick_config() -> PlayerConfig {
    PlayerConfig { time_per_k_turns: 0.5, k: 1, safety_margin: 0.05, ..PlayerConfig::default() }
}

#[test]
fn single_legal_move_skips_book_and_search() {
    let pos = Position::from_rows(
        ["XO......", "........", "........", "........", "........", "........", "........", "........"],
        Color::Black,
    ).unwrap();
    let legal = pos.possible_moves();
    assert_eq!(legal, vec![Move::new(0, 2)]);

    let mut book = OpeningBook::new();
    book.insert(pos.grid(), Move::new(7, 7));
    let mut player = Player::with_book(Color::Black, quick_config(), book);
    assert_eq!(player.choose_move(&pos, &legal).unwrap(), Move::new(0, 2));
    assert_eq!(player.last_source(), Some(MoveSource::Forced));
    assert_eq!(player.stats().book_hits, 0);
    assert_eq!(player.stats().nodes, 0);
}

#[test]
fn book_hit_on_startpos_skips_search() {
    let pos = Position::startpos();
    let legal = pos.possible_moves();
    let mut book = OpeningBook::new();
    book.insert(pos.grid(), Move::new(2, 4));
    let mut player = Player::with_book(Color::Black, quick_config(), book);

    assert_eq!(player.choose_move(&pos, &legal).unwrap(), Move::new(2, 4));
    assert_eq!(player.last_source(), Some(MoveSource::Book));
    assert_eq!(player.stats().book_hits, 1);
    assert_eq!(player.stats().nodes, 0);

    player.book_mut().remove(pos.grid());
    let t0 = Instant::now();
    let mv = player.choose_move(&pos, &legal).unwrap();
    let elapsed = t0.elapsed();
    assert!(legal.contains(&mv), "{mv} is not legal");
    assert!(matches!(player.last_source(), Some(MoveSource::Search { .. })));
    assert!(elapsed < Duration::from_millis(450) + Duration::from_millis(250), "took {elapsed:?}");
}

#[test]
fn both_algorithms_choose_legal_moves() {
    for algorithm in [Algorithm::Minimax, Algorithm::AlphaBeta] {
        let cfg = PlayerConfig { algorithm, max_depth: Some(3), time_per_k_turns: 30.0, ..PlayerConfig::default() };
        let mut player = Player::new(Color::Black, cfg);
        let pos = Position::startpos();
        let legal = pos.possible_moves();
        let mv = player.choose_move(&pos, &legal).unwrap();
        assert!(legal.contains(&mv));
        assert_eq!(player.last_source(), Some(MoveSource::Search { depth: 3 }));
    }
}

#[test]
fn empty_legal_list_is_an_error() {
    let mut player = Player::new(Color::Black, quick_config());
    let r = player.choose_move(&Position::startpos(), &[]);
    assert!(matches!(r, Err(PlayerError::NoLegalMoves)));
}

#[test]
fn choose_move_leaves_bonus_table_alone() {
    let cfg = PlayerConfig { max_depth: Some(2), time_per_k_turns: 30.0, ..PlayerConfig::default() };
    let mut player = Player::new(Color::Black, cfg);
    let before = player.bonus_table().clone();
    let pos = Position::startpos();
    player.choose_move(&pos, &pos.possible_moves()).unwrap();
    assert_eq!(player.bonus_table(), &before);
}

#[test]
fn every_path_books_time() {
    let cfg = PlayerConfig { k: 3, time_per_k_turns: 3.0, max_depth: Some(1), ..PlayerConfig::default() };
    let mut book = OpeningBook::new();
    book.insert(Position::startpos().grid(), Move::new(2, 4));
    let mut player = Player::with_book(Color::Black, cfg, book);
    let pos = Position::startpos();
    let legal = pos.possible_moves();
    player.choose_move(&pos, &legal).unwrap();
    assert_eq!(player.budget().turns_remaining(), 2);
    player.choose_move(&pos, &legal[..1]).unwrap();
    assert_eq!(player.budget().turns_remaining(), 1);
    player.choose_move(&pos, &legal).unwrap();
    assert_eq!(player.budget().turns_remaining(), 3);
}

#[test]
fn loads_book_from_config_corpus() {
    let path = std::env::temp_dir().join(format!("flipbot_corpus_{}.gam", std::process::id()));
    std::fs::write(&path, "+f5-d6+c3-d3+c4-f4\n+f5-d6+c3-d3+c4-f4\n+f5-f6+e6-f4\n").unwrap();
    let cfg = PlayerConfig { book: Some(path.clone()), ..quick_config() };
    let player = Player::from_config(Color::Black, cfg);
    std::fs::remove_file(&path).ok();
    let mut player = player.unwrap();
    let pos = Position::startpos();
    let mv = player.choose_move(&pos, &pos.possible_moves()).unwrap();
    assert_eq!(mv, Move::from_algebraic("f5").unwrap());
    assert_eq!(player.last_source(), Some(MoveSource::Book));
}

#[test]
fn illegal_book_move_falls_through_to_search() {
    let pos = Position::startpos();
    let legal = pos.possible_moves();
    let mut book = OpeningBook::new();
    book.insert(pos.grid(), Move::new(0, 0));
    let cfg = PlayerConfig { max_depth: Some(2), time_per_k_turns: 30.0, ..PlayerConfig::default() };
    let mut player = Player::with_book(Color::Black, cfg, book);

    let mv = player.choose_move(&pos, &legal).unwrap();
    assert!(legal.contains(&mv), "{mv} is not legal");
    assert_eq!(player.last_source(), Some(MoveSource::Search { depth: 2 }));
    assert_eq!(player.stats().book_hits, 0);
}

#[test]
fn from_config_rejects_out_of_range_clock() {
    for time_per_k_turns in [1e20, -1.0, f64::NAN] {
        let cfg = PlayerConfig { time_per_k_turns, ..PlayerConfig::default() };
        let r = Player::from_config(Color::Black, cfg);
        assert!(matches!(r, Err(ConfigError::Invalid(_))), "{time_per_k_turns} accepted");
    }
}

#[test]
fn unvalidated_clock_values_do_not_panic() {
    let pos = Position::startpos();
    let legal = pos.possible_moves();

    let huge = PlayerConfig { time_per_k_turns: 1e20, max_depth: Some(1), ..PlayerConfig::default() };
    let mut player = Player::new(Color::Black, huge);
    assert!(legal.contains(&player.choose_move(&pos, &legal).unwrap()));

    let negative = PlayerConfig { time_per_k_turns: -1.0, ..PlayerConfig::default() };
    let mut player = Player::new(Color::Black, negative);
    assert!(legal.contains(&player.choose_move(&pos, &legal).unwrap()));
}
